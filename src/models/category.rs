//! Budget category model
//!
//! Categories are long-lived and independent of any month. Name, icon and
//! color can change; the store-assigned id never does.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::icon::IconKey;
use super::ids::CategoryId;

const MAX_NAME_LEN: usize = 50;

/// A budget category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub icon: IconKey,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    "#64748b".to_string()
}

impl BudgetCategory {
    /// Apply a patch; fields left `None` are untouched
    pub fn apply(&mut self, patch: &CategoryPatch) {
        if let Some(name) = &patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if let Some(color) = &patch.color {
            self.color = color.trim().to_string();
        }
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        validate_name(&self.name)?;
        validate_color(&self.color)
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Data for a category that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub icon: IconKey,
    #[serde(default = "default_color")]
    pub color: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: IconKey::default(),
            color: default_color(),
        }
    }

    pub fn with_icon(mut self, icon: IconKey) -> Self {
        self.icon = icon;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Turn into a stored category under the given id
    pub fn into_category(self, id: CategoryId) -> BudgetCategory {
        BudgetCategory {
            id,
            name: self.name.trim().to_string(),
            icon: self.icon,
            color: self.color.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        validate_name(&self.name)?;
        validate_color(&self.color)
    }
}

/// Partial update for a category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CategoryPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.icon.is_none() && self.color.is_none()
    }
}

fn validate_name(name: &str) -> Result<(), CategoryValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CategoryValidationError::EmptyName);
    }
    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(CategoryValidationError::NameTooLong(len));
    }
    Ok(())
}

fn validate_color(color: &str) -> Result<(), CategoryValidationError> {
    let color = color.trim();
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(CategoryValidationError::InvalidColor(color.to_string()))
    }
}

/// The category set used for first-run seeding and as the render fallback
/// when seeding fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultCategory {
    Housing,
    Groceries,
    Transportation,
    Utilities,
    DiningOut,
    Entertainment,
    Health,
    Shopping,
}

impl DefaultCategory {
    pub fn all() -> &'static [Self] {
        &[
            Self::Housing,
            Self::Groceries,
            Self::Transportation,
            Self::Utilities,
            Self::DiningOut,
            Self::Entertainment,
            Self::Health,
            Self::Shopping,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Housing => "Housing",
            Self::Groceries => "Groceries",
            Self::Transportation => "Transportation",
            Self::Utilities => "Utilities",
            Self::DiningOut => "Dining Out",
            Self::Entertainment => "Entertainment",
            Self::Health => "Health",
            Self::Shopping => "Shopping",
        }
    }

    pub fn icon(&self) -> IconKey {
        match self {
            Self::Housing => IconKey::Home,
            Self::Groceries => IconKey::ShoppingCart,
            Self::Transportation => IconKey::Car,
            Self::Utilities => IconKey::Zap,
            Self::DiningOut => IconKey::Utensils,
            Self::Entertainment => IconKey::Film,
            Self::Health => IconKey::Heart,
            Self::Shopping => IconKey::Shirt,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Housing => "#6366f1",
            Self::Groceries => "#22c55e",
            Self::Transportation => "#f59e0b",
            Self::Utilities => "#0ea5e9",
            Self::DiningOut => "#ef4444",
            Self::Entertainment => "#a855f7",
            Self::Health => "#ec4899",
            Self::Shopping => "#14b8a6",
        }
    }

    pub fn to_new_category(&self) -> NewCategory {
        NewCategory::new(self.name())
            .with_icon(self.icon())
            .with_color(self.color())
    }

    /// The full default set with synthetic ids 1..=n
    pub fn fallback_set() -> Vec<BudgetCategory> {
        Self::all()
            .iter()
            .enumerate()
            .map(|(i, default)| {
                default
                    .to_new_category()
                    .into_category(CategoryId::new(i as i64 + 1))
            })
            .collect()
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidColor(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max {})", len, MAX_NAME_LEN)
            }
            Self::InvalidColor(c) => write!(f, "Category color must be #RRGGBB, got '{}'", c),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
