//! Category icon keys
//!
//! Icons cross the persistence boundary as plain string keys. The engine only
//! ever holds the key; turning it into something drawable is the front end's
//! job.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Closed set of icons a category can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IconKey {
    #[default]
    Wallet,
    ShoppingCart,
    Home,
    Car,
    Utensils,
    Heart,
    Film,
    Plane,
    GraduationCap,
    Gift,
    Zap,
    Smartphone,
    PiggyBank,
    Shirt,
    Dumbbell,
    Coffee,
}

impl IconKey {
    pub fn all() -> &'static [Self] {
        &[
            Self::Wallet,
            Self::ShoppingCart,
            Self::Home,
            Self::Car,
            Self::Utensils,
            Self::Heart,
            Self::Film,
            Self::Plane,
            Self::GraduationCap,
            Self::Gift,
            Self::Zap,
            Self::Smartphone,
            Self::PiggyBank,
            Self::Shirt,
            Self::Dumbbell,
            Self::Coffee,
        ]
    }

    /// The persisted key
    pub fn key(&self) -> &'static str {
        match self {
            Self::Wallet => "wallet",
            Self::ShoppingCart => "shopping-cart",
            Self::Home => "home",
            Self::Car => "car",
            Self::Utensils => "utensils",
            Self::Heart => "heart",
            Self::Film => "film",
            Self::Plane => "plane",
            Self::GraduationCap => "graduation-cap",
            Self::Gift => "gift",
            Self::Zap => "zap",
            Self::Smartphone => "smartphone",
            Self::PiggyBank => "piggy-bank",
            Self::Shirt => "shirt",
            Self::Dumbbell => "dumbbell",
            Self::Coffee => "coffee",
        }
    }

    /// Resolve a persisted key; unknown keys fall back to the default icon
    pub fn from_key(key: &str) -> Self {
        let normalized = key.trim().to_lowercase().replace(['_', ' '], "-");
        Self::all()
            .iter()
            .copied()
            .find(|icon| icon.key() == normalized)
            .unwrap_or_default()
    }
}

impl fmt::Display for IconKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for IconKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for IconKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Ok(Self::from_key(&key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keys_resolve() {
        for icon in IconKey::all() {
            assert_eq!(IconKey::from_key(icon.key()), *icon);
        }
        assert_eq!(IconKey::from_key("Shopping_Cart"), IconKey::ShoppingCart);
    }

    #[test]
    fn test_unknown_key_falls_back() {
        assert_eq!(IconKey::from_key("unicorn"), IconKey::Wallet);
        assert_eq!(IconKey::from_key(""), IconKey::Wallet);
    }

    #[test]
    fn test_deserialize_never_fails_on_unknown_key() {
        let icon: IconKey = serde_json::from_str("\"laser-sword\"").unwrap();
        assert_eq!(icon, IconKey::default());

        let icon: IconKey = serde_json::from_str("\"piggy-bank\"").unwrap();
        assert_eq!(icon, IconKey::PiggyBank);
        assert_eq!(serde_json::to_string(&icon).unwrap(), "\"piggy-bank\"");
    }
}
