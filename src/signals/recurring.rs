//! Recurring obligations
//!
//! Recurring income, bills and debt payments, reduced to either a
//! period-general monthly equivalent or the amount that actually falls due in
//! a given month.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetMonth, Money};

/// What a recurring item does to cash flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurringKind {
    Income,
    Expense,
    Debt,
}

/// How often a recurring item falls due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Weekly,
    #[serde(alias = "biweekly")]
    BiWeekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    /// Convert one occurrence's amount into its average per month
    pub fn monthly_equivalent(&self, amount: Money) -> Money {
        match self {
            Self::Weekly => amount.scale(52, 12),
            Self::BiWeekly => amount.scale(26, 12),
            Self::Monthly => amount,
            Self::Quarterly => amount.scale(1, 3),
            Self::Yearly => amount.scale(1, 12),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Weekly => "Weekly",
            Self::BiWeekly => "Bi-weekly",
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::Yearly => "Yearly",
        };
        write!(f, "{}", s)
    }
}

/// A single recurring income or obligation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringItem {
    pub name: String,
    pub amount: Money,
    pub kind: RecurringKind,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl RecurringItem {
    pub fn new(
        name: impl Into<String>,
        amount: Money,
        kind: RecurringKind,
        frequency: Frequency,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            kind,
            frequency,
            start_date,
            end_date: None,
        }
    }

    pub fn ending(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Whether the item is running on `date`
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        date >= self.start_date && self.end_date.map_or(true, |end| date <= end)
    }

    pub fn validate(&self) -> BudgetResult<()> {
        if self.amount.is_negative() {
            return Err(BudgetError::Validation(format!(
                "Recurring item '{}' has a negative amount",
                self.name
            )));
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(BudgetError::Validation(format!(
                    "Recurring item '{}' ends before it starts",
                    self.name
                )));
            }
        }
        Ok(())
    }

    /// Dates on which this item falls due inside `month`
    pub fn occurrences_in(&self, month: BudgetMonth) -> Vec<NaiveDate> {
        let first = month.first_day();
        let last = match self.end_date {
            Some(end) if end < month.last_day() => end,
            _ => month.last_day(),
        };
        if last < first || last < self.start_date {
            return Vec::new();
        }

        match self.frequency {
            Frequency::Weekly => self.stepped_dates(7, first, last),
            Frequency::BiWeekly => self.stepped_dates(14, first, last),
            Frequency::Monthly => self.anniversary_in(month, 1, last),
            Frequency::Quarterly => self.anniversary_in(month, 3, last),
            Frequency::Yearly => self.anniversary_in(month, 12, last),
        }
    }

    fn stepped_dates(&self, step: i64, first: NaiveDate, last: NaiveDate) -> Vec<NaiveDate> {
        let mut date = if self.start_date >= first {
            self.start_date
        } else {
            let behind = (first - self.start_date).num_days();
            let steps = (behind + step - 1) / step;
            self.start_date + Duration::days(steps * step)
        };

        let mut dates = Vec::new();
        while date <= last {
            dates.push(date);
            date += Duration::days(step);
        }
        dates
    }

    fn anniversary_in(&self, month: BudgetMonth, every: i32, last: NaiveDate) -> Vec<NaiveDate> {
        let start = BudgetMonth::from_date(self.start_date);
        let elapsed =
            (month.year() - start.year()) * 12 + month.month() as i32 - start.month() as i32;
        if elapsed < 0 || elapsed % every != 0 {
            return Vec::new();
        }

        let day = self.start_date.day().min(month.days());
        match NaiveDate::from_ymd_opt(month.year(), month.month(), day) {
            Some(date) if date >= self.start_date && date <= last => vec![date],
            _ => Vec::new(),
        }
    }

    /// Total amount falling due inside `month`
    pub fn amount_in(&self, month: BudgetMonth) -> Money {
        let count = self.occurrences_in(month).len() as i64;
        Money::from_cents(self.amount.cents().saturating_mul(count))
    }
}

/// Period-general recurring figures, plus the items they came from when known
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringSnapshot {
    pub monthly_income: Money,
    /// All outgoing recurring amounts, debt payments included
    pub monthly_expenses: Money,
    /// The debt-labelled share of `monthly_expenses`
    pub monthly_debt: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<RecurringItem>>,
}

impl RecurringSnapshot {
    /// Summarize the items active on `as_of` as monthly equivalents
    pub fn from_items(items: Vec<RecurringItem>, as_of: NaiveDate) -> Self {
        let mut snapshot = Self::default();

        for item in items.iter().filter(|i| i.is_active_on(as_of)) {
            let monthly = item.frequency.monthly_equivalent(item.amount);
            match item.kind {
                RecurringKind::Income => snapshot.monthly_income += monthly,
                RecurringKind::Expense => snapshot.monthly_expenses += monthly,
                RecurringKind::Debt => {
                    snapshot.monthly_expenses += monthly;
                    snapshot.monthly_debt += monthly;
                }
            }
        }

        snapshot.items = Some(items);
        snapshot
    }

    /// Items available for month-specific projection, if any
    pub fn projectable_items(&self) -> Option<&[RecurringItem]> {
        self.items.as_deref().filter(|items| !items.is_empty())
    }
}

/// Month-specific income and expense calculation over recurring items
pub trait MonthProjector: Send + Sync {
    fn month_income(&self, month: BudgetMonth, items: &[RecurringItem]) -> BudgetResult<Money>;

    /// Non-debt obligations only; debt payments are tracked separately
    fn month_expenses(&self, month: BudgetMonth, items: &[RecurringItem]) -> BudgetResult<Money>;
}

/// Sums the occurrences that actually fall inside the month
#[derive(Debug, Clone, Copy, Default)]
pub struct OccurrenceProjector;

impl OccurrenceProjector {
    fn total(
        month: BudgetMonth,
        items: &[RecurringItem],
        kind: RecurringKind,
    ) -> BudgetResult<Money> {
        let mut total = Money::zero();
        for item in items.iter().filter(|i| i.kind == kind) {
            item.validate()?;
            total += item.amount_in(month);
        }
        Ok(total)
    }
}

impl MonthProjector for OccurrenceProjector {
    fn month_income(&self, month: BudgetMonth, items: &[RecurringItem]) -> BudgetResult<Money> {
        Self::total(month, items, RecurringKind::Income)
    }

    fn month_expenses(&self, month: BudgetMonth, items: &[RecurringItem]) -> BudgetResult<Money> {
        Self::total(month, items, RecurringKind::Expense)
    }
}
