//! Budget model
//!
//! A budget caps spending for one category over a recurring period. The
//! data layer accepts weekly, monthly, and yearly periods; the CLI only
//! creates monthly ones. At most one budget per category is expected, but
//! that rule lives in the presentation layer, not here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{BudgetId, CategoryId, UserId};
use super::money::Money;

/// The recurrence of a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BudgetPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(format!(
                "unknown period '{}', expected weekly, monthly, or yearly",
                other
            )),
        }
    }
}

/// A spending cap for one category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// Owning user
    pub user_id: UserId,

    /// The capped category; nullable at the store level
    pub category_id: Option<CategoryId>,

    /// Spending limit for the period
    pub amount: Money,

    /// Recurrence of the cap
    #[serde(default)]
    pub period: BudgetPeriod,

    /// When the row was created
    pub created_at: DateTime<Utc>,
}

impl Budget {
    /// Materialize a budget from a creation request
    pub fn from_new(user_id: UserId, new: NewBudget) -> Self {
        Self {
            id: BudgetId::new(),
            user_id,
            category_id: new.category_id,
            amount: new.amount,
            period: new.period,
            created_at: Utc::now(),
        }
    }
}

/// Fields supplied when creating a budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBudget {
    pub category_id: Option<CategoryId>,
    pub amount: Money,
    #[serde(default)]
    pub period: BudgetPeriod,
}

/// A partial update to a budget
#[derive(Debug, Clone, Default, Serialize)]
pub struct BudgetPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<BudgetPeriod>,
}

impl BudgetPatch {
    /// Check whether the patch changes anything
    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.period.is_none()
    }

    /// Apply the patch to a local budget row
    pub fn apply(&self, budget: &mut Budget) {
        if let Some(amount) = self.amount {
            budget.amount = amount;
        }
        if let Some(period) = self.period {
            budget.period = period;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_parse() {
        assert_eq!("monthly".parse::<BudgetPeriod>().unwrap(), BudgetPeriod::Monthly);
        assert_eq!("Weekly".parse::<BudgetPeriod>().unwrap(), BudgetPeriod::Weekly);
        assert!("daily".parse::<BudgetPeriod>().is_err());
    }

    #[test]
    fn test_period_serde() {
        assert_eq!(serde_json::to_string(&BudgetPeriod::Yearly).unwrap(), "\"yearly\"");
        let p: BudgetPeriod = serde_json::from_str("\"monthly\"").unwrap();
        assert_eq!(p, BudgetPeriod::Monthly);
    }

    #[test]
    fn test_from_new() {
        let user = UserId::new();
        let category = CategoryId::new();
        let budget = Budget::from_new(
            user,
            NewBudget {
                category_id: Some(category),
                amount: Money::from_cents(30000),
                period: BudgetPeriod::Monthly,
            },
        );

        assert_eq!(budget.user_id, user);
        assert_eq!(budget.category_id, Some(category));
        assert_eq!(budget.amount.cents(), 30000);
    }

    #[test]
    fn test_patch_apply() {
        let mut budget = Budget::from_new(
            UserId::new(),
            NewBudget {
                category_id: None,
                amount: Money::from_cents(10000),
                period: BudgetPeriod::Monthly,
            },
        );

        let patch = BudgetPatch {
            amount: Some(Money::from_cents(20000)),
            period: None,
        };
        patch.apply(&mut budget);

        assert_eq!(budget.amount.cents(), 20000);
        assert_eq!(budget.period, BudgetPeriod::Monthly);
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(BudgetPatch::default().is_empty());
    }
}
