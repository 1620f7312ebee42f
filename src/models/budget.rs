use serde::{Deserialize, Serialize};

/// Recurrence unit a budget amount applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Weekly,
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetPeriod::Weekly => "weekly",
            BudgetPeriod::Monthly => "monthly",
            BudgetPeriod::Yearly => "yearly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "weekly" => Some(BudgetPeriod::Weekly),
            "monthly" => Some(BudgetPeriod::Monthly),
            "yearly" => Some(BudgetPeriod::Yearly),
            _ => None,
        }
    }

    /// "Weekly", "Monthly", "Yearly"; used when generating budget names.
    pub fn title(&self) -> &'static str {
        match self {
            BudgetPeriod::Weekly => "Weekly",
            BudgetPeriod::Monthly => "Monthly",
            BudgetPeriod::Yearly => "Yearly",
        }
    }
}

impl std::fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub const DEFAULT_ALERT_THRESHOLD: f64 = 80.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    /// `None` once the category has been deleted.
    pub category_id: Option<i64>,
    pub name: String,
    pub amount_cents: i64,
    pub period: BudgetPeriod,
    pub start_date: String,
    pub end_date: Option<String>,
    pub description: String,
    pub is_active: bool,
    /// Percent of the amount at which the budget turns to "warning".
    pub alert_threshold: f64,
    pub notes: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetWithCategory {
    #[serde(flatten)]
    pub budget: Budget,
    pub category_name: Option<String>,
    pub category_color: Option<String>,
    pub category_icon: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewBudget {
    pub category_id: i64,
    pub name: String,
    pub amount_cents: i64,
    pub period: BudgetPeriod,
    pub start_date: String,
    pub end_date: Option<String>,
    pub description: String,
    pub is_active: bool,
    pub alert_threshold: f64,
    pub notes: String,
}

/// Partial update. `None` keeps the stored value, except for `end_date`
/// which is always overwritten (clearing it makes the budget open-ended).
#[derive(Debug, Clone, Default)]
pub struct BudgetUpdate {
    pub category_id: Option<i64>,
    pub name: Option<String>,
    pub amount_cents: Option<i64>,
    pub period: Option<BudgetPeriod>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub alert_threshold: Option<f64>,
    pub notes: Option<String>,
}
