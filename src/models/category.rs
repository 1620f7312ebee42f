use serde::{Deserialize, Serialize};

/// Which kind of transactions a category may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Income,
    Expense,
    Both,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Income => "income",
            CategoryType::Expense => "expense",
            CategoryType::Both => "both",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "income" => Some(CategoryType::Income),
            "expense" => Some(CategoryType::Expense),
            "both" => Some(CategoryType::Both),
            _ => None,
        }
    }

    /// Whether expense transactions (and therefore budgets) belong here.
    pub fn accepts_expenses(&self) -> bool {
        matches!(self, CategoryType::Expense | CategoryType::Both)
    }
}

impl std::fmt::Display for CategoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    pub color: String,
    pub icon: String,
    pub is_default: bool,
    pub created_at: String,
}

/// An expense category annotated with the spending data the budget
/// planner shows next to it.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryWithSpending {
    #[serde(flatten)]
    pub category: Category,
    pub avg_monthly_spending: f64,
    pub months_with_data: i64,
    pub recent_transactions: i64,
    pub has_budget: bool,
    pub current_budget: f64,
}
