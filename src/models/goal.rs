use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalCategory {
    EmergencyFund,
    Vacation,
    HomePurchase,
    Retirement,
    Education,
    Other,
}

impl GoalCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalCategory::EmergencyFund => "emergency_fund",
            GoalCategory::Vacation => "vacation",
            GoalCategory::HomePurchase => "home_purchase",
            GoalCategory::Retirement => "retirement",
            GoalCategory::Education => "education",
            GoalCategory::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "emergency_fund" => Some(GoalCategory::EmergencyFund),
            "vacation" => Some(GoalCategory::Vacation),
            "home_purchase" => Some(GoalCategory::HomePurchase),
            "retirement" => Some(GoalCategory::Retirement),
            "education" => Some(GoalCategory::Education),
            "other" => Some(GoalCategory::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalPriority {
    Low,
    Medium,
    High,
}

impl GoalPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalPriority::Low => "low",
            GoalPriority::Medium => "medium",
            GoalPriority::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(GoalPriority::Low),
            "medium" => Some(GoalPriority::Medium),
            "high" => Some(GoalPriority::High),
            _ => None,
        }
    }
}

impl Default for GoalPriority {
    fn default() -> Self {
        GoalPriority::Medium
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Goal {
    pub id: i64,
    pub name: String,
    pub category: GoalCategory,
    pub target_amount_cents: i64,
    pub current_amount_cents: i64,
    pub target_date: Option<String>,
    pub priority: GoalPriority,
    pub description: Option<String>,
    pub achieved: bool,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewGoal {
    pub name: String,
    pub category: GoalCategory,
    pub target_amount_cents: i64,
    pub current_amount_cents: i64,
    pub target_date: Option<String>,
    pub priority: GoalPriority,
    pub description: Option<String>,
}
