use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtType {
    CreditCard,
    AutoLoan,
    Mortgage,
    StudentLoan,
    PersonalLoan,
    Other,
}

impl DebtType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebtType::CreditCard => "credit_card",
            DebtType::AutoLoan => "auto_loan",
            DebtType::Mortgage => "mortgage",
            DebtType::StudentLoan => "student_loan",
            DebtType::PersonalLoan => "personal_loan",
            DebtType::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "credit_card" => Some(DebtType::CreditCard),
            "auto_loan" => Some(DebtType::AutoLoan),
            "mortgage" => Some(DebtType::Mortgage),
            "student_loan" => Some(DebtType::StudentLoan),
            "personal_loan" => Some(DebtType::PersonalLoan),
            "other" => Some(DebtType::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Debt {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub debt_type: DebtType,
    pub balance_cents: i64,
    /// Annual rate in percent.
    pub interest_rate: f64,
    pub min_payment_cents: i64,
    pub due_date: Option<String>,
    pub notes: Option<String>,
    pub active: bool,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewDebt {
    pub name: String,
    pub debt_type: DebtType,
    pub balance_cents: i64,
    pub interest_rate: f64,
    pub min_payment_cents: i64,
    pub due_date: Option<String>,
    pub notes: Option<String>,
}
