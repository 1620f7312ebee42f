use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillFrequency {
    Weekly,
    Monthly,
    Yearly,
}

impl BillFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillFrequency::Weekly => "weekly",
            BillFrequency::Monthly => "monthly",
            BillFrequency::Yearly => "yearly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "weekly" => Some(BillFrequency::Weekly),
            "monthly" => Some(BillFrequency::Monthly),
            "yearly" => Some(BillFrequency::Yearly),
            _ => None,
        }
    }
}

impl Default for BillFrequency {
    fn default() -> Self {
        BillFrequency::Monthly
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Bill {
    pub id: i64,
    pub category_id: Option<i64>,
    pub name: String,
    pub amount_cents: i64,
    pub due_date: String,
    pub frequency: BillFrequency,
    pub auto_pay: bool,
    pub notes: Option<String>,
    pub active: bool,
    pub created_at: String,
    pub category_name: Option<String>,
    pub category_color: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewBill {
    pub category_id: Option<i64>,
    pub name: String,
    pub amount_cents: i64,
    pub due_date: String,
    pub frequency: BillFrequency,
    pub auto_pay: bool,
    pub notes: Option<String>,
}
