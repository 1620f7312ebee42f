use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TemplateCategory {
    pub name: &'static str,
    pub percentage: u32,
    pub color: &'static str,
}

/// A named split of a total monthly budget across categories.
#[derive(Debug, Clone, Serialize)]
pub struct BudgetTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub categories: &'static [TemplateCategory],
}

/// Amount a template assigns to one of its categories.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateAllocation {
    pub category: &'static str,
    pub percentage: u32,
    pub amount_cents: i64,
}

const fn cat(name: &'static str, percentage: u32, color: &'static str) -> TemplateCategory {
    TemplateCategory {
        name,
        percentage,
        color,
    }
}

static TEMPLATES: &[BudgetTemplate] = &[
    BudgetTemplate {
        id: "basic-budget",
        name: "Basic Monthly Budget",
        description: "A simple budget covering essential expenses",
        categories: &[
            cat("Housing", 30, "#ff6b6b"),
            cat("Food & Dining", 15, "#4ecdc4"),
            cat("Transportation", 12, "#45b7d1"),
            cat("Bills & Utilities", 8, "#feca57"),
            cat("Healthcare", 5, "#ff9ff3"),
            cat("Entertainment", 10, "#96ceb4"),
            cat("Shopping", 8, "#a29bfe"),
            cat("Other Expenses", 12, "#7f8c8d"),
        ],
    },
    BudgetTemplate {
        id: "50-30-20-budget",
        name: "50/30/20 Budget",
        description: "50% needs, 30% wants, 20% savings and debt repayment",
        categories: &[
            cat("Housing", 25, "#ff6b6b"),
            cat("Food & Dining", 12, "#4ecdc4"),
            cat("Transportation", 8, "#45b7d1"),
            cat("Bills & Utilities", 5, "#feca57"),
            cat("Entertainment", 15, "#96ceb4"),
            cat("Shopping", 10, "#a29bfe"),
            cat("Travel", 5, "#e67e22"),
            cat("Savings", 15, "#00d2d3"),
            cat("Debt Payment", 5, "#ff9f43"),
        ],
    },
    BudgetTemplate {
        id: "zero-based-budget",
        name: "Zero-Based Budget",
        description: "Every dollar is allocated to a specific purpose",
        categories: &[
            cat("Housing", 28, "#ff6b6b"),
            cat("Food & Dining", 14, "#4ecdc4"),
            cat("Transportation", 10, "#45b7d1"),
            cat("Bills & Utilities", 8, "#feca57"),
            cat("Healthcare", 4, "#ff9ff3"),
            cat("Entertainment", 8, "#96ceb4"),
            cat("Shopping", 5, "#a29bfe"),
            cat("Insurance", 3, "#fdcb6e"),
            cat("Emergency Fund", 10, "#e17055"),
            cat("Savings & Investments", 10, "#00d2d3"),
        ],
    },
    BudgetTemplate {
        id: "student-budget",
        name: "Student Budget",
        description: "Budget tailored for students with limited income",
        categories: &[
            cat("Housing", 40, "#ff6b6b"),
            cat("Food & Dining", 20, "#4ecdc4"),
            cat("Transportation", 10, "#45b7d1"),
            cat("Education", 15, "#2ecc71"),
            cat("Entertainment", 8, "#96ceb4"),
            cat("Healthcare", 4, "#ff9ff3"),
            cat("Emergency Fund", 3, "#e17055"),
        ],
    },
];

pub fn all() -> &'static [BudgetTemplate] {
    TEMPLATES
}

pub fn find(id: &str) -> Option<&'static BudgetTemplate> {
    TEMPLATES.iter().find(|t| t.id == id)
}

impl BudgetTemplate {
    /// Split `total_cents` by the template percentages, rounding each share
    /// to the nearest cent.
    pub fn allocate(&self, total_cents: i64) -> Vec<TemplateAllocation> {
        self.categories
            .iter()
            .map(|c| TemplateAllocation {
                category: c.name,
                percentage: c.percentage,
                amount_cents: (total_cents as f64 * c.percentage as f64 / 100.0).round() as i64,
            })
            .collect()
    }
}
