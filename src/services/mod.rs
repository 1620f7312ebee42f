pub mod budget_analysis;
pub mod budget_status;
pub mod recommendations;
pub mod templates;
