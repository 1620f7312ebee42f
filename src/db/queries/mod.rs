pub mod accounts;
pub mod bills;
pub mod budgets;
pub mod categories;
pub mod debts;
pub mod goals;
pub mod spending;
pub mod transactions;
