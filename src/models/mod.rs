pub mod account;
pub mod bill;
pub mod budget;
pub mod category;
pub mod debt;
pub mod goal;
pub mod spending;
pub mod transaction;

pub use account::{Account, AccountType, NewAccount};
pub use bill::{Bill, BillFrequency, NewBill};
pub use budget::{Budget, BudgetPeriod, BudgetUpdate, BudgetWithCategory, NewBudget};
pub use category::{Category, CategoryType, CategoryWithSpending};
pub use debt::{Debt, DebtType, NewDebt};
pub use goal::{Goal, GoalCategory, GoalPriority, NewGoal};
pub use spending::{
    CategorySpendingPattern, DailySpending, MonthlySpend, MonthlyTrendPoint, WindowTotals,
};
pub use transaction::{NewTransaction, Transaction, TransactionType, TransactionWithRelations};
