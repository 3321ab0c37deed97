pub mod compare;
pub mod loan;
