mod balance;
mod health_check;

// re-export
pub use balance::*;
pub use health_check::*;
