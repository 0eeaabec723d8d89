//! Account extract models and anchor-based balance reconstruction.

pub mod balance;
pub mod record;
pub mod series;
pub mod transaction;
pub mod window;

pub use balance::Balance;
pub use record::{AccountIdentity, AccountRecord};
pub use series::BalanceSeries;
pub use transaction::{Transaction, MAX_ABS_AMOUNT};
pub use window::DateWindow;
