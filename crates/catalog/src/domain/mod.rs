mod alert;
mod filter;
pub mod requests;

pub use self::alert::{Alert, Confirmation};
pub use self::filter::{CategoryFilter, FilterState, StatusFilter};
