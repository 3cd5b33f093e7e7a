mod account;
mod catalog;

pub use self::account::AccountService;
pub use self::catalog::{CatalogController, CatalogControllerDeps};
