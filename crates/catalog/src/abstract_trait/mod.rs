mod product;
mod prompt;

pub use self::product::{DynProductRepository, ProductRepositoryTrait};
pub use self::prompt::{ConfirmPromptTrait, MockConfirmPromptTrait};
