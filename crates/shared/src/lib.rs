pub mod abstract_trait;
pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod state;
pub mod utils;
