pub mod config;
pub mod domain;
pub mod import;
pub mod models;
pub mod modules;
pub mod services;

pub use domain::DomainError;
pub use models::{ClassificationForest, ClassificationTree};
