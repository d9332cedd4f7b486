//! Domain layer - Pure business abstractions
//!
//! This layer contains NO I/O. Only the error taxonomy shared by the
//! builders, the import readers and the classifier.

pub mod errors;

pub use errors::DomainError;
