//! Domain layer - entities, repository contracts and errors

pub mod customer;
mod error;

pub use customer::{Customer, CustomerRepository};
pub use error::DomainError;
