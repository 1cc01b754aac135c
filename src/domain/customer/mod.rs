//! Customer domain - entity and repository contract

mod entity;
mod repository;

pub use entity::{Customer, PLACEHOLDER_PREFIX};
pub use repository::CustomerRepository;

#[cfg(test)]
pub use repository::MockCustomerRepository;
