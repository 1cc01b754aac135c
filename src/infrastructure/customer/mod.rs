//! Customer infrastructure module
//!
//! Repository implementations (in-memory and PostgreSQL) and the cached
//! customer service.

mod in_memory;
mod postgres_repository;
mod service;

pub use in_memory::InMemoryCustomerRepository;
pub use postgres_repository::PostgresCustomerRepository;
pub use service::{CustomerService, CUSTOMER_CACHE};
