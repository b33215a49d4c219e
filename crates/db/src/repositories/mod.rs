//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Methods that take part in the submission transaction accept any
//! `PgExecutor` so they run against a pool or an open transaction.

pub mod customer_repo;
pub mod order_counter_repo;
pub mod order_form_repo;
pub mod order_repo;

pub use customer_repo::CustomerRepo;
pub use order_counter_repo::{OrderCounterRepo, PgOrderCounter};
pub use order_form_repo::OrderFormRepo;
pub use order_repo::OrderRepo;
