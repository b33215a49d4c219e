//! Row models and DTOs, one module per table.

pub mod customer;
pub mod order;
pub mod order_form;
