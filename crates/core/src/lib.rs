//! Order-intake domain for the custom treat order form.
//!
//! Everything in this crate is pure: the step graph, the in-memory form
//! representation, order-number formatting and the submission rules. The
//! `sugarloaf-db` crate owns persistence.

pub mod catalog;
pub mod error;
pub mod form;
pub mod form_steps;
pub mod order_number;
pub mod submission;
pub mod types;
