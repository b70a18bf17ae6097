//! Domain types and pure validation logic for the tasksense platform.
//!
//! This crate has zero internal dependencies so it can be used by the
//! repository layer, the enrichment adapters, and the API crate alike.

pub mod enrichment;
pub mod error;
pub mod todo;
pub mod types;
pub mod validation;
