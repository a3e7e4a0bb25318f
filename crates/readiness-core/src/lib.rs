//! readiness-core: Quiz model, scoring, and flow control.
//!
//! This crate defines the question/result data model, the weighted scorer,
//! the quiz flow state machine, and the record store trait that the rest of
//! readiness builds on.

pub mod error;
pub mod flow;
pub mod model;
pub mod outcome;
pub mod parser;
pub mod results;
pub mod scoring;
pub mod traits;
