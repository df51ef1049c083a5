//! # Application Layer
//!
//! Engine services and their error types. Services are pure and
//! synchronous: all data arrives already materialized, and each invocation
//! is independently computable and safely parallelizable across orders and
//! markets.

pub mod error;
pub mod services;

pub use error::{EngineError, EngineResult};
