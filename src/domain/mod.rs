//! # Domain Layer
//!
//! Entities, value objects, and validation errors for the comparable
//! selection engine. Everything here is immutable, serde-friendly, and
//! free of I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;
