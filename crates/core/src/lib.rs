//! `ordering-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, self-validating value objects and the domain error model.

pub mod aggregate;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::AggregateRoot;
pub use error::{DomainError, DomainResult, ValidationError};
pub use id::Id;
pub use value_object::{Address, PositiveNumber, ValueObject};
