//! relq Value - the value vocabulary shared by every relq component
//!
//! This crate provides the scalar `Value` type carried in records, and the
//! `DataType` used to describe columns. It is kept apart from the SQL crate so
//! that a protocol layer can serialize results without depending on the
//! parser or interpreter.

pub mod types;

pub use types::{DataType, Value};
