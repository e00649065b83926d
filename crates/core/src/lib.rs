//! Domain types and rules for the character registry.
//!
//! Nothing in this crate performs I/O; storage lives in `roster_db` and the
//! HTTP surface in `roster_api`.

pub mod character;
pub mod error;
pub mod pattern;
pub mod types;
pub mod validation;
