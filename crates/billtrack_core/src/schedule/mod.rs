//! Derived views over payment snapshots.
//!
//! # Responsibility
//! - Bucket payments by due date relative to a caller-supplied day.
//! - Aggregate spend and build sorted/filtered list projections.
//!
//! # Invariants
//! - Every function is pure: no I/O, no clock reads, no hidden state.
//! - Inactive payments never contribute to any view.
//! - Input snapshots are validated up front; a failing snapshot produces no output.

pub mod analyzer;
pub mod overview;
