//! Domain model for tracked recurring payments.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Own the validation rules every write and read path relies on.
//!
//! # Invariants
//! - Every payment is identified by a stable `PaymentId` and owned by one `OwnerId`.
//! - Deletion is represented by the `is_active` flag, never by row removal.

pub mod payment;
pub mod preset;
pub mod settings;
