//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls and analyzer projections into use-case APIs.
//! - Keep CLI callers decoupled from storage details.

pub mod tracker_service;
