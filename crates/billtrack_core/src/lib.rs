//! Core domain logic for BillTrack.
//! This crate is the single source of truth for tracker invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod schedule;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::payment::{
    parse_amount, parse_due_date, Cadence, OwnerId, PaymentId, TrackedPayment, TrackerIcon,
    ValidationError,
};
pub use model::preset::{
    category_preset, service_template, CategoryPreset, ServiceTemplate, CATEGORY_PRESETS,
    SERVICE_TEMPLATES,
};
pub use model::settings::{ReminderLead, ReminderSettings};
pub use repo::payment_repo::{PaymentRepository, RepoError, RepoResult, SqlitePaymentRepository};
pub use repo::settings_repo::{SettingsRepository, SqliteSettingsRepository};
pub use schedule::analyzer::{
    bucketize, days_until_due, due_label, due_within_window, monthly_spend, next_n_due,
    reminders_due, summarize, yearly_spend_projection, Buckets, DueStatus, ReminderAlert,
    ScheduledPayment, SpendSummary,
};
pub use schedule::overview::{categories, filter_and_sort, OverviewQuery, TrackerSort};
pub use service::tracker_service::{
    Dashboard, NewTracker, Overview, ReminderCenter, ServiceError, ServiceResult,
    TrackerService, TrackerUpdate,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
