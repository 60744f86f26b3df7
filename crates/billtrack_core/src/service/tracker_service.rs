//! Tracker use-case service.
//!
//! # Responsibility
//! - Provide create/update/soft-delete/list entry points for one owner.
//! - Compose repository snapshots with the schedule analyzer for dashboard,
//!   reminder center and overview projections.
//!
//! # Invariants
//! - Every call takes the owner explicitly; no ambient session state.
//! - Service APIs never bypass repository validation.
//! - Writes are read back so callers see exactly what was stored.
//! - Log lines carry ids and counts only, never names, amounts or notes.

use crate::model::payment::{
    validate_color, Cadence, OwnerId, PaymentId, TrackedPayment, TrackerIcon, ValidationError,
};
use crate::model::preset::{category_preset, ServiceTemplate};
use crate::model::settings::ReminderSettings;
use crate::repo::payment_repo::{PaymentRepository, RepoError, RepoResult};
use crate::repo::settings_repo::SettingsRepository;
use crate::schedule::analyzer::{
    bucketize, due_within_window, monthly_spend, next_n_due, reminders_due, summarize, Buckets,
    ReminderAlert, SpendSummary, DUE_SOON_WINDOW_DAYS,
};
use crate::schedule::overview::{categories, filter_and_sort, OverviewQuery};
use chrono::NaiveDate;
use log::{info, warn};
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Number of trackers listed on the dashboard "next due" card.
pub const DASHBOARD_NEXT_DUE: usize = 4;

/// Service error for tracker use-cases.
#[derive(Debug)]
pub enum ServiceError {
    Validation(ValidationError),
    /// Target tracker does not exist or belongs to another owner.
    TrackerNotFound(PaymentId),
    Repo(RepoError),
    /// Write succeeded but read-back disagrees.
    InconsistentState(&'static str),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::TrackerNotFound(id) => write!(f, "tracker not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent tracker state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::TrackerNotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Request model for registering a tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTracker {
    pub name: String,
    pub amount: Decimal,
    pub category: String,
    pub cadence: Cadence,
    pub due_date: NaiveDate,
    pub notes: Option<String>,
    /// Falls back to the category preset, then `Package`, when `None`.
    pub icon: Option<TrackerIcon>,
    /// Falls back to the category preset, then the default token, when `None`.
    pub color: Option<String>,
}

impl NewTracker {
    /// Monthly tracker pre-filled from a popular-service template.
    pub fn from_template(template: &ServiceTemplate, due_date: NaiveDate) -> Self {
        Self {
            name: template.name.to_string(),
            amount: template.amount(),
            category: template.category.to_string(),
            cadence: Cadence::Monthly,
            due_date,
            notes: None,
            icon: None,
            color: None,
        }
    }
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerUpdate {
    pub name: Option<String>,
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub cadence: Option<Cadence>,
    pub due_date: Option<NaiveDate>,
    /// `Some(None)` clears the note.
    pub notes: Option<Option<String>>,
    pub icon: Option<TrackerIcon>,
    pub color: Option<String>,
}

impl TrackerUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub summary: SpendSummary,
    pub next_due: Vec<TrackedPayment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderCenter {
    pub buckets: Buckets,
    pub alerts: Vec<ReminderAlert>,
    pub settings: ReminderSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overview {
    pub items: Vec<TrackedPayment>,
    /// Categories across every active tracker, not only the filtered ones.
    pub categories: Vec<String>,
    /// Monthly spend over `items`.
    pub monthly_spend: Decimal,
    /// Items due within the next seven days, today included.
    pub due_this_week: usize,
}

/// Tracker service facade over repository implementations.
pub struct TrackerService<P: PaymentRepository, S: SettingsRepository> {
    payments: P,
    settings: S,
}

impl<P: PaymentRepository, S: SettingsRepository> TrackerService<P, S> {
    pub fn new(payments: P, settings: S) -> Self {
        Self { payments, settings }
    }

    /// Registers a new active tracker and returns the stored record.
    pub fn add_tracker(&self, owner: &OwnerId, request: NewTracker) -> ServiceResult<TrackedPayment> {
        let mut payment = TrackedPayment::new(
            owner.clone(),
            request.name,
            request.amount,
            request.category,
            request.cadence,
            request.due_date,
        )?;
        payment.notes = normalize_notes(request.notes);
        let preset = category_preset(&payment.category);
        payment.icon = request
            .icon
            .or(preset.map(|preset| preset.icon))
            .unwrap_or_default();
        match (request.color, preset) {
            (Some(color), _) => {
                validate_color(&color)?;
                payment.color = color;
            }
            (None, Some(preset)) => payment.color = preset.color.to_string(),
            (None, None) => {}
        }

        let id = self.payments.create_payment(&payment)?;
        info!(
            "event=tracker_create module=service status=ok tracker_id={} cadence={}",
            id, payment.cadence
        );
        self.payments
            .get_payment(owner, id)?
            .ok_or(ServiceError::InconsistentState(
                "created tracker not found in read-back",
            ))
    }

    /// Applies a partial update to an active tracker.
    pub fn update_tracker(
        &self,
        owner: &OwnerId,
        id: PaymentId,
        update: TrackerUpdate,
    ) -> ServiceResult<TrackedPayment> {
        let mut payment = self
            .payments
            .get_payment(owner, id)?
            .ok_or(ServiceError::TrackerNotFound(id))?;

        if let Some(name) = update.name {
            payment.name = name.trim().to_string();
        }
        if let Some(amount) = update.amount {
            payment.amount = amount;
        }
        if let Some(category) = update.category {
            payment.category = category.trim().to_string();
        }
        if let Some(cadence) = update.cadence {
            payment.cadence = cadence;
        }
        if let Some(due_date) = update.due_date {
            payment.due_date = due_date;
        }
        if let Some(notes) = update.notes {
            payment.notes = normalize_notes(notes);
        }
        if let Some(icon) = update.icon {
            payment.icon = icon;
        }
        if let Some(color) = update.color {
            payment.color = color;
        }

        self.payments.update_payment(&payment)?;
        info!("event=tracker_update module=service status=ok tracker_id={id}");
        self.payments
            .get_payment(owner, id)?
            .ok_or(ServiceError::InconsistentState(
                "updated tracker not found in read-back",
            ))
    }

    /// Soft-deletes a tracker. The row stays in the store.
    pub fn delete_tracker(&self, owner: &OwnerId, id: PaymentId) -> ServiceResult<()> {
        match self.payments.soft_delete_payment(owner, id) {
            Ok(()) => {
                info!("event=tracker_delete module=service status=ok tracker_id={id}");
                Ok(())
            }
            Err(err) => {
                warn!("event=tracker_delete module=service status=error tracker_id={id} error={err}");
                Err(err.into())
            }
        }
    }

    pub fn get_tracker(&self, owner: &OwnerId, id: PaymentId) -> RepoResult<Option<TrackedPayment>> {
        self.payments.get_payment(owner, id)
    }

    /// Lists active trackers by ascending due date.
    pub fn list_trackers(&self, owner: &OwnerId) -> RepoResult<Vec<TrackedPayment>> {
        self.payments.list_payments(owner)
    }

    /// Builds headline numbers plus the next trackers due.
    pub fn dashboard(&self, owner: &OwnerId, today: NaiveDate) -> ServiceResult<Dashboard> {
        let snapshot = self.list_trackers(owner)?;
        Ok(Dashboard {
            summary: summarize(&snapshot, today)?,
            next_due: next_n_due(&snapshot, DASHBOARD_NEXT_DUE)?,
        })
    }

    /// Buckets trackers by urgency and lists reminders firing today.
    pub fn reminder_center(&self, owner: &OwnerId, today: NaiveDate) -> ServiceResult<ReminderCenter> {
        let snapshot = self.list_trackers(owner)?;
        let settings = self.settings.get_settings(owner)?;
        let buckets = bucketize(&snapshot, today)?;
        let alerts = reminders_due(&snapshot, today, &settings)?;
        info!(
            "event=reminder_center module=service status=ok overdue={} due_soon={} upcoming={} alerts={}",
            buckets.overdue.len(),
            buckets.due_soon.len(),
            buckets.upcoming.len(),
            alerts.len()
        );
        Ok(ReminderCenter {
            buckets,
            alerts,
            settings,
        })
    }

    /// Filters and sorts active trackers for the overview list.
    pub fn overview(
        &self,
        owner: &OwnerId,
        query: &OverviewQuery,
        today: NaiveDate,
    ) -> ServiceResult<Overview> {
        let snapshot = self.list_trackers(owner)?;
        let items = filter_and_sort(&snapshot, query)?;
        Ok(Overview {
            categories: categories(&snapshot),
            monthly_spend: monthly_spend(&items)?,
            due_this_week: due_within_window(&items, today, DUE_SOON_WINDOW_DAYS as u32)?,
            items,
        })
    }

    pub fn settings(&self, owner: &OwnerId) -> RepoResult<ReminderSettings> {
        self.settings.get_settings(owner)
    }

    pub fn update_settings(
        &self,
        owner: &OwnerId,
        settings: &ReminderSettings,
    ) -> RepoResult<ReminderSettings> {
        self.settings.put_settings(owner, settings)?;
        info!("event=settings_update module=service status=ok");
        self.settings.get_settings(owner)
    }
}

fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
