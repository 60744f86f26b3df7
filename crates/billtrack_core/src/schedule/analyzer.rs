//! Payment schedule analyzer.
//!
//! # Responsibility
//! - Partition active payments into overdue / due-soon / upcoming buckets.
//! - Compute monthly spend and the yearly projection derived from it.
//! - Produce "next N due" lists, window counts and reminder alerts.
//!
//! # Invariants
//! - `days_until_due` is a whole calendar-day difference; dates carry no time.
//! - All sorts are stable, so ties keep snapshot order.
//! - `yearly_spend_projection` is exactly `monthly_spend * 12`; yearly
//!   cadence items are not folded in.

use crate::model::payment::{Cadence, TrackedPayment, ValidationError};
use crate::model::settings::{ReminderLead, ReminderSettings};
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

/// Upper bound (inclusive) of the due-soon window in days.
pub const DUE_SOON_WINDOW_DAYS: i64 = 7;

/// Upper bound (inclusive) of the card-level "soon" urgency in days.
pub const URGENT_WINDOW_DAYS: i64 = 3;

/// Payment annotated with its distance to the due date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledPayment {
    pub payment: TrackedPayment,
    /// Negative when overdue, zero when due today.
    pub days_until_due: i64,
}

/// Active payments partitioned by due date relative to "now".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Buckets {
    pub overdue: Vec<ScheduledPayment>,
    pub due_soon: Vec<ScheduledPayment>,
    pub upcoming: Vec<ScheduledPayment>,
}

impl Buckets {
    pub fn len(&self) -> usize {
        self.overdue.len() + self.due_soon.len() + self.upcoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Card-level urgency of one payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DueStatus {
    Overdue,
    Soon,
    Later,
}

impl DueStatus {
    pub fn classify(days_until_due: i64) -> Self {
        if days_until_due < 0 {
            Self::Overdue
        } else if days_until_due <= URGENT_WINDOW_DAYS {
            Self::Soon
        } else {
            Self::Later
        }
    }

    /// Short tag shown next to a tracker line.
    pub fn label(self) -> &'static str {
        match self {
            Self::Overdue => "overdue",
            Self::Soon => "soon",
            Self::Later => "later",
        }
    }
}

/// Dashboard headline numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpendSummary {
    pub total_trackers: usize,
    /// Active payments due within the next seven days, today included.
    pub upcoming_payments: usize,
    pub monthly_spend: Decimal,
    pub yearly_projection: Decimal,
}

/// One reminder that should fire today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderAlert {
    pub payment: TrackedPayment,
    pub lead: ReminderLead,
}

/// Whole calendar days from `now` until the payment's due date.
pub fn days_until_due(payment: &TrackedPayment, now: NaiveDate) -> i64 {
    (payment.due_date - now).num_days()
}

/// Partitions active payments into overdue, due-soon and upcoming buckets.
///
/// Each bucket is sorted ascending by `days_until_due`; ties keep snapshot
/// order. Empty input yields three empty buckets.
pub fn bucketize(
    payments: &[TrackedPayment],
    now: NaiveDate,
) -> Result<Buckets, ValidationError> {
    validate_snapshot(payments)?;

    let mut scheduled: Vec<ScheduledPayment> = active(payments)
        .map(|payment| ScheduledPayment {
            payment: payment.clone(),
            days_until_due: days_until_due(payment, now),
        })
        .collect();
    scheduled.sort_by_key(|item| item.days_until_due);

    let mut buckets = Buckets::default();
    for item in scheduled {
        match item.days_until_due {
            days if days < 0 => buckets.overdue.push(item),
            0..=DUE_SOON_WINDOW_DAYS => buckets.due_soon.push(item),
            _ => buckets.upcoming.push(item),
        }
    }
    Ok(buckets)
}

/// Sums amounts of active monthly payments.
///
/// Yearly and custom cadences are excluded, not normalized.
pub fn monthly_spend(payments: &[TrackedPayment]) -> Result<Decimal, ValidationError> {
    validate_snapshot(payments)?;
    Ok(active(payments)
        .filter(|payment| payment.cadence == Cadence::Monthly)
        .map(|payment| payment.amount)
        .sum())
}

/// Projects yearly spend as twelve times the monthly spend.
pub fn yearly_spend_projection(payments: &[TrackedPayment]) -> Result<Decimal, ValidationError> {
    Ok(monthly_spend(payments)? * Decimal::from(12))
}

/// Returns the first `n` active payments by ascending due date.
///
/// Overdue payments sort first; ties keep snapshot order.
pub fn next_n_due(
    payments: &[TrackedPayment],
    n: usize,
) -> Result<Vec<TrackedPayment>, ValidationError> {
    validate_snapshot(payments)?;
    let mut sorted: Vec<TrackedPayment> = active(payments).cloned().collect();
    sorted.sort_by_key(|payment| payment.due_date);
    sorted.truncate(n);
    Ok(sorted)
}

/// Counts active payments due in `[now, now + window_days]`, both ends inclusive.
pub fn due_within_window(
    payments: &[TrackedPayment],
    now: NaiveDate,
    window_days: u32,
) -> Result<usize, ValidationError> {
    validate_snapshot(payments)?;
    let window_end = now
        .checked_add_days(Days::new(u64::from(window_days)))
        .unwrap_or(NaiveDate::MAX);
    Ok(active(payments)
        .filter(|payment| payment.due_date >= now && payment.due_date <= window_end)
        .count())
}

/// Builds the dashboard headline numbers.
pub fn summarize(
    payments: &[TrackedPayment],
    now: NaiveDate,
) -> Result<SpendSummary, ValidationError> {
    let monthly = monthly_spend(payments)?;
    Ok(SpendSummary {
        total_trackers: active(payments).count(),
        upcoming_payments: due_within_window(payments, now, DUE_SOON_WINDOW_DAYS as u32)?,
        monthly_spend: monthly,
        yearly_projection: monthly * Decimal::from(12),
    })
}

/// Returns reminders that fire on `now` under the owner's settings.
///
/// A payment alerts when its distance to the due date equals an enabled
/// lead time. Nothing fires when every delivery channel is off.
pub fn reminders_due(
    payments: &[TrackedPayment],
    now: NaiveDate,
    settings: &ReminderSettings,
) -> Result<Vec<ReminderAlert>, ValidationError> {
    validate_snapshot(payments)?;
    if !settings.has_channel() {
        return Ok(Vec::new());
    }

    let leads = settings.enabled_leads();
    Ok(active(payments)
        .filter_map(|payment| {
            let days = days_until_due(payment, now);
            leads
                .iter()
                .find(|lead| lead.days() == days)
                .map(|lead| ReminderAlert {
                    payment: payment.clone(),
                    lead: *lead,
                })
        })
        .collect())
}

/// Human-readable due label shown on tracker cards.
pub fn due_label(days_until_due: i64) -> String {
    match days_until_due {
        days if days < 0 => "Overdue".to_string(),
        0 => "Due today".to_string(),
        1 => "Due tomorrow".to_string(),
        days => format!("Due in {days} days"),
    }
}

fn active(payments: &[TrackedPayment]) -> impl Iterator<Item = &TrackedPayment> {
    payments.iter().filter(|payment| payment.is_active)
}

fn validate_snapshot(payments: &[TrackedPayment]) -> Result<(), ValidationError> {
    payments.iter().try_for_each(TrackedPayment::validate)
}
