//! Filtered and sorted tracker list projection.
//!
//! # Invariants
//! - Only active payments are returned.
//! - Sorting is stable for every `TrackerSort` variant.

use crate::model::payment::{TrackedPayment, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// Sort order for the trackers overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerSort {
    /// Ascending due date.
    #[default]
    DueDate,
    /// Ascending name, case-insensitive.
    Name,
    /// Descending amount.
    Amount,
}

impl FromStr for TrackerSort {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "due" | "due_date" | "duedate" => Ok(Self::DueDate),
            "name" => Ok(Self::Name),
            "amount" => Ok(Self::Amount),
            other => Err(format!(
                "unsupported sort `{other}`; expected due_date|name|amount"
            )),
        }
    }
}

/// Filter and sort options for the trackers overview.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverviewQuery {
    /// Case-insensitive substring match on the payment name.
    pub search: Option<String>,
    /// Exact category match. `None` means all categories.
    pub category: Option<String>,
    pub sort: TrackerSort,
}

/// Applies search/category filters and the requested sort to active payments.
pub fn filter_and_sort(
    payments: &[TrackedPayment],
    query: &OverviewQuery,
) -> Result<Vec<TrackedPayment>, ValidationError> {
    payments.iter().try_for_each(TrackedPayment::validate)?;

    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase);

    let mut items: Vec<TrackedPayment> = payments
        .iter()
        .filter(|payment| payment.is_active)
        .filter(|payment| match needle.as_deref() {
            Some(needle) => payment.name.to_lowercase().contains(needle),
            None => true,
        })
        .filter(|payment| match query.category.as_deref() {
            Some(category) => payment.category == category,
            None => true,
        })
        .cloned()
        .collect();

    match query.sort {
        TrackerSort::DueDate => items.sort_by_key(|payment| payment.due_date),
        TrackerSort::Name => items.sort_by_cached_key(|payment| payment.name.to_lowercase()),
        TrackerSort::Amount => items.sort_by(|a, b| b.amount.cmp(&a.amount)),
    }
    Ok(items)
}

/// Distinct categories of active payments, in first-seen order.
pub fn categories(payments: &[TrackedPayment]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for payment in payments.iter().filter(|payment| payment.is_active) {
        if seen.insert(payment.category.as_str()) {
            ordered.push(payment.category.clone());
        }
    }
    ordered
}
