//! Plain-text rendering for CLI output.

use billtrack_core::{
    days_until_due, due_label, Dashboard, DueStatus, Overview, ReminderCenter, ReminderSettings,
    ScheduledPayment, TrackedPayment, CATEGORY_PRESETS, SERVICE_TEMPLATES,
};
use chrono::NaiveDate;
use std::fmt::{Result, Write};

pub fn tracker_line(payment: &TrackedPayment, today: NaiveDate) -> String {
    let days = days_until_due(payment, today);
    format!(
        "{}  {:<24} ${:>9.2}  {:<8} {:<14} {}  ({}) [{}]",
        payment.id,
        payment.name,
        payment.amount,
        payment.cadence.as_str(),
        payment.category,
        payment.due_date,
        due_label(days),
        DueStatus::classify(days).label()
    )
}

/// Tracker line followed by its look and note, for add/update results.
pub fn tracker_card(out: &mut impl Write, payment: &TrackedPayment, today: NaiveDate) -> Result {
    writeln!(out, "{}", tracker_line(payment, today))?;
    writeln!(out, "  icon: {}  color: {}", payment.icon.as_name(), payment.color)?;
    if let Some(notes) = payment.notes.as_deref() {
        writeln!(out, "  notes: {notes}")?;
    }
    Ok(())
}

pub fn overview(out: &mut impl Write, overview: &Overview, today: NaiveDate) -> Result {
    for item in &overview.items {
        writeln!(out, "{}", tracker_line(item, today))?;
    }
    writeln!(out, "{} tracker(s)", overview.items.len())?;
    writeln!(out, "Monthly spend: ${:.2}", overview.monthly_spend)?;
    writeln!(out, "Due this week: {}", overview.due_this_week)?;
    if !overview.categories.is_empty() {
        writeln!(out, "Categories: {}", overview.categories.join(", "))?;
    }
    Ok(())
}

pub fn dashboard(out: &mut impl Write, dashboard: &Dashboard, today: NaiveDate) -> Result {
    let summary = &dashboard.summary;
    writeln!(out, "Total trackers: {}", summary.total_trackers)?;
    writeln!(out, "Due within 7 days: {}", summary.upcoming_payments)?;
    writeln!(out, "Monthly spend: ${:.2}", summary.monthly_spend)?;
    writeln!(out, "Yearly projection: ${:.2}", summary.yearly_projection)?;
    writeln!(out, "Next due:")?;
    if dashboard.next_due.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for item in &dashboard.next_due {
        writeln!(out, "  {}", tracker_line(item, today))?;
    }
    Ok(())
}

pub fn reminder_center(out: &mut impl Write, center: &ReminderCenter) -> Result {
    bucket(out, "Overdue", &center.buckets.overdue)?;
    bucket(out, "Due soon", &center.buckets.due_soon)?;
    bucket(out, "Upcoming", &center.buckets.upcoming)?;
    writeln!(out, "Reminders today: {}", center.alerts.len())?;
    for alert in &center.alerts {
        writeln!(
            out,
            "  {} ({} day lead)",
            alert.payment.name,
            alert.lead.days()
        )?;
    }
    Ok(())
}

fn bucket(out: &mut impl Write, title: &str, items: &[ScheduledPayment]) -> Result {
    writeln!(out, "{title} ({}):", items.len())?;
    for item in items {
        writeln!(
            out,
            "  {:<24} ${:>9.2}  {}  {}",
            item.payment.name,
            item.payment.amount,
            item.payment.due_date,
            due_label(item.days_until_due)
        )?;
    }
    Ok(())
}

pub fn settings(out: &mut impl Write, settings: &ReminderSettings) -> Result {
    writeln!(out, "email: {}", settings.email)?;
    writeln!(out, "sms: {}", settings.sms)?;
    writeln!(out, "browser: {}", settings.browser)?;
    writeln!(out, "remind_1_day: {}", settings.remind_1_day)?;
    writeln!(out, "remind_3_days: {}", settings.remind_3_days)?;
    writeln!(out, "remind_1_week: {}", settings.remind_1_week)
}

pub fn presets(out: &mut impl Write) -> Result {
    writeln!(out, "Categories:")?;
    for preset in &CATEGORY_PRESETS {
        writeln!(
            out,
            "  {:<16} {:<12} {}",
            preset.name,
            preset.icon.as_name(),
            preset.color
        )?;
    }
    writeln!(out, "Templates:")?;
    for template in &SERVICE_TEMPLATES {
        writeln!(
            out,
            "  {:<24} ${:>9.2}  {}",
            template.name,
            template.amount(),
            template.category
        )?;
    }
    Ok(())
}
