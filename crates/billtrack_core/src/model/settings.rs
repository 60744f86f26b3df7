//! Per-owner reminder preferences.

use serde::{Deserialize, Serialize};

/// How far ahead of a due date a reminder fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderLead {
    OneDay,
    ThreeDays,
    OneWeek,
}

impl ReminderLead {
    pub fn days(self) -> i64 {
        match self {
            Self::OneDay => 1,
            Self::ThreeDays => 3,
            Self::OneWeek => 7,
        }
    }
}

/// Notification channels and reminder lead times chosen by one owner.
///
/// Owners without stored settings get `ReminderSettings::default()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSettings {
    pub email: bool,
    pub sms: bool,
    pub browser: bool,
    pub remind_1_day: bool,
    pub remind_3_days: bool,
    pub remind_1_week: bool,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            email: true,
            sms: false,
            browser: true,
            remind_1_day: true,
            remind_3_days: true,
            remind_1_week: false,
        }
    }
}

impl ReminderSettings {
    /// Returns enabled lead times, shortest first.
    pub fn enabled_leads(&self) -> Vec<ReminderLead> {
        [
            (self.remind_1_day, ReminderLead::OneDay),
            (self.remind_3_days, ReminderLead::ThreeDays),
            (self.remind_1_week, ReminderLead::OneWeek),
        ]
        .into_iter()
        .filter_map(|(enabled, lead)| enabled.then_some(lead))
        .collect()
    }

    /// Whether any delivery channel is switched on.
    pub fn has_channel(&self) -> bool {
        self.email || self.sms || self.browser
    }
}
