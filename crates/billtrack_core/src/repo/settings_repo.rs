//! Reminder settings repository.
//!
//! # Invariants
//! - One row per owner; writes replace the whole row.
//! - Owners without a row read as `ReminderSettings::default()`.

use crate::model::payment::OwnerId;
use crate::model::settings::ReminderSettings;
use crate::repo::payment_repo::RepoResult;
use crate::repo::{bool_to_int, ensure_schema_ready, int_to_bool};
use rusqlite::{params, Connection};

pub trait SettingsRepository {
    fn get_settings(&self, owner: &OwnerId) -> RepoResult<ReminderSettings>;
    fn put_settings(&self, owner: &OwnerId, settings: &ReminderSettings) -> RepoResult<()>;
}

/// SQLite-backed reminder settings repository.
pub struct SqliteSettingsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSettingsRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn, "reminder_settings")?;
        Ok(Self { conn })
    }
}

impl SettingsRepository for SqliteSettingsRepository<'_> {
    fn get_settings(&self, owner: &OwnerId) -> RepoResult<ReminderSettings> {
        let mut stmt = self.conn.prepare(
            "SELECT
                email,
                sms,
                browser,
                remind_1_day,
                remind_3_days,
                remind_1_week
             FROM reminder_settings
             WHERE owner_id = ?1;",
        )?;

        let mut rows = stmt.query([owner.as_str()])?;
        let Some(row) = rows.next()? else {
            return Ok(ReminderSettings::default());
        };

        Ok(ReminderSettings {
            email: int_to_bool(row.get("email")?, "reminder_settings.email")?,
            sms: int_to_bool(row.get("sms")?, "reminder_settings.sms")?,
            browser: int_to_bool(row.get("browser")?, "reminder_settings.browser")?,
            remind_1_day: int_to_bool(row.get("remind_1_day")?, "reminder_settings.remind_1_day")?,
            remind_3_days: int_to_bool(
                row.get("remind_3_days")?,
                "reminder_settings.remind_3_days",
            )?,
            remind_1_week: int_to_bool(
                row.get("remind_1_week")?,
                "reminder_settings.remind_1_week",
            )?,
        })
    }

    fn put_settings(&self, owner: &OwnerId, settings: &ReminderSettings) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO reminder_settings (
                owner_id,
                email,
                sms,
                browser,
                remind_1_day,
                remind_3_days,
                remind_1_week
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(owner_id) DO UPDATE SET
                email = excluded.email,
                sms = excluded.sms,
                browser = excluded.browser,
                remind_1_day = excluded.remind_1_day,
                remind_3_days = excluded.remind_3_days,
                remind_1_week = excluded.remind_1_week,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                owner.as_str(),
                bool_to_int(settings.email),
                bool_to_int(settings.sms),
                bool_to_int(settings.browser),
                bool_to_int(settings.remind_1_day),
                bool_to_int(settings.remind_3_days),
                bool_to_int(settings.remind_1_week),
            ],
        )?;
        Ok(())
    }
}
