//! Payment repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide owner-scoped create/read/update/soft-delete APIs over `trackers`.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `TrackedPayment::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Rows are never hard-deleted.

use crate::db::DbError;
use crate::model::payment::{
    parse_due_date, Cadence, OwnerId, PaymentId, TrackedPayment, TrackerIcon, ValidationError,
    DUE_DATE_FORMAT,
};
use crate::repo::{bool_to_int, ensure_schema_ready, int_to_bool};
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

const TRACKER_SELECT_SQL: &str = "SELECT
    id,
    owner_id,
    name,
    amount,
    category,
    frequency,
    due_date,
    notes,
    icon,
    color,
    is_active
FROM trackers";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for payment and settings persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    /// No row with this id is visible to the calling owner.
    NotFound(PaymentId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "tracker not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted tracker data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is older than required {expected_version}; open it with db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for payment CRUD operations.
///
/// Reads only see active rows. Lists are ordered by `due_date ASC`, then
/// creation order.
pub trait PaymentRepository {
    fn create_payment(&self, payment: &TrackedPayment) -> RepoResult<PaymentId>;
    /// Overwrites every mutable field of the row owned by `payment.owner`.
    fn update_payment(&self, payment: &TrackedPayment) -> RepoResult<()>;
    fn get_payment(&self, owner: &OwnerId, id: PaymentId) -> RepoResult<Option<TrackedPayment>>;
    fn list_payments(&self, owner: &OwnerId) -> RepoResult<Vec<TrackedPayment>>;
    /// Flips `is_active` to false. Repeating the call is a no-op.
    fn soft_delete_payment(&self, owner: &OwnerId, id: PaymentId) -> RepoResult<()>;
}

/// SQLite-backed payment repository.
pub struct SqlitePaymentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePaymentRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn, "trackers")?;
        Ok(Self { conn })
    }
}

impl PaymentRepository for SqlitePaymentRepository<'_> {
    fn create_payment(&self, payment: &TrackedPayment) -> RepoResult<PaymentId> {
        payment.validate()?;

        self.conn.execute(
            "INSERT INTO trackers (
                id,
                owner_id,
                name,
                amount,
                category,
                frequency,
                due_date,
                notes,
                icon,
                color,
                is_active
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);",
            params![
                payment.id.to_string(),
                payment.owner.as_str(),
                payment.name.as_str(),
                payment.amount.to_string(),
                payment.category.as_str(),
                payment.cadence.as_str(),
                payment.due_date.format(DUE_DATE_FORMAT).to_string(),
                payment.notes.as_deref(),
                payment.icon.as_name(),
                payment.color.as_str(),
                bool_to_int(payment.is_active),
            ],
        )?;

        Ok(payment.id)
    }

    fn update_payment(&self, payment: &TrackedPayment) -> RepoResult<()> {
        payment.validate()?;

        let changed = self.conn.execute(
            "UPDATE trackers
             SET
                name = ?1,
                amount = ?2,
                category = ?3,
                frequency = ?4,
                due_date = ?5,
                notes = ?6,
                icon = ?7,
                color = ?8,
                is_active = ?9,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?10
               AND owner_id = ?11;",
            params![
                payment.name.as_str(),
                payment.amount.to_string(),
                payment.category.as_str(),
                payment.cadence.as_str(),
                payment.due_date.format(DUE_DATE_FORMAT).to_string(),
                payment.notes.as_deref(),
                payment.icon.as_name(),
                payment.color.as_str(),
                bool_to_int(payment.is_active),
                payment.id.to_string(),
                payment.owner.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(payment.id));
        }

        Ok(())
    }

    fn get_payment(&self, owner: &OwnerId, id: PaymentId) -> RepoResult<Option<TrackedPayment>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TRACKER_SELECT_SQL}
             WHERE id = ?1
               AND owner_id = ?2
               AND is_active = 1;"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), owner.as_str()])?;
        rows.next()?.map(parse_tracker_row).transpose()
    }

    fn list_payments(&self, owner: &OwnerId) -> RepoResult<Vec<TrackedPayment>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TRACKER_SELECT_SQL}
             WHERE owner_id = ?1
               AND is_active = 1
             ORDER BY due_date ASC, created_at ASC, rowid ASC;"
        ))?;

        let mut rows = stmt.query([owner.as_str()])?;
        let mut payments = Vec::new();
        while let Some(row) = rows.next()? {
            payments.push(parse_tracker_row(row)?);
        }
        Ok(payments)
    }

    fn soft_delete_payment(&self, owner: &OwnerId, id: PaymentId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE trackers
             SET
                is_active = 0,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1
               AND owner_id = ?2;",
            params![id.to_string(), owner.as_str()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_tracker_row(row: &Row<'_>) -> RepoResult<TrackedPayment> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in trackers.id"))
    })?;

    let owner_text: String = row.get("owner_id")?;
    let owner = OwnerId::new(owner_text)
        .map_err(|_| RepoError::InvalidData("blank owner in trackers.owner_id".to_string()))?;

    let amount_text: String = row.get("amount")?;
    let amount = Decimal::from_str(&amount_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid amount `{amount_text}` in trackers.amount"))
    })?;

    let frequency_text: String = row.get("frequency")?;
    let cadence = Cadence::from_str(&frequency_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid frequency `{frequency_text}` in trackers.frequency"
        ))
    })?;

    let due_text: String = row.get("due_date")?;
    let due_date = parse_due_date(&due_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid date `{due_text}` in trackers.due_date"))
    })?;

    let icon_text: String = row.get("icon")?;

    let payment = TrackedPayment {
        id,
        owner,
        name: row.get("name")?,
        amount,
        category: row.get("category")?,
        cadence,
        due_date,
        notes: row.get("notes")?,
        icon: TrackerIcon::from_name(&icon_text),
        color: row.get("color")?,
        is_active: int_to_bool(row.get("is_active")?, "trackers.is_active")?,
    };
    payment.validate()?;
    Ok(payment)
}
