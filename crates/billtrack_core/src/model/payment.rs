//! Tracked payment domain model.
//!
//! # Responsibility
//! - Define the canonical record for one recurring subscription or bill.
//! - Provide lifecycle helpers for soft-delete semantics.
//! - Parse untrusted text input (dates, amounts, cadence) into typed values.
//!
//! # Invariants
//! - `id` is stable and never reused for another payment.
//! - `amount` is never negative.
//! - `is_active` is the source of truth for soft-delete state.
//! - `name`, `category` and `owner` are never blank.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for every tracked payment.
pub type PaymentId = Uuid;

/// Calendar date format accepted at every text boundary.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Color token used when the caller does not pick one.
pub const DEFAULT_COLOR: &str = "bg-gray-500";

static COLOR_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^bg-[a-z]+-(50|[1-9]00)$").expect("valid color token regex"));

/// Validation failure for payment input or payment snapshots.
///
/// Indicates a contract violation by the caller; values are surfaced as-is
/// and never repaired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    NilId,
    BlankOwner,
    BlankName,
    BlankCategory,
    NegativeAmount(Decimal),
    InvalidAmount(String),
    InvalidDate(String),
    UnknownCadence(String),
    InvalidColor(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "payment id must not be nil"),
            Self::BlankOwner => write!(f, "owner id must not be blank"),
            Self::BlankName => write!(f, "payment name must not be blank"),
            Self::BlankCategory => write!(f, "payment category must not be blank"),
            Self::NegativeAmount(amount) => {
                write!(f, "payment amount must be >= 0, got {amount}")
            }
            Self::InvalidAmount(value) => write!(f, "invalid amount `{value}`"),
            Self::InvalidDate(value) => {
                write!(f, "invalid due date `{value}`; expected YYYY-MM-DD")
            }
            Self::UnknownCadence(value) => {
                write!(f, "unknown cadence `{value}`; expected Monthly|Yearly|Custom")
            }
            Self::InvalidColor(value) => {
                write!(f, "invalid color token `{value}`; expected bg-<hue>-<shade>")
            }
        }
    }
}

impl Error for ValidationError {}

/// Identifier of the user that exclusively owns a payment.
///
/// Passed explicitly into every store and service call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OwnerId(String);

impl OwnerId {
    /// Creates an owner id from caller input, trimming surrounding whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::BlankOwner);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OwnerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for OwnerId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OwnerId> for String {
    fn from(value: OwnerId) -> Self {
        value.0
    }
}

/// Recurrence period of a tracked payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cadence {
    Monthly,
    Yearly,
    /// Irregular schedule; never counted as monthly spend.
    Custom,
}

impl Cadence {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
            Self::Custom => "Custom",
        }
    }
}

impl Display for Cadence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cadence {
    type Err = ValidationError;

    /// Parses cadence names case-insensitively.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            "custom" => Ok(Self::Custom),
            _ => Err(ValidationError::UnknownCadence(value.to_string())),
        }
    }
}

/// Static icon mapping for tracker cards.
///
/// Unknown stored names resolve to `Package`, so rendering never hits a
/// failed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrackerIcon {
    Tv,
    Music,
    Zap,
    Palette,
    Car,
    #[default]
    Package,
    Play,
    FileText,
    Home,
    Phone,
    Wifi,
    Heart,
    CreditCard,
    Shield,
}

impl TrackerIcon {
    pub const ALL: [TrackerIcon; 14] = [
        Self::Tv,
        Self::Music,
        Self::Zap,
        Self::Palette,
        Self::Car,
        Self::Package,
        Self::Play,
        Self::FileText,
        Self::Home,
        Self::Phone,
        Self::Wifi,
        Self::Heart,
        Self::CreditCard,
        Self::Shield,
    ];

    /// Resolves a stored icon name, falling back to `Package`.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|icon| icon.as_name().eq_ignore_ascii_case(name))
            .unwrap_or_default()
    }

    pub fn as_name(self) -> &'static str {
        match self {
            Self::Tv => "Tv",
            Self::Music => "Music",
            Self::Zap => "Zap",
            Self::Palette => "Palette",
            Self::Car => "Car",
            Self::Package => "Package",
            Self::Play => "Play",
            Self::FileText => "FileText",
            Self::Home => "Home",
            Self::Phone => "Phone",
            Self::Wifi => "Wifi",
            Self::Heart => "Heart",
            Self::CreditCard => "CreditCard",
            Self::Shield => "Shield",
        }
    }
}

impl From<String> for TrackerIcon {
    fn from(value: String) -> Self {
        Self::from_name(&value)
    }
}

impl From<TrackerIcon> for String {
    fn from(value: TrackerIcon) -> Self {
        value.as_name().to_string()
    }
}

/// Canonical record for one recurring subscription or bill.
///
/// Field names on the wire follow the external `trackers` table
/// (`user_id`, `frequency`, `due_date`, `is_active`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTrackedPayment")]
pub struct TrackedPayment {
    pub id: PaymentId,
    #[serde(rename = "user_id")]
    pub owner: OwnerId,
    pub name: String,
    pub amount: Decimal,
    pub category: String,
    #[serde(rename = "frequency")]
    pub cadence: Cadence,
    /// Next due date, calendar-day granularity.
    pub due_date: NaiveDate,
    pub notes: Option<String>,
    pub icon: TrackerIcon,
    /// Style token such as `bg-red-500`.
    pub color: String,
    /// Soft delete marker; `false` rows stay in the store but leave every view.
    pub is_active: bool,
}

#[derive(Deserialize)]
struct RawTrackedPayment {
    id: PaymentId,
    user_id: OwnerId,
    name: String,
    amount: Decimal,
    category: String,
    frequency: Cadence,
    due_date: NaiveDate,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    icon: TrackerIcon,
    #[serde(default = "default_color")]
    color: String,
    #[serde(default = "default_active")]
    is_active: bool,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_active() -> bool {
    true
}

impl TryFrom<RawTrackedPayment> for TrackedPayment {
    type Error = ValidationError;

    fn try_from(raw: RawTrackedPayment) -> Result<Self, Self::Error> {
        let payment = Self {
            id: raw.id,
            owner: raw.user_id,
            name: raw.name,
            amount: raw.amount,
            category: raw.category,
            cadence: raw.frequency,
            due_date: raw.due_date,
            notes: raw.notes,
            icon: raw.icon,
            color: raw.color,
            is_active: raw.is_active,
        };
        payment.validate()?;
        Ok(payment)
    }
}

impl TrackedPayment {
    /// Creates a new active payment with a generated stable ID.
    ///
    /// # Invariants
    /// - `notes` starts as `None`, `icon` as `Package`, `color` as the default token.
    /// - The result is validated before it is returned.
    pub fn new(
        owner: OwnerId,
        name: impl Into<String>,
        amount: Decimal,
        category: impl Into<String>,
        cadence: Cadence,
        due_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        Self::with_id(
            Uuid::new_v4(),
            owner,
            name,
            amount,
            category,
            cadence,
            due_date,
        )
    }

    /// Creates a payment with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(
        id: PaymentId,
        owner: OwnerId,
        name: impl Into<String>,
        amount: Decimal,
        category: impl Into<String>,
        cadence: Cadence,
        due_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let payment = Self {
            id,
            owner,
            name: name.into().trim().to_string(),
            amount,
            category: category.into().trim().to_string(),
            cadence,
            due_date,
            notes: None,
            icon: TrackerIcon::default(),
            color: DEFAULT_COLOR.to_string(),
            is_active: true,
        };
        payment.validate()?;
        Ok(payment)
    }

    /// Checks every field-level invariant.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::NilId);
        }
        if self.owner.as_str().trim().is_empty() {
            return Err(ValidationError::BlankOwner);
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankName);
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::BlankCategory);
        }
        if self.amount < Decimal::ZERO {
            return Err(ValidationError::NegativeAmount(self.amount));
        }
        if !COLOR_TOKEN_RE.is_match(&self.color) {
            return Err(ValidationError::InvalidColor(self.color.clone()));
        }
        Ok(())
    }
}

/// Parses a `YYYY-MM-DD` calendar date.
///
/// Malformed input fails fast; nothing is coerced.
pub fn parse_due_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DUE_DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

/// Parses a non-negative decimal amount such as `15.99`.
pub fn parse_amount(value: &str) -> Result<Decimal, ValidationError> {
    let amount = Decimal::from_str(value.trim())
        .map_err(|_| ValidationError::InvalidAmount(value.to_string()))?;
    if amount < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount(amount));
    }
    Ok(amount)
}

/// Checks a style token without building a payment.
pub fn validate_color(value: &str) -> Result<(), ValidationError> {
    if COLOR_TOKEN_RE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidColor(value.to_string()))
    }
}
