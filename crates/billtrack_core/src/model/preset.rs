//! Built-in category presets and popular-service templates.
//!
//! A category preset supplies the icon and color a new tracker gets when
//! the caller does not pick them. A template pre-fills name, amount and
//! category; its look always comes from the category preset.

use crate::model::payment::TrackerIcon;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryPreset {
    pub name: &'static str,
    pub icon: TrackerIcon,
    pub color: &'static str,
}

pub const CATEGORY_PRESETS: [CategoryPreset; 8] = [
    CategoryPreset {
        name: "Entertainment",
        icon: TrackerIcon::Tv,
        color: "bg-red-500",
    },
    CategoryPreset {
        name: "Utilities",
        icon: TrackerIcon::Zap,
        color: "bg-yellow-500",
    },
    CategoryPreset {
        name: "Software",
        icon: TrackerIcon::Palette,
        color: "bg-purple-500",
    },
    CategoryPreset {
        name: "Insurance",
        icon: TrackerIcon::Shield,
        color: "bg-blue-500",
    },
    CategoryPreset {
        name: "Shopping",
        icon: TrackerIcon::Package,
        color: "bg-orange-500",
    },
    CategoryPreset {
        name: "Finance",
        icon: TrackerIcon::CreditCard,
        color: "bg-green-500",
    },
    CategoryPreset {
        name: "Health",
        icon: TrackerIcon::Heart,
        color: "bg-pink-500",
    },
    CategoryPreset {
        name: "Transportation",
        icon: TrackerIcon::Car,
        color: "bg-indigo-500",
    },
];

/// Looks up a preset by category name, ignoring case and surrounding space.
pub fn category_preset(category: &str) -> Option<&'static CategoryPreset> {
    let category = category.trim();
    CATEGORY_PRESETS
        .iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(category))
}

/// Popular subscription offered as a starting point for a new tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceTemplate {
    pub name: &'static str,
    pub category: &'static str,
    amount_cents: i64,
}

impl ServiceTemplate {
    pub fn amount(&self) -> Decimal {
        Decimal::new(self.amount_cents, 2)
    }
}

pub const SERVICE_TEMPLATES: [ServiceTemplate; 6] = [
    ServiceTemplate {
        name: "Netflix",
        category: "Entertainment",
        amount_cents: 1599,
    },
    ServiceTemplate {
        name: "Spotify",
        category: "Entertainment",
        amount_cents: 999,
    },
    ServiceTemplate {
        name: "Adobe Creative Cloud",
        category: "Software",
        amount_cents: 5299,
    },
    ServiceTemplate {
        name: "Amazon Prime",
        category: "Shopping",
        amount_cents: 13900,
    },
    ServiceTemplate {
        name: "YouTube Premium",
        category: "Entertainment",
        amount_cents: 1199,
    },
    ServiceTemplate {
        name: "Microsoft 365",
        category: "Software",
        amount_cents: 9999,
    },
];

/// Looks up a template by service name, ignoring case and surrounding space.
pub fn service_template(name: &str) -> Option<&'static ServiceTemplate> {
    let name = name.trim();
    SERVICE_TEMPLATES
        .iter()
        .find(|template| template.name.eq_ignore_ascii_case(name))
}
