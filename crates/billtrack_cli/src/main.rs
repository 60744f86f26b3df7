//! BillTrack command-line front end.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Map subcommands onto `billtrack_core` use-cases and print results.

mod render;

use anyhow::{bail, Context, Result};
use billtrack_core::db::open_db;
use billtrack_core::{
    core_version, default_log_level, init_logging, parse_amount, parse_due_date, service_template,
    Cadence, NewTracker, OverviewQuery, OwnerId, PaymentId, ReminderSettings,
    SqlitePaymentRepository, SqliteSettingsRepository, TrackerIcon, TrackerService, TrackerSort,
    TrackerUpdate,
};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use log::info;
use rust_decimal::Decimal;
use std::fmt::Write;
use std::path::PathBuf;

/// Track recurring subscriptions and bills.
#[derive(Parser, Debug)]
#[command(name = "billtrack", author, version, about)]
struct Args {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct GlobalArgs {
    /// SQLite database file
    #[arg(long, env = "BILLTRACK_DB", default_value = "billtrack.sqlite3", global = true)]
    db: PathBuf,

    /// Owner whose trackers are read and written
    #[arg(long, env = "BILLTRACK_OWNER", global = true)]
    owner: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, env = "BILLTRACK_LOG_DIR", global = true)]
    log_dir: Option<String>,

    /// Reference day for due-date math (defaults to the local date)
    #[arg(long, value_parser = parse_date_arg, global = true)]
    today: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Tracker(TrackerCommand),

    /// List category presets and popular-service templates
    Presets,

    /// Print the core library version
    Version,
}

/// Commands that read or write one owner's store.
#[derive(Subcommand, Debug)]
enum TrackerCommand {
    /// Register a new tracker
    Add {
        /// Required unless --template supplies it
        name: Option<String>,
        /// Required unless --template supplies it
        #[arg(value_parser = parse_amount_arg)]
        amount: Option<Decimal>,
        /// Start from a popular service (see `billtrack presets`)
        #[arg(long)]
        template: Option<String>,
        /// Required unless --template supplies it
        #[arg(long)]
        category: Option<String>,
        /// Monthly, Yearly or Custom
        #[arg(long, default_value = "Monthly", value_parser = parse_cadence_arg)]
        cadence: Cadence,
        /// Next due date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg)]
        due: NaiveDate,
        #[arg(long)]
        notes: Option<String>,
        /// Defaults to the category preset, then Package
        #[arg(long)]
        icon: Option<String>,
        /// Style token such as bg-red-500; defaults to the category preset
        #[arg(long)]
        color: Option<String>,
    },

    /// List active trackers
    List {
        /// Case-insensitive name filter
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// due_date, name or amount
        #[arg(long, default_value = "due_date")]
        sort: TrackerSort,
    },

    /// Change fields of an existing tracker
    Update {
        id: PaymentId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_parser = parse_amount_arg)]
        amount: Option<Decimal>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, value_parser = parse_cadence_arg)]
        cadence: Option<Cadence>,
        #[arg(long, value_parser = parse_date_arg)]
        due: Option<NaiveDate>,
        #[arg(long, conflicts_with = "clear_notes")]
        notes: Option<String>,
        #[arg(long)]
        clear_notes: bool,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },

    /// Soft-delete a tracker
    Delete { id: PaymentId },

    /// Spend summary and next payments due
    Dashboard,

    /// Overdue / due-soon / upcoming buckets and today's reminders
    Reminders,

    /// Show or change reminder preferences
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand, Debug)]
enum SettingsAction {
    Show,
    Set {
        #[arg(long)]
        email: Option<bool>,
        #[arg(long)]
        sms: Option<bool>,
        #[arg(long)]
        browser: Option<bool>,
        #[arg(long)]
        remind_1_day: Option<bool>,
        #[arg(long)]
        remind_3_days: Option<bool>,
        #[arg(long)]
        remind_1_week: Option<bool>,
    },
}

/// Fields of `billtrack add` before template resolution.
struct AddArgs {
    name: Option<String>,
    amount: Option<Decimal>,
    template: Option<String>,
    category: Option<String>,
    cadence: Cadence,
    due: NaiveDate,
    notes: Option<String>,
    icon: Option<String>,
    color: Option<String>,
}

impl AddArgs {
    /// Explicit flags win over template values.
    fn into_request(self) -> Result<NewTracker> {
        let template = self
            .template
            .as_deref()
            .map(|name| {
                service_template(name).with_context(|| {
                    format!("unknown template `{name}`; run `billtrack presets` to list them")
                })
            })
            .transpose()?;

        let name = self
            .name
            .or_else(|| template.map(|template| template.name.to_string()))
            .context("NAME is required without --template")?;
        let amount = self
            .amount
            .or_else(|| template.map(|template| template.amount()))
            .context("AMOUNT is required without --template")?;
        let category = self
            .category
            .or_else(|| template.map(|template| template.category.to_string()))
            .context("--category is required without --template")?;

        Ok(NewTracker {
            name,
            amount,
            category,
            cadence: self.cadence,
            due_date: self.due,
            notes: self.notes,
            icon: self.icon.as_deref().map(TrackerIcon::from_name),
            color: self.color,
        })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(log_dir) = args.global.log_dir.as_deref() {
        let level = args.global.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    match args.command {
        Command::Version => println!("billtrack_core {}", core_version()),
        Command::Presets => {
            let mut out = String::new();
            render::presets(&mut out)?;
            print!("{out}");
        }
        Command::Tracker(command) => run(&args.global, command)?,
    }

    Ok(())
}

fn run(global: &GlobalArgs, command: TrackerCommand) -> Result<()> {
    let owner = match global.owner.as_deref() {
        Some(value) => OwnerId::new(value)?,
        None => bail!("--owner (or BILLTRACK_OWNER) is required"),
    };
    let today = global.today.unwrap_or_else(|| Local::now().date_naive());

    let conn = open_db(&global.db)
        .with_context(|| format!("failed to open database `{}`", global.db.display()))?;
    let service = TrackerService::new(
        SqlitePaymentRepository::try_new(&conn)?,
        SqliteSettingsRepository::try_new(&conn)?,
    );
    info!("event=cli_command module=cli status=start");

    let mut out = String::new();
    match command {
        TrackerCommand::Add {
            name,
            amount,
            template,
            category,
            cadence,
            due,
            notes,
            icon,
            color,
        } => {
            let request = AddArgs {
                name,
                amount,
                template,
                category,
                cadence,
                due,
                notes,
                icon,
                color,
            }
            .into_request()?;
            let created = service.add_tracker(&owner, request)?;
            writeln!(out, "added {}", created.id)?;
            render::tracker_card(&mut out, &created, today)?;
        }
        TrackerCommand::List {
            search,
            category,
            sort,
        } => {
            let overview = service.overview(
                &owner,
                &OverviewQuery {
                    search,
                    category,
                    sort,
                },
                today,
            )?;
            render::overview(&mut out, &overview, today)?;
        }
        TrackerCommand::Update {
            id,
            name,
            amount,
            category,
            cadence,
            due,
            notes,
            clear_notes,
            icon,
            color,
        } => {
            let update = TrackerUpdate {
                name,
                amount,
                category,
                cadence,
                due_date: due,
                notes: if clear_notes { Some(None) } else { notes.map(Some) },
                icon: icon.as_deref().map(TrackerIcon::from_name),
                color,
            };
            if update.is_empty() {
                bail!("nothing to update; pass at least one field flag");
            }
            let updated = service.update_tracker(&owner, id, update)?;
            writeln!(out, "updated {}", updated.id)?;
            render::tracker_card(&mut out, &updated, today)?;
        }
        TrackerCommand::Delete { id } => {
            service.delete_tracker(&owner, id)?;
            writeln!(out, "deleted {id}")?;
        }
        TrackerCommand::Dashboard => {
            let dashboard = service.dashboard(&owner, today)?;
            render::dashboard(&mut out, &dashboard, today)?;
        }
        TrackerCommand::Reminders => {
            let center = service.reminder_center(&owner, today)?;
            render::reminder_center(&mut out, &center)?;
        }
        TrackerCommand::Settings { action } => {
            let settings = match action {
                SettingsAction::Show => service.settings(&owner)?,
                SettingsAction::Set {
                    email,
                    sms,
                    browser,
                    remind_1_day,
                    remind_3_days,
                    remind_1_week,
                } => {
                    let current = service.settings(&owner)?;
                    let next = ReminderSettings {
                        email: email.unwrap_or(current.email),
                        sms: sms.unwrap_or(current.sms),
                        browser: browser.unwrap_or(current.browser),
                        remind_1_day: remind_1_day.unwrap_or(current.remind_1_day),
                        remind_3_days: remind_3_days.unwrap_or(current.remind_3_days),
                        remind_1_week: remind_1_week.unwrap_or(current.remind_1_week),
                    };
                    service.update_settings(&owner, &next)?
                }
            };
            render::settings(&mut out, &settings)?;
        }
    }

    print!("{out}");
    Ok(())
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_due_date(value).map_err(|err| err.to_string())
}

fn parse_amount_arg(value: &str) -> Result<Decimal, String> {
    parse_amount(value).map_err(|err| err.to_string())
}

fn parse_cadence_arg(value: &str) -> Result<Cadence, String> {
    value.parse::<Cadence>().map_err(|err| err.to_string())
}
