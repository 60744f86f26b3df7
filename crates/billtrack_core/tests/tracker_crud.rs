use billtrack_core::db::migrations::latest_version;
use billtrack_core::db::open_db_in_memory;
use billtrack_core::{
    parse_amount, Cadence, OwnerId, PaymentRepository, RepoError,
    ReminderSettings, SettingsRepository, SqlitePaymentRepository, SqliteSettingsRepository,
    TrackedPayment, TrackerIcon, ValidationError,
};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use uuid::Uuid;

fn owner(value: &str) -> OwnerId {
    OwnerId::new(value).unwrap()
}

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

fn tracker(owner_id: &str, name: &str, due: &str) -> TrackedPayment {
    TrackedPayment::new(
        owner(owner_id),
        name,
        parse_amount("15.99").unwrap(),
        "Entertainment",
        Cadence::Monthly,
        date(due),
    )
    .unwrap()
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePaymentRepository::try_new(&conn).unwrap();

    let mut payment = tracker("owner-a", "Netflix", "2025-01-15");
    payment.notes = Some("Premium subscription".to_string());
    payment.icon = TrackerIcon::Tv;
    payment.color = "bg-red-500".to_string();
    let id = repo.create_payment(&payment).unwrap();

    let loaded = repo
        .get_payment(&payment.owner, id)
        .unwrap()
        .unwrap();
    assert_eq!(loaded, payment);
    assert_eq!(loaded.amount, Decimal::new(1599, 2));
    assert_eq!(loaded.amount.to_string(), "15.99");
}

#[test]
fn update_existing_payment() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePaymentRepository::try_new(&conn).unwrap();

    let mut payment = tracker("owner-a", "Spotify", "2025-01-20");
    repo.create_payment(&payment).unwrap();

    payment.amount = parse_amount("11.99").unwrap();
    payment.cadence = Cadence::Yearly;
    payment.due_date = date("2025-06-01");
    payment.category = "Music".to_string();
    repo.update_payment(&payment).unwrap();

    let loaded = repo
        .get_payment(&payment.owner, payment.id)
        .unwrap()
        .unwrap();
    assert_eq!(loaded.amount, Decimal::new(1199, 2));
    assert_eq!(loaded.cadence, Cadence::Yearly);
    assert_eq!(loaded.due_date, date("2025-06-01"));
    assert_eq!(loaded.category, "Music");
}

#[test]
fn update_not_found_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePaymentRepository::try_new(&conn).unwrap();

    let payment = tracker("owner-a", "missing", "2025-01-20");
    let err = repo.update_payment(&payment).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == payment.id));
}

#[test]
fn soft_delete_keeps_row_and_hides_it_from_reads() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePaymentRepository::try_new(&conn).unwrap();

    let kept = tracker("owner-a", "kept", "2025-01-10");
    let removed = tracker("owner-a", "removed", "2025-01-11");
    repo.create_payment(&kept).unwrap();
    repo.create_payment(&removed).unwrap();

    repo.soft_delete_payment(&removed.owner, removed.id).unwrap();
    repo.soft_delete_payment(&removed.owner, removed.id).unwrap();

    let visible = repo.list_payments(&kept.owner).unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, kept.id);

    assert!(repo.get_payment(&removed.owner, removed.id).unwrap().is_none());
    let inactive: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM trackers WHERE id = ?1 AND is_active = 0;",
            [removed.id.to_string()],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(inactive, 1);

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM trackers;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 2);
}

#[test]
fn other_owners_cannot_see_or_mutate_payments() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePaymentRepository::try_new(&conn).unwrap();

    let payment = tracker("owner-a", "private", "2025-01-10");
    repo.create_payment(&payment).unwrap();
    let intruder = owner("owner-b");

    assert!(repo
        .get_payment(&intruder, payment.id)
        .unwrap()
        .is_none());
    assert!(repo
        .list_payments(&intruder)
        .unwrap()
        .is_empty());

    let err = repo.soft_delete_payment(&intruder, payment.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));

    let mut hijacked = payment.clone();
    hijacked.owner = intruder;
    hijacked.name = "renamed".to_string();
    let err = repo.update_payment(&hijacked).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));

    let untouched = repo
        .get_payment(&payment.owner, payment.id)
        .unwrap()
        .unwrap();
    assert_eq!(untouched.name, "private");
}

#[test]
fn list_orders_by_due_date_then_creation_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePaymentRepository::try_new(&conn).unwrap();

    let late = tracker("owner-a", "late", "2025-03-01");
    let first_tie = tracker("owner-a", "first-tie", "2025-01-20");
    let second_tie = tracker("owner-a", "second-tie", "2025-01-20");
    let early = tracker("owner-a", "early", "2024-12-31");
    for item in [&late, &first_tie, &second_tie, &early] {
        repo.create_payment(item).unwrap();
    }

    let listed: Vec<_> = repo
        .list_payments(&late.owner)
        .unwrap()
        .into_iter()
        .map(|item| item.name)
        .collect();
    assert_eq!(listed, vec!["early", "first-tie", "second-tie", "late"]);
}

#[test]
fn validation_failure_blocks_create_and_update() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePaymentRepository::try_new(&conn).unwrap();

    let mut invalid = tracker("owner-a", "bad", "2025-01-10");
    invalid.amount = Decimal::new(-1, 0);
    let err = repo.create_payment(&invalid).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::NegativeAmount(_))
    ));

    let mut valid = tracker("owner-a", "good", "2025-01-10");
    repo.create_payment(&valid).unwrap();
    valid.color = "red".to_string();
    let err = repo.update_payment(&valid).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::InvalidColor(_))
    ));
}

#[test]
fn read_path_rejects_corrupted_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePaymentRepository::try_new(&conn).unwrap();

    let payment = tracker("owner-a", "corrupt", "2025-01-10");
    repo.create_payment(&payment).unwrap();
    conn.execute("UPDATE trackers SET due_date = '10/01/2025';", [])
        .unwrap();

    let err = repo
        .get_payment(&payment.owner, payment.id)
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("due_date")));
}

#[test]
fn duplicate_id_is_rejected_by_storage() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePaymentRepository::try_new(&conn).unwrap();

    let payment = tracker("owner-a", "dup", "2025-01-10");
    repo.create_payment(&payment).unwrap();
    let err = repo.create_payment(&payment).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqlitePaymentRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_trackers_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqlitePaymentRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("trackers"))
    ));
    assert!(matches!(
        SqliteSettingsRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("reminder_settings"))
    ));
}

#[test]
fn settings_default_when_absent_and_upsert_per_owner() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSettingsRepository::try_new(&conn).unwrap();
    let alice = owner("alice");
    let bob = owner("bob");

    assert_eq!(repo.get_settings(&alice).unwrap(), ReminderSettings::default());

    let custom = ReminderSettings {
        sms: true,
        remind_1_week: true,
        remind_1_day: false,
        ..ReminderSettings::default()
    };
    repo.put_settings(&alice, &custom).unwrap();
    assert_eq!(repo.get_settings(&alice).unwrap(), custom);

    let quieter = ReminderSettings {
        email: false,
        ..custom
    };
    repo.put_settings(&alice, &quieter).unwrap();
    assert_eq!(repo.get_settings(&alice).unwrap(), quieter);

    assert_eq!(repo.get_settings(&bob).unwrap(), ReminderSettings::default());
}

#[test]
fn fixed_ids_survive_storage() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePaymentRepository::try_new(&conn).unwrap();

    let id = Uuid::parse_str("00000000-0000-4000-8000-000000000001").unwrap();
    let payment = TrackedPayment::with_id(
        id,
        owner("owner-a"),
        "imported",
        Decimal::ZERO,
        "Other",
        Cadence::Custom,
        date("2025-02-01"),
    )
    .unwrap();
    assert_eq!(repo.create_payment(&payment).unwrap(), id);
    assert_eq!(
        repo.get_payment(&payment.owner, id).unwrap().unwrap().cadence,
        Cadence::Custom
    );
}
