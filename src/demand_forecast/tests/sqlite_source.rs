mod common;
use common::{count, insert_raw, setup_db};

use chrono::{TimeZone, Utc};
use demand_forecast::db::connection::connect_sqlite;
use demand_forecast::error::SourceError;
use demand_forecast::source::sqlite::{PurchaseEvent, insert_purchases, load_records, load_sales};
use demand_forecast::source::{RecordSource, SqliteSource};

#[test]
fn null_and_empty_item_names_are_filtered_by_the_query() {
    let (db, mut conn) = setup_db();
    insert_raw(&mut conn, Some("Gauze"), "2025-01-01T08:00:00.000Z", 2.0);
    insert_raw(&mut conn, None, "2025-01-01T09:00:00.000Z", 5.0);
    insert_raw(&mut conn, Some(""), "2025-01-01T10:00:00.000Z", 7.0);

    let records = SqliteSource::new(db.path.clone()).fetch().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].item_name, "Gauze");
    assert_eq!(records[0].quantity, 2.0);
}

#[test]
fn unreadable_purchase_dates_are_skipped() {
    let (_db, mut conn) = setup_db();
    insert_raw(&mut conn, Some("Gauze"), "2025-01-01T08:00:00.000Z", 2.0);
    insert_raw(&mut conn, Some("Gauze"), "not a date", 3.0);
    insert_raw(&mut conn, Some("Gauze"), "2025-01-02 08:00:00", 4.0);

    let records = load_records(&mut conn).unwrap();
    let qty: Vec<f64> = records.iter().map(|r| r.quantity).collect();
    assert_eq!(qty, vec![2.0, 4.0]);
    assert_eq!(
        records[1].purchase_date,
        Utc.with_ymd_and_hms(2025, 1, 2, 8, 0, 0).unwrap()
    );
}

#[test]
fn imported_purchases_are_readable() {
    let (db, mut conn) = setup_db();
    let events: Vec<PurchaseEvent> = serde_json::from_str(
        r#"[
            {"itemName": "Bandages", "purchaseDate": "2025-01-01T10:00:00Z", "quantity": 10,
             "price": 2.5, "totalAmount": 25.0, "buyerName": "Asha", "paymentMode": "upi"},
            {"itemName": "Bandages", "purchaseDate": "2025-01-02T10:00:00+05:30", "quantity": 12},
            {"purchaseDate": "2025-01-02T11:00:00Z", "quantity": 1}
        ]"#,
    )
    .unwrap();

    let written = insert_purchases(&mut conn, &events).unwrap();
    assert_eq!(written, 3);
    assert_eq!(count(&mut conn, "purchase_history"), 3);

    let mut conn2 = connect_sqlite(&db.path).unwrap();
    let records = load_records(&mut conn2).unwrap();
    assert_eq!(records.len(), 2, "nameless purchase is filtered");
    assert_eq!(
        records[1].purchase_date,
        Utc.with_ymd_and_hms(2025, 1, 2, 4, 30, 0).unwrap()
    );
}

#[test]
fn failed_import_writes_nothing() {
    let (_db, mut conn) = setup_db();
    let ts = Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap();
    let ok = PurchaseEvent {
        item_name: Some("Gauze".into()),
        purchase_date: ts,
        quantity: 1.0,
        price: None,
        total_amount: None,
        buyer_name: None,
        payment_mode: Some("cash".into()),
    };
    let bad = PurchaseEvent {
        payment_mode: Some("barter".into()),
        ..ok.clone()
    };

    assert!(insert_purchases(&mut conn, &[ok, bad]).is_err());
    assert_eq!(count(&mut conn, "purchase_history"), 0);
}

#[test]
fn unreachable_store_is_unavailable() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("missing").join("sales.db");

    let err = SqliteSource::new(path.to_string_lossy()).fetch().unwrap_err();
    assert!(matches!(err, SourceError::Unavailable(_)));
}

#[test]
fn unmigrated_store_is_unavailable() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    let err = SqliteSource::new(tmp.path().to_string_lossy())
        .fetch()
        .unwrap_err();
    assert!(err.to_string().contains("query purchase_history"));
}

#[test]
fn missing_store_file_is_not_created_by_fetch() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("typo_sales.db");

    let mut source = SqliteSource::new(path.to_string_lossy());
    let err = source.fetch().unwrap_err();
    assert!(matches!(err, SourceError::Unavailable(_)));
    assert!(err.to_string().contains("not found"));
    assert!(source.fetch_sales().is_err());

    let left: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert!(left.is_empty(), "fetch must not create files: {left:?}");
}

#[test]
fn sales_include_unnamed_rows_and_read_null_amounts_as_zero() {
    let (db, mut conn) = setup_db();
    let events: Vec<PurchaseEvent> = serde_json::from_str(
        r#"[
            {"itemName": "Gauze", "purchaseDate": "2025-01-01T10:00:00Z", "quantity": 2, "totalAmount": 8.5},
            {"itemName": "Gauze", "purchaseDate": "2025-01-02T10:00:00Z", "quantity": 1},
            {"purchaseDate": "2025-01-03T10:00:00Z", "quantity": 1, "totalAmount": 4.0}
        ]"#,
    )
    .unwrap();
    insert_purchases(&mut conn, &events).unwrap();

    let sales = load_sales(&mut conn).unwrap();
    let amounts: Vec<(Option<&str>, f64)> = sales
        .iter()
        .map(|s| (s.item_name.as_deref(), s.total_amount))
        .collect();
    assert_eq!(
        amounts,
        vec![(Some("Gauze"), 8.5), (Some("Gauze"), 0.0), (None, 4.0)]
    );

    let fetched = SqliteSource::new(db.path.clone()).fetch_sales().unwrap();
    assert_eq!(fetched, sales);
}
