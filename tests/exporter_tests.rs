// Copyright (c) 2025 Famledger Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use famledger::commands::{exporter, importer};
use famledger::models::TxKind;
use famledger::repo;
use famledger::{cli, db};
use rusqlite::Connection;
use rust_decimal::Decimal;
use tempfile::tempdir;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn seed(conn: &Connection) {
    let alice = repo::add_member(conn, "alice", Some("Alice A")).unwrap();
    repo::add_transaction(
        conn,
        Some(alice.id),
        TxKind::Expense,
        "Food",
        Decimal::from(500),
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        Some("lunch"),
    )
    .unwrap();
    repo::add_transaction(
        conn,
        Some(alice.id),
        TxKind::Income,
        "Salary",
        Decimal::from(2000),
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        None,
    )
    .unwrap();
}

fn run_export(conn: &Connection, format: &str, out: &str) -> anyhow::Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "famledger",
        "export",
        "transactions",
        "--format",
        format,
        "--out",
        out,
    ]);
    match matches.subcommand() {
        Some(("export", export_m)) => exporter::handle(conn, export_m),
        _ => panic!("no export subcommand"),
    }
}

#[test]
fn csv_export_has_contract_columns_oldest_first() {
    let conn = setup();
    seed(&conn);

    let dir = tempdir().unwrap();
    let out = dir.path().join("export.csv");
    run_export(&conn, "csv", out.to_str().unwrap()).unwrap();

    let contents = std::fs::read_to_string(&out).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next().unwrap(),
        "id,member_id,username,display_name,ttype,category,amount,date,notes"
    );
    let first = lines.next().unwrap();
    assert!(first.contains("2024-01-01"), "oldest row first: {}", first);
    assert_eq!(lines.count(), 1);
}

#[test]
fn export_import_round_trip_doubles_count() {
    let mut conn = setup();
    seed(&conn);

    let dir = tempdir().unwrap();
    let out = dir.path().join("export.csv");
    run_export(&conn, "csv", out.to_str().unwrap()).unwrap();

    let outcome = importer::import_transactions(&mut conn, out.to_str().unwrap()).unwrap();
    assert_eq!(outcome.inserted, 2);
    assert!(outcome.skipped.is_empty());

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 4);
}

#[test]
fn json_export_carries_typed_fields() {
    let conn = setup();
    seed(&conn);

    let dir = tempdir().unwrap();
    let out = dir.path().join("export.json");
    run_export(&conn, "json", out.to_str().unwrap()).unwrap();

    let contents = std::fs::read_to_string(&out).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let items = parsed.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["ttype"], "income");
    assert_eq!(items[0]["username"], "alice");
    assert_eq!(items[0]["display_name"], "Alice A");
    assert_eq!(items[0]["amount"], "2000");
    assert_eq!(items[0]["date"], "2024-01-01");
}

#[test]
fn export_rejects_unknown_format() {
    let conn = setup();
    let dir = tempdir().unwrap();
    let out = dir.path().join("export.unknown");
    assert!(run_export(&conn, "xml", out.to_str().unwrap()).is_err());
    assert!(!out.exists());
}
