// Copyright (c) 2025 Famledger Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use famledger::errors::LedgerError;
use famledger::{db, repo};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

#[test]
fn set_budget_upserts_single_row_per_member() {
    let conn = setup();
    let m = repo::add_member(&conn, "alice", None).unwrap();

    repo::set_budget(&conn, m.id, Decimal::from(5000)).unwrap();
    repo::set_budget(&conn, m.id, Decimal::from(8000)).unwrap();

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM budgets", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);

    let budget = repo::get_budget(&conn, m.id).unwrap().unwrap();
    assert_eq!(budget.monthly_budget, Decimal::from(8000));
    assert_eq!(budget.currency, "INR");
}

#[test]
fn get_budget_absent_is_none() {
    let conn = setup();
    let m = repo::add_member(&conn, "alice", None).unwrap();
    assert!(repo::get_budget(&conn, m.id).unwrap().is_none());
}

#[test]
fn negative_budget_is_rejected() {
    let conn = setup();
    let m = repo::add_member(&conn, "alice", None).unwrap();
    let err = repo::set_budget(&conn, m.id, Decimal::from(-1)).unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
}

#[test]
fn budget_for_unknown_member_is_permitted() {
    // Referential integrity is intentionally not enforced; doctor reports it
    let conn = setup();
    repo::set_budget(&conn, 404, Decimal::from(100)).unwrap();
    let budget = repo::get_budget(&conn, 404).unwrap().unwrap();
    assert_eq!(budget.monthly_budget, Decimal::from(100));
}
