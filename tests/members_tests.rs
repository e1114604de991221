// Copyright (c) 2025 Famledger Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use famledger::{db, repo};
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

#[test]
fn add_member_is_idempotent() {
    let conn = setup();
    let first = repo::add_member(&conn, "alice", Some("Alice A")).unwrap();
    let second = repo::add_member(&conn, "alice", Some("Someone Else")).unwrap();
    assert_eq!(first.id, second.id);
    // The existing row wins; the second display name is ignored
    assert_eq!(second.display_name, "Alice A");

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM members", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn display_name_defaults_to_username() {
    let conn = setup();
    let m = repo::add_member(&conn, "bob", None).unwrap();
    assert_eq!(m.display_name, "bob");

    let blank = repo::add_member(&conn, "carol", Some("   ")).unwrap();
    assert_eq!(blank.display_name, "carol");
}

#[test]
fn list_members_in_insertion_order() {
    let conn = setup();
    repo::add_member(&conn, "zoe", None).unwrap();
    repo::add_member(&conn, "adam", None).unwrap();
    repo::add_member(&conn, "mira", None).unwrap();

    let members = repo::list_members(&conn).unwrap();
    let names: Vec<&str> = members.iter().map(|m| m.username.as_str()).collect();
    assert_eq!(names, ["zoe", "adam", "mira"]);
    assert!(members.windows(2).all(|w| w[0].id < w[1].id));
}
