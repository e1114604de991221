// Copyright (c) 2025 Famledger Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::utils::pretty_table;

/// Consistency checks for what the schema deliberately does not enforce:
/// dangling member references and malformed stored values.
pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Transactions pointing at a member that does not exist
    let mut stmt = conn.prepare(
        "SELECT t.id, t.member_id FROM transactions t
         WHERE t.member_id IS NOT NULL
           AND NOT EXISTS (SELECT 1 FROM members m WHERE m.id = t.member_id)",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let member_id: i64 = r.get(1)?;
        rows.push(vec![
            "orphan_transaction_member".into(),
            format!("tx {} -> member {}", id, member_id),
        ]);
    }

    // 2) Budgets for a member that does not exist
    let mut stmt2 = conn.prepare(
        "SELECT b.id, b.member_id FROM budgets b
         WHERE NOT EXISTS (SELECT 1 FROM members m WHERE m.id = b.member_id)",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        let member_id: i64 = r.get(1)?;
        rows.push(vec![
            "orphan_budget_member".into(),
            format!("budget {} -> member {}", id, member_id),
        ]);
    }

    // 3) Stored amounts that no longer parse or carry a sign
    let mut stmt3 = conn.prepare("SELECT id, amount FROM transactions")?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let id: i64 = r.get(0)?;
        let amount_s: String = r.get(1)?;
        match amount_s.parse::<Decimal>() {
            Ok(d) if d < Decimal::ZERO => {
                rows.push(vec!["negative_amount".into(), format!("tx {}: {}", id, d)]);
            }
            Ok(_) => {}
            Err(_) => {
                rows.push(vec!["bad_amount".into(), format!("tx {}: '{}'", id, amount_s)]);
            }
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
