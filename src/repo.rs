// Copyright (c) 2025 Famledger Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Ledger repository: typed CRUD over members, transactions, and budgets.
//! Every function takes a borrowed connection and re-queries the store;
//! no state is held between calls.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::{LedgerError, Result};
use crate::models::{Budget, Member, TransactionRow, TxKind};

/// Idempotent member creation: an existing username returns the stored
/// member unchanged, never an error.
pub fn add_member(conn: &Connection, username: &str, display_name: Option<&str>) -> Result<Member> {
    let display = display_name
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(username);
    conn.execute(
        "INSERT OR IGNORE INTO members(username, display_name) VALUES (?1, ?2)",
        params![username, display],
    )?;
    let member = conn.query_row(
        "SELECT id, username, display_name FROM members WHERE username=?1",
        params![username],
        |r| {
            Ok(Member {
                id: r.get(0)?,
                username: r.get(1)?,
                display_name: r.get(2)?,
            })
        },
    )?;
    Ok(member)
}

/// Members in insertion (id) order.
pub fn list_members(conn: &Connection) -> Result<Vec<Member>> {
    let mut stmt = conn.prepare("SELECT id, username, display_name FROM members ORDER BY id")?;
    let rows = stmt.query_map([], |r| {
        Ok(Member {
            id: r.get(0)?,
            username: r.get(1)?,
            display_name: r.get(2)?,
        })
    })?;
    let mut members = Vec::new();
    for m in rows {
        members.push(m?);
    }
    Ok(members)
}

/// Appends a transaction and returns its id. `member_id` is not checked
/// against the members table. Negative amounts are rejected; the stored
/// amount is always the magnitude, signed by `kind` at aggregation time.
pub fn add_transaction(
    conn: &Connection,
    member_id: Option<i64>,
    kind: TxKind,
    category: &str,
    amount: Decimal,
    date: NaiveDate,
    notes: Option<&str>,
) -> Result<i64> {
    if amount < Decimal::ZERO {
        return Err(LedgerError::Validation(format!(
            "negative amount '{}': use --type expense instead",
            amount
        )));
    }
    conn.execute(
        "INSERT INTO transactions(member_id, ttype, category, amount, date, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            member_id,
            kind.as_str(),
            category,
            amount.to_string(),
            date.to_string(),
            notes
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Removes by id; silently a no-op when the id does not exist.
pub fn delete_transaction(conn: &Connection, id: i64) -> Result<()> {
    conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    Ok(())
}

/// Optional, conjunctive filters for [`query_transactions`]. The date
/// range is inclusive on both ends.
#[derive(Debug, Clone, Default)]
pub struct TxFilter {
    pub member_id: Option<i64>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub category: Option<String>,
    pub kind: Option<TxKind>,
}

/// Transactions joined with member display fields, ordered by date
/// descending then id descending so same-day entries are deterministic.
pub fn query_transactions(conn: &Connection, filter: &TxFilter) -> Result<Vec<TransactionRow>> {
    let mut sql = String::from(
        "SELECT t.id, t.member_id, m.username, m.display_name, t.ttype, t.category, t.amount, t.date, t.notes
         FROM transactions t LEFT JOIN members m ON t.member_id=m.id WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(member_id) = filter.member_id {
        sql.push_str(" AND t.member_id=?");
        params_vec.push(member_id.to_string());
    }
    if let Some(ref category) = filter.category {
        sql.push_str(" AND t.category=?");
        params_vec.push(category.clone());
    }
    if let Some(kind) = filter.kind {
        sql.push_str(" AND t.ttype=?");
        params_vec.push(kind.as_str().to_string());
    }
    if let Some(start) = filter.start {
        sql.push_str(" AND date(t.date) >= date(?)");
        params_vec.push(start.to_string());
    }
    if let Some(end) = filter.end {
        sql.push_str(" AND date(t.date) <= date(?)");
        params_vec.push(end.to_string());
    }
    sql.push_str(" ORDER BY date(t.date) DESC, t.id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let kind_s: String = r.get(4)?;
        let amount_s: String = r.get(6)?;
        data.push(TransactionRow {
            id: r.get(0)?,
            member_id: r.get(1)?,
            username: r.get(2)?,
            display_name: r.get(3)?,
            kind: TxKind::from_str(&kind_s).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    4,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?,
            category: r.get(5)?,
            amount: amount_s.parse::<Decimal>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    6,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?,
            date: r.get(7)?,
            notes: r.get(8)?,
        });
    }
    Ok(data)
}

/// Upsert: at most one budget row per member.
pub fn set_budget(conn: &Connection, member_id: i64, monthly_budget: Decimal) -> Result<()> {
    if monthly_budget < Decimal::ZERO {
        return Err(LedgerError::Validation(format!(
            "negative monthly budget '{}'",
            monthly_budget
        )));
    }
    conn.execute(
        "INSERT INTO budgets(member_id, monthly_budget) VALUES (?1, ?2)
         ON CONFLICT(member_id) DO UPDATE SET monthly_budget=excluded.monthly_budget",
        params![member_id, monthly_budget.to_string()],
    )?;
    Ok(())
}

pub fn get_budget(conn: &Connection, member_id: i64) -> Result<Option<Budget>> {
    let row = conn
        .query_row(
            "SELECT id, member_id, monthly_budget, currency FROM budgets WHERE member_id=?1",
            params![member_id],
            |r| {
                Ok((
                    r.get::<_, i64>(0)?,
                    r.get::<_, i64>(1)?,
                    r.get::<_, String>(2)?,
                    r.get::<_, String>(3)?,
                ))
            },
        )
        .optional()?;
    match row {
        Some((id, member_id, amount_s, currency)) => {
            let monthly_budget = amount_s.parse::<Decimal>().map_err(|e| {
                LedgerError::Validation(format!("invalid stored budget '{}': {}", amount_s, e))
            })?;
            Ok(Some(Budget {
                id,
                member_id,
                monthly_budget,
                currency,
            }))
        }
        None => Ok(None),
    }
}
