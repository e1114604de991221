// Copyright (c) 2025 Famledger Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::str::FromStr;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::models::TxKind;
use crate::repo;
use crate::utils::parse_date;

/// Username assigned to rows that carry no `username`/`user` field.
pub const FALLBACK_USERNAME: &str = "import_user";

#[derive(Debug)]
pub struct ImportOutcome {
    pub inserted: usize,
    /// (1-based file line, reason) for rows that could not be inserted.
    pub skipped: Vec<(usize, String)>,
}

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let path = sub.get_one::<String>("path").unwrap().trim();
            let outcome = import_transactions(conn, path)?;
            println!("Imported {} rows from {}", outcome.inserted, path);
            for (line, reason) in &outcome.skipped {
                eprintln!("skipped line {}: {}", line, reason);
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Best-effort CSV import: one transaction per row, members created on
/// demand, bad rows skipped without aborting the batch. The whole batch
/// goes through one SQLite transaction so concurrent readers see either
/// none or all of it. Only a structural read failure of the input is an
/// error.
pub fn import_transactions(conn: &mut Connection, path: &str) -> Result<ImportOutcome> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let columns = Columns::from_headers(rdr.headers()?);

    let tx = conn.transaction()?;
    let mut inserted = 0usize;
    let mut skipped = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let line = i + 2; // line 1 is the header
        let rec = match result {
            Ok(rec) => rec,
            Err(e) => {
                skipped.push((line, e.to_string()));
                continue;
            }
        };
        if let Err(e) = import_row(&tx, &columns, &rec) {
            skipped.push((line, e.to_string()));
            continue;
        }
        inserted += 1;
    }

    tx.commit()?;
    Ok(ImportOutcome { inserted, skipped })
}

/// Header-addressed column positions; `username`/`user` and
/// `ttype`/`type` are accepted interchangeably.
struct Columns {
    username: Option<usize>,
    date: Option<usize>,
    kind: Option<usize>,
    category: Option<usize>,
    amount: Option<usize>,
    notes: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let col = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        Columns {
            username: col("username").or_else(|| col("user")),
            date: col("date"),
            kind: col("ttype").or_else(|| col("type")),
            category: col("category"),
            amount: col("amount"),
            notes: col("notes"),
        }
    }
}

fn field(rec: &StringRecord, idx: Option<usize>) -> Option<&str> {
    idx.and_then(|i| rec.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn import_row(tx: &Connection, columns: &Columns, rec: &StringRecord) -> Result<()> {
    let username = field(rec, columns.username).unwrap_or(FALLBACK_USERNAME);
    let member = repo::add_member(tx, username, None)?;

    let date = parse_date(field(rec, columns.date).context("date missing")?)?;
    let kind = match field(rec, columns.kind) {
        Some(s) => TxKind::from_str(s)?,
        None => TxKind::Expense,
    };
    let category = field(rec, columns.category).unwrap_or("Imported");
    let amount = match field(rec, columns.amount) {
        Some(s) => s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}'", s))?,
        None => Decimal::ZERO,
    };
    let notes = field(rec, columns.notes);

    repo::add_transaction(tx, Some(member.id), kind, category, amount, date, notes)?;
    Ok(())
}
