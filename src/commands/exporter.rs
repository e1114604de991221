// Copyright (c) 2025 Famledger Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use rusqlite::Connection;
use serde_json::json;

use crate::repo::{self, TxFilter};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

/// Writes the full transaction set, oldest first, as CSV or JSON. The
/// CSV columns mirror what the importer accepts, so an export can be
/// re-imported as-is.
fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let mut rows = repo::query_transactions(conn, &TxFilter::default())?;
    rows.reverse(); // repository order is newest first

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "member_id",
                "username",
                "display_name",
                "ttype",
                "category",
                "amount",
                "date",
                "notes",
            ])?;
            for t in &rows {
                wtr.write_record([
                    t.id.to_string(),
                    t.member_id.map(|id| id.to_string()).unwrap_or_default(),
                    t.username.clone().unwrap_or_default(),
                    t.display_name.clone().unwrap_or_default(),
                    t.kind.to_string(),
                    t.category.clone(),
                    t.amount.to_string(),
                    t.date.to_string(),
                    t.notes.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for t in &rows {
                items.push(json!({
                    "id": t.id,
                    "member_id": t.member_id,
                    "username": t.username,
                    "display_name": t.display_name,
                    "ttype": t.kind.to_string(),
                    "category": t.category,
                    "amount": t.amount.to_string(),
                    "date": t.date.to_string(),
                    "notes": t.notes,
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => unreachable!(),
    }
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}
