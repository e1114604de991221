// Copyright (c) 2025 Famledger Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::str::FromStr;

use anyhow::Result;
use rusqlite::Connection;

use crate::models::{TransactionRow, TxKind};
use crate::repo::{self, TxFilter};
use crate::utils::{id_for_member, maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            repo::delete_transaction(conn, id)?;
            println!("Deleted transaction {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let kind = TxKind::from_str(sub.get_one::<String>("type").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().trim();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let notes = sub
        .get_one::<String>("notes")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty());
    let member_id = match sub.get_one::<String>("member") {
        Some(username) => Some(id_for_member(conn, username.trim())?),
        None => None,
    };

    let id = repo::add_transaction(conn, member_id, kind, category, amount, date, notes)?;
    println!("Recorded {} {} '{}' on {} (id: {})", kind, amount, category, date, id);
    Ok(())
}

/// Builds the repository filter from `--member/--category/--type/--from/--to`.
pub fn filter_from_matches(conn: &Connection, sub: &clap::ArgMatches) -> Result<TxFilter> {
    let mut filter = TxFilter::default();
    if let Some(username) = sub.get_one::<String>("member") {
        filter.member_id = Some(id_for_member(conn, username.trim())?);
    }
    if let Some(category) = sub.get_one::<String>("category") {
        filter.category = Some(category.trim().to_string());
    }
    // Not every caller defines --type; by-category repurposes it
    if let Some(kind) = sub.try_get_one::<String>("type").ok().flatten() {
        filter.kind = Some(TxKind::from_str(kind)?);
    }
    if let Some(from) = sub.get_one::<String>("from") {
        filter.start = Some(parse_date(from)?);
    }
    if let Some(to) = sub.get_one::<String>("to") {
        filter.end = Some(parse_date(to)?);
    }
    Ok(filter)
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let filter = filter_from_matches(conn, sub)?;
    let mut rows = repo::query_transactions(conn, &filter)?;
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    Ok(rows)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.date.to_string(),
                    t.display_name
                        .clone()
                        .or_else(|| t.username.clone())
                        .unwrap_or_default(),
                    t.kind.to_string(),
                    t.category.clone(),
                    t.amount.to_string(),
                    t.notes.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Member", "Type", "Category", "Amount", "Notes"],
                rows,
            )
        );
    }
    Ok(())
}
