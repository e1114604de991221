// Copyright (c) 2025 Famledger Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::str::FromStr;

use anyhow::Result;
use rusqlite::Connection;

use crate::commands::transactions::filter_from_matches;
use crate::models::TxKind;
use crate::repo;
use crate::stats;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("monthly-net", sub)) => monthly_net(conn, sub)?,
        Some(("by-category", sub)) => by_category(conn, sub)?,
        Some(("by-member", sub)) => by_member(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let rows = repo::query_transactions(conn, &filter_from_matches(conn, sub)?)?;
    let totals = stats::totals(&rows);
    if !maybe_print_json(json_flag, jsonl_flag, &totals)? {
        let data = vec![vec![
            totals.income.round_dp(2).to_string(),
            totals.expense.round_dp(2).to_string(),
            totals.net.round_dp(2).to_string(),
        ]];
        println!("{}", pretty_table(&["Income", "Expense", "Net"], data));
    }
    Ok(())
}

fn monthly_net(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let rows = repo::query_transactions(conn, &filter_from_matches(conn, sub)?)?;
    let series = stats::monthly_net_series(&rows);
    if !maybe_print_json(json_flag, jsonl_flag, &series)? {
        let data: Vec<Vec<String>> = series
            .iter()
            .map(|p| vec![p.month.clone(), p.net.round_dp(2).to_string()])
            .collect();
        println!("{}", pretty_table(&["Month", "Net"], data));
    }
    Ok(())
}

fn by_category(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let kind = TxKind::from_str(sub.get_one::<String>("type").unwrap())?;
    // The kind picks which side of the ledger to break down; it must not
    // also narrow the query, so strip it from the filter.
    let mut filter = filter_from_matches(conn, sub)?;
    filter.kind = None;
    let rows = repo::query_transactions(conn, &filter)?;
    let breakdown = stats::category_breakdown(&rows, kind);
    if !maybe_print_json(json_flag, jsonl_flag, &breakdown)? {
        let data: Vec<Vec<String>> = breakdown
            .iter()
            .map(|c| vec![c.category.clone(), c.amount.round_dp(2).to_string()])
            .collect();
        println!("{}", pretty_table(&["Category", "Amount"], data));
    }
    Ok(())
}

fn by_member(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let rows = repo::query_transactions(conn, &filter_from_matches(conn, sub)?)?;
    let comparison = stats::member_comparison(&rows);
    if !maybe_print_json(json_flag, jsonl_flag, &comparison)? {
        let data: Vec<Vec<String>> = comparison
            .iter()
            .map(|m| vec![m.member.clone(), m.expense.round_dp(2).to_string()])
            .collect();
        println!("{}", pretty_table(&["Member", "Expense"], data));
    }
    Ok(())
}
