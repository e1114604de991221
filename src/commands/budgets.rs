// Copyright (c) 2025 Famledger Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::repo::{self, TxFilter};
use crate::stats::{self, BudgetStatus};
use crate::utils::{
    current_month, fmt_money, id_for_member, maybe_print_json, month_bounds, parse_decimal,
    parse_month, pretty_table,
};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("report", sub)) => report(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let username = sub.get_one::<String>("member").unwrap().trim();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let member_id = id_for_member(conn, username)?;
    repo::set_budget(conn, member_id, amount)?;
    println!("Budget set for {} = {}", username, amount);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let mut data = Vec::new();
    for member in repo::list_members(conn)? {
        let budget = repo::get_budget(conn, member.id)?;
        data.push(match budget {
            Some(b) => vec![
                member.username,
                fmt_money(&b.monthly_budget, &b.currency),
            ],
            None => vec![member.username, "-".to_string()],
        });
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", pretty_table(&["Member", "Monthly budget"], data));
    }
    Ok(())
}

#[derive(Serialize)]
struct BudgetReportRow {
    member: String,
    budget: Decimal,
    spent: Decimal,
    pct: Decimal,
    status: BudgetStatus,
}

/// Current-month (or `--month`) expense total per member against their
/// budget, with the utilization alert level.
fn report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => current_month(),
    };
    let (start, end) = month_bounds(&month)?;

    let mut data = Vec::new();
    for member in repo::list_members(conn)? {
        let budget = repo::get_budget(conn, member.id)?
            .map(|b| b.monthly_budget)
            .unwrap_or(Decimal::ZERO);
        let filter = TxFilter {
            member_id: Some(member.id),
            start: Some(start),
            end: Some(end),
            ..TxFilter::default()
        };
        let spent = stats::totals(&repo::query_transactions(conn, &filter)?).expense;
        let util = stats::budget_utilization(spent, budget);
        data.push(BudgetReportRow {
            member: member.username,
            budget,
            spent,
            pct: util.pct,
            status: util.status,
        });
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.member.clone(),
                    r.budget.round_dp(2).to_string(),
                    r.spent.round_dp(2).to_string(),
                    format!("{:.0}%", r.pct * Decimal::from(100)),
                    match r.status {
                        BudgetStatus::Ok => "ok".to_string(),
                        BudgetStatus::Warning => "warning".to_string(),
                        BudgetStatus::Exceeded => "exceeded".to_string(),
                    },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Member", "Budget", "Spent", "Used", "Status"], rows)
        );
    }
    Ok(())
}
