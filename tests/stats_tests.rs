// Copyright (c) 2025 Famledger Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use famledger::models::{TransactionRow, TxKind};
use famledger::stats;
use rust_decimal::Decimal;

fn row(kind: TxKind, category: &str, amount: &str, date: &str, username: Option<&str>) -> TransactionRow {
    TransactionRow {
        id: 0,
        member_id: username.map(|_| 1),
        username: username.map(|u| u.to_string()),
        display_name: username.map(|u| u.to_string()),
        kind,
        category: category.to_string(),
        amount: amount.parse().unwrap(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        notes: None,
    }
}

#[test]
fn totals_of_empty_set_are_zero() {
    let t = stats::totals(&[]);
    assert_eq!(t.income, Decimal::ZERO);
    assert_eq!(t.expense, Decimal::ZERO);
    assert_eq!(t.net, Decimal::ZERO);
}

#[test]
fn totals_and_monthly_series_for_one_month() {
    // alice: expense 500 on Jan 5, income 2000 on Jan 1
    let rows = vec![
        row(TxKind::Expense, "Food", "500", "2024-01-05", Some("alice")),
        row(TxKind::Income, "Salary", "2000", "2024-01-01", Some("alice")),
    ];

    let t = stats::totals(&rows);
    assert_eq!(t.income, Decimal::from(2000));
    assert_eq!(t.expense, Decimal::from(500));
    assert_eq!(t.net, Decimal::from(1500));

    let series = stats::monthly_net_series(&rows);
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].month, "2024-01");
    assert_eq!(series[0].net, Decimal::from(1500));
}

#[test]
fn monthly_series_is_chronological_and_skips_empty_months() {
    let rows = vec![
        row(TxKind::Income, "Salary", "100", "2024-03-01", None),
        row(TxKind::Expense, "Food", "40", "2024-01-15", None),
        row(TxKind::Income, "Salary", "100", "2024-01-01", None),
    ];
    let series = stats::monthly_net_series(&rows);
    let months: Vec<&str> = series.iter().map(|p| p.month.as_str()).collect();
    // February has no activity and is omitted
    assert_eq!(months, ["2024-01", "2024-03"]);
    assert_eq!(series[0].net, Decimal::from(60));
    assert_eq!(series[1].net, Decimal::from(100));
}

#[test]
fn category_breakdown_sorts_by_amount_then_name() {
    let rows = vec![
        row(TxKind::Expense, "Food", "500", "2024-01-01", None),
        row(TxKind::Expense, "Food", "300", "2024-01-02", None),
        row(TxKind::Expense, "Rent", "800", "2024-01-03", None),
        row(TxKind::Income, "Salary", "9999", "2024-01-04", None),
    ];
    let breakdown = stats::category_breakdown(&rows, TxKind::Expense);
    let got: Vec<(&str, Decimal)> = breakdown
        .iter()
        .map(|c| (c.category.as_str(), c.amount))
        .collect();
    // Rent and Food tie at 800; Food sorts first by name
    assert_eq!(
        got,
        [("Food", Decimal::from(800)), ("Rent", Decimal::from(800))]
    );
}

#[test]
fn category_breakdown_tie_is_name_ascending() {
    let rows = vec![
        row(TxKind::Expense, "Fuel", "500", "2024-01-01", None),
        row(TxKind::Expense, "Food", "500", "2024-01-02", None),
    ];
    let breakdown = stats::category_breakdown(&rows, TxKind::Expense);
    let got: Vec<&str> = breakdown.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(got, ["Food", "Fuel"]);
}

#[test]
fn member_comparison_covers_income_only_members() {
    let rows = vec![
        row(TxKind::Expense, "Food", "120", "2024-01-01", Some("bob")),
        row(TxKind::Expense, "Food", "30", "2024-01-02", Some("bob")),
        row(TxKind::Income, "Salary", "2000", "2024-01-03", Some("alice")),
        row(TxKind::Expense, "Misc", "7", "2024-01-04", None),
    ];
    let comparison = stats::member_comparison(&rows);
    let got: Vec<(&str, Decimal)> = comparison
        .iter()
        .map(|m| (m.member.as_str(), m.expense))
        .collect();
    assert_eq!(
        got,
        [
            (stats::NO_MEMBER, Decimal::from(7)),
            ("alice", Decimal::ZERO),
            ("bob", Decimal::from(150)),
        ]
    );
}

#[test]
fn budget_utilization_thresholds() {
    let ok = stats::budget_utilization(Decimal::from(50), Decimal::from(100));
    assert_eq!(ok.status, stats::BudgetStatus::Ok);

    let warning = stats::budget_utilization(Decimal::from(80), Decimal::from(100));
    assert_eq!(warning.pct, "0.8".parse().unwrap());
    assert_eq!(warning.status, stats::BudgetStatus::Warning);

    let exceeded = stats::budget_utilization(Decimal::from(120), Decimal::from(100));
    assert_eq!(exceeded.pct, "1.2".parse().unwrap());
    assert_eq!(exceeded.status, stats::BudgetStatus::Exceeded);
}

#[test]
fn zero_budget_never_divides() {
    for spent in ["0", "1", "10000"] {
        let util = stats::budget_utilization(spent.parse().unwrap(), Decimal::ZERO);
        assert_eq!(util.pct, Decimal::ZERO);
        assert_eq!(util.status, stats::BudgetStatus::Ok);
    }
}
