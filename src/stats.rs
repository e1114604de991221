// Copyright (c) 2025 Famledger Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Aggregation engine: pure functions over transaction rows already
//! fetched by the repository. No database access, no side effects.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{TransactionRow, TxKind};

/// Label for rows whose `member_id` is NULL or dangling.
pub const NO_MEMBER: &str = "(nobody)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

/// Sums amounts by kind; `net = income - expense`. All zero on an empty set.
pub fn totals(rows: &[TransactionRow]) -> Totals {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for t in rows {
        match t.kind {
            TxKind::Income => income += t.amount,
            TxKind::Expense => expense += t.amount,
        }
    }
    Totals {
        income,
        expense,
        net: income - expense,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyNet {
    pub month: String,
    pub net: Decimal,
}

/// Net per calendar month, chronological. Months with no activity are
/// omitted, not zero-filled.
pub fn monthly_net_series(rows: &[TransactionRow]) -> Vec<MonthlyNet> {
    let mut map: BTreeMap<String, Decimal> = BTreeMap::new();
    for t in rows {
        let signed = match t.kind {
            TxKind::Income => t.amount,
            TxKind::Expense => -t.amount,
        };
        *map.entry(t.date.format("%Y-%m").to_string())
            .or_insert(Decimal::ZERO) += signed;
    }
    map.into_iter()
        .map(|(month, net)| MonthlyNet { month, net })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
}

/// Per-category totals for one kind, amount descending; equal amounts
/// ordered by category name ascending.
pub fn category_breakdown(rows: &[TransactionRow], kind: TxKind) -> Vec<CategoryTotal> {
    let mut agg: BTreeMap<String, Decimal> = BTreeMap::new();
    for t in rows.iter().filter(|t| t.kind == kind) {
        *agg.entry(t.category.clone()).or_insert(Decimal::ZERO) += t.amount;
    }
    let mut items: Vec<CategoryTotal> = agg
        .into_iter()
        .map(|(category, amount)| CategoryTotal { category, amount })
        .collect();
    items.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.category.cmp(&b.category)));
    items
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberExpense {
    pub member: String,
    pub expense: Decimal,
}

/// One row per distinct member appearing in the set, username ascending.
/// Members with no expenses in the set still appear with a zero total.
pub fn member_comparison(rows: &[TransactionRow]) -> Vec<MemberExpense> {
    let mut agg: BTreeMap<String, Decimal> = BTreeMap::new();
    for t in rows {
        let who = t.username.clone().unwrap_or_else(|| NO_MEMBER.to_string());
        let entry = agg.entry(who).or_insert(Decimal::ZERO);
        if t.kind == TxKind::Expense {
            *entry += t.amount;
        }
    }
    agg.into_iter()
        .map(|(member, expense)| MemberExpense { member, expense })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Ok,
    Warning,
    Exceeded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetUtilization {
    pub pct: Decimal,
    pub status: BudgetStatus,
}

/// `pct = spent / monthly_budget` when the budget is positive, else zero.
/// Warning at 80% utilization, exceeded at 100%.
pub fn budget_utilization(spent: Decimal, monthly_budget: Decimal) -> BudgetUtilization {
    if monthly_budget <= Decimal::ZERO {
        return BudgetUtilization {
            pct: Decimal::ZERO,
            status: BudgetStatus::Ok,
        };
    }
    let pct = spent / monthly_budget;
    let status = if pct >= Decimal::ONE {
        BudgetStatus::Exceeded
    } else if pct >= Decimal::new(8, 1) {
        BudgetStatus::Warning
    } else {
        BudgetStatus::Ok
    };
    BudgetUtilization { pct, status }
}
