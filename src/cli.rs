// Copyright (c) 2025 Famledger Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn range_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("member")
            .long("member")
            .value_name("USERNAME")
            .help("Restrict to one member"),
    )
    .arg(
        Arg::new("from")
            .long("from")
            .value_name("YYYY-MM-DD")
            .help("Start date, inclusive"),
    )
    .arg(
        Arg::new("to")
            .long("to")
            .value_name("YYYY-MM-DD")
            .help("End date, inclusive"),
    )
    .arg(
        Arg::new("category")
            .long("category")
            .help("Exact category match"),
    )
}

pub fn build_cli() -> Command {
    Command::new("famledger")
        .about("Family income/expense ledger with monthly budgets and dashboard reports")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Create the database if it does not exist"))
        .subcommand(
            Command::new("member")
                .about("Manage household members")
                .subcommand(
                    Command::new("add")
                        .about("Create a member (no-op if the username exists)")
                        .arg(Arg::new("username").required(true))
                        .arg(
                            Arg::new("display-name")
                                .long("display-name")
                                .value_name("NAME")
                                .help("Defaults to the username"),
                        ),
                )
                .subcommand(json_flags(Command::new("list").about("List members"))),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(
                    Command::new("add")
                        .about("Append an income or expense")
                        .arg(
                            Arg::new("member")
                                .long("member")
                                .value_name("USERNAME")
                                .help("Member the transaction belongs to"),
                        )
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .value_name("income|expense"),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .required(true)
                                .value_name("YYYY-MM-DD"),
                        )
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(json_flags(
                    range_args(Command::new("list").about("List transactions, newest first"))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_name("income|expense"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction by id (no-op if absent)")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Per-member monthly budgets")
                .subcommand(
                    Command::new("set")
                        .about("Set (or replace) a member's monthly budget")
                        .arg(Arg::new("member").long("member").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(json_flags(Command::new("list").about("List budgets per member")))
                .subcommand(json_flags(
                    Command::new("report")
                        .about("Spend vs budget with utilization alerts")
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .value_name("YYYY-MM")
                                .help("Defaults to the current month"),
                        ),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Dashboard aggregates")
                .subcommand(json_flags(range_args(
                    Command::new("summary").about("Income, expense, and net totals"),
                )))
                .subcommand(json_flags(range_args(
                    Command::new("monthly-net").about("Net per calendar month"),
                )))
                .subcommand(json_flags(
                    range_args(Command::new("by-category").about("Totals per category")).arg(
                        Arg::new("type")
                            .long("type")
                            .value_name("income|expense")
                            .default_value("expense"),
                    ),
                ))
                .subcommand(json_flags(range_args(
                    Command::new("by-member").about("Expense totals per member"),
                ))),
        )
        .subcommand(
            Command::new("import").about("Bulk import").subcommand(
                Command::new("transactions")
                    .about("Import transactions from a CSV file")
                    .arg(Arg::new("path").long("path").required(true)),
            ),
        )
        .subcommand(
            Command::new("export").about("Bulk export").subcommand(
                Command::new("transactions")
                    .about("Export all transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .value_name("csv|json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(Command::new("doctor").about("Report ledger consistency issues"))
}
