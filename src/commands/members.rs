// Copyright (c) 2025 Famledger Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::repo;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let username = sub.get_one::<String>("username").unwrap().trim();
            let display = sub.get_one::<String>("display-name").map(|s| s.as_str());
            let member = repo::add_member(conn, username, display)?;
            println!(
                "Member '{}' ({}) has id {}",
                member.username, member.display_name, member.id
            );
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let members = repo::list_members(conn)?;
            if !maybe_print_json(json_flag, jsonl_flag, &members)? {
                let rows: Vec<Vec<String>> = members
                    .iter()
                    .map(|m| vec![m.id.to_string(), m.username.clone(), m.display_name.clone()])
                    .collect();
                println!("{}", pretty_table(&["ID", "Username", "Display name"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}
