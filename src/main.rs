/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::io;

use anyhow::Result;
use clap::Parser;
use fission::{Cli, Session};

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr, so stdout only ever holds command output
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} encountered an error: {e:#}", env!("CARGO_PKG_NAME"));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut session = Session::new(cli.fen.unwrap_or_default());
    let mut stdout = io::stdout().lock();

    if session.run_commands(&cli.commands, &mut stdout)?.is_break() || cli.batch {
        return Ok(());
    }

    session.run(io::stdin().lock(), &mut stdout)
}
