/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::str::FromStr;

use clap::Parser;

use crate::{Move, Position, Square};

/// Command-line options for the `fission` binary.
#[derive(Debug, Clone, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Start from this position instead of the standard one.
    ///
    /// Only the placement and side-to-move fields are read, as in `"4k3/8/8/8/8/8/8/4K3 w"`.
    #[arg(long, value_name = "FEN")]
    pub fen: Option<Position>,

    /// Most verbose level of log events to print to stderr.
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: tracing::Level,

    /// Exit after running COMMANDS, instead of reading more from stdin.
    #[arg(long)]
    pub batch: bool,

    /// Session commands to run on startup, one per argument, such as `e2e4` or `"moves g1"`.
    #[arg(value_name = "COMMANDS")]
    pub commands: Vec<String>,
}

/// A command understood by a running [`crate::Session`].
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    multicall = true,
    about,
    rename_all = "lower",
    override_usage("<COMMAND> | <MOVE>")
)]
pub enum SessionCommand {
    /// Print a visual representation of the current board.
    #[command(alias = "d")]
    Display,

    /// Quit the session.
    #[command(aliases = ["quit", "q"])]
    Exit,

    /// Print the placement and side to move of the current position.
    Fen,

    /// Apply a move for the side to move.
    ///
    /// A bare move like `e2e4` does the same thing.
    #[command(aliases = ["m", "mv"])]
    Move { from: Square, to: Square },

    /// Show every destination of the piece on a square.
    Moves { square: Square },

    /// Start over from the standard starting position.
    New,

    /// Print whether the game is still going, and who won if not.
    #[command(alias = "status")]
    Outcome,
}

impl FromStr for SessionCommand {
    type Err = clap::Error;
    /// Attempt to parse a [`SessionCommand`] from a string.
    ///
    /// If this fails, it will attempt to parse the string as a bare [`Move`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::try_parse_from(s.split_ascii_whitespace()) {
            Ok(cmd) => Ok(cmd),
            Err(e) => match Move::from_uci(s.trim()) {
                Ok(Move { from, to }) => Ok(Self::Move { from, to }),
                Err(_) => Err(e),
            },
        }
    }
}
