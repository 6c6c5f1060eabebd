/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    io::{self, BufRead, Write},
    ops::ControlFlow,
};

use anyhow::{Context, Result};

use crate::{Position, SessionCommand, Square};

/// An interactive game of atomic chess, driven by [`SessionCommand`]s.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// The game being played.
    ///
    /// Replaced wholesale by the `new` command.
    position: Position,
}

impl Session {
    /// Constructs a new [`Session`] playing from `position`.
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// The current state of the game.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Parses and executes every command in `commands`, stopping early on `exit`.
    ///
    /// Commands that fail are reported on stderr and skipped.
    pub fn run_commands<T: AsRef<str>>(
        &mut self,
        commands: impl IntoIterator<Item = T>,
        out: &mut impl Write,
    ) -> Result<ControlFlow<()>> {
        for input in commands {
            if self.handle_line(input.as_ref(), out)?.is_break() {
                return Ok(ControlFlow::Break(()));
            }
        }

        Ok(ControlFlow::Continue(()))
    }

    /// Reads commands from `input` line by line until `exit` or end of input.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> Result<()> {
        for line in input.lines() {
            let line = line.context("Failed to read a command from input")?;

            if self.handle_line(&line, out)?.is_break() {
                break;
            }
        }

        Ok(())
    }

    /// Executes a single line of input, printing any error to stderr.
    ///
    /// Only failing to write to `out` is treated as fatal.
    fn handle_line(&mut self, line: &str, out: &mut impl Write) -> Result<ControlFlow<()>> {
        let line = line.trim();

        // Ignore empty lines
        if line.is_empty() {
            return Ok(ControlFlow::Continue(()));
        }

        let cmd = match line.parse::<SessionCommand>() {
            Ok(cmd) => cmd,
            Err(err) => {
                eprintln!("{err}");
                return Ok(ControlFlow::Continue(()));
            }
        };

        match self.execute(cmd, out) {
            Ok(flow) => Ok(flow),
            Err(err) if err.is::<io::Error>() => Err(err),
            Err(err) => {
                eprintln!("Error: {err}");
                Ok(ControlFlow::Continue(()))
            }
        }
    }

    /// Executes a single [`SessionCommand`], writing its output to `out`.
    pub fn execute(&mut self, cmd: SessionCommand, out: &mut impl Write) -> Result<ControlFlow<()>> {
        match cmd {
            SessionCommand::Display => writeln!(out, "{}", self.position)?,

            SessionCommand::Exit => return Ok(ControlFlow::Break(())),

            SessionCommand::Fen => writeln!(out, "{}", self.position.to_fen())?,

            SessionCommand::Move { from, to } => {
                let report = self.position.apply_move(from, to)?;
                writeln!(out, "{report}")?;
            }

            SessionCommand::Moves { square } => self.moves(square, out)?,

            SessionCommand::New => self.position = Position::new_game(),

            SessionCommand::Outcome => writeln!(out, "{}", self.position.outcome())?,
        }

        Ok(ControlFlow::Continue(()))
    }

    /// Executes the `moves` command, printing every destination of the piece on `square`.
    fn moves(&self, square: Square, out: &mut impl Write) -> io::Result<()> {
        let moves = self.position.legal_destinations(square);

        // If there are none, print "(none)"
        if moves.is_empty() {
            return writeln!(out, "(none)");
        }

        let moves_string = moves
            .iter()
            .map(|to| format!("{square}{to}"))
            .collect::<Vec<_>>()
            .join(", ");

        writeln!(out, "{moves_string}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Outcome, Side};

    fn run(session: &mut Session, commands: &[&str]) -> String {
        let mut out = Vec::new();
        session.run_commands(commands, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_moves_and_fen() {
        let mut session = Session::default();
        let out = run(&mut session, &["moves b1", "e2e4", "fen"]);
        let lines = out.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], "b1c3, b1a3");
        assert_eq!(lines[1], "white pawn e2e4");
        assert_eq!(lines[2], "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b");
        assert_eq!(session.position().side_to_move(), Side::Black);
    }

    #[test]
    fn test_errors_do_not_stop_the_session() {
        let mut session = Session::default();
        let out = run(&mut session, &["e7e5", "nonsense", "e2e5", "moves e4", "outcome"]);

        assert_eq!(out, "(none)\nin progress\n");
        assert_eq!(session.position(), &Position::new_game());
    }

    #[test]
    fn test_exit_stops_early() {
        let mut session = Session::default();
        let mut out = Vec::new();
        let flow = session
            .run_commands(["exit", "e2e4"], &mut out)
            .unwrap();

        assert!(flow.is_break());
        assert!(out.is_empty());
        assert_eq!(session.position(), &Position::new_game());
    }

    #[test]
    fn test_run_reads_lines() {
        let mut session = Session::new("4k3/3p4/8/8/8/8/8/3RK3 w".parse().unwrap());
        let input = "\n  d1d7  \nstatus\nquit\ne1e2\n".as_bytes();
        let mut out = Vec::new();
        session.run(input, &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(out, "white rook d1d7 captures, blast clears [e8], white won\nwhite won\n");
        assert_eq!(session.position().outcome(), Outcome::WhiteWon);
    }

    #[test]
    fn test_new_resets() {
        let mut session = Session::default();
        run(&mut session, &["g1f3", "new"]);
        assert_eq!(session.position(), &Position::new_game());
    }
}
