//! Go Text Protocol front end for the NoGo solver.
//!
//! Reads one command per line and answers `= <text>` or `? <text>`, each
//! reply terminated by a blank line. Board rules and the solver live in the
//! session; this layer only parses, validates and formats.

pub mod commands;

use std::io::{self, BufRead, Write};

use log::{debug, warn};
use thiserror::Error;

use crate::config::ConfigError;
use crate::session::{GenMove, Session, SolveReply};
use crate::solver::SolveError;
use crate::state::SearchBoard;
use crate::types::{format_point, parse_point, Color, CoordError};

pub use commands::Command;

pub const ENGINE_NAME: &str = "NoGoSolver";

#[derive(Debug, Error)]
pub enum GtpError {
    #[error("GTP stream error: {0}")]
    Io(#[from] io::Error),
}

/// Failures reported to the controller as `? <message>`.
#[derive(Debug, Error)]
enum CommandError {
    #[error(transparent)]
    Coord(#[from] CoordError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Solve(#[from] SolveError),
    #[error("{0}")]
    Argument(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct GtpConnection<W: Write> {
    session: Session,
    out: W,
}

impl<W: Write> GtpConnection<W> {
    pub fn new(session: Session, out: W) -> Self {
        Self { session, out }
    }

    #[inline]
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Serve commands until `quit` or end of input.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<(), GtpError> {
        for line in input.lines() {
            if self.handle_line(&line?)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    pub fn handle_line(&mut self, raw: &str) -> Result<Flow, GtpError> {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }
        // Regression files prefix commands with a numeric id.
        let line = line.trim_start_matches(|c: char| c.is_ascii_digit()).trim_start();
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Ok(Flow::Continue);
        };
        let args: Vec<&str> = parts.collect();
        debug!("<- {line}");

        let Some(cmd) = Command::from_name(name) else {
            warn!("unknown command: {name}");
            self.failure("Unknown command")?;
            return Ok(Flow::Continue);
        };
        if let Some((required, usage)) = cmd.arity() {
            if args.len() != required {
                self.failure(usage)?;
                return Ok(Flow::Continue);
            }
        }

        match self.execute(cmd, &args) {
            Ok(text) => self.success(&text)?,
            Err(e) => self.failure(&e.to_string())?,
        }
        Ok(if cmd == Command::Quit { Flow::Quit } else { Flow::Continue })
    }

    fn success(&mut self, text: &str) -> io::Result<()> {
        debug!("-> = {text}");
        write!(self.out, "= {text}\n\n")?;
        self.out.flush()
    }

    fn failure(&mut self, text: &str) -> io::Result<()> {
        debug!("-> ? {text}");
        write!(self.out, "? {text}\n\n")?;
        self.out.flush()
    }

    fn execute(&mut self, cmd: Command, args: &[&str]) -> Result<String, CommandError> {
        let size = self.session.board().size();
        let reply = match cmd {
            Command::ProtocolVersion => "2".to_string(),
            Command::Quit => String::new(),
            Command::Name => ENGINE_NAME.to_string(),
            Command::Version => env!("CARGO_PKG_VERSION").to_string(),
            Command::BoardSize => {
                let size: u8 = args[0]
                    .parse()
                    .map_err(|_| CommandError::Argument(format!("invalid board size \"{}\"", args[0])))?;
                self.session.reset(size)?;
                String::new()
            }
            Command::ClearBoard => {
                self.session.reset(size)?;
                String::new()
            }
            Command::ShowBoard => format!("\n{}", self.session.board().render().trim_end()),
            Command::Komi => {
                let komi: f32 = args[0]
                    .parse()
                    .map_err(|_| CommandError::Argument(format!("invalid komi \"{}\"", args[0])))?;
                debug!("komi {komi} ignored");
                String::new()
            }
            Command::KnownCommand => Command::from_name(args[0]).is_some().to_string(),
            Command::ListCommands => Command::ALL
                .iter()
                .map(|c| c.name())
                .collect::<Vec<_>>()
                .join("\n"),
            Command::LegalMoves => self.sorted_legal_moves(args[0].parse()?),
            Command::Play => self.play(args[0], args[1]),
            Command::GenMove => match self.session.generate_move(args[0].parse()?) {
                GenMove::Play(point) => format_point(point, size).to_lowercase(),
                GenMove::Resign => "resign".to_string(),
            },
            Command::Solve => match self.session.solve()?.reply {
                SolveReply::Win { mover, point } => {
                    format!("{} {}", mover.letter(), format_point(point, size).to_lowercase())
                }
                SolveReply::Loss { winner } => winner.letter().to_string(),
                SolveReply::Unknown => "unknown".to_string(),
            },
            Command::TimeLimit => {
                let secs: u64 = args[0]
                    .parse()
                    .map_err(|_| CommandError::Argument(format!("invalid time limit \"{}\"", args[0])))?;
                self.session.set_time_limit(secs)?;
                String::new()
            }
            Command::RulesGameId => "NoGo".to_string(),
            Command::RulesBoardSize => size.to_string(),
            Command::RulesLegalMoves => {
                self.sorted_legal_moves(self.session.board().current_player())
            }
            Command::RulesSideToMove => self.session.board().current_player().name().to_string(),
            Command::RulesBoard => self.session.board().render().trim_end().to_string(),
            Command::RulesFinalResult => match self.session.board().winner() {
                Some(color) => color.name().to_string(),
                None => "unknown".to_string(),
            },
            Command::AnalyzeCommands => commands::ANALYZE_COMMANDS.to_string(),
        };
        Ok(reply)
    }

    /// Rejected moves are answered in the success form, as gogui expects.
    fn play(&mut self, color_arg: &str, move_arg: &str) -> String {
        let Ok(color) = color_arg.parse::<Color>() else {
            return format!("illegal move: \"{color_arg}\" wrong color");
        };
        let board = self.session.board();
        let Ok(point) = parse_point(move_arg, board.size()) else {
            return format!("illegal move: \"{color_arg} {move_arg}\" wrong coordinate");
        };
        if let Err(reason) = board.check_move(point, color) {
            return format!("illegal move: \"{color_arg} {move_arg}\" {reason}");
        }
        if !self.session.play(point, color) {
            return format!("illegal move: \"{color_arg} {move_arg}\"");
        }
        debug!("board after {color_arg} {move_arg}:\n{}", self.session.board().render());
        String::new()
    }

    fn sorted_legal_moves(&self, color: Color) -> String {
        let board = self.session.board();
        let mut moves: Vec<String> = board
            .legal_moves(color)
            .into_iter()
            .map(|p| format_point(p, board.size()))
            .collect();
        moves.sort();
        moves.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SolverConfig;

    fn run_script(size: u8, script: &str) -> String {
        let session = Session::new(SolverConfig::new(size, 5).unwrap()).unwrap();
        let mut conn = GtpConnection::new(session, Vec::new());
        conn.run(script.as_bytes()).unwrap();
        String::from_utf8(conn.into_output()).unwrap()
    }

    #[test]
    fn comments_blank_lines_and_ids_are_skipped() {
        let out = run_script(3, "# comment\n\n12 protocol_version\n");
        assert_eq!(out, "= 2\n\n");
    }

    #[test]
    fn wrong_argument_count_prints_usage() {
        let out = run_script(3, "genmove\nplay b\n");
        assert_eq!(out, "? Usage: genmove {w,b}\n\n? Usage: play {b,w} MOVE\n\n");
    }

    #[test]
    fn unknown_command_is_an_error() {
        assert_eq!(run_script(3, "undo\n"), "? Unknown command\n\n");
    }

    #[test]
    fn play_reports_rule_violations() {
        let out = run_script(2, "play w a2\nplay w b1\nplay b a1\nplay x a1\nplay b pass\nplay b z9\n");
        let replies: Vec<&str> = out.split("\n\n").filter(|s| !s.is_empty()).collect();
        assert_eq!(
            replies,
            vec![
                "= ",
                "= ",
                "= illegal move: \"b a1\" suicide",
                "= illegal move: \"x\" wrong color",
                "= illegal move: \"b pass\" wrong coordinate",
                "= illegal move: \"b z9\" wrong coordinate",
            ]
        );
    }

    #[test]
    fn play_accepts_only_single_letter_colors() {
        let out = run_script(3, "play black a1\nplay B a1\n");
        assert_eq!(out, "= illegal move: \"black\" wrong color\n\n= \n\n");
    }

    #[test]
    fn quit_stops_reading() {
        let out = run_script(3, "quit\nname\n");
        assert_eq!(out, "= \n\n");
    }

    #[test]
    fn timelimit_out_of_range_is_rejected() {
        let out = run_script(3, "timelimit 0\ntimelimit 100\n");
        assert_eq!(
            out,
            "? time limit must be between 1 and 100 seconds, got 0\n\n= \n\n"
        );
    }

    #[test]
    fn rules_commands_describe_the_position() {
        let out = run_script(2, "play b a1\ngogui-rules_side_to_move\ngogui-rules_board\ngogui-rules_legal_moves\n");
        let replies: Vec<&str> = out.split("\n\n").filter(|s| !s.is_empty()).collect();
        assert_eq!(replies[1], "= white");
        assert_eq!(replies[2], "= ..\nX.");
        assert_eq!(replies[3], "= A2 B1 B2");
    }
}
