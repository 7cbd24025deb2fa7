/// Every command the engine answers, in `list_commands` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ProtocolVersion,
    Quit,
    Name,
    BoardSize,
    ShowBoard,
    ClearBoard,
    Komi,
    Version,
    KnownCommand,
    GenMove,
    ListCommands,
    Play,
    LegalMoves,
    RulesGameId,
    RulesBoardSize,
    RulesLegalMoves,
    RulesSideToMove,
    RulesBoard,
    RulesFinalResult,
    AnalyzeCommands,
    TimeLimit,
    Solve,
}

impl Command {
    pub const ALL: [Command; 22] = [
        Command::ProtocolVersion,
        Command::Quit,
        Command::Name,
        Command::BoardSize,
        Command::ShowBoard,
        Command::ClearBoard,
        Command::Komi,
        Command::Version,
        Command::KnownCommand,
        Command::GenMove,
        Command::ListCommands,
        Command::Play,
        Command::LegalMoves,
        Command::RulesGameId,
        Command::RulesBoardSize,
        Command::RulesLegalMoves,
        Command::RulesSideToMove,
        Command::RulesBoard,
        Command::RulesFinalResult,
        Command::AnalyzeCommands,
        Command::TimeLimit,
        Command::Solve,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::ProtocolVersion => "protocol_version",
            Command::Quit => "quit",
            Command::Name => "name",
            Command::BoardSize => "boardsize",
            Command::ShowBoard => "showboard",
            Command::ClearBoard => "clear_board",
            Command::Komi => "komi",
            Command::Version => "version",
            Command::KnownCommand => "known_command",
            Command::GenMove => "genmove",
            Command::ListCommands => "list_commands",
            Command::Play => "play",
            Command::LegalMoves => "legal_moves",
            Command::RulesGameId => "gogui-rules_game_id",
            Command::RulesBoardSize => "gogui-rules_board_size",
            Command::RulesLegalMoves => "gogui-rules_legal_moves",
            Command::RulesSideToMove => "gogui-rules_side_to_move",
            Command::RulesBoard => "gogui-rules_board",
            Command::RulesFinalResult => "gogui-rules_final_result",
            Command::AnalyzeCommands => "gogui-analyze_commands",
            Command::TimeLimit => "timelimit",
            Command::Solve => "solve",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Required argument count and usage text, for commands that take a
    /// fixed number of arguments.
    pub fn arity(self) -> Option<(usize, &'static str)> {
        match self {
            Command::BoardSize => Some((1, "Usage: boardsize INT")),
            Command::Komi => Some((1, "Usage: komi FLOAT")),
            Command::KnownCommand => Some((1, "Usage: known_command CMD_NAME")),
            Command::GenMove => Some((1, "Usage: genmove {w,b}")),
            Command::Play => Some((2, "Usage: play {b,w} MOVE")),
            Command::LegalMoves => Some((1, "Usage: legal_moves {w,b}")),
            Command::TimeLimit => Some((1, "Usage: timelimit seconds")),
            _ => None,
        }
    }
}

pub const ANALYZE_COMMANDS: &str = "pstring/Legal Moves For ToPlay/gogui-rules_legal_moves\n\
pstring/Side to Play/gogui-rules_side_to_move\n\
pstring/Final Result/gogui-rules_final_result\n\
pstring/Board Size/gogui-rules_board_size\n\
pstring/Rules GameID/gogui-rules_game_id\n\
pstring/Show Board/gogui-rules_board\n\
pstring/Solve/solve";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for cmd in Command::ALL {
            assert_eq!(Command::from_name(cmd.name()), Some(cmd));
        }
        assert_eq!(Command::from_name("undo"), None);
    }
}
