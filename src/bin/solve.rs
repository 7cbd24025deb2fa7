use clap::Parser;
use log::debug;
use nogo_solver::config::{DEFAULT_BOARD_SIZE, MIN_TIME_LIMIT_SECS};
use nogo_solver::playout::random_position;
use nogo_solver::{
    format_point, parse_point, Color, GoBoard, SearchBoard, Session, SolveReply, SolverConfig,
    TranspositionTable,
};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "solve", about = "Solve one NoGo position and print the verdict as JSON")]
struct Args {
    /// Board size (1..=8)
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: u8,

    /// Time limit in seconds (1..=100)
    #[arg(long, default_value_t = MIN_TIME_LIMIT_SECS)]
    timelimit: u64,

    /// Moves to play first, alternating from black, e.g. --moves a1 b2 c3
    #[arg(long, num_args = 0.., conflicts_with = "random_plies")]
    moves: Vec<String>,

    /// Start from a seeded random playout of this many plies instead
    #[arg(long)]
    random_plies: Option<usize>,

    /// Seed for --random-plies (deterministic)
    #[arg(long, default_value_t = 0x00C0_FFEE)]
    seed: u64,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long)]
    debug: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    #[serde(flatten)]
    reply: SolveReply,
    #[serde(rename = "move", skip_serializing_if = "Option::is_none")]
    mv: Option<String>,
    to_move: Color,
    nodes: u64,
    tt_hits: u64,
    tt_entries: usize,
    elapsed_ms: u128,
    position: String,
}

fn build_board(args: &Args) -> Result<GoBoard, Box<dyn std::error::Error>> {
    if let Some(plies) = args.random_plies {
        return Ok(random_position(args.size, plies, args.seed)?);
    }
    let mut board = GoBoard::new(args.size)?;
    for mv in &args.moves {
        let color = board.current_player();
        let point = parse_point(mv, args.size)?;
        board
            .check_move(point, color)
            .map_err(|e| format!("illegal move {color} {mv}: {e}"))?;
        board.play(point, color);
    }
    Ok(board)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let default_filter = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let board = build_board(&args)?;
    debug!("position:\n{}", board.render());

    let mut session = Session::new(SolverConfig::new(args.size, args.timelimit)?)?;
    *session.board_mut() = board;
    let to_move = session.board().current_player();
    let report = session.solve()?;

    let mv = match report.reply {
        SolveReply::Win { point, .. } => Some(format_point(point, args.size).to_lowercase()),
        SolveReply::Loss { .. } | SolveReply::Unknown => None,
    };
    let tt_entries = session.tables(args.size).map_or(0, |t| t.tt.len());
    let out = Report {
        reply: report.reply,
        mv,
        to_move,
        nodes: report.stats.nodes,
        tt_hits: report.stats.tt_hits,
        tt_entries,
        elapsed_ms: report.elapsed.as_millis(),
        position: session.board().render(),
    };
    println!("{}", serde_json::to_string(&out)?);
    Ok(())
}
