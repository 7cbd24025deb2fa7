use std::io::{self, BufWriter};

use clap::Parser;
use log::info;
use nogo_solver::config::{DEFAULT_BOARD_SIZE, MIN_TIME_LIMIT_SECS};
use nogo_solver::{GtpConnection, Session, SolverConfig};

#[derive(Debug, Parser)]
#[command(name = "nogo-gtp", about = "NoGo solver speaking the Go Text Protocol on stdin/stdout")]
struct Args {
    /// Initial board size (1..=8)
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: u8,

    /// Time limit for `solve`, in seconds (1..=100)
    #[arg(long, default_value_t = MIN_TIME_LIMIT_SECS)]
    timelimit: u64,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_filter = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();

    let config = SolverConfig::new(args.size, args.timelimit)?;
    info!("starting with {config:?}");
    let session = Session::new(config)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut conn = GtpConnection::new(session, BufWriter::new(stdout.lock()));
    conn.run(stdin.lock())?;
    Ok(())
}
