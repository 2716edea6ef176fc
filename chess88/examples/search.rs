/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use chess88::{Engine, FEN_STARTPOS};

/// Search a position for the best move, either to a fixed depth or for a fixed time.
///
/// Set `RUST_LOG=chess88=debug` to see every completed depth.
#[derive(Debug, Parser)]
struct Cli {
    /// The FEN string of the position to search.
    #[arg(long, default_value = FEN_STARTPOS)]
    fen: String,

    /// List of moves to apply to the position before searching.
    #[arg(required = false)]
    moves: Vec<String>,

    /// Search exactly to this depth, on the main thread.
    #[arg(short, long, conflicts_with = "movetime")]
    depth: Option<usize>,

    /// Search in the background for this many milliseconds.
    #[arg(short, long, default_value = "1000")]
    movetime: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Cli::parse();

    let mut engine = Engine::new();
    engine.set_position_with_moves(&args.fen, args.moves.iter().map(String::as_str))?;

    println!("Searching the following position:\n{:?}\n", engine.position());

    let report = if let Some(depth) = args.depth {
        engine.go_depth(depth)
    } else {
        engine.go_movetime(Duration::from_millis(args.movetime));
        engine.wait()
    };

    match report {
        Some(report) => {
            println!("     Depth:\t{}", report.depth);
            println!(" Best Move:\t{}", report.best_move.to_uci());
            println!("     Score:\t{}", report.score);
            println!("     Nodes:\t{}", report.nodes);
            println!("   Elapsed:\t{:.1?}", report.elapsed);
        }
        None => println!("No legal moves available"),
    }

    Ok(())
}
