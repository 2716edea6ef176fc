/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::Instant;

use clap::Parser;

use chess88::{perft, perft_nodes, splitperft, Move, Position};

/// Compute total number of states reachable from a position, given a depth.
#[derive(Debug, Parser)]
struct Cli {
    /// Depth to run the perft.
    depth: usize,

    /// The FEN string of the position to run the perft.
    #[arg(required = false)]
    fen: Option<String>,

    /// List of moves to apply to the position before running the perft.
    #[arg(required = false)]
    moves: Vec<String>,

    /// If set, perform a splitperft, displaying the number of nodes reachable after each move available from the root.
    #[arg(short, long, default_value = "false")]
    split: bool,

    /// If set, break the leaf nodes down by the kind of move that reached them.
    #[arg(short, long, default_value = "false", conflicts_with = "split")]
    breakdown: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Parse args appropriately
    let mut position = if let Some(fen) = &args.fen {
        Position::from_fen(fen)?
    } else {
        Position::default()
    };

    // Apply moves, if any were provided
    for mv_str in args.moves {
        let mv = Move::from_uci(&position, &mv_str)?;
        position.make_move(mv);
    }

    println!(
        "Computing PERFT({}) of the following position:\n{}\n",
        args.depth,
        position.to_fen()
    );

    let now = Instant::now();
    let total_nodes = if args.split {
        let split = splitperft(&mut position, args.depth);
        for (mv, nodes) in &split {
            println!("{}: {nodes}", mv.to_uci());
        }
        println!();
        split.iter().map(|(_, nodes)| nodes).sum::<u64>()
    } else if args.breakdown {
        let results = perft(&mut position, args.depth);
        println!("{results}\n");
        results.nodes
    } else {
        perft_nodes(&mut position, args.depth)
    };

    let elapsed = now.elapsed();

    // Compute nodes-per-second metrics
    let nps = total_nodes as f32 / elapsed.as_secs_f32();
    let m_nps = nps / 1_000_000.0;

    println!("  Total Nodes:\t{total_nodes}");
    println!(" Elapsed Time:\t{elapsed:.1?}");
    println!("  Nodes / Sec:\t{nps:.0}");
    println!("M Nodes / Sec:\t{m_nps:.1}");

    Ok(())
}
