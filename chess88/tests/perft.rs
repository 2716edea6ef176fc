/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use chess88::*;

fn check_nodes(fen: &str, depth: usize, expected: u64) {
    let mut pos = Position::from_fen(fen).unwrap();
    let original = pos;

    assert_eq!(perft_nodes(&mut pos, depth), expected, "perft({depth}) of {fen}");
    assert_eq!(pos, original, "perft({depth}) of {fen} left the position changed");
}

#[test]
fn test_kiwipete_breakdown() {
    let mut pos = Position::from_fen(FEN_KIWIPETE).unwrap();

    let results = perft(&mut pos, 1);
    assert_eq!(results.nodes, 48);
    assert_eq!(results.captures, 8);
    assert_eq!(results.en_passant, 0);
    assert_eq!(results.castles(), 2);
    assert_eq!(results.short_castles, 1);
    assert_eq!(results.long_castles, 1);
    assert_eq!(results.promotions, 0);
    assert_eq!(results.checks, 0);

    let results = perft(&mut pos, 2);
    assert_eq!(results.nodes, 2_039);
    assert_eq!(results.captures, 351);
    assert_eq!(results.en_passant, 1);
    assert_eq!(results.castles(), 91);
    assert_eq!(results.promotions, 0);
    assert_eq!(results.checks, 3);

    let results = perft(&mut pos, 3);
    assert_eq!(results.nodes, 97_862);
    assert_eq!(results.captures, 17_102);
    assert_eq!(results.en_passant, 45);
    assert_eq!(results.castles(), 3_162);
    assert_eq!(results.promotions, 0);
    assert_eq!(results.checks, 993);
}

#[test]
#[ignore = "slow in debug builds"]
fn test_kiwipete_deep() {
    check_nodes(FEN_KIWIPETE, 4, 4_085_603);
}

#[test]
fn test_startpos() {
    check_nodes(FEN_STARTPOS, 1, 20);
    check_nodes(FEN_STARTPOS, 2, 400);
    check_nodes(FEN_STARTPOS, 3, 8_902);
    check_nodes(FEN_STARTPOS, 4, 197_281);
}

#[test]
fn test_avoid_illegal_en_passant_capture() {
    check_nodes("8/5bk1/8/2Pp4/8/1K6/8/8 w - d6 0 1", 6, 824_064);
    check_nodes("8/8/1k6/8/2pP4/8/5BK1/8 b - d3 0 1", 6, 824_064);
}

#[test]
fn test_en_passant_capture_checks_opponent() {
    check_nodes("8/8/1k6/2b5/2pP4/8/5K2/8 b - d3 0 1", 6, 1_440_467);
    check_nodes("8/5k2/8/2Pp4/2B5/1K6/8/8 w - d6 0 1", 6, 1_440_467);
}

#[test]
fn test_short_castling_gives_check() {
    check_nodes("5k2/8/8/8/8/8/8/4K2R w K - 0 1", 6, 661_072);
    check_nodes("4k2r/8/8/8/8/8/8/5K2 b k - 0 1", 6, 661_072);
}

#[test]
fn test_long_castling_gives_check() {
    check_nodes("3k4/8/8/8/8/8/8/R3K3 w Q - 0 1", 6, 803_711);
    check_nodes("r3k3/8/8/8/8/8/8/3K4 b q - 0 1", 6, 803_711);
}

#[test]
fn test_castling() {
    check_nodes("r3k2r/1b4bq/8/8/8/8/7B/R3K2R w KQkq - 0 1", 4, 1_274_206);
    check_nodes("r3k2r/7b/8/8/8/8/1B4BQ/R3K2R b KQkq - 0 1", 4, 1_274_206);
}

#[test]
#[ignore = "slow in debug builds"]
fn test_castling_prevented() {
    check_nodes("r3k2r/8/3Q4/8/8/5q2/8/R3K2R b KQkq - 0 1", 4, 1_720_476);
    check_nodes("r3k2r/8/5Q2/8/8/3q4/8/R3K2R w KQkq - 0 1", 4, 1_720_476);
}

#[test]
#[ignore = "slow in debug builds"]
fn test_promote_out_of_check() {
    check_nodes("2K2r2/4P3/8/8/8/8/8/3k4 w - - 0 1", 6, 3_821_001);
    check_nodes("3K4/8/8/8/8/8/4p3/2k2R2 b - - 0 1", 6, 3_821_001);
}

#[test]
fn test_discovered_check() {
    check_nodes("8/8/1P2K3/8/2n5/1q6/8/5k2 b - - 0 1", 5, 1_004_658);
    check_nodes("5K2/8/1Q6/2N5/8/1p2k3/8/8 w - - 0 1", 5, 1_004_658);
}

#[test]
fn test_promote_to_give_check() {
    check_nodes("4k3/1P6/8/8/8/8/K7/8 w - - 0 1", 6, 217_342);
    check_nodes("8/k7/8/8/8/8/1p6/4K3 b - - 0 1", 6, 217_342);
}

#[test]
fn test_underpromote_to_check() {
    check_nodes("8/P1k5/K7/8/8/8/8/8 w - - 0 1", 6, 92_683);
    check_nodes("8/8/8/8/8/k7/p1K5/8 b - - 0 1", 6, 92_683);
}

#[test]
fn test_self_stalemate() {
    check_nodes("K1k5/8/P7/8/8/8/8/8 w - - 0 1", 6, 2_217);
    check_nodes("8/8/8/8/8/p7/8/k1K5 b - - 0 1", 6, 2_217);
}

#[test]
fn test_stalemate_and_checkmate() {
    check_nodes("8/k1P5/8/1K6/8/8/8/8 w - - 0 1", 7, 567_584);
    check_nodes("8/8/8/8/1k6/8/K1p5/8 b - - 0 1", 7, 567_584);
}

#[test]
fn test_double_check() {
    check_nodes("8/8/2k5/5q2/5n2/8/5K2/8 b - - 0 1", 4, 23_527);
    check_nodes("8/5k2/8/5N2/5Q2/2K5/8/8 w - - 0 1", 4, 23_527);
}

#[test]
fn test_short_castling_impossible() {
    check_nodes("1k6/1b6/8/8/7R/8/8/4K2R b K - 0 1", 5, 1_063_513);
    check_nodes("4k2r/8/8/7r/8/8/1B6/1K6 w k - 0 1", 5, 1_063_513);
}

#[test]
fn test_long_castling_impossible() {
    check_nodes("1k6/8/8/8/R7/1n6/8/R3K3 b Q - 0 1", 5, 346_695);
    check_nodes("r3k3/8/1N6/r7/8/8/8/1K6 w q - 0 1", 5, 346_695);
}

#[test]
fn test_pinned_pawns() {
    check_nodes("3k4/3p4/8/K1P4r/8/8/8/8 b - - 0 1", 6, 1_134_888);
    check_nodes("8/8/8/8/k1p4R/8/3P4/3K4 w - - 0 1", 6, 1_134_888);
}

#[test]
fn test_pinned_bishops() {
    check_nodes("8/8/4k3/8/2p5/8/B2P2K1/8 w - - 0 1", 6, 1_015_133);
    check_nodes("8/b2p2k1/8/2P5/8/4K3/8/8 b - - 0 1", 6, 1_015_133);
}

#[test]
fn test_splitperft_divides_kiwipete() {
    let mut pos = Position::from_fen(FEN_KIWIPETE).unwrap();
    let split = splitperft(&mut pos, 2);

    let castle = split
        .iter()
        .find(|(mv, _)| mv.to_uci() == "e1g1")
        .map(|&(_, nodes)| nodes);
    assert_eq!(castle, Some(43));
    assert_eq!(split.iter().map(|&(_, nodes)| nodes).sum::<u64>(), 2_039);
}
