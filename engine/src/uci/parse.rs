//! Parses UCI input lines: `go`'s time-control arguments and `position`'s FEN/startpos plus
//! trailing move list. Grounded on the teacher's `uci::parse` module, adapted to this crate's
//! `SearchLimits`/`ClockState` rather than `PreLimits`/`UCITimer`.

use chess_core::board::Board;
use chess_core::piece_move::BitMove;

use crate::time::{ClockState, LimitsType, SearchLimits};

fn is_keyword(arg: &str) -> bool {
    matches!(
        arg,
        "searchmoves"
            | "ponder"
            | "wtime"
            | "btime"
            | "winc"
            | "binc"
            | "movestogo"
            | "depth"
            | "nodes"
            | "mate"
            | "movetime"
            | "infinite"
    )
}

/// Parses the arguments following `go` into a [`SearchLimits`]. Unrecognized or malformed tokens
/// are skipped rather than rejected outright, matching the teacher's permissive parser — a GUI
/// that sends a slightly malformed `go` still gets *a* search rather than none at all.
pub fn parse_go(args: &[&str]) -> SearchLimits {
    let mut clock = ClockState::default();
    let mut has_clock = false;
    let mut depth = None;
    let mut nodes = None;
    let mut move_time = None;
    let mut infinite = false;
    let mut search_moves = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i] {
            "infinite" => infinite = true,
            "wtime" => {
                if let Some(v) = args.get(i + 1).and_then(|s| s.parse().ok()) {
                    clock.time_msec[0] = v;
                    has_clock = true;
                    i += 1;
                }
            }
            "btime" => {
                if let Some(v) = args.get(i + 1).and_then(|s| s.parse().ok()) {
                    clock.time_msec[1] = v;
                    has_clock = true;
                    i += 1;
                }
            }
            "winc" => {
                if let Some(v) = args.get(i + 1).and_then(|s| s.parse().ok()) {
                    clock.inc_msec[0] = v;
                    i += 1;
                }
            }
            "binc" => {
                if let Some(v) = args.get(i + 1).and_then(|s| s.parse().ok()) {
                    clock.inc_msec[1] = v;
                    i += 1;
                }
            }
            "movestogo" => {
                if let Some(v) = args.get(i + 1).and_then(|s| s.parse().ok()) {
                    clock.moves_to_go = v;
                    i += 1;
                }
            }
            "depth" => {
                if let Some(v) = args.get(i + 1).and_then(|s| s.parse().ok()) {
                    depth = Some(v);
                    i += 1;
                }
            }
            "nodes" => {
                if let Some(v) = args.get(i + 1).and_then(|s| s.parse().ok()) {
                    nodes = Some(v);
                    i += 1;
                }
            }
            "movetime" => {
                if let Some(v) = args.get(i + 1).and_then(|s| s.parse().ok()) {
                    move_time = Some(v);
                    i += 1;
                }
            }
            "searchmoves" => {
                while let Some(&mov) = args.get(i + 1) {
                    if is_keyword(mov) {
                        break;
                    }
                    search_moves.push(mov.to_string());
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    let kind = if let Some(msec) = move_time {
        LimitsType::MoveTime(msec)
    } else if let Some(d) = depth {
        LimitsType::Depth(d)
    } else if let Some(n) = nodes {
        LimitsType::Nodes(n)
    } else if infinite || !has_clock {
        LimitsType::Infinite
    } else {
        LimitsType::Clock(clock)
    };

    SearchLimits { kind, search_moves }
}

/// Parses the arguments following `position`: `startpos` or `fen <fen>`, optionally followed by
/// `moves <uci move>...` applied in order. Returns `None` if the base position is malformed;
/// stops applying moves at the first one that isn't legal in the position reached so far.
pub fn parse_position(args: &[&str]) -> Option<Board> {
    if args.is_empty() {
        return None;
    }

    let mut board = if args[0] == "startpos" {
        Some(Board::start_pos())
    } else if args[0] == "fen" {
        let fen: String = args[1..]
            .iter()
            .take_while(|&&tok| tok != "moves")
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        Board::from_fen(&fen).ok()
    } else {
        None
    };

    let moves_start = args.iter().position(|&tok| tok == "moves");
    if let (Some(start), Some(board)) = (moves_start, board.as_mut()) {
        for mov in &args[start + 1..] {
            if !apply_uci_move(board, mov) {
                break;
            }
        }
    }

    board
}

/// Applies `mov` (long algebraic notation, e.g. `e2e4` or `e7e8q`) if it names a legal move in
/// the current position, returning whether it did.
fn apply_uci_move(board: &mut Board, mov: &str) -> bool {
    let found = board
        .generate_moves()
        .iter()
        .find(|sm| sm.bit_move.stringify() == mov)
        .map(|sm| sm.bit_move);

    match found {
        Some(m) => {
            board.apply_move(m);
            true
        }
        None => false,
    }
}

/// Looks up a legal move in `board` by its UCI string, for the `go searchmoves` restriction and
/// for applying a move requested directly by a front end.
pub fn find_legal_move(board: &Board, mov: &str) -> Option<BitMove> {
    board
        .generate_moves()
        .iter()
        .find(|sm| sm.bit_move.stringify() == mov)
        .map(|sm| sm.bit_move)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_startpos_with_moves() {
        let line = "startpos moves e2e4 e7e5";
        let args: Vec<&str> = line.split_whitespace().collect();
        let board = parse_position(&args).unwrap();
        assert_eq!(board.moves_played(), 2);
    }

    #[test]
    fn parses_bare_startpos() {
        let args: Vec<&str> = "startpos".split_whitespace().collect();
        let board = parse_position(&args).unwrap();
        assert_eq!(board.moves_played(), 0);
    }

    #[test]
    fn parses_go_infinite_with_searchmoves() {
        let args: Vec<&str> = "infinite searchmoves e2e4 d2d4"
            .split_whitespace()
            .collect();
        let limits = parse_go(&args);
        assert_eq!(limits.search_moves.len(), 2);
        assert!(matches!(limits.kind, LimitsType::Infinite));
    }

    #[test]
    fn parses_go_depth() {
        let args: Vec<&str> = "depth 12".split_whitespace().collect();
        let limits = parse_go(&args);
        assert_eq!(limits.depth_limit(), Some(12));
    }

    #[test]
    fn parses_go_clock() {
        let args: Vec<&str> = "wtime 60000 btime 60000 winc 1000 binc 1000"
            .split_whitespace()
            .collect();
        let limits = parse_go(&args);
        assert!(limits.uses_time_management());
    }
}
