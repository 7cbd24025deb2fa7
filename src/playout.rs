use rand::Rng;

use crate::board::GoBoard;
use crate::rng::rng_for_game;
use crate::state::SearchBoard;
use crate::types::CoordError;

/// Play up to `plies` uniformly random legal moves for the side to move.
/// Stops early when the side to move is stuck. Returns the number played.
pub fn random_playout<R: Rng>(board: &mut GoBoard, plies: usize, rng: &mut R) -> usize {
    for played in 0..plies {
        let color = board.current_player();
        let moves = board.legal_moves(color);
        if moves.is_empty() {
            return played;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        // legal_moves only returns playable points
        let ok = board.play(mv, color);
        debug_assert!(ok);
    }
    plies
}

/// A reproducible position: `plies` random moves from the empty board.
pub fn random_position(size: u8, plies: usize, seed: u64) -> Result<GoBoard, CoordError> {
    let mut board = GoBoard::new(size)?;
    let mut rng = rng_for_game(seed, u64::from(size));
    random_playout(&mut board, plies, &mut rng);
    Ok(board)
}
