use rand::SeedableRng;
use rand_pcg::Pcg64;

/// Deterministic RNG for one random game, derived from `(seed, game_id)`.
///
/// The same inputs always replay the same sequence, so playout positions
/// used by tests and the `solve` tool are reproducible.
#[inline]
pub fn rng_for_game(seed: u64, game_id: u64) -> Pcg64 {
    let derived = seed ^ game_id.rotate_left(32);
    Pcg64::seed_from_u64(derived)
}
