//! Picks a root move from scored candidates, rationing king placements.

use crate::types::Player;

use super::search::ScoredMove;

/// Returns the best candidate for `player`, taking a king move only when it beats
/// the best plain move by more than `threshold`.
///
/// Candidates are compared in the order given; the first of equal scores wins.
pub fn choose(scored: &[ScoredMove], player: Player, threshold: i32) -> Option<ScoredMove> {
    let best_king = best_of(scored.iter().filter(|s| s.mv.is_king), player);
    let best_common = best_of(scored.iter().filter(|s| !s.mv.is_king), player);

    match (best_king, best_common) {
        (Some(king), Some(common)) => {
            let margin = king.score - common.score;
            let worth_it = match player {
                Player::Black => margin > threshold,
                Player::White => margin < -threshold,
            };
            Some(if worth_it { king } else { common })
        }
        (king, common) => king.or(common),
    }
}

/// Maximum for black, minimum for white.
pub fn best_of<'a>(
    candidates: impl IntoIterator<Item = &'a ScoredMove>,
    player: Player,
) -> Option<ScoredMove> {
    candidates.into_iter().fold(None, |best, &candidate| match best {
        Some(current) if !is_better(candidate.score, current.score, player) => Some(current),
        _ => Some(candidate),
    })
}

fn is_better(score: i32, best: i32, player: Player) -> bool {
    match player {
        Player::Black => score > best,
        Player::White => score < best,
    }
}
