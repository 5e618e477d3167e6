//! AI-vs-AI matches for comparing strategies.

use serde::Serialize;
use tracing::debug;

use crate::config::PlayerStrategy;
use crate::error::GameResult;
use crate::game::{GameInstance, Phase};
use crate::rules::Variant;
use crate::types::{FinishSummary, Player, Winner};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    pub games: u32,
    pub black_wins: u32,
    pub white_wins: u32,
    pub draws: u32,
}

impl MatchReport {
    /// Share of decided games black won. `None` when every game was drawn.
    pub fn black_win_rate(&self) -> Option<f64> {
        let decided = self.black_wins + self.white_wins;
        if decided == 0 {
            None
        } else {
            Some(self.black_wins as f64 / decided as f64)
        }
    }

    fn record(&mut self, summary: &FinishSummary) {
        self.games += 1;
        match summary.winner {
            Winner::Black => self.black_wins += 1,
            Winner::White => self.white_wins += 1,
            Winner::Draw => self.draws += 1,
        }
    }
}

/// Plays one game to the end and returns the final count.
pub fn play_game(
    variant: Variant,
    black: PlayerStrategy,
    white: PlayerStrategy,
    seed: u64,
) -> GameResult<FinishSummary> {
    let mut game = GameInstance::new(variant)
        .with_ai(Player::Black, black.selector(variant, seed))
        .with_ai(Player::White, white.selector(variant, seed.wrapping_add(1)));

    while game.advance() != Phase::Ended {
        game.do_ai_move()?;
    }

    Ok(game.to_finish_summary())
}

/// Plays `games` games between the two strategies. Game `i` uses seeds derived from `seed + 2i`.
pub fn play_match(
    variant: Variant,
    black: PlayerStrategy,
    white: PlayerStrategy,
    games: u32,
    seed: u64,
) -> GameResult<MatchReport> {
    let mut report = MatchReport::default();
    for game in 0..games {
        let game_seed = seed.wrapping_add(2 * game as u64);
        let summary = play_game(variant, black, white, game_seed)?;
        debug!(
            game,
            black = summary.black_count,
            white = summary.white_count,
            winner = ?summary.winner,
            "arena game finished"
        );
        report.record(&summary);
    }
    Ok(report)
}

/// Round robin: every strategy plays black against every strategy as white,
/// including itself. `result[i][j]` is strategy `i` (black) against `j` (white).
pub fn play_matrix(
    variant: Variant,
    strategies: &[PlayerStrategy],
    games: u32,
    seed: u64,
) -> GameResult<Vec<Vec<MatchReport>>> {
    let n = strategies.len() as u64;
    strategies
        .iter()
        .enumerate()
        .map(|(i, &black)| {
            strategies
                .iter()
                .enumerate()
                .map(|(j, &white)| -> GameResult<MatchReport> {
                    let cell_seed = seed.wrapping_add((i as u64 * n + j as u64) << 32);
                    let report = play_match(variant, black, white, games, cell_seed)?;
                    debug!(
                        black = ?black,
                        white = ?white,
                        win_rate = ?report.black_win_rate(),
                        "arena pairing finished"
                    );
                    Ok(report)
                })
                .collect::<GameResult<Vec<_>>>()
        })
        .collect()
}
