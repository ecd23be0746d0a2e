use crate::board::{Board, Color, Coord};
use crate::config::EngineConfig;
use crate::error::GameError;
use crate::search::alphabeta::{SearchParams, Searcher};
use crate::search::level::Difficulty;
use crate::search::noise::choose_fast;
use log::{debug, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Move selector for one computer seat. Owns its search cache and random source.
pub struct ComputerPlayer {
    difficulty: Difficulty,
    searcher: Searcher,
    /// Search settings, or None for the fast level.
    params: Option<SearchParams>,
    rng: SmallRng,
    random_move_probability: f64,
}

impl ComputerPlayer {
    pub fn new(difficulty: Difficulty, config: &EngineConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => SmallRng::from_entropy(),
        };
        let params = difficulty.search_depth().map(|depth| SearchParams {
            depth,
            use_tt: config.use_tt,
            order_moves: config.order_moves,
            threads: config.threads,
        });
        Self {
            difficulty,
            searcher: Searcher::with_tt_capacity(config.tt_capacity),
            params,
            rng,
            random_move_probability: config.random_move_probability,
        }
    }

    pub fn difficulty(&self) -> Difficulty { self.difficulty }

    /// Pick a legal move for `to_move`. Fails only when there is none.
    pub fn choose_move(&mut self, board: &Board, to_move: Color) -> Result<Coord, GameError> {
        let legal = board.legal_moves(to_move);
        let first = *legal.first().ok_or(GameError::NoLegalMove)?;

        let proposed = match self.params {
            None => choose_fast(board, to_move, &legal, &mut self.rng, self.random_move_probability),
            Some(params) => {
                let r = self.searcher.search_with_params(board, to_move, params);
                debug!("level {} depth {} chose {:?} (score {}, {} nodes)", self.difficulty.level(), params.depth, r.best, r.score, r.nodes);
                r.best
            }
        };

        match proposed {
            Some(at) if legal.contains(&at) => Ok(at),
            other => {
                warn!("search proposed {:?} for {}, which is not legal; playing {}", other, to_move, first);
                Ok(first)
            }
        }
    }
}
