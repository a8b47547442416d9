//! Search configuration parameters.
//!
//! These parameters are fixed when a searcher is constructed and never
//! change during a search.

use adversary_core::{AdversaryError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default search depth in rounds.
pub const DEFAULT_DEPTH: usize = 2;

/// Default magnitude of the alpha-beta sentinels.
///
/// Evaluations must stay strictly inside `±DEFAULT_SCORE_BOUND`.
pub const DEFAULT_SCORE_BOUND: f64 = 1_000_000.0;

/// Search configuration parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    /// Number of full rounds to look ahead.
    /// One round is one move by every agent.
    pub depth: usize,

    /// Finite stand-in for infinity that opens the alpha-beta root window.
    /// Should dominate every attainable evaluation.
    pub score_bound: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            score_bound: DEFAULT_SCORE_BOUND,
        }
    }
}

impl SearchConfig {
    /// Create a new config searching `depth` rounds.
    pub fn with_depth(depth: usize) -> Self {
        Self {
            depth,
            ..Default::default()
        }
    }

    /// Check the parameters before any search runs.
    ///
    /// # Errors
    /// - `InvalidDepth` if depth is zero
    /// - `InvalidBound` if the score bound is not finite and positive
    pub fn validate(&self) -> Result<()> {
        if self.depth == 0 {
            return Err(AdversaryError::InvalidDepth(self.depth));
        }
        if !self.score_bound.is_finite() || self.score_bound <= 0.0 {
            return Err(AdversaryError::InvalidBound(self.score_bound));
        }
        Ok(())
    }
}

/// The available search strategies.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Minimax,
    AlphaBeta,
    Expectimax,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Minimax, Algorithm::AlphaBeta, Algorithm::Expectimax];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Minimax => "minimax",
            Algorithm::AlphaBeta => "alphabeta",
            Algorithm::Expectimax => "expectimax",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = AdversaryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "minimax" => Ok(Algorithm::Minimax),
            "alphabeta" | "ab" => Ok(Algorithm::AlphaBeta),
            "expectimax" => Ok(Algorithm::Expectimax),
            _ => Err(AdversaryError::UnknownAlgorithm(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.depth, 2);
        assert_eq!(config.score_bound, 1_000_000.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_depth() {
        let config = SearchConfig::with_depth(4);
        assert_eq!(config.depth, 4);
        // Other values should be default
        assert_eq!(config.score_bound, DEFAULT_SCORE_BOUND);
    }

    #[test]
    fn test_zero_depth_rejected() {
        let config = SearchConfig::with_depth(0);
        assert_eq!(config.validate(), Err(AdversaryError::InvalidDepth(0)));
    }

    #[test]
    fn test_bad_bound_rejected() {
        let mut config = SearchConfig::default();
        config.score_bound = f64::INFINITY;
        assert!(matches!(config.validate(), Err(AdversaryError::InvalidBound(_))));

        config.score_bound = -5.0;
        assert!(matches!(config.validate(), Err(AdversaryError::InvalidBound(_))));
    }

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!("minimax".parse::<Algorithm>(), Ok(Algorithm::Minimax));
        assert_eq!("alpha-beta".parse::<Algorithm>(), Ok(Algorithm::AlphaBeta));
        assert_eq!("AlphaBeta".parse::<Algorithm>(), Ok(Algorithm::AlphaBeta));
        assert_eq!("expectimax".parse::<Algorithm>(), Ok(Algorithm::Expectimax));
        assert_eq!(
            "negamax".parse::<Algorithm>(),
            Err(AdversaryError::UnknownAlgorithm("negamax".to_string()))
        );
    }

    #[test]
    fn test_algorithm_name_roundtrip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>(), Ok(algorithm));
        }
    }
}
