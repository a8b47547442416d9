use thiserror::Error;

use crate::{Agent, Ply};

/// Errors that can occur while configuring or running a search
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdversaryError {
    #[error("Unknown evaluation function: {0}")]
    UnknownEvaluation(String),

    #[error("Unknown search algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("Search depth must be at least one round, got {0}")]
    InvalidDepth(usize),

    #[error("Score bound must be finite and positive, got {0}")]
    InvalidBound(f64),

    #[error("Game reports zero agents")]
    NoAgents,

    #[error("No legal actions for agent {agent} at ply {ply} in a non-terminal state")]
    NoLegalActions { agent: Agent, ply: Ply },

    #[error("Root state is terminal, no action to select")]
    NoDecision,

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
}

/// Convenience Result type for adversarial search operations
pub type Result<T> = std::result::Result<T, AdversaryError>;
