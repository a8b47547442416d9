//! Adversary Core - Game abstractions and common types
//!
//! This crate provides the [`Game`] trait that any multi-agent, turn-based
//! game implements to be searched by `adversary-search`, together with the
//! small index types the searchers use to track whose turn it is.
//!
//! # Types
//!
//! - [`Game`] - Trait for game rules
//! - [`Scored`] - Games exposing a protagonist score to evaluators
//! - [`Agent`] - Index of the agent to move
//! - [`Ply`] - Individual moves since the search root
//! - [`Role`] - How a searcher treats an agent (max, min or chance)

mod error;
mod game;
mod types;

pub use error::{AdversaryError, Result};
pub use game::{Game, Scored};
pub use types::{Agent, OpponentModel, Ply, Role};
