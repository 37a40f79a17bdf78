//! Tic-Tac-Toe Session Library
//!
//! This crate provides the game session engine for tic-tac-toe played by one
//! human against a randomized computer opponent.
//!
//! # Overview
//!
//! The state module provides:
//!
//! - **Board** - Nine cells, mark placement, win detection in a fixed scan order.
//!
//! - **Session State Machine** - Menu, player turn, computer "thinking" delay,
//!   finished-round display, and back to play, driven by events and polls.
//!
//! - **Timing** - Deadlines compared against a [`Clock`] on every poll instead
//!   of sleeping.
//!
//! - **Scores** - Player and computer totals clamped at 999.
//!
//! # Design Principles
//!
//! 1. **No rendering, no hit-testing** - The host resolves clicks to cell
//!    indices and draws from a [`Snapshot`].
//!
//! 2. **Single writer** - One owned [`GameSession`] holds all state; nothing is
//!    global.
//!
//! 3. **Injectable time and randomness** - Tests drive a [`ManualClock`] and a
//!    scripted [`MoveSelector`].
//!
//! 4. **Contract violations panic** - Placing on a taken cell or asking for the
//!    winning line mid-round is a bug in the caller, not a game condition.
//!
//! # Example
//!
//! ```rust
//! use tictactoe_state::{
//!     GameSession, ManualClock, RandomMover, SessionConfig, SessionEvent, SessionState,
//!     THINKING_DELAY,
//! };
//!
//! let clock = ManualClock::new();
//! let mut session =
//!     GameSession::with_parts(SessionConfig::default(), clock.clone(), RandomMover::new(7));
//!
//! session.handle(SessionEvent::PlayClicked);
//! session.handle(SessionEvent::CellClicked(4));
//! assert_eq!(session.state(), SessionState::ComputerThinking);
//!
//! // The computer moves once its think time has passed
//! clock.advance(THINKING_DELAY);
//! session.poll();
//! assert_eq!(session.state(), SessionState::PlayerTurn);
//! assert_eq!(session.computer_move_count(), 1);
//!
//! let frame = session.snapshot();
//! assert_eq!(frame.board.iter().filter(|m| !m.is_empty()).count(), 2);
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
