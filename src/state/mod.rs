//! Session state for tic-tac-toe against the computer.
//!
//! - `board` - the 3x3 grid and win detection
//! - `clock` - monotonic time and deadlines
//! - `mover` - the computer's random move choice
//! - `score` - clamped score counters
//! - `config` - tunable delays and seed
//! - `session` - the state machine tying it all together
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                         GameSession                           │
//! │                                                               │
//! │   Menu ──▶ PlayerTurn ──▶ ComputerThinking ──▶ RoundFinished  │
//! │              ▲    ▲              │                   │        │
//! │              │    └──────────────┘                   │        │
//! │              └───────────────────────────────────────┘        │
//! │                                                               │
//! │  ┌─────────┐  ┌──────────────┐  ┌─────────┐  ┌────────────┐   │
//! │  │  Board  │  │ ScoreTracker │  │  Clock  │  │MoveSelector│   │
//! │  │ 9 marks │  │ player / cpu │  │deadlines│  │ random pick│   │
//! │  └─────────┘  └──────────────┘  └─────────┘  └────────────┘   │
//! └───────────────────────────────────────────────────────────────┘
//!        ▲ handle(event) / poll()                 │ snapshot()
//!        │                                        ▼
//!                          host
//! ```
//!
//! The host forwards resolved input through [`GameSession::handle`], calls
//! [`GameSession::poll`] once per frame, and draws from
//! [`GameSession::snapshot`]. Nothing in here blocks or spawns threads.

pub mod board;
pub mod clock;
pub mod config;
pub mod mover;
pub mod score;
pub mod session;

// Re-export commonly used types
pub use board::{Board, BoardError, Mark, WinLine, CELL_COUNT};
pub use clock::{Clock, ManualClock, SystemClock, FINISHED_DELAY, THINKING_DELAY};
pub use config::{ConfigError, SessionConfig, MAX_DELAY_MS};
pub use mover::{choose_move, MoveSelector, RandomMover};
pub use score::{ScoreTracker, Side, MAX_SCORE};
pub use session::{
    EventOutcome, GameSession, RoundOutcome, SessionEvent, SessionState, Snapshot,
    COMPUTER_MOVES_PER_ROUND,
};
