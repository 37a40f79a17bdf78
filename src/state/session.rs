//! Game session state machine.
//!
//! Owns the board, the scores and the timing deadlines, and turns host input
//! and clock polls into transitions.
//!
//! # State Diagram
//!
//! ```text
//!                 reset (from any state)
//!   ┌──────────────────────────────────────────────┐
//!   ▼                                              │
//! ┌──────┐  play   ┌────────────┐  click, no win  ┌──────────────────┐
//! │ Menu │────────▶│ PlayerTurn │────────────────▶│ ComputerThinking │
//! └──────┘         └────────────┘                 └────────┬─────────┘
//!                    ▲  ▲     │ click, win                 │
//!                    │  │     ▼                            │ deadline, no win
//!                    │  │  ┌───────────────┐               │
//!                    │  │  │ RoundFinished │◀──────────────┤ deadline, win
//!                    │  │  └───────┬───────┘  4 moves: tie │
//!                    │  │          │ deadline              │
//!                    │  └──────────┘                       │
//!                    └─────────────────────────────────────┘
//! ```

use std::fmt;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, trace};

use super::board::{Board, Mark, WinLine, CELL_COUNT};
use super::clock::{Clock, SystemClock};
use super::config::SessionConfig;
use super::mover::{MoveSelector, RandomMover};
use super::score::{ScoreTracker, Side};

/// Placements the computer gets per round. The player always moves first, so
/// a round with no winner ends after the computer's fourth mark.
pub const COMPUTER_MOVES_PER_ROUND: u8 = 4;

/// Which screen the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Menu,
    PlayerTurn,
    ComputerThinking,
    RoundFinished,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::PlayerTurn => "player_turn",
            Self::ComputerThinking => "computer_thinking",
            Self::RoundFinished => "round_finished",
        }
    }

    /// Check if a round is being played or shown.
    pub fn is_in_round(&self) -> bool {
        !matches!(self, Self::Menu)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundOutcome {
    PlayerWon(WinLine),
    ComputerWon(WinLine),
    Tie,
}

impl RoundOutcome {
    pub fn winning_line(&self) -> Option<WinLine> {
        match self {
            Self::PlayerWon(line) | Self::ComputerWon(line) => Some(*line),
            Self::Tie => None,
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self {
            Self::PlayerWon(_) => Some(Side::Player),
            Self::ComputerWon(_) => Some(Side::Computer),
            Self::Tie => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlayerWon(_) => "player_won",
            Self::ComputerWon(_) => "computer_won",
            Self::Tie => "tie",
        }
    }
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winning_line() {
            Some(line) => write!(f, "{}({})", self.as_str(), line),
            None => f.write_str(self.as_str()),
        }
    }
}

/// Input from the host, already resolved to cells and commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    PlayClicked,
    ExitRequested,
    CellHovered(Option<usize>),
    CellClicked(usize),
    ResetRequested,
}

/// What the session did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Applied,
    /// The event is not valid in the current state and changed nothing.
    Ignored { reason: &'static str },
    /// The host should shut down.
    ExitRequested,
}

impl EventOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Internal state, carrying the data that only exists in some states.
#[derive(Debug, Clone, Copy)]
enum Phase {
    Menu,
    PlayerTurn,
    ComputerThinking {
        deadline: Instant,
    },
    RoundFinished {
        deadline: Instant,
        outcome: RoundOutcome,
    },
}

impl Phase {
    fn state(&self) -> SessionState {
        match self {
            Self::Menu => SessionState::Menu,
            Self::PlayerTurn => SessionState::PlayerTurn,
            Self::ComputerThinking { .. } => SessionState::ComputerThinking,
            Self::RoundFinished { .. } => SessionState::RoundFinished,
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub state: SessionState,
    pub board: [Mark; CELL_COUNT],
    pub hovered_cell: Option<usize>,
    /// Hovered cell that would take the player's mark if clicked now.
    pub ghost_cell: Option<usize>,
    /// Set only in [`SessionState::RoundFinished`]; `None` there means a tie.
    pub winning_line: Option<WinLine>,
    pub outcome: Option<RoundOutcome>,
    pub player_score: u16,
    pub computer_score: u16,
    /// When the player last pressed play.
    pub session_started_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "state": self.state.as_str(),
            "board": self.board.iter().map(|m| m.as_str()).collect::<Vec<_>>(),
            "hovered_cell": self.hovered_cell,
            "ghost_cell": self.ghost_cell,
            "winning_line": self.winning_line.map(|l| l.as_str()),
            "outcome": self.outcome.map(|o| o.as_str()),
            "player_score": self.player_score,
            "computer_score": self.computer_score,
            "session_started_at": self.session_started_at.map(|t| t.to_rfc3339())
        })
    }
}

/// A human-vs-computer session spanning any number of rounds.
#[derive(Debug)]
pub struct GameSession<C = SystemClock, S = RandomMover> {
    phase: Phase,
    board: Board,
    scores: ScoreTracker,
    computer_moves: u8,
    hovered_cell: Option<usize>,
    started_at: Option<DateTime<Utc>>,
    config: SessionConfig,
    clock: C,
    selector: S,
}

impl GameSession {
    /// Create a session on the system clock with a time-seeded opponent.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Create a session on the system clock, seeding the opponent from
    /// `config.seed` if present.
    pub fn with_config(config: SessionConfig) -> Self {
        let selector = match config.seed {
            Some(seed) => RandomMover::new(seed),
            None => RandomMover::from_time(),
        };
        debug!(seed = selector.seed(), "Seeded computer player");
        Self::with_parts(config, SystemClock, selector)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock, S: MoveSelector> GameSession<C, S> {
    /// Create a session from explicit parts.
    pub fn with_parts(config: SessionConfig, clock: C, selector: S) -> Self {
        Self {
            phase: Phase::Menu,
            board: Board::new(),
            scores: ScoreTracker::new(),
            computer_moves: 0,
            hovered_cell: None,
            started_at: None,
            config,
            clock,
            selector,
        }
    }

    pub fn state(&self) -> SessionState {
        self.phase.state()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn scores(&self) -> &ScoreTracker {
        &self.scores
    }

    pub fn computer_move_count(&self) -> u8 {
        self.computer_moves
    }

    pub fn hovered_cell(&self) -> Option<usize> {
        self.hovered_cell
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// When the player last pressed play, if the session is out of the menu.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// The pending timed transition, if any.
    pub fn deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::ComputerThinking { deadline } | Phase::RoundFinished { deadline, .. } => {
                Some(deadline)
            }
            Phase::Menu | Phase::PlayerTurn => None,
        }
    }

    /// Result of the round on display.
    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.phase {
            Phase::RoundFinished { outcome, .. } => Some(outcome),
            _ => None,
        }
    }

    /// Line that won the round on display; `None` for a tie.
    ///
    /// # Panics
    ///
    /// Panics unless the session is in [`SessionState::RoundFinished`].
    pub fn winning_line(&self) -> Option<WinLine> {
        match self.phase {
            Phase::RoundFinished { outcome, .. } => outcome.winning_line(),
            other => panic!(
                "winning line queried in {}, only defined once a round has finished",
                other.state()
            ),
        }
    }

    /// Apply one input event.
    ///
    /// # Panics
    ///
    /// Panics if a hovered or clicked cell index is off the board.
    #[instrument(skip(self))]
    pub fn handle(&mut self, event: SessionEvent) -> EventOutcome {
        let outcome = match event {
            SessionEvent::ResetRequested => {
                self.reset_to_menu();
                EventOutcome::Applied
            }
            SessionEvent::CellHovered(cell) => {
                if let Some(index) = cell {
                    assert!(index < CELL_COUNT, "hovered cell {} is off the board", index);
                }
                self.hovered_cell = cell;
                EventOutcome::Applied
            }
            SessionEvent::PlayClicked => match self.phase {
                Phase::Menu => {
                    self.start_play();
                    EventOutcome::Applied
                }
                _ => EventOutcome::Ignored {
                    reason: "Play is only available from the menu",
                },
            },
            SessionEvent::ExitRequested => match self.phase {
                Phase::Menu => {
                    info!("Exit requested from menu");
                    EventOutcome::ExitRequested
                }
                _ => EventOutcome::Ignored {
                    reason: "Exit is only available from the menu",
                },
            },
            SessionEvent::CellClicked(index) => self.player_move(index),
        };

        if let EventOutcome::Ignored { reason } = outcome {
            trace!(reason, "Ignored event");
        }
        outcome
    }

    /// Advance any timed transition whose deadline has come. Call once per frame.
    pub fn poll(&mut self) {
        match self.phase {
            Phase::Menu | Phase::PlayerTurn => {}
            Phase::ComputerThinking { deadline } => {
                if self.computer_moves >= COMPUTER_MOVES_PER_ROUND {
                    // No new deadline: the tie stays up until the think time runs out.
                    self.finish_round(RoundOutcome::Tie, deadline);
                } else if self.clock.has_passed(deadline) {
                    self.computer_move();
                }
            }
            Phase::RoundFinished { deadline, .. } => {
                if self.clock.has_passed(deadline) {
                    self.board.reset();
                    self.computer_moves = 0;
                    self.transition(Phase::PlayerTurn);
                }
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let outcome = self.outcome();
        let ghost_cell = self
            .hovered_cell
            .filter(|&i| matches!(self.phase, Phase::PlayerTurn) && self.board.is_open(i));

        Snapshot {
            state: self.state(),
            board: *self.board.cells(),
            hovered_cell: self.hovered_cell,
            ghost_cell,
            winning_line: outcome.and_then(|o| o.winning_line()),
            outcome,
            player_score: self.scores.player(),
            computer_score: self.scores.computer(),
            session_started_at: self.started_at,
        }
    }

    fn player_move(&mut self, index: usize) -> EventOutcome {
        assert!(index < CELL_COUNT, "clicked cell {} is off the board", index);

        if !matches!(self.phase, Phase::PlayerTurn) {
            return EventOutcome::Ignored {
                reason: "Not the player's turn",
            };
        }
        if !self.board.is_open(index) {
            return EventOutcome::Ignored {
                reason: "Cell is already marked",
            };
        }

        self.board.place(index, Mark::Player);
        debug!(cell = index, "Player placed mark");

        match self.board.check_winner() {
            Some(line) => {
                let deadline = self.clock.after(self.config.finished_delay());
                self.finish_round(RoundOutcome::PlayerWon(line), deadline);
            }
            None => {
                let deadline = self.clock.after(self.config.thinking_delay());
                self.transition(Phase::ComputerThinking { deadline });
            }
        }
        EventOutcome::Applied
    }

    fn computer_move(&mut self) {
        let open = self.board.open_cells();
        let index = self.selector.choose_move(&open);
        self.board.place(index, Mark::Computer);
        self.computer_moves += 1;
        debug!(
            cell = index,
            moves = self.computer_moves,
            "Computer placed mark"
        );

        match self.board.check_winner() {
            Some(line) => {
                let deadline = self.clock.after(self.config.finished_delay());
                self.finish_round(RoundOutcome::ComputerWon(line), deadline);
            }
            None => self.transition(Phase::PlayerTurn),
        }
    }

    fn finish_round(&mut self, outcome: RoundOutcome, deadline: Instant) {
        if let Some(side) = outcome.winner() {
            self.scores.increment(side);
        }
        info!(
            %outcome,
            player_score = self.scores.player(),
            computer_score = self.scores.computer(),
            "Round finished"
        );
        self.transition(Phase::RoundFinished { deadline, outcome });
    }

    fn start_play(&mut self) {
        self.board.reset();
        self.scores.reset();
        self.computer_moves = 0;
        self.started_at = Some(Utc::now());
        self.transition(Phase::PlayerTurn);
    }

    fn reset_to_menu(&mut self) {
        self.board.reset();
        self.scores.reset();
        self.computer_moves = 0;
        self.started_at = None;
        info!(from = %self.state(), "Session reset");
        self.transition(Phase::Menu);
    }

    fn transition(&mut self, next: Phase) {
        debug!(from = %self.phase.state(), to = %next.state(), "State transition");
        self.phase = next;
    }
}
