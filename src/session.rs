//! Level Session: the loaded puzzle, its pristine copy, and the command
//! handlers the UI calls into.
//!
//! A session starts Unloaded (no board). The first successful load moves it
//! to Loaded; restarts and later loads keep it there. Rendering and the timer
//! are collaborators injected at construction, so every transition here can
//! be driven and checked without a browser.
//!
//! Loading is split in two so an asynchronous fetch can sit in between:
//! `request_load` hands out a ticket, `complete_load` applies the result. Only
//! the most recent ticket is honored; a slow response to an older request is
//! dropped instead of overwriting a newer level.

use serde::Serialize;

use crate::engine::{apply_click, MoveCounter};
use crate::error::LevelError;
use crate::levels::LevelSource;
use crate::rng::WasmRng;
use crate::timer::Timer;
use crate::types::{CellPos, Grid, Level};

/// Rendering collaborator.
pub trait Renderer {
    /// Draw one visual unit per cell, lit iff the cell is on.
    fn render(&mut self, view: &SessionView);

    /// A load failed and the previous board stays on screen.
    fn load_failed(&mut self, _level_id: &str, _err: &LevelError) {}
}

/// Everything the UI needs to draw the current state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub level_id: String,
    pub size: usize,
    pub cells: Vec<Vec<u8>>,
    pub moves: u32,
    pub target: u32,
    pub elapsed_secs: Option<u64>,
    pub solved: bool,
}

/// State of a loaded level.
#[derive(Clone, Debug)]
pub struct Board {
    level_id: String,
    working: Grid,
    initial: Grid,
    target: u32,
    counter: MoveCounter,
}

impl Board {
    fn new(level_id: String, level: Level) -> Self {
        Self {
            level_id,
            working: level.grid.clone(),
            initial: level.grid,
            target: level.target,
            counter: MoveCounter::new(),
        }
    }

    pub fn level_id(&self) -> &str {
        &self.level_id
    }

    pub fn working(&self) -> &Grid {
        &self.working
    }

    pub fn initial(&self) -> &Grid {
        &self.initial
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn counter(&self) -> &MoveCounter {
        &self.counter
    }

    pub fn moves(&self) -> u32 {
        self.counter.moves()
    }
}

/// Handle for one in-flight load request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u32);

impl LoadTicket {
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// What happened to a completed load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The level replaced the session state.
    Loaded,
    /// A newer request was issued in the meantime; the result was discarded.
    Stale,
}

pub struct Session<R: Renderer, T: Timer> {
    board: Option<Board>,
    renderer: R,
    timer: T,
    last_ticket: u32,
    pending: Option<(LoadTicket, String)>,
}

impl<R: Renderer, T: Timer> Session<R, T> {
    pub fn new(renderer: R, timer: T) -> Self {
        Self {
            board: None,
            renderer,
            timer,
            last_ticket: 0,
            pending: None,
        }
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.board.is_some()
    }

    pub fn current_level_id(&self) -> Option<&str> {
        self.board.as_ref().map(Board::level_id)
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Apply a player click. Returns the new move count, or `None` when there
    /// is no board or the cell lies outside it.
    pub fn click(&mut self, row: usize, col: usize) -> Option<u32> {
        let Some(board) = self.board.as_mut() else {
            log::debug!("click ({}, {}) ignored: no level loaded", row, col);
            return None;
        };
        let size = board.working.size;
        if row >= size || col >= size {
            log::warn!("click ({}, {}) ignored: outside {}x{} grid", row, col, size, size);
            return None;
        }

        let moves = board.counter.record(CellPos::new(row, col));
        apply_click(&mut board.working, row as isize, col as isize);
        log::debug!("click ({}, {}) -> {} moves", row, col, moves);

        self.render();
        Some(moves)
    }

    /// Put the board back to how the level started. Does not re-fetch.
    /// Returns false while Unloaded.
    pub fn restart(&mut self) -> bool {
        let Some(board) = self.board.as_mut() else {
            return false;
        };
        board.working = board.initial.clone();
        board.counter.reset();
        log::info!("restarted level {}", board.level_id);

        self.timer.restart();
        self.render();
        true
    }

    /// Start loading `level_id`. Any earlier request still in flight becomes stale.
    pub fn request_load(&mut self, level_id: impl Into<String>) -> LoadTicket {
        self.last_ticket = self.last_ticket.wrapping_add(1);
        let ticket = LoadTicket(self.last_ticket);
        let level_id = level_id.into();
        log::debug!("load #{} requested: {}", ticket.0, level_id);
        self.pending = Some((ticket, level_id));
        ticket
    }

    /// Finish the load identified by `ticket`.
    ///
    /// On failure the current board is left untouched and the error is
    /// reported to the renderer and returned.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Level, LevelError>,
    ) -> Result<LoadOutcome, LevelError> {
        let level_id = match self.pending.take() {
            Some((pending, id)) if pending == ticket => id,
            other => {
                self.pending = other;
                if let Err(err) = &result {
                    log::warn!("stale load #{} failed: {}", ticket.0, err);
                } else {
                    log::debug!("stale load #{} discarded", ticket.0);
                }
                return Ok(LoadOutcome::Stale);
            }
        };

        match result {
            Ok(level) => {
                log::info!(
                    "loaded level {} ({}x{}, target {})",
                    level_id,
                    level.grid.size,
                    level.grid.size,
                    level.target
                );
                self.board = Some(Board::new(level_id, level));
                self.timer.restart();
                self.render();
                Ok(LoadOutcome::Loaded)
            }
            Err(err) => {
                log::error!("failed to load level {}: {}", level_id, err);
                self.renderer.load_failed(&level_id, &err);
                Err(err)
            }
        }
    }

    /// Request, fetch and complete in one step for sources that answer immediately.
    pub fn load_level<S: LevelSource + ?Sized>(
        &mut self,
        level_id: &str,
        source: &S,
    ) -> Result<LoadOutcome, LevelError> {
        let ticket = self.request_load(level_id);
        let result = source.fetch(level_id);
        self.complete_load(ticket, result)
    }

    pub fn view(&self) -> Option<SessionView> {
        let board = self.board.as_ref()?;
        Some(SessionView {
            level_id: board.level_id.clone(),
            size: board.working.size,
            cells: board.working.rows(),
            moves: board.counter.moves(),
            target: board.target,
            elapsed_secs: self.timer.elapsed_secs(),
            solved: board.working.is_dark(),
        })
    }

    fn render(&mut self) {
        if let Some(view) = self.view() {
            self.renderer.render(&view);
        }
    }
}

/// Pick the next level at random, never repeating `current` when there is a choice.
///
/// With a single configured level the only candidate is the current one, so
/// it is selected again. An empty list yields `None`.
pub fn select_next_level<'a>(
    all: &'a [String],
    current: Option<&str>,
    rng: &mut WasmRng,
) -> Option<&'a str> {
    let candidates: Vec<&'a str> = all
        .iter()
        .map(String::as_str)
        .filter(|&id| Some(id) != current)
        .collect();

    if candidates.is_empty() {
        return current
            .and_then(|cur| all.iter().map(String::as_str).find(|&id| id == cur))
            .or_else(|| all.first().map(String::as_str));
    }
    Some(candidates[rng.gen_range(candidates.len())])
}
