//! `/api/life/*` routes — board rendering, damage/heal, resets, undo/redo
//! and the JSON state snapshot.
//!
//! Every POST answers with the re-rendered board so HTMX can swap
//! `#life-board` in one round trip.

use std::num::NonZeroU32;

use crate::error::Result;
use crate::game::board;
use crate::game::history::HistoryEntry;
use crate::game::rules::parse_amount;
use crate::game::state::{export_state_json, with_tracker, with_tracker_mut};
use crate::game::tracker::{LifeTracker, PlayerId};
use crate::routes::util::{Params, respond};

/// Current board HTML.
pub fn current_board() -> String {
    with_tracker(board::render_board)
}

// ── GET /api/life/board ────────────────────────────────────────────

pub fn handle_board_get(_query: &str) -> String {
    current_board()
}

// ── GET /api/life/state ────────────────────────────────────────────

/// Handle GET /api/life/state
/// Returns `{player1, player2, can_undo, can_redo, history, redo}` as JSON.
pub fn handle_state_get(_query: &str) -> String {
    respond(export_state_json())
}

// ── POST /api/life/damage, /api/life/heal ──────────────────────────

type AmountOp = fn(&mut LifeTracker, PlayerId, NonZeroU32) -> HistoryEntry;

fn apply_amount(body: &str, op: AmountOp) -> Result<String> {
    let params = Params::from_form(body);
    let player: PlayerId = params.parse("player")?;
    let amount = parse_amount(params.require("amount")?)?;
    with_tracker_mut(|t| op(t, player, amount));
    Ok(current_board())
}

/// Handle POST /api/life/damage
/// Body: player={player1|player2}&amount={n}
pub fn handle_damage_post(body: &str) -> String {
    respond(apply_amount(body, LifeTracker::apply_damage))
}

/// Handle POST /api/life/heal
/// Body: player={player1|player2}&amount={n}
pub fn handle_heal_post(body: &str) -> String {
    respond(apply_amount(body, LifeTracker::apply_heal))
}

// ── POST /api/life/reset, /api/life/reset_all ──────────────────────

fn reset_player(body: &str) -> Result<String> {
    let player: PlayerId = Params::from_form(body).parse("player")?;
    with_tracker_mut(|t| t.reset_player(player));
    Ok(current_board())
}

/// Handle POST /api/life/reset
/// Body: player={player1|player2}. Undoable.
pub fn handle_reset_post(body: &str) -> String {
    respond(reset_player(body))
}

/// Handle POST /api/life/reset_all
/// Resets both players and purges undo/redo.
pub fn handle_reset_all_post(_body: &str) -> String {
    with_tracker_mut(LifeTracker::reset_all);
    current_board()
}

// ── POST /api/life/undo, /api/life/redo ────────────────────────────

pub fn handle_undo_post(_body: &str) -> String {
    with_tracker_mut(LifeTracker::undo);
    current_board()
}

pub fn handle_redo_post(_body: &str) -> String {
    with_tracker_mut(LifeTracker::redo);
    current_board()
}
