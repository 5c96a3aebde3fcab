//! `/api/keypad` routes — the custom damage/heal modal.
//!
//! The modal's buffer travels with every key press, so each request rebuilds
//! a [`Keypad`], applies one key and renders the result into `#keypad-modal`.
//! Confirm and cancel answer with an empty modal; a successful confirm also
//! carries the new board as an out-of-band swap.

use crate::error::{Result, TrackerError};
use crate::game::keypad::{Keypad, KeypadMode, render_keypad};
use crate::game::state::with_tracker_mut;
use crate::game::tracker::PlayerId;
use crate::routes::life::current_board;
use crate::routes::util::{Params, respond};

// ── GET /api/keypad ────────────────────────────────────────────────

fn open_keypad(query: &str) -> Result<String> {
    let params = Params::from_query(query);
    let player: PlayerId = params.parse("player")?;
    let mode: KeypadMode = params.parse("mode")?;
    Ok(render_keypad(&Keypad::open(player, mode)))
}

/// Handle GET /api/keypad?player={player1|player2}&mode={damage|heal}
/// Returns a freshly opened keypad modal.
pub fn handle_keypad_get(query: &str) -> String {
    respond(open_keypad(query))
}

// ── POST /api/keypad ───────────────────────────────────────────────

fn parse_digit(raw: &str) -> Result<u8> {
    match raw.as_bytes() {
        [d @ b'0'..=b'9'] => Ok(d - b'0'),
        _ => Err(TrackerError::InvalidDigit(raw.to_string())),
    }
}

fn press_key(body: &str) -> Result<String> {
    let params = Params::from_form(body);
    let player: PlayerId = params.parse("player")?;
    let mode: KeypadMode = params.parse("mode")?;
    let buffer = params.get("buffer").unwrap_or("");
    let mut keypad = Keypad::restore(player, mode, buffer)?;

    match params.require("action")? {
        "digit" => {
            keypad.append_digit(parse_digit(params.require("digit")?)?);
        }
        "double_zero" => {
            keypad.append_double_zero();
        }
        "clear" => {
            keypad.clear();
        }
        "confirm" => {
            if with_tracker_mut(|t| keypad.confirm(t)).is_some() {
                return Ok(format!(
                    r#"<div id="life-board" hx-swap-oob="innerHTML">{}</div>"#,
                    current_board()
                ));
            }
        }
        "cancel" => {
            keypad.cancel();
            return Ok(String::new());
        }
        other => return Err(TrackerError::UnknownAction(other.to_string())),
    }

    Ok(render_keypad(&keypad))
}

/// Handle POST /api/keypad
/// Body: player, mode, buffer (current digits), and one of
///   - action=digit&digit={0-9}
///   - action=double_zero
///   - action=clear
///   - action=confirm  → applies the amount and closes when positive
///   - action=cancel   → closes without applying
pub fn handle_keypad_post(body: &str) -> String {
    respond(press_key(body))
}
