//! Custom amount keypad — digit accumulator behind the damage/heal modal.
//!
//! A [`Keypad`] belongs to one open modal. Its buffer is never stored in the
//! tracker: the rendered modal carries it in each key's request and the
//! route rebuilds the keypad with [`Keypad::restore`] on every press.
//!
//! Input rules:
//! - at most [`MAX_KEYPAD_DIGITS`] digits, extra presses are ignored
//! - "00" only when the buffer is non-empty and still has room for two digits
//! - confirm with an empty or zero buffer does nothing and leaves the modal open

use std::num::NonZeroU32;
use std::str::FromStr;

use tracing::trace;

use crate::error::{Result, TrackerError};
use crate::game::history::HistoryEntry;
use crate::game::rules::MAX_KEYPAD_DIGITS;
use crate::game::tracker::{LifeTracker, PlayerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadMode {
    Damage,
    Heal,
}

impl KeypadMode {
    pub fn as_str(self) -> &'static str {
        match self {
            KeypadMode::Damage => "damage",
            KeypadMode::Heal => "heal",
        }
    }
}

impl FromStr for KeypadMode {
    type Err = TrackerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "damage" => Ok(KeypadMode::Damage),
            "heal" => Ok(KeypadMode::Heal),
            other => Err(TrackerError::UnknownMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keypad {
    player: PlayerId,
    mode: KeypadMode,
    buffer: String,
}

impl Keypad {
    /// A freshly opened modal with an empty buffer.
    pub fn open(player: PlayerId, mode: KeypadMode) -> Self {
        Self {
            player,
            mode,
            buffer: String::with_capacity(MAX_KEYPAD_DIGITS),
        }
    }

    /// Rebuild an open modal from the buffer it sent back.
    pub fn restore(player: PlayerId, mode: KeypadMode, buffer: &str) -> Result<Self> {
        if buffer.len() > MAX_KEYPAD_DIGITS || !buffer.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TrackerError::InvalidBuffer(buffer.to_string()));
        }
        Ok(Self {
            player,
            mode,
            buffer: buffer.to_string(),
        })
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn mode(&self) -> KeypadMode {
        self.mode
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// What the modal shows: the buffer, or "0" while empty.
    pub fn display(&self) -> &str {
        if self.buffer.is_empty() {
            "0"
        } else {
            &self.buffer
        }
    }

    pub fn can_append_digit(&self) -> bool {
        self.buffer.len() < MAX_KEYPAD_DIGITS
    }

    pub fn can_append_double_zero(&self) -> bool {
        !self.buffer.is_empty() && self.buffer.len() + 2 <= MAX_KEYPAD_DIGITS
    }

    /// Returns whether the digit was accepted.
    pub fn append_digit(&mut self, digit: u8) -> bool {
        if digit > 9 || !self.can_append_digit() {
            trace!(
                target: "lifepoint_server::keypad",
                digit,
                len = self.buffer.len(),
                "digit ignored"
            );
            return false;
        }
        self.buffer.push(char::from(b'0' + digit));
        true
    }

    pub fn append_double_zero(&mut self) -> bool {
        if !self.can_append_double_zero() {
            trace!(
                target: "lifepoint_server::keypad",
                len = self.buffer.len(),
                "double zero ignored"
            );
            return false;
        }
        self.buffer.push_str("00");
        true
    }

    /// Returns whether there was anything to clear.
    pub fn clear(&mut self) -> bool {
        let had_input = !self.buffer.is_empty();
        self.buffer.clear();
        had_input
    }

    /// Parsed buffer, if it holds a positive amount.
    pub fn amount(&self) -> Option<NonZeroU32> {
        self.buffer.parse::<u32>().ok().and_then(NonZeroU32::new)
    }

    /// Apply the entered amount to the tracker and empty the buffer.
    ///
    /// Returns `None` without touching anything when the buffer is empty or
    /// zero; the modal should stay open in that case.
    pub fn confirm(&mut self, tracker: &mut LifeTracker) -> Option<HistoryEntry> {
        let Some(amount) = self.amount() else {
            trace!(target: "lifepoint_server::keypad", buffer = %self.buffer, "confirm ignored");
            return None;
        };
        let entry = match self.mode {
            KeypadMode::Damage => tracker.apply_damage(self.player, amount),
            KeypadMode::Heal => tracker.apply_heal(self.player, amount),
        };
        self.buffer.clear();
        Some(entry)
    }

    /// Close the modal without applying anything.
    pub fn cancel(mut self) {
        self.buffer.clear();
        trace!(target: "lifepoint_server::keypad", player = %self.player, "keypad cancelled");
    }
}

// ── Rendering ──────────────────────────────────────────────────────

/// Build the `htmx.ajax` call for one key, carrying the current buffer.
fn key_request(keypad: &Keypad, action: &str, digit: Option<u8>) -> String {
    let mut values = format!(
        "player: '{}', mode: '{}', buffer: '{}', action: '{}'",
        keypad.player.as_str(),
        keypad.mode.as_str(),
        keypad.buffer,
        action
    );
    if let Some(d) = digit {
        values.push_str(&format!(", digit: '{}'", d));
    }
    format!(
        "htmx.ajax('POST', '/api/keypad', {{values: {{{}}}, target: '#keypad-modal', swap: 'innerHTML'}})",
        values
    )
}

fn push_key(
    html: &mut String,
    keypad: &Keypad,
    label: &str,
    action: &str,
    digit: Option<u8>,
    enabled: bool,
    class: &str,
) {
    let (dim, disabled) = if enabled { ("", "") } else { (" opacity-40", " disabled") };
    html.push_str(&format!(
        r#"<button type="button" class="{}{} font-bold text-2xl py-4 rounded-lg"{} onclick="{}">{}</button>"#,
        class,
        dim,
        disabled,
        key_request(keypad, action, digit),
        label
    ));
}

/// Render the open keypad modal.
pub fn render_keypad(keypad: &Keypad) -> String {
    let player = keypad.player.as_str();
    let title = match keypad.mode {
        KeypadMode::Damage => format!("Damage to {}", keypad.player.label()),
        KeypadMode::Heal => format!("Heal {}", keypad.player.label()),
    };
    let mut html = String::with_capacity(4096);

    // Overlay click (outside the content box) dismisses like cancel.
    html.push_str(&format!(
        r#"<div id="keypad-overlay" class="fixed inset-0 z-50 flex items-center justify-center bg-black/50" onclick="if (event.target === this) {}">"#,
        key_request(keypad, "cancel", None)
    ));
    html.push_str(&format!(
        r#"<div id="keypad-{}-{}" class="bg-white rounded-2xl p-6 w-11/12 max-w-sm shadow-2xl">"#,
        keypad.mode.as_str(),
        player
    ));
    html.push_str(&format!(
        r#"<h3 class="text-center text-lg font-bold mb-4 text-slate-700">{}</h3>"#,
        title
    ));
    html.push_str(&format!(
        r#"<div id="keypad-display-{}" class="bg-slate-100 rounded-lg p-4 mb-4 text-right text-3xl font-bold text-slate-700">{}</div>"#,
        player,
        keypad.display()
    ));

    let digit_class = "bg-slate-200 hover:bg-slate-300 text-slate-700";
    let digits_open = keypad.can_append_digit();
    html.push_str(r#"<div class="grid grid-cols-3 gap-2 mb-2">"#);
    for d in 1..=9u8 {
        let label = d.to_string();
        push_key(&mut html, keypad, &label, "digit", Some(d), digits_open, digit_class);
    }
    let clear_class = "bg-yellow-300 hover:bg-yellow-400 text-slate-700";
    push_key(&mut html, keypad, "C", "clear", None, true, clear_class);
    push_key(&mut html, keypad, "0", "digit", Some(0), digits_open, digit_class);
    let double_zero_open = keypad.can_append_double_zero();
    push_key(&mut html, keypad, "00", "double_zero", None, double_zero_open, digit_class);
    html.push_str(r#"</div>"#);

    let confirm_label = match keypad.mode {
        KeypadMode::Damage => "Deal Damage",
        KeypadMode::Heal => "Heal",
    };
    html.push_str(r#"<div class="grid grid-cols-2 gap-2 mt-2">"#);
    let cancel_class = "bg-slate-400 hover:bg-slate-500 text-white";
    let confirm_class = "bg-red-400 hover:bg-red-500 text-white";
    push_key(&mut html, keypad, "Cancel", "cancel", None, true, cancel_class);
    push_key(&mut html, keypad, confirm_label, "confirm", None, true, confirm_class);
    html.push_str(r#"</div>"#);

    html.push_str(r#"</div>"#); // close content
    html.push_str(r#"</div>"#); // close overlay
    html
}
