//! Board rendering — both player sections, undo/redo controls and the
//! recent history log, rendered as one HTMX fragment for `#life-board`.
//!
//! Every button posts back to `/api/life/*` and swaps the returned board in
//! place; the custom keypad buttons load the modal into `#keypad-modal`.

use crate::game::history::HistoryEntry;
use crate::game::rules::QUICK_VALUES;
use crate::game::tracker::{LifeTracker, PlayerId};

/// How many history entries the log panel shows.
const HISTORY_PREVIEW: usize = 10;

fn board_request(path: &str, values: &str) -> String {
    format!(
        "htmx.ajax('POST', '{}', {{values: {{{}}}, target: '#life-board', swap: 'innerHTML'}})",
        path, values
    )
}

fn keypad_request(player: PlayerId, mode: &str) -> String {
    format!(
        "htmx.ajax('GET', '/api/keypad?player={}&mode={}', {{target: '#keypad-modal', swap: 'innerHTML'}})",
        player.as_str(),
        mode
    )
}

/// Render one player's section: counter, quick buttons, keypad openers, reset.
fn render_player_section(tracker: &LifeTracker, player: PlayerId) -> String {
    let id = player.as_str();
    let gradient = match player {
        PlayerId::Player1 => "from-indigo-500 to-purple-700",
        PlayerId::Player2 => "from-pink-400 to-rose-500",
    };
    let mut html = String::with_capacity(4096);

    html.push_str(&format!(
        r#"<section id="{}-section" class="bg-slate-100 rounded-2xl p-4">"#,
        id
    ));
    html.push_str(&format!(
        r#"<h2 class="text-lg font-bold text-slate-700 mb-2">{}</h2>"#,
        player.label()
    ));

    // Counter
    html.push_str(&format!(
        r#"<div class="bg-gradient-to-br {} rounded-2xl p-6 mb-4 shadow-lg">"#,
        gradient
    ));
    html.push_str(r#"<p class="text-white text-sm mb-1">Life Points</p>"#);
    html.push_str(&format!(
        r#"<div id="life-{}" class="text-5xl font-bold text-white">{}</div>"#,
        id,
        tracker.life_points(player)
    ));
    html.push_str(r#"</div>"#);

    // Quick damage
    html.push_str(r#"<div class="grid grid-cols-5 gap-2 mb-2">"#);
    for value in QUICK_VALUES {
        html.push_str(&format!(
            r#"<button class="bg-red-400 hover:bg-red-500 text-white font-bold py-2 rounded-lg text-sm" onclick="{}">-{}</button>"#,
            board_request(
                "/api/life/damage",
                &format!("player: '{}', amount: '{}'", id, value)
            ),
            value
        ));
    }
    html.push_str(r#"</div>"#);

    // Quick heal
    html.push_str(r#"<div class="grid grid-cols-5 gap-2 mb-2">"#);
    for value in QUICK_VALUES {
        html.push_str(&format!(
            r#"<button class="bg-emerald-400 hover:bg-emerald-500 text-white font-bold py-2 rounded-lg text-sm" onclick="{}">+{}</button>"#,
            board_request(
                "/api/life/heal",
                &format!("player: '{}', amount: '{}'", id, value)
            ),
            value
        ));
    }
    html.push_str(r#"</div>"#);

    // Custom amount keypads
    html.push_str(r#"<div class="grid grid-cols-2 gap-2 mb-2">"#);
    html.push_str(&format!(
        r#"<button class="bg-red-600 hover:bg-red-700 text-white font-bold py-2 rounded-lg text-sm" onclick="{}">Custom Damage</button>"#,
        keypad_request(player, "damage")
    ));
    html.push_str(&format!(
        r#"<button class="bg-emerald-600 hover:bg-emerald-700 text-white font-bold py-2 rounded-lg text-sm" onclick="{}">Custom Heal</button>"#,
        keypad_request(player, "heal")
    ));
    html.push_str(r#"</div>"#);

    html.push_str(&format!(
        r#"<button class="w-full bg-teal-400 hover:bg-teal-500 text-white font-bold py-2 rounded-lg" onclick="{}">Reset</button>"#,
        board_request("/api/life/reset", &format!("player: '{}'", id))
    ));

    html.push_str(r#"</section>"#);
    html
}

fn render_history_line(entry: &HistoryEntry) -> String {
    let delta = i64::from(entry.new_value) - i64::from(entry.previous_value);
    let (sign, color) = if delta < 0 {
        ("", "text-red-600")
    } else {
        ("+", "text-emerald-600")
    };
    format!(
        r#"<li class="text-sm">{}: {} &#x2192; {} <span class="{}">({}{})</span></li>"#,
        entry.player.label(),
        entry.previous_value,
        entry.new_value,
        color,
        sign,
        delta
    )
}

/// Render undo/redo, reset-all and the recent history log.
fn render_controls(tracker: &LifeTracker) -> String {
    let mut html = String::with_capacity(2048);

    html.push_str(r#"<div class="flex gap-2 justify-center my-4">"#);
    for (label, path, enabled) in [
        ("Undo", "/api/life/undo", tracker.can_undo()),
        ("Redo", "/api/life/redo", tracker.can_redo()),
    ] {
        let (dim, disabled) = if enabled { ("", "") } else { (" opacity-40", " disabled") };
        html.push_str(&format!(
            r#"<button id="{}-button" class="bg-slate-500 hover:bg-slate-600 text-white font-bold py-2 px-4 rounded-lg{}"{} onclick="{}">{}</button>"#,
            label.to_lowercase(),
            dim,
            disabled,
            board_request(path, ""),
            label
        ));
    }
    html.push_str(&format!(
        r#"<button id="reset-all-button" class="bg-teal-600 hover:bg-teal-700 text-white font-bold py-2 px-4 rounded-lg" onclick="{}">Reset Both Players</button>"#,
        board_request("/api/life/reset_all", "")
    ));
    html.push_str(r#"</div>"#);

    let entries = tracker.history().entries();
    if !entries.is_empty() {
        html.push_str(r#"<ol id="history-log" class="bg-slate-50 rounded-lg p-3 text-slate-600">"#);
        for entry in entries.iter().rev().take(HISTORY_PREVIEW) {
            html.push_str(&render_history_line(entry));
        }
        html.push_str(r#"</ol>"#);
    }

    html
}

/// Render the whole board for the current tracker.
pub fn render_board(tracker: &LifeTracker) -> String {
    let mut html = String::with_capacity(12288);
    html.push_str(r#"<div id="life-board-inner" class="max-w-4xl mx-auto p-4">"#);
    html.push_str(
        r#"<h1 class="text-2xl font-bold text-center text-slate-700 mb-4">Life Point Calculator</h1>"#,
    );
    html.push_str(r#"<div class="grid grid-cols-1 md:grid-cols-2 gap-4">"#);
    for player in PlayerId::ALL {
        html.push_str(&render_player_section(tracker, player));
    }
    html.push_str(r#"</div>"#);
    html.push_str(&render_controls(tracker));
    html.push_str(r#"</div>"#);
    html
}
