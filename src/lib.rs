//! Life point tracker in-browser WASM server.
//!
//! Exports `handle_request(method, path, query, body)` for the Service Worker
//! bridge to call. Uses `matchit` for URL routing — the same router engine
//! that powers Axum. All state lives in WASM memory for the session.

use wasm_bindgen::prelude::*;

pub mod error;
pub mod game;
pub mod routes;

pub use error::{Result, TrackerError};

/// Process an HTTP-like request and return an HTML fragment.
///
/// Called from JavaScript (Web Worker) via wasm-bindgen.
///
/// # Arguments
/// * `method` — HTTP method ("GET" or "POST")
/// * `path`   — URL path (e.g., "/api/life/damage")
/// * `query`  — Query string (e.g., "?player=player1&mode=damage")
/// * `body`   — Form body for POST requests. Empty string for GET requests.
///
/// # Returns
/// An HTML string fragment suitable for HTMX to swap into the DOM
/// (JSON for `/api/life/state`).
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, query: &str, body: &str) -> String {
    let mut router = matchit::Router::new();

    router.insert("/api/life/board", "life_board").ok();
    router.insert("/api/life/state", "life_state").ok();
    router.insert("/api/life/damage", "life_damage").ok();
    router.insert("/api/life/heal", "life_heal").ok();
    router.insert("/api/life/reset", "life_reset").ok();
    router.insert("/api/life/reset_all", "life_reset_all").ok();
    router.insert("/api/life/undo", "life_undo").ok();
    router.insert("/api/life/redo", "life_redo").ok();
    router.insert("/api/keypad", "keypad").ok();

    match router.at(path) {
        Ok(matched) => match (*matched.value, method) {
            ("life_board", "GET") => routes::life::handle_board_get(query),
            ("life_state", "GET") => routes::life::handle_state_get(query),
            ("keypad", "GET") => routes::keypad::handle_keypad_get(query),

            ("life_damage", "POST") => routes::life::handle_damage_post(body),
            ("life_heal", "POST") => routes::life::handle_heal_post(body),
            ("life_reset", "POST") => routes::life::handle_reset_post(body),
            ("life_reset_all", "POST") => routes::life::handle_reset_all_post(body),
            ("life_undo", "POST") => routes::life::handle_undo_post(body),
            ("life_redo", "POST") => routes::life::handle_redo_post(body),
            ("keypad", "POST") => routes::keypad::handle_keypad_post(body),

            _ => method_not_allowed(),
        },
        Err(_) => not_found(),
    }
}

fn not_found() -> String {
    r#"<span class="text-red-600">404 — route not found</span>"#.to_string()
}

fn method_not_allowed() -> String {
    r#"<span class="text-red-600">405 — method not allowed</span>"#.to_string()
}
