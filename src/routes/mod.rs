//! Route handlers. Each takes the raw query (GET) or form body (POST) and
//! returns the HTML fragment for HTMX to swap in.

pub mod keypad;
pub mod life;
pub mod util;
