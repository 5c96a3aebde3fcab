//! Shared form parsing and fragment helpers for route handlers.

use tracing::warn;

use crate::error::{Result, TrackerError};

/// Decoded `key=value` pairs from a query string or HTMX form body.
#[derive(Debug, Default)]
pub struct Params(Vec<(String, String)>);

impl Params {
    /// Parse a `key=value&key2=value2` form body.
    pub fn from_form(body: &str) -> Self {
        Self(
            body.split('&')
                .filter(|pair| !pair.is_empty())
                .map(|pair| {
                    let (key, val) = pair.split_once('=').unwrap_or((pair, ""));
                    (percent_decode(key), percent_decode(val))
                })
                .collect(),
        )
    }

    /// Parse a query string, with or without its leading `?`.
    pub fn from_query(query: &str) -> Self {
        Self::from_form(query.strip_prefix('?').unwrap_or(query))
    }

    /// First value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First non-empty value for `key`, or [`TrackerError::MissingParam`].
    pub fn require(&self, key: &'static str) -> Result<&str> {
        match self.get(key) {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(TrackerError::MissingParam(key)),
        }
    }

    /// Parse a required parameter with its `FromStr` impl.
    pub fn parse<T>(&self, key: &'static str) -> Result<T>
    where
        T: std::str::FromStr<Err = TrackerError>,
    {
        self.require(key)?.parse()
    }
}

/// Percent-decode a URL-encoded value. `+` decodes to a space; malformed
/// escapes are kept literally and invalid UTF-8 is replaced.
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => match (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                (Some(hi), Some(lo)) => {
                    out.push((hi << 4) | lo);
                    i += 3;
                }
                _ => {
                    out.push(b'%');
                    i += 1;
                }
            },
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    (b as char).to_digit(16).map(|d| d as u8)
}

/// Escape text for interpolation into HTML.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a rejected request as a red inline message.
pub fn error_fragment(err: &TrackerError) -> String {
    warn!(target: "lifepoint_server::routes", error = %err, "request rejected");
    format!(
        r#"<span class="text-red-600">{}</span>"#,
        escape_html(&err.to_string())
    )
}

/// Unwrap a handler result into the fragment to return.
pub fn respond(result: Result<String>) -> String {
    result.unwrap_or_else(|err| error_fragment(&err))
}
