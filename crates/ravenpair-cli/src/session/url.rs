//! HTTP to WebSocket URL translation.

/// Convert an `http(s)://` base URL to its `ws(s)://` equivalent.
///
/// Trailing `/` characters are removed first. Inputs with any other scheme
/// (including `ws://` and `wss://`) are returned trimmed but otherwise
/// unchanged, so applying the function twice gives the same result as
/// applying it once.
#[must_use]
pub fn to_websocket_url(input: &str) -> String {
    let trimmed = input.trim_end_matches('/');

    if let Some(rest) = trimmed.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = trimmed.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        trimmed.to_string()
    }
}
