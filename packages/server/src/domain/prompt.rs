//! Prompt rendering and the erase/redraw bracketing used when injecting text.
//!
//! A client's terminal shows its own prompt line (`[time][name]: ` followed by whatever the
//! user has typed but not yet sent). Text from other participants is injected by first
//! blanking that line with carriage returns and spaces, writing the text, and then drawing a
//! fresh prompt. Only `\r` and spaces are used, so any terminal (or plain `nc`) renders it.

use linechat_shared::time::{PROMPT_TIME_FORMAT, format_local};

use super::value_object::Username;

/// A prompt line exactly as it was written to a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// Render `\r[YYYY-MM-DD HH:MM:SS][name]: ` for the given instant.
    pub fn render(name: &Username, timestamp_millis: i64) -> Self {
        Self(format!(
            "\r[{}][{}]: ",
            format_local(timestamp_millis, PROMPT_TIME_FORMAT),
            name
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Carriage return, one space per character of this prompt, carriage return.
    pub fn erase(&self) -> String {
        let width = self.0.chars().count();
        let mut out = String::with_capacity(width + 2);
        out.push('\r');
        out.extend(std::iter::repeat_n(' ', width));
        out.push('\r');
        out
    }
}

/// Wrap `body` so that a peer's prompt line survives the injection.
///
/// `previous` is the prompt the peer currently sees, `next` the one drawn afterwards.
pub fn bracket(previous: &Prompt, body: &str, next: &Prompt) -> String {
    let mut out = previous.erase();
    out.push_str(body);
    out.push_str(next.as_str());
    out
}
