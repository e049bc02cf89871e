//! Typewriter-style reveal of generated markup.
//!
//! [`Typewriter`] is a host-agnostic state machine: the host calls
//! [`Typewriter::step`] once per timer tick and schedules the next tick after
//! the returned delay. Every [`Typewriter::start`] issues a new
//! [`RevealToken`]; ticks carrying an older token are ignored, so a restarted
//! reveal never interleaves with the one it replaced.

use std::time::Duration;

/// Base per-character delay in milliseconds.
pub const BASE_DELAY_MS: u64 = 10;

/// Delay after revealing `ch`.
///
/// Newlines pause twice as long, spaces half as long, markup punctuation
/// (`< > = / "`) at 0.8×, everything else at the base delay.
pub fn char_delay(ch: char, base: Duration) -> Duration {
    match ch {
        '\n' => base * 2,
        ' ' => base / 2,
        '<' | '>' | '=' | '/' | '"' => base * 4 / 5,
        _ => base,
    }
}

/// Identifies one run of the typewriter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevealToken(u64);

/// Result of one reveal step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Character just appended to the displayed buffer
    pub ch: char,
    /// Delay before the next step, `None` once the content is fully shown
    pub next: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    base_delay: Duration,
    content: String,
    /// Byte offset of the next character to reveal
    cursor: usize,
    displayed: String,
    typing: bool,
    generation: u64,
}

impl Typewriter {
    pub fn new(base_delay: Duration) -> Self {
        Self {
            base_delay,
            content: String::new(),
            cursor: 0,
            displayed: String::new(),
            typing: false,
            generation: 0,
        }
    }

    /// Begin revealing `content` from scratch, invalidating any earlier run.
    pub fn start(&mut self, content: impl Into<String>) -> RevealToken {
        if self.typing {
            tracing::debug!(
                revealed = self.cursor,
                total = self.content.len(),
                "cancelling in-flight reveal"
            );
        }
        self.generation = self.generation.wrapping_add(1);
        self.content = content.into();
        self.cursor = 0;
        self.displayed.clear();
        self.typing = !self.content.is_empty();
        RevealToken(self.generation)
    }

    /// Append the next character if `token` belongs to the current run.
    ///
    /// Returns `None` for stale tokens and once everything has been revealed.
    pub fn step(&mut self, token: RevealToken) -> Option<Tick> {
        if !self.is_current(token) || !self.typing {
            return None;
        }
        let Some(ch) = self
            .content
            .get(self.cursor..)
            .and_then(|rest| rest.chars().next())
        else {
            self.typing = false;
            return None;
        };
        self.displayed.push(ch);
        self.cursor += ch.len_utf8();

        let next = if self.cursor >= self.content.len() {
            self.typing = false;
            tracing::debug!(chars = self.displayed.len(), "reveal finished");
            None
        } else {
            Some(char_delay(ch, self.base_delay))
        };
        Some(Tick { ch, next })
    }

    /// Show the remaining content at once and stop the current run.
    pub fn finish(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.displayed.clone_from(&self.content);
        self.cursor = self.content.len();
        self.typing = false;
    }

    /// Forget content and displayed text, stopping the current run.
    pub fn clear(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.content.clear();
        self.displayed.clear();
        self.cursor = 0;
        self.typing = false;
    }

    pub fn is_current(&self, token: RevealToken) -> bool {
        token.0 == self.generation
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn displayed(&self) -> &str {
        &self.displayed
    }
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new(Duration::from_millis(BASE_DELAY_MS))
    }
}

/// Run a complete reveal on the current thread.
///
/// `sink` receives every character in order; `sleep` is called with each
/// inter-character delay. Returns the fully revealed text.
pub fn reveal_blocking<S, F>(
    content: &str,
    base_delay: Duration,
    mut sleep: S,
    mut sink: F,
) -> String
where
    S: FnMut(Duration),
    F: FnMut(char),
{
    let mut typewriter = Typewriter::new(base_delay);
    let token = typewriter.start(content);
    while let Some(tick) = typewriter.step(token) {
        sink(tick.ch);
        match tick.next {
            Some(delay) => sleep(delay),
            None => break,
        }
    }
    typewriter.displayed
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case('\n', 20 ; "newline doubles")]
    #[test_case(' ', 5 ; "space halves")]
    #[test_case('<', 8 ; "open angle")]
    #[test_case('>', 8 ; "close angle")]
    #[test_case('=', 8 ; "equals")]
    #[test_case('/', 8 ; "slash")]
    #[test_case('"', 8 ; "quote")]
    #[test_case('t', 10 ; "letter")]
    #[test_case('2', 10 ; "digit")]
    fn test_char_delay(ch: char, expected_ms: u64) {
        assert_eq!(
            char_delay(ch, Duration::from_millis(10)),
            Duration::from_millis(expected_ms)
        );
    }

    #[test]
    fn test_step_reveals_in_order() {
        let mut tw = Typewriter::default();
        let token = tw.start("<a>");
        assert!(tw.is_typing());
        let first = tw.step(token).unwrap();
        assert_eq!(first.ch, '<');
        assert_eq!(first.next, Some(Duration::from_millis(8)));
        assert_eq!(tw.displayed(), "<");
        tw.step(token).unwrap();
        let last = tw.step(token).unwrap();
        assert_eq!(last.next, None);
        assert_eq!(tw.displayed(), "<a>");
        assert!(!tw.is_typing());
        assert_eq!(tw.step(token), None);
    }

    #[test]
    fn test_restart_invalidates_old_token() {
        let mut tw = Typewriter::default();
        let old = tw.start("first");
        tw.step(old).unwrap();
        let new = tw.start("second");
        assert_eq!(tw.displayed(), "");
        assert_eq!(tw.step(old), None);
        assert_eq!(tw.displayed(), "");
        assert_eq!(tw.step(new).unwrap().ch, 's');
    }

    #[test]
    fn test_multibyte_content() {
        let mut tw = Typewriter::default();
        let token = tw.start("é→x");
        while tw.step(token).is_some() {}
        assert_eq!(tw.displayed(), "é→x");
    }

    #[test]
    fn test_empty_content_is_not_typing() {
        let mut tw = Typewriter::default();
        let token = tw.start("");
        assert!(!tw.is_typing());
        assert_eq!(tw.step(token), None);
    }

    #[test]
    fn test_finish_and_clear() {
        let mut tw = Typewriter::default();
        let token = tw.start("abc");
        tw.step(token);
        tw.finish();
        assert_eq!(tw.displayed(), "abc");
        assert!(!tw.is_typing());
        assert_eq!(tw.step(token), None);

        tw.clear();
        assert_eq!(tw.content(), "");
        assert_eq!(tw.displayed(), "");
    }

    #[test]
    fn test_reveal_blocking_sleeps_between_chars() {
        let mut sleeps = Vec::new();
        let mut seen = String::new();
        let out = reveal_blocking(
            "a b\n",
            Duration::from_millis(10),
            |d| sleeps.push(d.as_millis()),
            |ch| seen.push(ch),
        );
        assert_eq!(out, "a b\n");
        assert_eq!(seen, "a b\n");
        // No sleep after the final character.
        assert_eq!(sleeps, [10, 5, 10]);
    }
}
