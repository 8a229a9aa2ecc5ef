//! Log redaction for Telegram bot tokens.
//!
//! teloxide and reqwest errors can embed the full request URL, which carries
//! the token as `/bot<token>/`. Everything written by the log subscriber goes
//! through [`RedactingWriter`] first.

use regex::Regex;
use std::io::{self, Write};
use std::sync::Arc;

const MASK: &str = "[TELEGRAM_TOKEN]";

/// Compiled token patterns and their replacements, applied in order.
pub struct RedactionPatterns {
    rules: Vec<(Regex, String)>,
}

impl RedactionPatterns {
    /// Compile all token patterns
    ///
    /// # Errors
    ///
    /// Returns an error if any regex pattern is invalid
    pub fn new() -> Result<Self, regex::Error> {
        let rules = vec![
            // https://api.telegram.org/bot<token>/method
            (
                Regex::new(r"(https?://[^/]+/bot)([0-9]+:[A-Za-z0-9_-]+)(/['\s]*)")?,
                format!("${{1}}{MASK}${{3}}"),
            ),
            // bare token
            (
                Regex::new(r"[0-9]{8,10}:[A-Za-z0-9_-]{35}")?,
                MASK.to_string(),
            ),
            // bot<id>:<secret>
            (
                Regex::new(r"(bot[0-9]{8,10}:)[A-Za-z0-9_-]+")?,
                format!("${{1}}{MASK}"),
            ),
        ];
        Ok(Self { rules })
    }

    /// Returns `input` with every token masked.
    pub fn redact(&self, input: &str) -> String {
        self.rules
            .iter()
            .fold(input.to_string(), |text, (pattern, replacement)| {
                pattern.replace_all(&text, replacement.as_str()).into_owned()
            })
    }
}

/// Writer that masks tokens before forwarding to `inner`.
pub struct RedactingWriter<W: Write> {
    inner: W,
    patterns: Arc<RedactionPatterns>,
}

impl<W: Write> Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let redacted = self.patterns.redact(&String::from_utf8_lossy(buf));
        self.inner.write_all(redacted.as_bytes())?;
        // The caller's whole buffer was consumed, whatever the redacted length
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// `MakeWriter` wrapping each writer produced by `make_inner` in a [`RedactingWriter`].
pub struct RedactingMakeWriter<F> {
    make_inner: F,
    patterns: Arc<RedactionPatterns>,
}

impl<F> RedactingMakeWriter<F> {
    pub const fn new(make_inner: F, patterns: Arc<RedactionPatterns>) -> Self {
        Self {
            make_inner,
            patterns,
        }
    }
}

impl<'a, F, W> tracing_subscriber::fmt::MakeWriter<'a> for RedactingMakeWriter<F>
where
    F: Fn() -> W + 'static,
    W: Write,
{
    type Writer = RedactingWriter<W>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter {
            inner: (self.make_inner)(),
            patterns: self.patterns.clone(),
        }
    }
}
