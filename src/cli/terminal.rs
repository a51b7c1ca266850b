//! Coloured console output
//!
//! Colour is only emitted when the stream the text is printed to supports
//! it, so redirecting one stream does not affect the other.

use owo_colors::{OwoColorize, colors::css};
use supports_color::Stream;

/// The kinds of message the CLI prints, and where each one goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Success,
    Warning,
    Failure,
    Dim,
}

impl Tone {
    /// Failures are reported on stderr, everything else on stdout.
    const fn stream(self) -> Stream {
        match self {
            Self::Failure => Stream::Stderr,
            Self::Success | Self::Warning | Self::Dim => Stream::Stdout,
        }
    }

    fn paint(self, text: &str) -> String {
        if supports_color::on(self.stream()).is_none() {
            return text.to_string();
        }
        match self {
            Self::Success => text.fg::<css::Green>().to_string(),
            Self::Warning => text.fg::<css::Orange>().to_string(),
            Self::Failure => text.fg::<css::Red>().to_string(),
            Self::Dim => text.dimmed().to_string(),
        }
    }
}

/// Styling for console messages
pub trait Colorize {
    /// Green, for stdout
    fn success(&self) -> String;
    /// Orange, for stdout
    fn warning(&self) -> String;
    /// Red, for stderr
    fn failure(&self) -> String;
    /// Dimmed, for stdout
    fn dim(&self) -> String;
}

impl Colorize for str {
    fn success(&self) -> String {
        Tone::Success.paint(self)
    }

    fn warning(&self) -> String {
        Tone::Warning.paint(self)
    }

    fn failure(&self) -> String {
        Tone::Failure.paint(self)
    }

    fn dim(&self) -> String {
        Tone::Dim.paint(self)
    }
}

impl Colorize for String {
    fn success(&self) -> String {
        self.as_str().success()
    }

    fn warning(&self) -> String {
        self.as_str().warning()
    }

    fn failure(&self) -> String {
        self.as_str().failure()
    }

    fn dim(&self) -> String {
        self.as_str().dim()
    }
}
