//! The [`Output`] trait and its implementations.
//!
//! - [`Terminal`]: a color-capable renderer with interactive prompts
//! - [`Quiet`]: a silent implementation that refuses to prompt

use std::{
    io::{self, Write},
    result::Result as StdResult,
    time::Duration,
};

use indicatif::{ProgressBar, ProgressStyle};
use inquire::{InquireError, Select};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use thiserror::Error;

/// Indentation level (in spaces) used for nested output sections.
const INDENT: usize = 4;

/// Spinner redraw interval.
const SPINNER_TICK: Duration = Duration::from_millis(80);

/// Errors produced by [`Output`] implementations when interacting with the user
/// or the terminal.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The requested operation is not supported by this output backend.
    #[error("{0}")]
    Unsupported(&'static str),

    /// The caller supplied invalid input (e.g. empty options for a selector).
    #[error("{0}")]
    InvalidInput(&'static str),

    /// A terminal/TTY related failure occurred.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Underlying I/O error while writing/reading to the terminal.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The user cancelled an interactive prompt.
    #[error("Selection cancelled")]
    Cancelled,
}

impl From<InquireError> for OutputError {
    fn from(err: InquireError) -> Self {
        match err {
            InquireError::OperationCanceled | InquireError::OperationInterrupted => Self::Cancelled,
            InquireError::NotTTY => Self::Unsupported("Cannot prompt without a terminal"),
            InquireError::IO(e) => Self::Io(e),
            other => Self::Terminal(other.to_string()),
        }
    }
}

/// Convenience alias for output-related fallible operations.
pub type Result<T> = StdResult<T, OutputError>;

/// Abstraction over how user-facing messages and prompts are produced.
pub trait Output: Send + Sync {
    /// Print an informational message.
    fn message(&self, msg: &str) -> Result<()>;
    /// Print a success message.
    fn success(&self, msg: &str) -> Result<()>;
    /// Print a warning message.
    fn warn(&self, msg: &str) -> Result<()>;
    /// Print an error/failure message.
    fn fail(&self, msg: &str) -> Result<()>;
    /// Print a `label: value` pair.
    fn item(&self, label: &str, value: &str) -> Result<()>;
    /// Present a list of `options` and return the chosen index.
    fn select(&self, prompt: &str, options: Vec<String>) -> Result<usize>;
    /// Start a spinner showing `msg` until it is finished.
    fn spinner(&self, msg: &str) -> Spinner;
    /// Flush any buffered output.
    fn finish(&self) -> Result<()>;
    /// Create a nested output section that indents subsequent messages.
    fn section(&self, header: &str) -> Box<dyn Output>;
}

/// Output implementation that suppresses all messages and rejects interactive
/// prompts.
pub struct Quiet;

impl Output for Quiet {
    fn message(&self, _msg: &str) -> Result<()> {
        Ok(())
    }

    fn success(&self, _msg: &str) -> Result<()> {
        Ok(())
    }

    fn warn(&self, _msg: &str) -> Result<()> {
        Ok(())
    }

    fn fail(&self, _msg: &str) -> Result<()> {
        Ok(())
    }

    fn item(&self, _label: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    fn select(&self, _prompt: &str, _options: Vec<String>) -> Result<usize> {
        Err(OutputError::Unsupported(
            "Cannot prompt for selection in quiet mode",
        ))
    }

    fn spinner(&self, _msg: &str) -> Spinner {
        Spinner::hidden()
    }

    fn finish(&self) -> Result<()> {
        Ok(())
    }

    fn section(&self, _header: &str) -> Box<dyn Output> {
        Box::new(Self)
    }
}

/// Color-capable terminal renderer for user messages and prompts.
pub struct Terminal {
    /// Whether to emit ANSI color sequences when writing to stdout.
    color_choice: ColorChoice,
    /// Current indentation depth in spaces.
    indent: usize,
}

impl Terminal {
    /// Create a new terminal output.
    ///
    /// - `color`: when `true`, always render colored output; when `false`,
    ///   disable ANSI colors.
    pub fn new(color: bool) -> Self {
        let color_choice = if color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        };
        Self {
            color_choice,
            indent: 0,
        }
    }

    /// Write `msg` using `color` while honoring the current indentation level.
    fn write_colored(&self, msg: &str, color: Color) -> Result<()> {
        write_line(self.color_choice, self.indent, msg, Some(color))
    }
}

/// Write one indented line to stdout, optionally colored.
fn write_line(choice: ColorChoice, indent: usize, msg: &str, color: Option<Color>) -> Result<()> {
    let mut stdout = StandardStream::stdout(choice);
    stdout.set_color(ColorSpec::new().set_fg(color))?;
    writeln!(stdout, "{}{msg}", " ".repeat(indent))?;
    stdout.reset()?;
    stdout.flush()?;
    Ok(())
}

impl Output for Terminal {
    fn message(&self, msg: &str) -> Result<()> {
        self.write_colored(msg, Color::Cyan)
    }

    fn success(&self, msg: &str) -> Result<()> {
        self.write_colored(msg, Color::Green)
    }

    fn warn(&self, msg: &str) -> Result<()> {
        self.write_colored(msg, Color::Rgb(255, 165, 0)) // Orange
    }

    fn fail(&self, msg: &str) -> Result<()> {
        self.write_colored(msg, Color::Red)
    }

    fn item(&self, label: &str, value: &str) -> Result<()> {
        let mut stdout = StandardStream::stdout(self.color_choice);
        write!(stdout, "{}", " ".repeat(self.indent))?;
        stdout.set_color(ColorSpec::new().set_bold(true))?;
        write!(stdout, "{label}:")?;
        stdout.reset()?;
        writeln!(stdout, " {value}")?;
        stdout.flush()?;
        Ok(())
    }

    fn select(&self, prompt: &str, options: Vec<String>) -> Result<usize> {
        if options.is_empty() {
            return Err(OutputError::InvalidInput(
                "No options provided for selection",
            ));
        }

        let choice = Select::new(prompt, options).raw_prompt()?;
        Ok(choice.index)
    }

    fn spinner(&self, msg: &str) -> Spinner {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(msg.to_string());
        bar.enable_steady_tick(SPINNER_TICK);
        Spinner {
            bar: Some(bar),
            printer: Some((self.color_choice, self.indent)),
        }
    }

    fn finish(&self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }

    fn section(&self, header: &str) -> Box<dyn Output> {
        if let Err(err) = self.message(header) {
            eprintln!("Failed to write section header: {err}");
        }

        Box::new(Self {
            color_choice: self.color_choice,
            indent: self.indent + INDENT,
        })
    }
}

/// A running progress spinner, replaced by a status line when finished.
///
/// Dropping an unfinished spinner clears it.
pub struct Spinner {
    /// The animated bar, absent for hidden spinners.
    bar: Option<ProgressBar>,
    /// Color choice and indent used for the final status line.
    printer: Option<(ColorChoice, usize)>,
}

impl Spinner {
    /// A spinner that renders nothing.
    pub fn hidden() -> Self {
        Self {
            bar: None,
            printer: None,
        }
    }

    /// Stop the spinner and print `msg` as a failure.
    pub fn finish_fail(self, msg: &str) {
        self.finish_with(msg, Color::Red);
    }

    /// Stop the spinner without printing anything.
    pub fn finish_clear(mut self) {
        self.clear();
    }

    /// Clear the bar, then print the status line.
    fn finish_with(mut self, msg: &str, color: Color) {
        self.clear();
        if let Some((choice, indent)) = self.printer
            && let Err(err) = write_line(choice, indent, msg, Some(color))
        {
            eprintln!("Failed to write spinner status: {err}");
        }
    }

    /// Remove the bar from the terminal, if it is still showing.
    fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_select_returns_error() {
        let quiet = Quiet;
        let options = vec!["main".to_string(), "feat".to_string()];
        let result = quiet.select("Select a ref:", options);
        assert!(result.is_err());

        if let Err(e) = result {
            assert!(matches!(e, OutputError::Unsupported(_)));
            assert_eq!(e.to_string(), "Cannot prompt for selection in quiet mode");
        }
    }

    #[test]
    fn test_select_empty_options_error() {
        let terminal = Terminal::new(false);
        let result = terminal.select("Choose:", vec![]);
        assert!(result.is_err());

        if let Err(e) = result {
            assert!(matches!(e, OutputError::InvalidInput(_)));
            assert_eq!(e.to_string(), "No options provided for selection");
        }
    }

    #[test]
    fn test_inquire_cancellation_maps_to_cancelled() {
        assert!(matches!(
            OutputError::from(InquireError::OperationCanceled),
            OutputError::Cancelled
        ));
        assert!(matches!(
            OutputError::from(InquireError::OperationInterrupted),
            OutputError::Cancelled
        ));
        assert!(matches!(
            OutputError::from(InquireError::NotTTY),
            OutputError::Unsupported(_)
        ));
    }

    #[test]
    fn test_quiet_spinner_is_hidden() {
        let spinner = Quiet.spinner("Working...");
        assert!(spinner.bar.is_none());
        spinner.finish_fail("failed");
    }

    #[test]
    fn test_terminal_spinner_finishes() {
        let terminal = Terminal::new(false);
        terminal.spinner("Working...").finish_clear();
        terminal.spinner("Working...").finish_fail("failed");
    }

    #[test]
    fn test_section_creates_indented_output() {
        let terminal = Terminal::new(false);
        assert_eq!(terminal.indent, 0);

        let section = terminal.section("api");
        section
            .item("ref", "main")
            .expect("section item succeeds");

        let nested = section.section("details");
        nested
            .message("Nested message")
            .expect("nested section message succeeds");
    }
}
