use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::Session;

/// Settings of the interactive prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplConfig {
    /// Prompt shown before a new statement.
    pub prompt:              String,
    /// Prompt shown while a block is being continued.
    pub continuation_prompt: String,
    /// Printed once at start-up, if set.
    pub banner:              Option<String>,
    /// Inputs that end the session.
    pub exit_commands:       Vec<String>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self { prompt:              ">>> ".to_string(),
               continuation_prompt: "... ".to_string(),
               banner:              Some(format!("pyrite {} (type 'exit' to quit)",
                                                 env!("CARGO_PKG_VERSION"))),
               exit_commands:       ["exit", "quit", "q", "Q"].map(String::from).to_vec(), }
    }
}

impl ReplConfig {
    /// Returns `true` if `input` (ignoring surrounding whitespace) is one of
    /// the exit commands.
    #[must_use]
    pub fn is_exit_command(&self, input: &str) -> bool {
        let input = input.trim();
        self.exit_commands.iter().any(|command| command == input)
    }
}

/// What a [`LineBuffer`] needs after receiving a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineStatus {
    /// Keep reading: a block is open, or the line was blank.
    NeedMore,
    /// A complete statement or block, ready to run.
    Complete(String),
}

/// Assembles input lines into complete source blocks.
///
/// A line ending in `:` opens a block. Every following line is appended until
/// the first blank line, which completes the block. Any other line is complete
/// on its own, and blank lines outside a block are ignored.
///
/// # Example
/// ```
/// use pyrite::repl::{LineBuffer, LineStatus};
///
/// let mut buffer = LineBuffer::new();
///
/// assert_eq!(buffer.push("x = 1"), LineStatus::Complete("x = 1".to_string()));
/// assert_eq!(buffer.push("if x:"), LineStatus::NeedMore);
/// assert_eq!(buffer.push("    y = 2"), LineStatus::NeedMore);
/// assert_eq!(buffer.push(""), LineStatus::Complete("if x:\n    y = 2\n".to_string()));
/// ```
#[derive(Debug, Default)]
pub struct LineBuffer {
    block: Option<String>,
}

impl LineBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a block is open.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.block.is_some()
    }

    /// Feeds one input line, without its line terminator.
    pub fn push(&mut self, line: &str) -> LineStatus {
        let blank = line.trim().is_empty();

        if let Some(block) = self.block.as_mut() {
            if !blank {
                block.push_str(line);
                block.push('\n');
                return LineStatus::NeedMore;
            }
            return self.block
                       .take()
                       .map_or(LineStatus::NeedMore, LineStatus::Complete);
        }

        if blank {
            LineStatus::NeedMore
        } else if opens_block(line) {
            self.block = Some(format!("{line}\n"));
            LineStatus::NeedMore
        } else {
            LineStatus::Complete(line.to_string())
        }
    }

    /// Returns whatever block is still open, e.g. when input ends without a
    /// closing blank line.
    pub fn finish(&mut self) -> Option<String> {
        self.block.take()
    }
}

/// Returns `true` if the line ends in `:`, ignoring a trailing comment.
fn opens_block(line: &str) -> bool {
    let mut quote = None;
    let mut code_end = line.len();

    for (index, c) in line.char_indices() {
        match (quote, c) {
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {},
            (None, '"' | '\'') => quote = Some(c),
            (None, '#') => {
                code_end = index;
                break;
            },
            (None, _) => {},
        }
    }

    line[..code_end].trim_end().ends_with(':')
}

/// The interactive loop: prompt, read, run, print.
///
/// Results are echoed following [`Evaluation::echo`](crate::Evaluation::echo)
/// and errors are printed as their message; neither ends the loop. The loop
/// ends at an exit command or at the end of input.
///
/// # Example
/// ```
/// use pyrite::repl::{Repl, ReplConfig};
///
/// let input = b"x = 6\nx * 7\nquit\nx\n";
/// let config = ReplConfig { banner: None,
///                           ..ReplConfig::default() };
///
/// let mut repl = Repl::new(config, &input[..], Vec::new());
/// repl.run().unwrap();
///
/// let output = String::from_utf8(repl.into_output()).unwrap();
/// assert_eq!(output, ">>> >>> 42\n>>> ");
/// ```
pub struct Repl<R, W> {
    config:  ReplConfig,
    session: Session,
    input:   R,
    output:  W,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    /// Creates a REPL reading from `input` and writing to `output`.
    pub fn new(config: ReplConfig, input: R, output: W) -> Self {
        Self { config,
               session: Session::new(),
               input,
               output }
    }

    /// Runs until an exit command or the end of input.
    ///
    /// # Errors
    /// Only I/O errors on the input or output stream. Interpreter errors are
    /// printed and the loop continues.
    pub fn run(&mut self) -> io::Result<()> {
        if let Some(banner) = &self.config.banner {
            writeln!(self.output, "{banner}")?;
        }

        let mut buffer = LineBuffer::new();
        let mut line = String::new();

        loop {
            let prompt = if buffer.is_pending() {
                &self.config.continuation_prompt
            } else {
                &self.config.prompt
            };
            write!(self.output, "{prompt}")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                if let Some(source) = buffer.finish() {
                    self.execute(&source)?;
                }
                debug!("end of input");
                break;
            }

            let text = line.trim_end_matches(['\n', '\r']);
            if !buffer.is_pending() && self.config.is_exit_command(text) {
                break;
            }

            if let LineStatus::Complete(source) = buffer.push(text) {
                self.execute(&source)?;
            }
        }

        Ok(())
    }

    /// Consumes the REPL and returns its output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    fn execute(&mut self, source: &str) -> io::Result<()> {
        match self.session.run(source) {
            Ok(results) => {
                for text in results.iter().filter_map(crate::Evaluation::echo) {
                    writeln!(self.output, "{text}")?;
                }
            },
            Err(e) => writeln!(self.output, "{e}")?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript(input: &str) -> String {
        let config = ReplConfig { banner: None,
                                  ..ReplConfig::default() };
        let mut repl = Repl::new(config, input.as_bytes(), Vec::new());
        repl.run().unwrap();
        String::from_utf8(repl.into_output()).unwrap()
    }

    #[test]
    fn blocks_continue_until_a_blank_line() {
        let output = transcript("n = 0\nwhile n < 3:\n    n += 1\n\nn\n");

        assert_eq!(output, ">>> >>> ... ... >>> 3\n>>> ");
    }

    #[test]
    fn errors_do_not_end_the_session() {
        let output = transcript("1 / 0\n2\n");

        assert_eq!(output,
                   ">>> Error on line 1: Division by zero.\n>>> 2\n>>> ");
    }

    #[test]
    fn open_block_runs_at_end_of_input() {
        let output = transcript("if True:\n    x = 'yes'\n");

        assert_eq!(output, ">>> ... ... ");
    }

    #[test]
    fn exit_commands_are_matched_exactly() {
        let config = ReplConfig::default();

        assert!(config.is_exit_command("quit"));
        assert!(config.is_exit_command("  Q "));
        assert!(!config.is_exit_command("exit()"));
    }

    #[test]
    fn trailing_comments_do_not_hide_a_colon() {
        assert!(opens_block("if x:  # start"));
        assert!(opens_block("while '#' == '#':"));
        assert!(!opens_block("x = ':'"));
    }
}
