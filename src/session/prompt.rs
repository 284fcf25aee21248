//! User prompts consumed by a session

use std::io::{BufRead, Write};
use tracing::{debug, error};

/// Answer to a yes/no/cancel question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
    Cancel,
}

impl Confirmation {
    /// Interpret a typed answer. Anything unrecognised counts as cancel.
    pub fn from_answer(answer: &str) -> Self {
        match answer.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Confirmation::Yes,
            "n" | "no" => Confirmation::No,
            _ => Confirmation::Cancel,
        }
    }
}

/// Questions and error reports directed at the user
pub trait Prompter {
    fn confirm(&mut self, message: &str) -> Confirmation;
    fn show_error(&mut self, title: &str, message: &str);
}

/// Gives the same answer to every question. Errors are only traced since
/// headless callers get them back as `Err` and report them once.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub Confirmation);

impl Prompter for FixedAnswer {
    fn confirm(&mut self, message: &str) -> Confirmation {
        debug!(question = message, answer = ?self.0, "answered automatically");
        self.0
    }

    fn show_error(&mut self, title: &str, message: &str) {
        debug!(title, "{}", message);
    }
}

/// Line based prompter for terminals
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Print `prompt` and read one line. `None` at end of input.
    pub fn prompt_line(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    /// Write a line of regular output
    pub fn say(&mut self, text: &str) -> std::io::Result<()> {
        writeln!(self.output, "{}", text)
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn confirm(&mut self, message: &str) -> Confirmation {
        if write!(self.output, "{} [y]es/[n]o/[c]ancel: ", message)
            .and_then(|_| self.output.flush())
            .is_err()
        {
            return Confirmation::Cancel;
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => Confirmation::Cancel,
            Ok(_) => Confirmation::from_answer(&line),
        }
    }

    fn show_error(&mut self, title: &str, message: &str) {
        error!(title, "{}", message);
        let _ = writeln!(self.output, "{}: {}", title, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_answers() {
        assert_eq!(Confirmation::from_answer("Y\n"), Confirmation::Yes);
        assert_eq!(Confirmation::from_answer(" no "), Confirmation::No);
        assert_eq!(Confirmation::from_answer("c"), Confirmation::Cancel);
        assert_eq!(Confirmation::from_answer("whatever"), Confirmation::Cancel);
    }

    #[test]
    fn test_terminal_prompter() {
        let input = Cursor::new(b"yes\nn\n".to_vec());
        let mut prompter = TerminalPrompter::new(input, Vec::new());

        assert_eq!(prompter.confirm("Clear?"), Confirmation::Yes);
        assert_eq!(prompter.confirm("Resize?"), Confirmation::No);
        assert_eq!(prompter.confirm("Again?"), Confirmation::Cancel);
        prompter.show_error("Invalid size", "bad input");

        let (_, output) = prompter.into_inner();
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Clear? [y]es/[n]o/[c]ancel: "));
        assert!(output.contains("Invalid size: bad input"));
    }

    #[test]
    fn test_prompt_line() {
        let input = Cursor::new(b"step 3\r\n".to_vec());
        let mut prompter = TerminalPrompter::new(input, Vec::new());
        assert_eq!(prompter.prompt_line("> ").unwrap(), Some("step 3".to_string()));
        assert_eq!(prompter.prompt_line("> ").unwrap(), None);
        prompter.say("bye").unwrap();

        let (_, output) = prompter.into_inner();
        assert_eq!(String::from_utf8(output).unwrap(), "> > bye\n");
    }

    #[test]
    fn test_fixed_answer() {
        let mut prompter = FixedAnswer(Confirmation::No);
        assert_eq!(prompter.confirm("anything"), Confirmation::No);
    }
}
