//! Interactive session over a line-oriented reader.
//!
//! One predictor lives for the whole session, so `history` shows every
//! echo recorded since the session started (or since the last `clear`).

use echo_chamber::samples::{rejection_cases, standard_cases};
use echo_chamber::{Renderer, SelfTest, SequenceInput, SequencePredictor};
use std::io::{BufRead, Write};
use tracing::debug;

const PROMPT: &str = "echo> ";

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Predict(String),
    Validate(String),
    History,
    Count,
    Clear,
    Samples,
    Check,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "predict" | "p" => Self::Predict(rest.to_string()),
            "validate" | "v" => Self::Validate(rest.to_string()),
            "history" | "memories" => Self::History,
            "count" => Self::Count,
            "clear" => Self::Clear,
            "samples" => Self::Samples,
            "check" | "test" => Self::Check,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ if starts_like_sequence(line) => Self::Predict(line.to_string()),
            _ => Self::Unknown(word.to_string()),
        }
    }
}

fn starts_like_sequence(line: &str) -> bool {
    line.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | '['))
}

pub struct Repl<'a> {
    predictor: SequencePredictor,
    renderer: &'a Renderer,
}

impl<'a> Repl<'a> {
    pub fn new(renderer: &'a Renderer) -> Self {
        Self {
            predictor: SequencePredictor::new(),
            renderer,
        }
    }

    /// Read commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> std::io::Result<()> {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        for line in input.lines() {
            let command = ReplCommand::parse(&line?);
            debug!(?command, "repl command");

            match self.execute(command) {
                Some(text) if text.is_empty() => {}
                Some(text) => writeln!(out, "{text}")?,
                None => {
                    writeln!(out, "Thank you for visiting the Echo Chamber of Numeria!")?;
                    return Ok(());
                }
            }
            write!(out, "{PROMPT}")?;
            out.flush()?;
        }

        writeln!(out)?;
        Ok(())
    }

    /// Run one command; `None` ends the session.
    pub fn execute(&mut self, command: ReplCommand) -> Option<String> {
        let text = match command {
            ReplCommand::Predict(text) => match SequenceInput::parse(&text) {
                Ok(input) => {
                    let result = input.predict(&mut self.predictor);
                    let mut rendered = self.renderer.prediction(&result);
                    if result.is_success() {
                        rendered.push_str("\n   This echo has been stored in memory.");
                    }
                    rendered
                }
                Err(e) => e.to_string(),
            },
            ReplCommand::Validate(text) => match SequenceInput::parse(&text) {
                Ok(input) => {
                    let result = input.validate(&self.predictor);
                    self.renderer
                        .validation(&input.values().unwrap_or_default(), &result)
                }
                Err(e) => e.to_string(),
            },
            ReplCommand::History => self.renderer.history(self.predictor.history()),
            ReplCommand::Count => self.renderer.count(self.predictor.count()),
            ReplCommand::Clear => self.renderer.cleared(self.predictor.clear()),
            ReplCommand::Samples => self
                .renderer
                .samples(&standard_cases(), &rejection_cases()),
            ReplCommand::Check => {
                // A scratch predictor keeps sample echoes out of the session history
                let mut scratch = SequencePredictor::new();
                self.renderer.self_test(&SelfTest::run(&mut scratch))
            }
            ReplCommand::Help => self.renderer.help(),
            ReplCommand::Quit => return None,
            ReplCommand::Empty => String::new(),
            ReplCommand::Unknown(word) => {
                format!("Unknown command '{word}'. Type 'help' for a list of commands.")
            }
        };
        Some(text)
    }

    #[cfg(test)]
    pub fn predictor(&self) -> &SequencePredictor {
        &self.predictor
    }
}
