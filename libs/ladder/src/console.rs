//! Line-oriented console used by the driver
//!
//! `StdConsole` talks to the terminal. `ScriptedConsole` (feature `testing`)
//! replays canned answers and records everything printed.

use std::io::{self, BufRead, Write};

#[cfg(any(test, feature = "testing"))]
use std::collections::VecDeque;

pub trait Console {
    /// Show `prompt` and read one line; `None` at end of input
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Print one line of output
    fn print(&mut self, line: &str);
}

/// Console backed by stdin/stdout
pub struct StdConsole {
    stdin: io::Stdin,
    stdout: io::Stdout,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        {
            let mut out = self.stdout.lock();
            write!(out, "{}", prompt)?;
            out.flush()?;
        }

        let mut line = String::new();
        let read = self.stdin.lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn print(&mut self, line: &str) {
        println!("{}", line);
    }
}

/// Console that answers prompts from a fixed script
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    prompts: Vec<String>,
    output: Vec<String>,
}

#[cfg(any(test, feature = "testing"))]
impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            output: Vec::new(),
        }
    }

    /// Prompts shown so far, in order
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Whether any printed line contains `needle`
    pub fn printed(&self, needle: &str) -> bool {
        self.output.iter().any(|line| line.contains(needle))
    }

    pub fn remaining_answers(&self) -> usize {
        self.answers.len()
    }
}

#[cfg(any(test, feature = "testing"))]
impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }

    fn print(&mut self, line: &str) {
        self.output.push(line.to_string());
    }
}
