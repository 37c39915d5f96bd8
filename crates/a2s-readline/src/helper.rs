//! rustyline helper: slash-command completion, hints and highlighting.

use std::borrow::Cow::{self, Borrowed, Owned};

use a2s_core::Screen;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

pub const COMMANDS: &[&str] = &[
    "/go", "/update", "/status", "/gates", "/catalog", "/experts", "/vendors", "/layout", "/place", "/move", "/rotate",
    "/remove", "/upload", "/pay", "/chat", "/tasks", "/cancel", "/help",
];

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
pub struct CliHelper {
    commands: Vec<String>,
    screens: Vec<String>,
}

impl CliHelper {
    pub fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
            screens: Screen::all().map(|s| s.to_string()).collect(),
        }
    }

    fn candidates(&self, line: &str) -> (usize, Vec<&String>) {
        // Screen names after "/go "
        if let Some(rest) = line.strip_prefix("/go ") {
            if !rest.contains(' ') {
                let start = line.len() - rest.len();
                let hits = self.screens.iter().filter(|s| s.starts_with(rest)).collect();
                return (start, hits);
            }
            return (0, Vec::new());
        }

        if line.starts_with('/') && !line.contains(' ') {
            (0, self.commands.iter().filter(|cmd| cmd.starts_with(line)).collect())
        } else {
            (0, Vec::new())
        }
    }
}

impl Default for CliHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, hits) = self.candidates(&line[..pos]);
        let pairs = hits
            .into_iter()
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        let (start, hits) = self.candidates(line);
        let typed = &line[start..];

        hits.into_iter()
            .find(|cmd| cmd.len() > typed.len())
            .map(|cmd| cmd[typed.len()..].to_string())
    }
}

impl Validator for CliHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_candidates() {
        let helper = CliHelper::new();
        let (start, hits) = helper.candidates("/ca");
        assert_eq!(start, 0);
        assert_eq!(hits, vec!["/catalog", "/cancel"]);
    }

    #[test]
    fn test_screen_candidates_after_go() {
        let helper = CliHelper::new();
        let (start, hits) = helper.candidates("/go ch");
        assert_eq!(start, 4);
        assert_eq!(hits, vec!["checkout"]);
    }

    #[test]
    fn test_plain_text_has_no_candidates() {
        let helper = CliHelper::new();
        assert!(helper.candidates("hello").1.is_empty());
    }
}
