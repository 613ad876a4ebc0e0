//! Scenario reporters
//!
//! The expander decides what to report and suppresses repeated headers;
//! a reporter only renders what it is given.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use colored::{ColoredString, Colorize};

use super::assert::Failure;
use crate::common::config::{Config, OutputMode};

/// Receiver of scenario events
pub trait Reporter {
    fn feature(&mut self, title: &str);
    fn context(&mut self, title: &str);
    fn event(&mut self, title: &str);
    fn passed(&mut self, title: &str);
    fn failed(&mut self, title: &str, failures: &[Failure]);
    fn not_implemented(&mut self, title: &str);

    /// Called once at the end of every top-level context sentence
    fn finish_context(&mut self) {}
}

/// Pick the reporter the configuration asks for
pub fn from_config(config: &Config) -> Box<dyn Reporter> {
    match config.output.mode {
        OutputMode::Stdout => Box::new(ConsoleReporter::new(config.output.color)),
        OutputMode::Silent => Box::new(SilentReporter),
    }
}

/// Colored Feature / Given / When / It layout on stdout
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    color: bool,
}

impl ConsoleReporter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: String, style: fn(String) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text
        }
    }

    fn print_failure(&self, failure: &Failure) {
        for line in failure.message.lines() {
            println!("{}", self.paint(format!("        {}", line), |s| s.red()));
        }

        let file = failure.location.file();
        let number = failure.location.line() as usize;
        let name = Path::new(file)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.to_string());
        println!("{}", self.paint(format!("        in {}:{}", name, number), |s| s.dimmed()));

        // The source is only readable when tests run from the package root
        if let Some(lines) = source_lines(file, number) {
            println!("{}", self.paint("        ---------".to_string(), |s| s.dimmed()));
            for (n, text) in lines {
                let line = format!("        {}. {}", n, text);
                if n == number {
                    println!("{}", self.paint(line, |s| s.white().bold()));
                } else {
                    println!("{}", self.paint(line, |s| s.dimmed()));
                }
            }
        }
        println!();
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Reporter for ConsoleReporter {
    fn feature(&mut self, title: &str) {
        println!("{}", self.paint(format!("Feature: {}", title), |s| s.white()));
    }

    fn context(&mut self, title: &str) {
        let title = title.replace('\n', "\n  ");
        println!("{}", self.paint(format!("  Given {}", title), |s| s.dimmed()));
    }

    fn event(&mut self, title: &str) {
        println!("{}", self.paint(format!("    When {}", title), |s| s.bright_green()));
    }

    fn passed(&mut self, title: &str) {
        println!("{}", self.paint(format!("    » It {}", title), |s| s.green()));
    }

    fn failed(&mut self, title: &str, failures: &[Failure]) {
        println!(
            "{}",
            self.paint(format!("    » It {}", title), |s| s.white().bold().on_red())
        );
        for failure in failures {
            self.print_failure(failure);
        }
    }

    fn not_implemented(&mut self, title: &str) {
        println!(
            "{}",
            self.paint(format!("    » It {} «-- NOT IMPLEMENTED", title), |s| {
                s.bright_yellow()
            })
        );
    }

    fn finish_context(&mut self) {
        println!();
    }
}

/// The line before, at and after `number` (1-based), with their numbers
fn source_lines(file: &str, number: usize) -> Option<Vec<(usize, String)>> {
    let content = std::fs::read_to_string(file).ok()?;
    let first = number.saturating_sub(1).max(1);
    let lines = content
        .lines()
        .enumerate()
        .map(|(i, text)| (i + 1, text.replace('\t', "  ")))
        .skip(first - 1)
        .take(number + 2 - first)
        .collect::<Vec<_>>();
    (!lines.is_empty()).then_some(lines)
}

/// Reporter that prints nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn feature(&mut self, _title: &str) {}
    fn context(&mut self, _title: &str) {}
    fn event(&mut self, _title: &str) {}
    fn passed(&mut self, _title: &str) {}
    fn failed(&mut self, _title: &str, _failures: &[Failure]) {}
    fn not_implemented(&mut self, _title: &str) {}
}

/// One event received by a [`Recorder`]
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Feature(String),
    Context(String),
    Event(String),
    Passed(String),
    Failed { title: String, messages: Vec<String> },
    NotImplemented(String),
}

/// Reporter keeping every event for later inspection
///
/// Clones share the same log, so a test can keep one clone and hand the
/// other to a feature.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    reports: Rc<RefCell<Vec<Report>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every event received so far, in order
    pub fn reports(&self) -> Vec<Report> {
        self.reports.borrow().clone()
    }

    /// Titles of the outcome events (passed, failed, not implemented)
    pub fn outcomes(&self) -> Vec<String> {
        self.reports
            .borrow()
            .iter()
            .filter_map(|r| match r {
                Report::Passed(t) | Report::NotImplemented(t) => Some(t.clone()),
                Report::Failed { title, .. } => Some(title.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.reports.borrow_mut().clear();
    }

    fn push(&self, report: Report) {
        self.reports.borrow_mut().push(report);
    }
}

impl Reporter for Recorder {
    fn feature(&mut self, title: &str) {
        self.push(Report::Feature(title.to_string()));
    }

    fn context(&mut self, title: &str) {
        self.push(Report::Context(title.to_string()));
    }

    fn event(&mut self, title: &str) {
        self.push(Report::Event(title.to_string()));
    }

    fn passed(&mut self, title: &str) {
        self.push(Report::Passed(title.to_string()));
    }

    fn failed(&mut self, title: &str, failures: &[Failure]) {
        self.push(Report::Failed {
            title: title.to_string(),
            messages: failures.iter().map(|f| f.message.clone()).collect(),
        });
    }

    fn not_implemented(&mut self, title: &str) {
        self.push(Report::NotImplemented(title.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_recorder_clones_share_log() {
        let recorder = Recorder::new();
        let mut handle = recorder.clone();
        handle.feature("Sum");
        handle.passed("adds");
        handle.not_implemented("subtracts");
        assert_eq!(
            recorder.reports(),
            vec![
                Report::Feature("Sum".into()),
                Report::Passed("adds".into()),
                Report::NotImplemented("subtracts".into()),
            ]
        );
        assert_eq!(recorder.outcomes(), vec!["adds", "subtracts"]);
        recorder.clear();
        assert!(recorder.reports().is_empty());
    }

    #[test]
    fn test_source_lines_window() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("src.rs");
        std::fs::write(&file, "one\n\ttwo\nthree\nfour\n").unwrap();
        let lines = source_lines(file.to_str().unwrap(), 2).unwrap();
        assert_eq!(
            lines,
            vec![
                (1, "one".to_string()),
                (2, "  two".to_string()),
                (3, "three".to_string())
            ]
        );
        let first = source_lines(file.to_str().unwrap(), 1).unwrap();
        assert_eq!(first[0].0, 1);
        assert_eq!(first.len(), 2);
        assert!(source_lines("/does/not/exist.rs", 3).is_none());
    }

    #[test]
    fn test_console_paint_respects_color_flag() {
        let plain = ConsoleReporter::new(false);
        assert_eq!(plain.paint("x".to_string(), |s| s.red()), "x");
    }
}
