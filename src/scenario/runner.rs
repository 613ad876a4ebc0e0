//! Leaf execution
//!
//! An outcome leaf is either implemented or not. Implemented leaves run
//! with a fresh [`Assert`] and are reported exactly once, after the body
//! returns.

use tracing::trace;

use super::args::Arguments;
use super::assert::Assert;
use super::body::OutcomeBody;
use super::expander::Session;

/// State of one outcome leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafState {
    Implemented,
    NotImplemented,
}

/// Outcome counts of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub not_implemented: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.not_implemented
    }

    /// No outcome failed
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    pub(crate) fn merge(&mut self, other: Summary) {
        self.passed += other.passed;
        self.failed += other.failed;
        self.not_implemented += other.not_implemented;
    }
}

impl Session {
    /// Run one leaf and report it
    ///
    /// While golden records are being rewritten the leaf is not checked and
    /// counts as not implemented.
    pub(super) fn run_leaf(
        &mut self,
        title: &str,
        body: Option<&mut OutcomeBody<'_>>,
        args: &Arguments,
    ) -> LeafState {
        let body = body.filter(|_| !self.updating);
        let Some(body) = body else {
            trace!(title, "outcome not implemented");
            self.summary.not_implemented += 1;
            self.reporter().not_implemented(title);
            return LeafState::NotImplemented;
        };

        let mut assert = Assert::new();
        body.call(&mut assert, args);

        let failures = assert.into_failures();
        if failures.is_empty() {
            trace!(title, "outcome passed");
            self.summary.passed += 1;
            self.reporter().passed(title);
        } else {
            trace!(title, failures = failures.len(), "outcome failed");
            self.summary.failed += 1;
            self.reporter().failed(title, &failures);
        }
        LeafState::Implemented
    }
}
