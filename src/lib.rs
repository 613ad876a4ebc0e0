//! bdd - Given/When/Then specifications for Rust tests
//!
//! Scenarios are written as nested context / event / outcome sentences.
//! Any level can be multiplied over a like table of argument sets, and a
//! golden context runs once per record of a fixture file that update mode
//! can rewrite.

pub mod cli;
pub mod commands;
pub mod common;
pub mod fixture;
pub mod scenario;

// Re-export the authoring surface
pub use common::{Config, Error, Result};
pub use fixture::{FixtureStore, Gold};
pub use scenario::{
    context, context_with, event, event_with, golden, like, outcome, outcome_with, Arg, Arguments,
    Assert, ContextBody, EventBody, Feature, GoldenBody, It, OutcomeBody, Recorder, Report,
    Reporter, Setup, Summary, Table, When,
};
