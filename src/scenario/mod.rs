//! Given/When/Then scenarios
//!
//! A context (`given`) holds events (`when`), which hold outcomes (`it`).
//! Each sentence takes at most one body and at most one like table:
//!
//! ```ignore
//! use bdd::{args, context, event, like, outcome_with, s, Feature};
//!
//! let mut feature = bdd::feature!();
//! feature.given("a calculator", args![context(|when| {
//!     when.when("two numbers are added", args![event(|it| {
//!         it.it("returns %[3]v for %[1]v + %[2]v", args![
//!             outcome_with(|a, args| {
//!                 a.equal(args.at::<i64>(0) + args.at::<i64>(1), args.at::<i64>(2));
//!             }),
//!             like![s![1, 1, 2], s![2, 3, 5]],
//!         ]);
//!     })]);
//! })]);
//! ```

pub mod args;
pub mod assert;
pub mod body;
pub mod expander;
pub mod feature;
pub mod reporter;
pub mod runner;
pub mod setup;
pub mod template;

pub use args::{like, Arg, Arguments, Table};
pub use assert::{Assert, Failure};
pub use body::{
    context, context_with, event, event_with, golden, outcome, outcome_with, ContextBody,
    EventBody, GoldenBody, OutcomeBody,
};
pub use expander::{classify, It, Shape, When};
pub use feature::{feature_title, file_stem, Feature};
pub use reporter::{ConsoleReporter, Recorder, Report, Reporter, SilentReporter};
pub use runner::{LeafState, Summary};
pub use setup::Setup;
