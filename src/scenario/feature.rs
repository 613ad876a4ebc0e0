//! Features: the entry point of a scenario run
//!
//! A [`Feature`] is created once per test function. It owns the reporter,
//! the header suppression state and the fixture store, so two test
//! functions never share any of them.

use tracing::warn;

use super::args::Arg;
use super::body::{ContextBody, GoldenBody};
use super::expander::{self, Session};
use super::reporter::{self, Reporter};
use super::runner::Summary;
use crate::common::{logging, Config, Result};
use crate::fixture::FixtureStore;

/// Prefixes removed from a test name before it becomes a feature title
const TEST_PREFIXES: [&str; 3] = ["test_", "Test_", "Test"];

/// One feature under test
pub struct Feature {
    title: String,
    stem: String,
    session: Session,
    store: FixtureStore,
    totals: Summary,
}

impl Feature {
    /// Feature named after a test function, e.g. `tests::test_sum_operation`
    ///
    /// Reads `bdd.toml` and the `BDD_*` variables; a broken configuration
    /// falls back to the defaults.
    pub fn new(test_name: &str) -> Self {
        logging::init_test();
        let config = Config::load().unwrap_or_else(|e| {
            warn!(error = %e, "using default configuration");
            Config::default()
        });
        Self::with_config(test_name, &config)
    }

    /// Feature with an explicit configuration
    pub fn with_config(test_name: &str, config: &Config) -> Self {
        let title = feature_title(test_name);
        let stem = file_stem(&title);
        Self {
            title,
            stem,
            session: Session::new(reporter::from_config(config)),
            store: FixtureStore::from_config(config),
            totals: Summary::default(),
        }
    }

    /// Replace the reporter
    pub fn with_reporter(mut self, reporter: impl Reporter + 'static) -> Self {
        self.session.set_reporter(Box::new(reporter));
        self
    }

    /// Replace the fixture store
    pub fn with_store(mut self, store: FixtureStore) -> Self {
        self.store = store;
        self
    }

    /// Human title, e.g. `Sum operation`
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Fixture file stem, e.g. `SumOperation`
    pub fn file_stem(&self) -> &str {
        &self.stem
    }

    pub fn store(&self) -> &FixtureStore {
        &self.store
    }

    /// Counts over every call made on this feature so far
    pub fn summary(&self) -> Summary {
        self.totals
    }

    /// Run a context and everything declared inside it
    ///
    /// The first authoring or data error stops the run and is returned.
    /// Failed outcomes are not errors; they are counted in the summary.
    pub fn try_given(&mut self, title: &str, args: Vec<Arg<ContextBody<'_>>>) -> Result<Summary> {
        self.session.begin(&self.title, false);
        expander::given(&mut self.session, title, args);
        self.finish()
    }

    /// Run a context, panicking on an authoring or data error and when any
    /// outcome failed
    #[track_caller]
    pub fn given(&mut self, title: &str, args: Vec<Arg<ContextBody<'_>>>) -> Summary {
        let run = self.try_given(title, args);
        expect_success(title, run)
    }

    /// Run a context once per fixture record stored under `context`
    ///
    /// In update mode the fixture file is written back afterwards.
    pub fn try_golden(&mut self, context: &str, args: Vec<Arg<GoldenBody<'_>>>) -> Result<Summary> {
        self.session.begin(&self.title, self.store.is_updating());

        match self.store.open(&self.stem, context) {
            Ok(records) => expander::golden(&mut self.session, context, records, args),
            Err(e) => self.session.abort(e),
        }

        if !self.session.aborted() {
            if let Err(e) = self.store.flush() {
                self.session.abort(e);
            }
        }
        self.finish()
    }

    /// Golden counterpart of [`Feature::given`]
    #[track_caller]
    pub fn golden(&mut self, context: &str, args: Vec<Arg<GoldenBody<'_>>>) -> Summary {
        let run = self.try_golden(context, args);
        expect_success(context, run)
    }

    fn finish(&mut self) -> Result<Summary> {
        let summary = self.session.end()?;
        self.totals.merge(summary);
        Ok(summary)
    }
}

#[track_caller]
fn expect_success(context: &str, run: Result<Summary>) -> Summary {
    match run {
        Ok(summary) if summary.is_success() => summary,
        Ok(summary) => panic!(
            "{} of {} outcome(s) failed in \"{}\"",
            summary.failed,
            summary.total(),
            context
        ),
        Err(e) => panic!("{e}"),
    }
}

/// Human feature title from a test function name
///
/// `tests::test_sum_operation` and `Test_Sum_Operation` both give
/// `Sum operation`-style titles: path and one test prefix removed,
/// underscores turned into spaces, first letter upper-cased.
pub fn feature_title(test_name: &str) -> String {
    let name = test_name.rsplit("::").next().unwrap_or(test_name);
    let name = TEST_PREFIXES
        .iter()
        .find_map(|prefix| name.strip_prefix(prefix))
        .unwrap_or(name);
    let words = name
        .split('_')
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    upper_first(&words)
}

/// Compact file stem from a feature title: words title-cased, spaces removed
pub fn file_stem(title: &str) -> String {
    title.split_whitespace().map(upper_first).collect()
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Create a [`Feature`] named after the enclosing function
#[macro_export]
macro_rules! feature {
    () => {{
        fn here() {}
        fn name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = name_of(here);
        $crate::Feature::new(name.strip_suffix("::here").unwrap_or(name))
    }};
}
