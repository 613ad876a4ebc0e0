//! Scenario expansion
//!
//! Every sentence gets the parent's argument set plus the arguments the
//! author passed to it. Those arguments are classified into a [`Shape`],
//! which decides whether the level has a body and which table drives it.
//! The walk is depth-first and keeps table order.

use tracing::{debug, trace};

use super::args::{Arg, Arguments, Table, NO_ARGUMENTS};
use super::body::{ContextBody, EventBody, GoldenBody, OutcomeBody};
use super::reporter::Reporter;
use super::runner::Summary;
use super::template;
use crate::common::{Error, Result};
use crate::fixture::Gold;

/// Classified arguments of one sentence
#[derive(Debug)]
pub enum Shape<B> {
    /// No arguments: declared, not implemented, runs the parent set once
    Declared,
    /// Only a table: not implemented, runs once per entry
    Table(Table),
    /// Only a body: runs the parent set once
    Body(B),
    /// A body followed by a table: runs once per entry
    BodyWithTable(B, Table),
}

impl<B> Shape<B> {
    /// Body and the table that drives the level
    ///
    /// Without a table the level runs once with its parent's set.
    pub fn into_parts(self, parent: &Arguments) -> (Option<B>, Table) {
        match self {
            Shape::Declared => (None, Table::single(parent.clone())),
            Shape::Table(table) => (None, table),
            Shape::Body(body) => (Some(body), Table::single(parent.clone())),
            Shape::BodyWithTable(body, table) => (Some(body), table),
        }
    }
}

/// Classify the arguments of a sentence
///
/// A table anywhere but last is [`Error::TableNotLast`]; a second body or
/// a third argument is [`Error::MultipleBodies`].
pub fn classify<B>(args: Vec<Arg<B>>) -> Result<Shape<B>> {
    let mut args = args.into_iter();
    match (args.next(), args.next(), args.next()) {
        (None, _, _) => Ok(Shape::Declared),
        (Some(Arg::Table(table)), None, _) => Ok(Shape::Table(table)),
        (Some(Arg::Body(body)), None, _) => Ok(Shape::Body(body)),
        (Some(Arg::Table(_)), Some(_), _) => Err(Error::TableNotLast),
        (Some(Arg::Body(body)), Some(Arg::Table(table)), None) => {
            Ok(Shape::BodyWithTable(body, table))
        }
        _ => Err(Error::MultipleBodies),
    }
}

/// Mutable state of one feature's run
///
/// Holds the reporter, the "last reported" headers used to suppress
/// repeats, and the first error raised during the current top-level call.
pub(crate) struct Session {
    reporter: Box<dyn Reporter>,
    last_feature: Option<String>,
    last_context: Option<String>,
    last_event: Option<String>,
    pub(super) summary: Summary,
    error: Option<Error>,
    /// Golden records are being rewritten; outcomes are not checked
    pub(super) updating: bool,
}

impl Session {
    pub(crate) fn new(reporter: Box<dyn Reporter>) -> Self {
        Self {
            reporter,
            last_feature: None,
            last_context: None,
            last_event: None,
            summary: Summary::default(),
            error: None,
            updating: false,
        }
    }

    pub(crate) fn set_reporter(&mut self, reporter: Box<dyn Reporter>) {
        self.reporter = reporter;
    }

    pub(super) fn reporter(&mut self) -> &mut dyn Reporter {
        self.reporter.as_mut()
    }

    /// Start a top-level call
    ///
    /// The context and event headers are forgotten; the feature header is
    /// reported once per session.
    pub(crate) fn begin(&mut self, feature: &str, updating: bool) {
        self.last_context = None;
        self.last_event = None;
        self.summary = Summary::default();
        self.error = None;
        self.updating = updating;

        if self.last_feature.as_deref() != Some(feature) {
            self.reporter.feature(feature);
            self.last_feature = Some(feature.to_string());
        }
    }

    /// Finish a top-level call, handing back its outcome
    pub(crate) fn end(&mut self) -> Result<Summary> {
        self.reporter.finish_context();
        self.updating = false;
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(self.summary),
        }
    }

    /// Enter a context pass; the event header is forgotten either way
    fn context(&mut self, title: &str) {
        if self.last_context.as_deref() != Some(title) {
            self.reporter.context(title);
            self.last_context = Some(title.to_string());
        }
        self.last_event = None;
    }

    fn event(&mut self, title: &str) {
        if self.last_event.as_deref() != Some(title) {
            self.reporter.event(title);
            self.last_event = Some(title.to_string());
        }
    }

    /// Record the first error of the call; later sentences become no-ops
    pub(crate) fn abort(&mut self, error: Error) {
        debug!(error = %error, "scenario run aborted");
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    pub(crate) fn aborted(&self) -> bool {
        self.error.is_some()
    }

    /// Render a title, aborting the run when it cannot be rendered
    fn title(&mut self, template: &str, source: Source<'_>) -> Option<String> {
        match template::render_title(template, source.args, source.gold) {
            Ok(title) => Some(title),
            Err(e) => {
                self.abort(e);
                None
            }
        }
    }

    /// Classify sentence arguments, aborting the run on an authoring error
    fn parts<B>(&mut self, args: Vec<Arg<B>>, parent: &Arguments) -> Option<(Option<B>, Table)> {
        match classify(args) {
            Ok(shape) => Some(shape.into_parts(parent)),
            Err(e) => {
                self.abort(e);
                None
            }
        }
    }
}

/// What a level can read: the current argument set and, in golden runs,
/// the fixture record
#[derive(Clone, Copy)]
struct Source<'s> {
    args: &'s Arguments,
    gold: Option<&'s Gold>,
}

/// Handle given to context bodies, used to declare events
pub struct When<'s> {
    session: &'s mut Session,
    source: Source<'s>,
}

impl<'s> When<'s> {
    /// Argument set of the enclosing context pass
    pub fn args(&self) -> &'s Arguments {
        self.source.args
    }

    /// Fixture record of the enclosing golden pass
    pub fn gold(&self) -> Option<&'s Gold> {
        self.source.gold
    }

    /// Declare an event
    ///
    /// `args` takes at most one [`EventBody`] followed by at most one like
    /// table, built with [`args!`](crate::args).
    pub fn when(&mut self, title: &str, args: Vec<Arg<EventBody<'_>>>) {
        if self.session.aborted() {
            return;
        }
        let Some((mut body, table)) = self.session.parts(args, self.source.args) else {
            return;
        };

        for set in &table {
            let source = Source {
                args: set,
                gold: self.source.gold,
            };
            let Some(rendered) = self.session.title(title, source) else {
                return;
            };
            self.session.event(&rendered);

            if let Some(body) = body.as_mut() {
                let mut it = It {
                    session: &mut *self.session,
                    source,
                };
                body.call(&mut it, set);
            }
            if self.session.aborted() {
                return;
            }
        }
    }
}

/// Handle given to event bodies, used to declare outcomes
pub struct It<'s> {
    session: &'s mut Session,
    source: Source<'s>,
}

impl<'s> It<'s> {
    /// Argument set of the enclosing event pass
    pub fn args(&self) -> &'s Arguments {
        self.source.args
    }

    /// Fixture record of the enclosing golden pass
    pub fn gold(&self) -> Option<&'s Gold> {
        self.source.gold
    }

    /// Declare an outcome; each resolved set is run as one leaf
    ///
    /// Without an [`OutcomeBody`] every leaf is reported as not
    /// implemented.
    pub fn it(&mut self, title: &str, args: Vec<Arg<OutcomeBody<'_>>>) {
        if self.session.aborted() {
            return;
        }
        let Some((mut body, table)) = self.session.parts(args, self.source.args) else {
            return;
        };

        for set in &table {
            let source = Source {
                args: set,
                gold: self.source.gold,
            };
            let Some(rendered) = self.session.title(title, source) else {
                return;
            };
            self.session.run_leaf(&rendered, body.as_mut(), set);
        }
    }
}

/// Expand a top-level context over its table
pub(crate) fn given(session: &mut Session, title: &str, args: Vec<Arg<ContextBody<'_>>>) {
    let Some((mut body, table)) = session.parts(args, &NO_ARGUMENTS) else {
        return;
    };
    trace!(title, passes = table.len(), "expanding context");

    for set in &table {
        let source = Source {
            args: set,
            gold: None,
        };
        let Some(rendered) = session.title(title, source) else {
            return;
        };
        session.context(&rendered);

        if let Some(body) = body.as_mut() {
            let mut when = When {
                session: &mut *session,
                source,
            };
            body.call(&mut when, set);
        }
        if session.aborted() {
            return;
        }
    }
}

/// Expand a golden context once per fixture record
///
/// `records` is `None` when the fixture file has no entry for the context:
/// the header is reported and nothing runs.
pub(crate) fn golden(
    session: &mut Session,
    title: &str,
    records: Option<&[Gold]>,
    args: Vec<Arg<GoldenBody<'_>>>,
) {
    let mut body = match classify(args) {
        Ok(Shape::Declared) => None,
        Ok(Shape::Body(body)) => Some(body),
        Ok(Shape::Table(_) | Shape::BodyWithTable(..)) => {
            session.abort(Error::TableInGoldenContext);
            return;
        }
        Err(e) => {
            session.abort(e);
            return;
        }
    };

    let records = records.unwrap_or_default();
    if records.is_empty() {
        debug!(context = title, "no fixture records for context");
        session.context(title);
        return;
    }
    trace!(title, records = records.len(), "expanding golden context");

    for gold in records {
        let source = Source {
            args: &NO_ARGUMENTS,
            gold: Some(gold),
        };
        let Some(rendered) = session.title(title, source) else {
            return;
        };
        session.context(&rendered);

        if let Some(body) = body.as_mut() {
            let mut when = When {
                session: &mut *session,
                source,
            };
            body.call(&mut when, gold);
        }
        if session.aborted() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::body::outcome;
    use crate::scenario::reporter::{Recorder, Report};
    use crate::{args, like, s};

    fn shape_name<B>(shape: &Shape<B>) -> &'static str {
        match shape {
            Shape::Declared => "declared",
            Shape::Table(_) => "table",
            Shape::Body(_) => "body",
            Shape::BodyWithTable(..) => "body+table",
        }
    }

    #[test]
    fn test_classify_shapes() {
        let empty: Vec<Arg<OutcomeBody<'_>>> = args![];
        assert_eq!(shape_name(&classify(empty).unwrap()), "declared");

        let table: Vec<Arg<OutcomeBody<'_>>> = args![like![s![1]]];
        assert_eq!(shape_name(&classify(table).unwrap()), "table");

        let body: Vec<Arg<OutcomeBody<'_>>> = args![outcome(|_| {})];
        assert_eq!(shape_name(&classify(body).unwrap()), "body");

        let both: Vec<Arg<OutcomeBody<'_>>> = args![outcome(|_| {}), like![s![1]]];
        assert_eq!(shape_name(&classify(both).unwrap()), "body+table");
    }

    #[test]
    fn test_classify_errors() {
        let table_first: Vec<Arg<OutcomeBody<'_>>> = args![like![s![1]], outcome(|_| {})];
        assert!(matches!(classify(table_first), Err(Error::TableNotLast)));

        let two_tables: Vec<Arg<OutcomeBody<'_>>> = args![like![s![1]], like![s![2]]];
        assert!(matches!(classify(two_tables), Err(Error::TableNotLast)));

        let two_bodies: Vec<Arg<OutcomeBody<'_>>> = args![outcome(|_| {}), outcome(|_| {})];
        assert!(matches!(classify(two_bodies), Err(Error::MultipleBodies)));

        let three: Vec<Arg<OutcomeBody<'_>>> =
            args![outcome(|_| {}), like![s![1]], like![s![2]]];
        assert!(matches!(classify(three), Err(Error::MultipleBodies)));
    }

    #[test]
    fn test_default_table_is_parent_set() {
        let parent = s![7, "x"];
        let (body, table) = Shape::<()>::Declared.into_parts(&parent);
        assert!(body.is_none());
        assert_eq!(table, Table::single(parent.clone()));

        let (body, table) = Shape::Body(()).into_parts(&parent);
        assert!(body.is_some());
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![&parent]);
    }

    #[test]
    fn test_session_suppresses_repeated_headers() {
        let recorder = Recorder::new();
        let mut session = Session::new(Box::new(recorder.clone()));
        session.begin("Sum", false);
        session.context("a");
        session.event("e");
        session.event("e");
        session.context("a");
        session.event("e");
        session.begin("Sum", false);
        session.context("a");
        assert!(session.end().is_ok());

        assert_eq!(
            recorder.reports(),
            vec![
                Report::Feature("Sum".into()),
                Report::Context("a".into()),
                Report::Event("e".into()),
                Report::Event("e".into()),
                Report::Context("a".into()),
            ]
        );
    }

    #[test]
    fn test_first_error_wins() {
        let mut session = Session::new(Box::new(Recorder::new()));
        session.begin("F", false);
        session.abort(Error::MultipleBodies);
        session.abort(Error::TableNotLast);
        assert!(session.aborted());
        assert!(matches!(session.end(), Err(Error::MultipleBodies)));
        assert!(!session.aborted());
    }
}
