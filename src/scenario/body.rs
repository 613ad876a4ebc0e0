//! Sentence bodies
//!
//! Each nesting level takes a body in one of two shapes: a plain closure
//! over the level's handle, or one that also receives the current
//! argument set. The shape is picked where the body is built.

use super::args::{Arg, Arguments};
use super::assert::Assert;
use super::expander::{It, When};
use crate::fixture::Gold;

/// Body of a context (`given`) sentence
pub enum ContextBody<'a> {
    Plain(Box<dyn FnMut(&mut When<'_>) + 'a>),
    WithArgs(Box<dyn FnMut(&mut When<'_>, &Arguments) + 'a>),
}

impl ContextBody<'_> {
    pub(crate) fn call(&mut self, when: &mut When<'_>, args: &Arguments) {
        match self {
            ContextBody::Plain(f) => f(when),
            ContextBody::WithArgs(f) => f(when, args),
        }
    }
}

/// Body of an event (`when`) sentence
pub enum EventBody<'a> {
    Plain(Box<dyn FnMut(&mut It<'_>) + 'a>),
    WithArgs(Box<dyn FnMut(&mut It<'_>, &Arguments) + 'a>),
}

impl EventBody<'_> {
    pub(crate) fn call(&mut self, it: &mut It<'_>, args: &Arguments) {
        match self {
            EventBody::Plain(f) => f(it),
            EventBody::WithArgs(f) => f(it, args),
        }
    }
}

/// Body of an outcome (`it`) sentence
pub enum OutcomeBody<'a> {
    Plain(Box<dyn FnMut(&mut Assert) + 'a>),
    WithArgs(Box<dyn FnMut(&mut Assert, &Arguments) + 'a>),
}

impl OutcomeBody<'_> {
    pub(crate) fn call(&mut self, assert: &mut Assert, args: &Arguments) {
        match self {
            OutcomeBody::Plain(f) => f(assert),
            OutcomeBody::WithArgs(f) => f(assert, args),
        }
    }
}

/// Body of a golden context, run once per fixture record
pub struct GoldenBody<'a>(Box<dyn FnMut(&mut When<'_>, &Gold) + 'a>);

impl GoldenBody<'_> {
    pub(crate) fn call(&mut self, when: &mut When<'_>, gold: &Gold) {
        (self.0)(when, gold)
    }
}

impl<'a> From<ContextBody<'a>> for Arg<ContextBody<'a>> {
    fn from(body: ContextBody<'a>) -> Self {
        Arg::Body(body)
    }
}

impl<'a> From<EventBody<'a>> for Arg<EventBody<'a>> {
    fn from(body: EventBody<'a>) -> Self {
        Arg::Body(body)
    }
}

impl<'a> From<OutcomeBody<'a>> for Arg<OutcomeBody<'a>> {
    fn from(body: OutcomeBody<'a>) -> Self {
        Arg::Body(body)
    }
}

impl<'a> From<GoldenBody<'a>> for Arg<GoldenBody<'a>> {
    fn from(body: GoldenBody<'a>) -> Self {
        Arg::Body(body)
    }
}

/// Context body that ignores the argument set
pub fn context<'a>(f: impl FnMut(&mut When<'_>) + 'a) -> ContextBody<'a> {
    ContextBody::Plain(Box::new(f))
}

/// Context body receiving the argument set
pub fn context_with<'a>(f: impl FnMut(&mut When<'_>, &Arguments) + 'a) -> ContextBody<'a> {
    ContextBody::WithArgs(Box::new(f))
}

/// Event body that ignores the argument set
pub fn event<'a>(f: impl FnMut(&mut It<'_>) + 'a) -> EventBody<'a> {
    EventBody::Plain(Box::new(f))
}

/// Event body receiving the argument set
pub fn event_with<'a>(f: impl FnMut(&mut It<'_>, &Arguments) + 'a) -> EventBody<'a> {
    EventBody::WithArgs(Box::new(f))
}

/// Outcome body that ignores the argument set
pub fn outcome<'a>(f: impl FnMut(&mut Assert) + 'a) -> OutcomeBody<'a> {
    OutcomeBody::Plain(Box::new(f))
}

/// Outcome body receiving the argument set
pub fn outcome_with<'a>(f: impl FnMut(&mut Assert, &Arguments) + 'a) -> OutcomeBody<'a> {
    OutcomeBody::WithArgs(Box::new(f))
}

/// Golden context body, receiving one fixture record per run
pub fn golden<'a>(f: impl FnMut(&mut When<'_>, &Gold) + 'a) -> GoldenBody<'a> {
    GoldenBody(Box::new(f))
}
