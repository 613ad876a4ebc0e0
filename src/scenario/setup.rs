//! Setup and teardown around outcome bodies

use std::cell::RefCell;
use std::rc::Rc;

use super::body::{outcome_with, OutcomeBody};

type Hook<'a> = Rc<RefCell<dyn FnMut() + 'a>>;

/// A pair of hooks run around every outcome body it wraps
///
/// ```ignore
/// let setup = Setup::new(|| db.reset(), || db.close());
/// it.it("stores a row", args![setup.wrap(outcome(|a| { /* .. */ }))]);
/// ```
#[derive(Clone)]
pub struct Setup<'a> {
    before: Hook<'a>,
    after: Hook<'a>,
}

impl<'a> Setup<'a> {
    pub fn new(before: impl FnMut() + 'a, after: impl FnMut() + 'a) -> Self {
        Self {
            before: Rc::new(RefCell::new(before)),
            after: Rc::new(RefCell::new(after)),
        }
    }

    /// Outcome body running `before`, then `body`, then `after`
    pub fn wrap<'b>(&self, mut body: OutcomeBody<'b>) -> OutcomeBody<'b>
    where
        'a: 'b,
    {
        let before = Rc::clone(&self.before);
        let after = Rc::clone(&self.after);
        outcome_with(move |assert, args| {
            (&mut *before.borrow_mut())();
            body.call(assert, args);
            (&mut *after.borrow_mut())();
        })
    }
}
