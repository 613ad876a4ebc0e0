//! Argument sets and like tables
//!
//! An [`Arguments`] value is one parameterization of a sentence; a
//! [`Table`] lists several of them and multiplies the sentence it is
//! given to.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::{Error, Result};

/// One ordered set of heterogeneous argument values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Arguments(Vec<Value>);

/// The empty set, used where a level has no parent arguments
pub(crate) static NO_ARGUMENTS: Arguments = Arguments(Vec::new());

impl Arguments {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    /// Decode the value at `index` (0-based) as `T`
    pub fn get<T: DeserializeOwned>(&self, index: usize) -> Result<T> {
        let value = self.0.get(index).ok_or(Error::ArgumentIndex {
            index,
            len: self.0.len(),
        })?;
        T::deserialize(value).map_err(|e| Error::ArgumentType {
            index,
            message: e.to_string(),
        })
    }

    /// Decode the value at `index` (0-based) as `T`, for use in test bodies
    ///
    /// # Panics
    ///
    /// Panics when the value is missing or does not decode as `T`.
    #[track_caller]
    pub fn at<T: DeserializeOwned>(&self, index: usize) -> T {
        match self.get(index) {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }
}

impl From<Vec<Value>> for Arguments {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, ")")
    }
}

/// Convert one `s!` element into a value
///
/// # Panics
///
/// Panics when the value cannot be represented, such as a map with
/// non-string keys. That is a mistake in the test source.
#[doc(hidden)]
#[track_caller]
pub fn to_argument<T: Serialize + ?Sized>(value: &T) -> Value {
    match serde_json::to_value(value) {
        Ok(value) => value,
        Err(e) => panic!("argument cannot be used in an argument set: {e}"),
    }
}

/// An ordered list of argument sets for one sentence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table(Vec<Arguments>);

impl Table {
    pub fn new(sets: Vec<Arguments>) -> Self {
        Self(sets)
    }

    /// The default table of a level: its parent's set, run once
    pub fn single(set: Arguments) -> Self {
        Self(vec![set])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arguments> {
        self.0.iter()
    }
}

impl<'t> IntoIterator for &'t Table {
    type Item = &'t Arguments;
    type IntoIter = std::slice::Iter<'t, Arguments>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Arguments> for Table {
    fn from_iter<I: IntoIterator<Item = Arguments>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Build a table from argument sets
pub fn like(sets: impl IntoIterator<Item = Arguments>) -> Table {
    sets.into_iter().collect()
}

/// One argument of a sentence: a body or a like table
pub enum Arg<B> {
    Body(B),
    Table(Table),
}

impl<B> From<Table> for Arg<B> {
    fn from(table: Table) -> Self {
        Arg::Table(table)
    }
}

impl<B> fmt::Debug for Arg<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Body(_) => f.write_str("Body(..)"),
            Arg::Table(table) => f.debug_tuple("Table").field(table).finish(),
        }
    }
}

/// Build an argument set: `s![1, "two", 3.0]`
#[macro_export]
macro_rules! s {
    ($($value:expr),* $(,)?) => {
        $crate::Arguments::new(vec![$($crate::scenario::args::to_argument(&$value)),*])
    };
}

/// Build a like table: `like![s![1, 1], s![2, 2]]`
#[macro_export]
macro_rules! like {
    ($($set:expr),* $(,)?) => {
        $crate::Table::new(vec![$($set),*])
    };
}

/// Build the argument list of a sentence from bodies and tables
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        vec![$(::std::convert::From::from($arg)),*]
    };
}
