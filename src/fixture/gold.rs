//! Fixture records
//!
//! A [`Gold`] pairs an input value with the expected ("golden") output for
//! one data-driven scenario.

use std::cell::RefCell;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::encoder::{resolve, Format};
use crate::common::{Error, Result};

/// Key prefix selecting the input half of a record
const INPUT_PREFIX: &str = "input.";
/// Key prefix selecting the golden half of a record
const GOLDEN_PREFIX: &str = "golden.";

/// One fixture record: an input and its expected output
///
/// The golden half sits behind a `RefCell` so that update mode can replace
/// it while scenario bodies hold a shared reference to the record.
#[derive(Debug, Serialize, Deserialize)]
pub struct Gold {
    #[serde(default, alias = "Input")]
    input: Value,

    #[serde(default, alias = "Golden")]
    golden: RefCell<Value>,

    #[serde(skip)]
    format: Format,

    #[serde(skip)]
    update: bool,
}

impl Gold {
    /// Create a record outside of a fixture file
    pub fn new(input: Value, golden: Value) -> Self {
        Self {
            input,
            golden: RefCell::new(golden),
            format: Format::default(),
            update: false,
        }
    }

    /// Attach the file format and the update flag of the owning store
    pub(crate) fn bind(&mut self, format: Format, update: bool) {
        self.format = format;
        self.update = update;
    }

    /// Same record, with update mode switched on or off
    pub fn with_update(mut self, update: bool) -> Self {
        self.update = update;
        self
    }

    /// Whether [`Gold::update`] rewrites this record
    pub fn is_updating(&self) -> bool {
        self.update
    }

    /// Raw input value
    pub fn input_value(&self) -> &Value {
        &self.input
    }

    /// Copy of the current golden value
    pub fn golden_value(&self) -> Value {
        self.golden.borrow().clone()
    }

    /// Load both halves into caller-declared shapes
    ///
    /// Fields missing from the record keep the destination's current value.
    pub fn load<I, G>(&self, input: &mut I, golden: &mut G) -> Result<()>
    where
        I: Serialize + DeserializeOwned,
        G: Serialize + DeserializeOwned,
    {
        self.format.roundtrip_into(&self.input, input)?;
        self.format.roundtrip_into(&*self.golden.borrow(), golden)?;
        Ok(())
    }

    /// Decode the input half as `T`
    pub fn input<T: DeserializeOwned>(&self) -> Result<T> {
        self.format.roundtrip(&self.input)
    }

    /// Decode the golden half as `T`
    pub fn golden<T: DeserializeOwned>(&self) -> Result<T> {
        self.format.roundtrip(&*self.golden.borrow())
    }

    /// Replace the golden half with the producer's value, in update mode only
    ///
    /// Outside update mode the producer is never called. Returns whether the
    /// record changed.
    pub fn update<T, F>(&self, producer: F) -> Result<bool>
    where
        T: Serialize,
        F: FnOnce() -> T,
    {
        if !self.update {
            return Ok(false);
        }

        let value: Value = self.format.roundtrip(&producer())?;
        *self.golden.borrow_mut() = value;
        Ok(true)
    }

    /// Resolve a prefixed dotted key, e.g. `input.a` or `golden.sum`
    ///
    /// Any prefix other than `input.` or `golden.` is an authoring error.
    pub fn get(&self, key: &str) -> Result<Value> {
        if let Some(path) = key.strip_prefix(INPUT_PREFIX) {
            resolve(&self.input, path).cloned()
        } else if let Some(path) = key.strip_prefix(GOLDEN_PREFIX) {
            resolve(&self.golden.borrow(), path).cloned()
        } else {
            Err(Error::InvalidKeyPrefix(key.to_string()))
        }
    }
}
