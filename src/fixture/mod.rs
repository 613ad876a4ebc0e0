//! Golden fixture files
//!
//! Fixture files map a context title to a list of records, each holding an
//! `input` and the expected `golden` output:
//!
//! ```yaml
//! "two values a=%[input.a]v b=%[input.b]v":
//! - input: {a: 0, b: 1}
//!   golden: {sum: 1}
//! - input: {a: 2, b: 3}
//!   golden: {sum: 5}
//! ```

mod encoder;
mod gold;
mod store;

pub use encoder::{resolve, Format};
pub use gold::Gold;
pub use store::{read_table, write_table, FixtureStore, FixtureTable};
