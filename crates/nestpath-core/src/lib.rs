//! nestpath core crate.
//!
//! Defensive reads and writes of values buried in dynamically shaped data:
//!
//! - `value`: the dynamic [`Value`] model, its runtime [`Kind`], member
//!   reads, truthiness and primitive conversions.
//! - `coerce`: converts a value to the kind of a reference "shape" value.
//! - `path`: normalizes `.`-delimited strings and step sequences.
//! - `reader`: [`get_from`], [`get_from_or`] and [`exists_on`].
//! - `writer`: [`set_on`], which creates missing intermediate objects.
//! - `fallback`: truthy/defined fallback helpers.
//! - `json`: conversions to and from `serde_json::Value`.
//!
//! Shape problems never raise. A read that cannot be completed yields the
//! caller's default (or `Undefined`); a write that cannot be completed
//! yields `None`. The one propagated error is [`TypeConversionError`], from
//! widening a resolved value to a big integer.

pub mod coerce;
pub mod fallback;
pub mod json;
pub mod path;
pub mod reader;
pub mod value;
pub mod writer;

pub use coerce::{TypeConversionError, coerce};
pub use fallback::{defined_or_default, or_default, or_empty_array, or_empty_string, or_undefined};
pub use path::{Path, Step, ToPath};
pub use reader::{exists_on, get_from, get_from_or};
pub use value::{Accessor, Kind, Value};
pub use writer::set_on;
