#![warn(missing_docs)]

//! Tagged binary encoding of rtgeo primitives.
//!
//! Every record is a big-endian `i32` type id followed by the primitive's
//! defining fields in constructor order. Scalars are `f64`, points and
//! vectors are consecutive `f64` components, angles are `f64` radians and
//! variable-length lists carry an `i32` element count.
//!
//! - [`Encode`] / [`Decode`] - field-level codec over `std::io`
//! - [`Record`] - per-type encode/decode with id checking
//! - [`DecoderTable`] - id-dispatched decoding into a closed family

mod error;
mod field;
mod record;
mod table;

pub use error::CodecError;
pub use field::{Decode, Encode};
pub use record::Record;
pub use table::{encode_primitive2, encode_primitive3, DecodeFn, DecoderTable};
