//! Error types for encoding and decoding.

use rtgeo_shapes::GeometryError;
use thiserror::Error;

/// Errors that can occur while encoding or decoding primitives.
#[derive(Error, Debug)]
pub enum CodecError {
    /// I/O error on the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A type decoder was handed a record of another type.
    #[error("invalid type id: expected {expected}, found {actual}")]
    InvalidId {
        /// Id the decoder accepts.
        expected: i32,
        /// Id read from the stream.
        actual: i32,
    },

    /// No decoder is registered for the id read from the stream.
    #[error("unsupported type id: {0}")]
    UnsupportedId(i32),

    /// Two decoders were registered under the same id.
    #[error("duplicate decoder for type id {0}")]
    DuplicateId(i32),

    /// A list length that is negative or does not fit the wire format.
    #[error("invalid element count: {0}")]
    InvalidCount(i64),

    /// The decoded fields do not form a valid primitive.
    #[error("invalid geometry: {0}")]
    Geometry(#[from] GeometryError),
}
