//! Wire model error types.

use thiserror::Error;

/// Wire model errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// A slice, trailing window or field access runs past the available bytes
    #[error("out of range: {len} bytes at offset {offset} exceed bound {bound}")]
    OutOfRange {
        /// Requested start, relative to the view that was asked
        offset: usize,
        /// Requested length
        len: usize,
        /// Number of bytes the view could provide
        bound: usize,
    },

    /// Frame control names a type/subtype with no frame kind
    #[error("unknown frame kind: type {typ} subtype {subtype}")]
    UnknownKind {
        /// Frame type bits
        typ: u8,
        /// Frame subtype bits
        subtype: u8,
    },

    /// Size limit exceeded
    #[error("size limit exceeded: {0}")]
    Size(usize),
}

impl WireError {
    pub(crate) fn out_of_range(offset: usize, len: usize, bound: usize) -> Self {
        WireError::OutOfRange { offset, len, bound }
    }
}
