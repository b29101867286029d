//! Error taxonomy for the datashape core.
//!
//! Two distinct families:
//! - [`ShapeError`]: construction failures. Fatal to the attempted
//!   construction, expected to propagate to the top-level caller.
//! - [`ConvertError`]: a value cannot cross the host-runtime bridge.
//!   Always recoverable; callers typically fall back to the opaque
//!   object measure.

use thiserror::Error;

/// A type value could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// A composite needs at least two parameters (dims + measure).
    #[error("a datashape must be constructed from 2 or more parameters, got {got}")]
    TooFewParameters {
        /// Number of parameters after flattening.
        got: usize,
    },

    /// The last parameter of a composite must classify as a measure.
    #[error("only a measure can appear in the last position of a datashape, not `{found}`")]
    MeasureExpected {
        /// Index of the offending parameter.
        position: usize,
        /// Canonical rendering of the offending parameter.
        found: String,
    },

    /// A non-terminal parameter of a composite must classify as a dimension.
    #[error(
        "only dimensions can appear before the last position of a datashape, \
         not `{found}` at position {position}"
    )]
    DimensionExpected {
        /// Index of the offending parameter.
        position: usize,
        /// Canonical rendering of the offending parameter.
        found: String,
    },

    /// A bounded range needs `lower < upper`.
    #[error("range requires lower < upper, got [{lower}, {upper}]")]
    BadRangeBounds {
        /// Lower bound given.
        lower: usize,
        /// Upper bound given.
        upper: usize,
    },

    /// A string encoding spelling outside the canonical set.
    #[error("unsupported string encoding `{0}`")]
    UnsupportedEncoding(String),

    /// Record field names must be unique.
    #[error("duplicate record field `{0}`")]
    DuplicateField(String),

    /// Registry names are first-writer-wins; later writers fail.
    #[error("there is another type registered with name `{0}`")]
    DuplicateName(String),

    /// Name lookup miss.
    #[error("no type registered with name `{0}`")]
    NotFound(String),
}

/// A datashape cannot be expressed on the host runtime side, or a host
/// dtype cannot be mapped back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// A dimension kind with no host representation.
    #[error("datashape dimension `{0}` is not convertible to a host axis")]
    Dimension(String),

    /// A measure kind with no host representation.
    #[error("datashape measure `{0}` is not convertible to a host dtype")]
    Measure(String),

    /// A host dtype whose name matches no registered element type.
    #[error("host dtype `{0}` has no registered element type")]
    UnknownDType(String),

    /// Programming-error class: a produced host dtype failed its
    /// consistency check. Should never occur in correct use.
    #[error("internal error: {0}")]
    Internal(String),
}
