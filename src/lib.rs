//! Compositional type algebra for the shape and measure of structured,
//! array-like data: the unification of shape and dtype.
//!
//! A [`DataShape`] is an ordered sequence of dimension types terminated
//! by exactly one measure: `3, 2, int32` is three-by-two of 32-bit
//! integers. The crate provides:
//!
//! - the closed [`Mono`] hierarchy of unit types (fixed and ranged
//!   dimensions, element types, strings, records, sums, free variables)
//! - the associative [`product`] composition operator
//! - the immutable [`builtins`] table of canonical element types and an
//!   explicitly-scoped [`TypeRegistry`] for caller-introduced names
//! - the host array-runtime [`bridge`]: bidirectional conversion between
//!   a datashape and the host's `(shape, dtype)` pair
//!
//! Every type renders to a canonical, re-parseable textual form; the
//! external parser and discovery collaborators construct values solely
//! through the constructors here and rely on that form round-tripping.

pub mod bridge;
mod ctype;
mod error;
mod mono;
mod record;
mod registry;
mod render;
mod shape;
mod string_type;

pub use ctype::{builtins, Builtins, CType};
pub use error::{ConvertError, ShapeError};
pub use mono::{Class, Fixed, Mono, Range, TypeVar};
pub use record::Record;
pub use registry::TypeRegistry;
pub use shape::{array_like, flatten, is_simple, product, table_like, DataShape, Shape};
pub use string_type::{Encoding, StringType};
