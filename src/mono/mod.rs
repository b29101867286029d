//! The monotype hierarchy.
//!
//! A [`Mono`] is a single, fully-applied type constructor. The hierarchy
//! is a closed enum: dimension/measure classification is resolved by the
//! variant tag, so the composite validation scan in [`crate::shape`] is
//! exhaustive at compile time.
//!
//! # Design
//!
//! - Variants carry their own parameters; recursive children are boxed
//! - Structural equality is derived per variant
//! - `class()` returns `None` for contextual types (a free variable may
//!   serve as either an axis or an element type, depending on position)

use crate::ctype::CType;
use crate::error::ShapeError;
use crate::record::Record;
use crate::string_type::StringType;


/// Classification of a unit type within a composite.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Class {
    /// Describes an axis length.
    Dimension,
    /// Describes the type of a scalar element.
    Measure,
}

/// A single type constructor applied to parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mono {
    /// The null datashape.
    Null,

    /// The dynamic type `?`: explicit upcast/downcast target for any type.
    Dynamic,

    /// The top type.
    Top,

    /// Large variable-length opaque string.
    Blob,

    /// An integer at the constructor level: in `Range(1,5)` the `1` is an
    /// `IntegerConstant`, not an axis.
    IntegerConstant(i64),

    /// A string at the constructor level: in `string(3, "utf-8")` the
    /// `"utf-8"` is a `StringConstant`.
    StringConstant(String),

    /// Canonical fixed-width element type.
    CType(CType),

    /// String measure with optional fixed length and canonical encoding.
    String(StringType),

    /// Small variable-length string with a maximum length.
    Varchar(usize),

    /// Fixed axis length.
    Fixed(Fixed),

    /// A free variable in the signature. Not user facing.
    Var(TypeVar),

    /// Bounded or unbounded interval of possible fixed axis lengths.
    Range(Range),

    /// Tagged two-branch sum.
    Either(Box<Mono>, Box<Mono>),

    /// Nullable measure: `null` or `T`.
    Option(Box<Mono>),

    /// A finite enumeration.
    Factor(Vec<Mono>),

    /// An untagged union over a fixed set of types.
    Union(Vec<Mono>),

    /// Ordered named-field aggregate.
    Record(Record),
}

impl Mono {
    /// Classification by variant tag.
    ///
    /// `None` means contextual: the type is accepted in either position
    /// of a composite.
    pub fn class(&self) -> Option<Class> {
        match self {
            Mono::Fixed(_) | Mono::Range(_) => Some(Class::Dimension),
            Mono::Blob
            | Mono::Varchar(_)
            | Mono::String(_)
            | Mono::CType(_)
            | Mono::Option(_)
            | Mono::Record(_) => Some(Class::Measure),
            Mono::Null
            | Mono::Dynamic
            | Mono::Top
            | Mono::IntegerConstant(_)
            | Mono::StringConstant(_)
            | Mono::Var(_)
            | Mono::Either(_, _)
            | Mono::Factor(_)
            | Mono::Union(_) => None,
        }
    }

    /// True when this type may sit in a dimension slot.
    pub fn fits_dimension(&self) -> bool {
        self.class() != Some(Class::Measure)
    }

    /// True when this type may sit in the measure slot.
    pub fn fits_measure(&self) -> bool {
        self.class() != Some(Class::Dimension)
    }

    /// The fixed byte width of one element, when statically known.
    ///
    /// Only canonical element types carry a static width; strings,
    /// records and sums do not.
    pub fn static_itemsize(&self) -> Option<usize> {
        match self {
            Mono::CType(ct) => Some(ct.itemsize()),
            _ => None,
        }
    }

    /// Left branch of an `Either`, if this is one.
    pub fn inl(&self) -> Option<&Mono> {
        match self {
            Mono::Either(a, _) => Some(a),
            _ => None,
        }
    }

    /// Right branch of an `Either`, if this is one.
    pub fn inr(&self) -> Option<&Mono> {
        match self {
            Mono::Either(_, b) => Some(b),
            _ => None,
        }
    }
}

/// Fixed dimension: a concrete axis length.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fixed(pub usize);

impl Fixed {
    /// The axis length.
    pub fn value(self) -> usize {
        self.0
    }
}

impl PartialEq<usize> for Fixed {
    fn eq(&self, other: &usize) -> bool {
        self.0 == *other
    }
}

impl From<usize> for Fixed {
    fn from(val: usize) -> Self {
        Fixed(val)
    }
}

/// A named free variable; classification is resolved by position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeVar {
    symbol: String,
}

impl TypeVar {
    /// Create a type variable, stripping the F#-style leading quote the
    /// parser may hand over (`'a` and `a` name the same variable).
    pub fn new(symbol: &str) -> Self {
        let symbol = symbol.strip_prefix('\'').unwrap_or(symbol);
        TypeVar {
            symbol: symbol.to_owned(),
        }
    }

    /// The bare variable name.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

/// Interval of possible fixed axis lengths.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    lower: usize,
    upper: Option<usize>,
}

impl Range {
    /// `[0, a]`: only an upper bound.
    pub fn upper_bounded(a: usize) -> Self {
        Range {
            lower: 0,
            upper: Some(a),
        }
    }

    /// `[a, ∞)`: no upper bound. `Range::unbounded(0)` is the builtin
    /// `Stream` type.
    pub fn unbounded(a: usize) -> Self {
        Range {
            lower: a,
            upper: None,
        }
    }

    /// `[a, b]` with both bounds concrete; requires `a < b`.
    pub fn bounded(a: usize, b: usize) -> Result<Self, ShapeError> {
        if a >= b {
            return Err(ShapeError::BadRangeBounds { lower: a, upper: b });
        }
        Ok(Range {
            lower: a,
            upper: Some(b),
        })
    }

    /// The lower bound.
    pub fn lower(&self) -> usize {
        self.lower
    }

    /// The upper bound; `None` is unbounded.
    pub fn upper(&self) -> Option<usize> {
        self.upper
    }
}

impl From<Fixed> for Mono {
    fn from(f: Fixed) -> Self {
        Mono::Fixed(f)
    }
}

impl From<TypeVar> for Mono {
    fn from(v: TypeVar) -> Self {
        Mono::Var(v)
    }
}

impl From<Range> for Mono {
    fn from(r: Range) -> Self {
        Mono::Range(r)
    }
}

impl From<CType> for Mono {
    fn from(ct: CType) -> Self {
        Mono::CType(ct)
    }
}

impl From<StringType> for Mono {
    fn from(st: StringType) -> Self {
        Mono::String(st)
    }
}

impl From<Record> for Mono {
    fn from(rec: Record) -> Self {
        Mono::Record(rec)
    }
}
