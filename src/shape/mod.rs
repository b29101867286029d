//! Composite datashapes: the unification of shape and dtype.
//!
//! A [`DataShape`] is an ordered sequence of dimension types terminated
//! by exactly one measure. Construction flattens nested composites,
//! validates the dimension/measure classification rule, and caches the
//! fixed C-contiguous layout metadata when it is statically known.
//!
//! [`product`] is the associative composition operator: `product(a, b)`
//! concatenates the operands' parameter sequences, so
//! `product(product(a, b), c)` and `product(a, product(b, c))` yield the
//! same flattened composite.

use smallvec::SmallVec;

use crate::error::ShapeError;
use crate::mono::Mono;
use crate::registry::TypeRegistry;

#[cfg(test)]
mod tests;

/// Parameter storage; most shapes have a handful of axes.
type Params = SmallVec<[Mono; 4]>;

/// A unit monotype or a composite datashape.
///
/// This is the operand type of [`product`] and the result type of the
/// host bridge (a scalar host value maps back to a bare measure, not a
/// one-element composite).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    /// A single unit type.
    Unit(Mono),
    /// A validated composite.
    Composite(DataShape),
}

impl Shape {
    /// True for composites.
    pub fn is_composite(&self) -> bool {
        matches!(self, Shape::Composite(_))
    }

    /// The parameter sequence: a composite's parameters, or the unit
    /// itself as a one-element sequence.
    fn into_params(self) -> Params {
        match self {
            Shape::Unit(mono) => {
                let mut params = Params::new();
                params.push(mono);
                params
            }
            Shape::Composite(ds) => ds.params,
        }
    }
}

impl From<Mono> for Shape {
    fn from(mono: Mono) -> Self {
        Shape::Unit(mono)
    }
}

impl From<DataShape> for Shape {
    fn from(ds: DataShape) -> Self {
        Shape::Composite(ds)
    }
}

/// Bare integers compose at the constructor level, not as dimensions.
impl From<i64> for Shape {
    fn from(val: i64) -> Self {
        Shape::Unit(Mono::IntegerConstant(val))
    }
}

/// A validated composite: dimensions then exactly one measure.
///
/// Immutable once built; layout metadata is computed at construction.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataShape {
    params: Params,
    name: Option<String>,
    c_itemsize: Option<usize>,
    c_strides: Vec<Option<usize>>,
}

/// Structural equality: parameters only. Registered names and cached
/// layout do not participate (layout is derived from the parameters).
impl PartialEq for DataShape {
    fn eq(&self, other: &Self) -> bool {
        self.params == other.params
    }
}

impl Eq for DataShape {}

impl std::hash::Hash for DataShape {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.params.hash(state);
    }
}

impl DataShape {
    /// Build a composite from an ordered parameter sequence.
    ///
    /// Composite parameters are spliced in place (one level); the result
    /// is always flat. Fails unless the flattened sequence has at least
    /// two parameters, every non-terminal parameter fits a dimension
    /// slot and the terminal parameter fits the measure slot.
    pub fn new<I, T>(params: I) -> Result<Self, ShapeError>
    where
        I: IntoIterator<Item = T>,
        T: Into<Shape>,
    {
        let params: Params = flatten(params).collect();

        if params.len() < 2 {
            return Err(ShapeError::TooFewParameters { got: params.len() });
        }

        let last = params.len() - 1;
        if !params[last].fits_measure() {
            return Err(ShapeError::MeasureExpected {
                position: last,
                found: params[last].to_string(),
            });
        }
        for (position, dim) in params[..last].iter().enumerate() {
            if !dim.fits_dimension() {
                return Err(ShapeError::DimensionExpected {
                    position,
                    found: dim.to_string(),
                });
            }
        }

        // C-contiguous layout, walked innermost-first: each axis's stride
        // is the running item size; the running size grows by the axis
        // length for concrete Fixed axes and becomes unknown from the
        // first non-Fixed axis (or unknown measure width) outward. A
        // product that overflows `usize` also degrades to unknown.
        let mut running = params[last].static_itemsize();
        let mut c_strides: Vec<Option<usize>> = Vec::with_capacity(last);
        for dim in params[..last].iter().rev() {
            c_strides.push(running);
            running = match (running, dim) {
                (Some(size), Mono::Fixed(f)) => size.checked_mul(f.value()),
                _ => None,
            };
        }
        c_strides.reverse();

        Ok(DataShape {
            params,
            name: None,
            c_itemsize: running,
            c_strides,
        })
    }

    /// Build a composite and register it under `name`.
    ///
    /// Registration is scoped to the given registry; a collision with an
    /// already-registered name fails and leaves the first entry intact.
    pub fn with_name<I, T>(
        params: I,
        name: &str,
        registry: &mut TypeRegistry,
    ) -> Result<Self, ShapeError>
    where
        I: IntoIterator<Item = T>,
        T: Into<Shape>,
    {
        let mut ds = DataShape::new(params)?;
        ds.name = Some(name.to_owned());
        registry.register(name, Shape::Composite(ds.clone()))?;
        Ok(ds)
    }

    /// The flattened parameter sequence.
    pub fn params(&self) -> &[Mono] {
        &self.params
    }

    /// The dimension prefix.
    pub fn dims(&self) -> &[Mono] {
        &self.params[..self.params.len() - 1]
    }

    /// The terminal measure.
    pub fn measure(&self) -> &Mono {
        &self.params[self.params.len() - 1]
    }

    /// The registered name, if the composite was interned.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Concrete axis lengths, when every axis is `Fixed`.
    pub fn shape(&self) -> Option<Vec<usize>> {
        self.dims()
            .iter()
            .map(|dim| match dim {
                Mono::Fixed(f) => Some(f.value()),
                _ => None,
            })
            .collect()
    }

    /// The size of one element with C-contiguous storage, when every
    /// axis is a concrete `Fixed` and the measure width is static.
    pub fn c_itemsize(&self) -> Option<usize> {
        self.c_itemsize
    }

    /// Per-axis strides assuming C-contiguous storage; an axis's entry
    /// is `None` once any inner axis (or the measure width) is not
    /// statically known.
    pub fn c_strides(&self) -> &[Option<usize>] {
        &self.c_strides
    }

    /// Number of parameters, measure included.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Composites are never empty; kept for `len` symmetry.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Splice composite elements into their parameters, one level deep.
///
/// Composites maintain the already-flat invariant, so one level is
/// enough; the operation is a plain restartable iterator adapter.
pub fn flatten<I, T>(params: I) -> impl Iterator<Item = Mono>
where
    I: IntoIterator<Item = T>,
    T: Into<Shape>,
{
    params
        .into_iter()
        .flat_map(|item| item.into().into_params())
}

/// The associative composition operator.
///
/// Concatenates the operands' parameter sequences (a unit contributes
/// itself) and builds a fresh composite. Integers coerce to
/// constructor-level integer constants.
pub fn product<A, B>(a: A, b: B) -> Result<DataShape, ShapeError>
where
    A: Into<Shape>,
    B: Into<Shape>,
{
    let mut params = a.into().into_params();
    params.extend(b.into().into_params());
    DataShape::new(params.into_iter().map(Shape::Unit))
}

/// True when the shape is built purely from fixed axes, integer
/// constants and canonical element types.
pub fn is_simple(shape: &Shape) -> bool {
    let simple = |mono: &Mono| {
        matches!(
            mono,
            Mono::Fixed(_) | Mono::IntegerConstant(_) | Mono::CType(_)
        )
    };
    match shape {
        Shape::Unit(mono) => simple(mono),
        Shape::Composite(ds) => ds.params().iter().all(simple),
    }
}

/// True when the measure is a record (tabular data).
pub fn table_like(ds: &DataShape) -> bool {
    matches!(ds.measure(), Mono::Record(_))
}

/// True when the measure is not a record (plain array data).
pub fn array_like(ds: &DataShape) -> bool {
    !table_like(ds)
}
