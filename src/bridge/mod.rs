//! Bidirectional conversion to and from the host array runtime.
//!
//! The host side of the bridge is a `(shape, dtype)` pair. The dtype is
//! modeled by [`HostDType`]: a kind tag, an item size and, for
//! structured dtypes, an ordered field mapping. It is the contract
//! surface, not a binding to any particular runtime.
//!
//! Conversion failures are the recoverable [`ConvertError`] family:
//! callers are expected to catch them and fall back to the opaque
//! object measure.

use crate::ctype::{builtins, CType};
use crate::error::ConvertError;
use crate::mono::{Fixed, Mono};
use crate::record::Record;
use crate::shape::{DataShape, Shape};
use crate::string_type::{Encoding, StringType};

#[cfg(test)]
mod tests;

/// Kind tag of a host dtype.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HostKind {
    /// Boolean.
    Bool,
    /// Signed integer.
    Int,
    /// Unsigned integer.
    UInt,
    /// IEEE floating point.
    Float,
    /// Complex floating point.
    Complex,
    /// Time delta.
    TimeDelta,
    /// Point-in-time timestamp.
    DateTime,
    /// Fixed-length byte string.
    Bytes,
    /// Fixed-length unicode string (4 bytes per code point).
    Unicode,
    /// Structured dtype with named fields.
    Record,
    /// Zero-width void.
    Void,
    /// Opaque host object reference.
    Object,
}

/// A host dtype: kind tag, item size, optional structured fields.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HostDType {
    kind: HostKind,
    itemsize: usize,
    fields: Option<Vec<(String, HostDType)>>,
}

impl HostDType {
    /// A plain (non-structured) dtype.
    pub fn new(kind: HostKind, itemsize: usize) -> Self {
        HostDType {
            kind,
            itemsize,
            fields: None,
        }
    }

    /// A structured dtype; the item size is the sum of the field sizes.
    /// The sum saturates on overflow; such a dtype is rejected by the
    /// consistency check on conversion.
    pub fn record(fields: Vec<(String, HostDType)>) -> Self {
        let itemsize = fields
            .iter()
            .fold(0usize, |acc, (_, dt)| acc.saturating_add(dt.itemsize));
        HostDType {
            kind: HostKind::Record,
            itemsize,
            fields: Some(fields),
        }
    }

    /// The opaque object dtype, pointer-sized.
    pub fn object() -> Self {
        HostDType::new(HostKind::Object, std::mem::size_of::<usize>())
    }

    /// The kind tag.
    pub fn kind(&self) -> HostKind {
        self.kind
    }

    /// The size of one element.
    pub fn itemsize(&self) -> usize {
        self.itemsize
    }

    /// Ordered fields, for structured dtypes.
    pub fn fields(&self) -> Option<&[(String, HostDType)]> {
        self.fields.as_deref()
    }

    /// The canonical dtype name, keyed against the element-type
    /// registry (`int32`, `float64`, ...).
    pub fn name(&self) -> String {
        let bits = self.itemsize * 8;
        match self.kind {
            HostKind::Bool => "bool".to_owned(),
            HostKind::Int => format!("int{bits}"),
            HostKind::UInt => format!("uint{bits}"),
            HostKind::Float => format!("float{bits}"),
            HostKind::Complex => format!("complex{bits}"),
            HostKind::TimeDelta => "timedelta64".to_owned(),
            HostKind::DateTime => "datetime64".to_owned(),
            HostKind::Bytes => format!("bytes{bits}"),
            HostKind::Unicode => format!("str{bits}"),
            HostKind::Record => "record".to_owned(),
            HostKind::Void => "void".to_owned(),
            HostKind::Object => "object".to_owned(),
        }
    }
}

/// One axis of a host shape tuple.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HostDim {
    /// A concrete axis length.
    Fixed(usize),
    /// Unknown length (the host's `-1` sentinel), from a free variable.
    Unknown,
}

/// A primitive host scalar value, for default-measure dispatch.
#[derive(Clone, Debug, PartialEq)]
pub enum HostScalar {
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Complex value (re, im).
    Complex(f64, f64),
    /// String value.
    Str(String),
    /// Time delta in host units.
    TimeDelta(i64),
    /// Timestamp in host units.
    Timestamp(i64),
    /// Anything unrecognized.
    Other,
}

impl CType {
    /// Look up the element type matching a host dtype's canonical name.
    pub fn from_host_dtype(dtype: &HostDType) -> Result<&'static CType, ConvertError> {
        let name = dtype.name();
        CType::from_name(&name).map_err(|_| ConvertError::UnknownDType(name))
    }
}

/// Discard the measure and return the dimension prefix. Partial view,
/// no validation.
pub fn extract_dims(ds: &DataShape) -> &[Mono] {
    ds.dims()
}

/// Discard the dimensions and return the measure. Partial view, no
/// validation.
pub fn extract_measure(ds: &DataShape) -> &Mono {
    ds.measure()
}

/// Downcast a datashape into a host `(shape, dtype)` pair.
///
/// Fixed axes map to concrete lengths, integer constants to their
/// values, free variables to the unknown-length sentinel; any other
/// dimension kind is not convertible. The measure must be an element
/// type, a blob or a record.
#[tracing::instrument(level = "trace", skip_all)]
pub fn to_host(shape: &Shape) -> Result<(Vec<HostDim>, HostDType), ConvertError> {
    let (dims, measure) = match shape {
        Shape::Unit(mono) => (&[] as &[Mono], mono),
        Shape::Composite(ds) => (ds.dims(), ds.measure()),
    };

    let mut host_shape = Vec::with_capacity(dims.len());
    for dim in dims {
        host_shape.push(match dim {
            Mono::Fixed(f) => HostDim::Fixed(f.value()),
            Mono::IntegerConstant(val) => match usize::try_from(*val) {
                Ok(len) => HostDim::Fixed(len),
                Err(_) => return Err(ConvertError::Dimension(dim.to_string())),
            },
            Mono::Var(_) => HostDim::Unknown,
            other => return Err(ConvertError::Dimension(other.to_string())),
        });
    }

    let dtype = measure_dtype(measure)?;
    verify_dtype(&dtype)?;
    Ok((host_shape, dtype))
}

/// Throw away the shape information and return the measure as a host
/// dtype.
pub fn to_host_dtype(shape: &Shape) -> Result<HostDType, ConvertError> {
    let measure = match shape {
        Shape::Unit(mono) => mono,
        Shape::Composite(ds) => ds.measure(),
    };
    let dtype = measure_dtype(measure)?;
    verify_dtype(&dtype)?;
    Ok(dtype)
}

fn measure_dtype(measure: &Mono) -> Result<HostDType, ConvertError> {
    match measure {
        Mono::CType(ct) => ctype_dtype(ct),
        Mono::Blob => Ok(HostDType::object()),
        Mono::Record(rec) => {
            let mut fields = Vec::with_capacity(rec.len());
            for (name, ty) in rec.fields() {
                fields.push((name.clone(), measure_dtype(ty)?));
            }
            Ok(HostDType::record(fields))
        }
        // Host string dtypes are fixed-length; an unbounded string has
        // no host representation and the caller falls back.
        Mono::String(st) => match (st.fixlen(), st.encoding()) {
            (Some(len), Encoding::Ascii) => Ok(HostDType::new(HostKind::Bytes, len)),
            (Some(len), Encoding::Utf8) => Ok(HostDType::new(HostKind::Unicode, len * 4)),
            _ => Err(ConvertError::Measure(measure.to_string())),
        },
        other => Err(ConvertError::Measure(other.to_string())),
    }
}

fn ctype_dtype(ct: &CType) -> Result<HostDType, ConvertError> {
    let kind = match ct.name() {
        "bool" => HostKind::Bool,
        "char" => HostKind::Bytes,
        "int8" | "int16" | "int32" | "int64" => HostKind::Int,
        "uint8" | "uint16" | "uint32" | "uint64" => HostKind::UInt,
        "float16" | "float32" | "float64" | "float128" => HostKind::Float,
        "complex64" | "complex128" | "complex256" => HostKind::Complex,
        "timedelta64" => HostKind::TimeDelta,
        "datetime64" => HostKind::DateTime,
        "void" => HostKind::Void,
        "object" => HostKind::Object,
        other => return Err(ConvertError::Measure(other.to_owned())),
    };
    Ok(HostDType::new(kind, ct.itemsize()))
}

/// A structured dtype's item size must equal the sum of its field
/// sizes, recursively.
fn verify_dtype(dtype: &HostDType) -> Result<(), ConvertError> {
    if let Some(fields) = dtype.fields() {
        let sum = fields
            .iter()
            .try_fold(0usize, |acc, (_, dt)| acc.checked_add(dt.itemsize()))
            .ok_or_else(|| {
                ConvertError::Internal("structured dtype field sizes overflow".to_owned())
            })?;
        if sum != dtype.itemsize() {
            return Err(ConvertError::Internal(format!(
                "structured dtype itemsize {} does not match field total {sum}",
                dtype.itemsize()
            )));
        }
        for (_, field) in fields {
            verify_dtype(field)?;
        }
    }
    Ok(())
}

/// Upcast a host `(shape, dtype)` pair into a datashape.
///
/// An empty shape yields the bare measure; otherwise the axis lengths
/// are prepended as fixed dimensions.
#[tracing::instrument(level = "trace", skip_all, fields(ndim = shape.len()))]
pub fn from_host(shape: &[usize], dtype: &HostDType) -> Result<Shape, ConvertError> {
    let measure = measure_from_dtype(dtype)?;

    if shape.is_empty() {
        return Ok(Shape::Unit(measure));
    }

    let params = shape
        .iter()
        .map(|&len| Mono::Fixed(Fixed(len)))
        .chain(std::iter::once(measure));
    DataShape::new(params)
        .map(Shape::Composite)
        .map_err(|err| ConvertError::Internal(err.to_string()))
}

fn measure_from_dtype(dtype: &HostDType) -> Result<Mono, ConvertError> {
    Ok(match dtype.kind() {
        HostKind::Bytes => Mono::String(StringType::with_len_and_encoding(
            dtype.itemsize(),
            Encoding::Ascii,
        )),
        // Unicode dtypes store 4 bytes per code point; any other item
        // size is malformed rather than a shorter string.
        HostKind::Unicode => {
            if dtype.itemsize() % 4 != 0 {
                return Err(ConvertError::UnknownDType(dtype.name()));
            }
            Mono::String(StringType::with_len_and_encoding(
                dtype.itemsize() / 4,
                Encoding::Utf8,
            ))
        }
        HostKind::Record => {
            let fields = dtype.fields().unwrap_or_default();
            let mut rec_fields = Vec::with_capacity(fields.len());
            for (name, field_dtype) in fields {
                rec_fields.push((name.clone(), measure_from_dtype(field_dtype)?));
            }
            let rec = Record::new(rec_fields)
                .map_err(|err| ConvertError::Internal(err.to_string()))?;
            Mono::Record(rec)
        }
        // The opaque dtype surfaces as the blob measure.
        HostKind::Object => Mono::Blob,
        _ => Mono::CType(CType::from_host_dtype(dtype)?.clone()),
    })
}

/// The default measure for a primitive host value.
///
/// A fixed, total dispatch table, not inference: anything unrecognized
/// maps to the opaque object measure.
pub fn from_scalar(scalar: &HostScalar) -> Mono {
    let table = builtins();
    match scalar {
        HostScalar::Int(_) => Mono::CType(table.int32.clone()),
        HostScalar::Float(_) => Mono::CType(table.float64.clone()),
        HostScalar::Complex(_, _) => Mono::CType(table.complex128.clone()),
        HostScalar::Str(_) => Mono::String(StringType::new()),
        HostScalar::TimeDelta(_) => Mono::CType(table.timedelta64.clone()),
        HostScalar::Timestamp(_) => Mono::CType(table.datetime64.clone()),
        HostScalar::Other => Mono::CType(table.object.clone()),
    }
}
