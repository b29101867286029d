#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;
use crate::mono::{Range, TypeVar};

fn int32() -> Mono {
    Mono::CType(builtins().int32.clone())
}

fn fixed(val: usize) -> Mono {
    Mono::Fixed(Fixed(val))
}

#[test]
fn extract_views() {
    let ds = DataShape::new([fixed(3), fixed(2), int32()]).unwrap();
    assert_eq!(extract_dims(&ds), &[fixed(3), fixed(2)]);
    assert_eq!(extract_measure(&ds), &int32());
}

#[test]
fn fixed_ctype_shape_round_trips() {
    let ds = DataShape::new([fixed(5), fixed(5), int32()]).unwrap();
    let (host_shape, dtype) = to_host(&Shape::Composite(ds.clone())).unwrap();

    assert_eq!(host_shape, vec![HostDim::Fixed(5), HostDim::Fixed(5)]);
    assert_eq!(dtype, HostDType::new(HostKind::Int, 4));
    assert_eq!(dtype.name(), "int32");

    let back = from_host(&[5, 5], &dtype).unwrap();
    assert_eq!(back, Shape::Composite(ds));
}

#[test]
fn bare_measure_round_trips_through_empty_shape() {
    let (host_shape, dtype) = to_host(&Shape::Unit(int32())).unwrap();
    assert!(host_shape.is_empty());
    assert_eq!(from_host(&[], &dtype).unwrap(), Shape::Unit(int32()));
}

#[test]
fn blob_measure_maps_to_the_object_dtype() {
    let (_, dtype) = to_host(&Shape::Unit(Mono::Blob)).unwrap();
    assert_eq!(dtype, HostDType::object());
    assert_eq!(from_host(&[], &dtype).unwrap(), Shape::Unit(Mono::Blob));
}

#[test]
fn record_measure_round_trips_with_field_order() {
    let rec = Record::new([
        ("amount", Mono::CType(builtins().int64.clone())),
        (
            "name",
            Mono::String(StringType::with_len_and_encoding(16, Encoding::Ascii)),
        ),
    ])
    .unwrap();
    let ds = DataShape::new([fixed(3), Mono::Record(rec.clone())]).unwrap();

    let (host_shape, dtype) = to_host(&Shape::Composite(ds.clone())).unwrap();
    assert_eq!(host_shape, vec![HostDim::Fixed(3)]);
    assert_eq!(dtype.kind(), HostKind::Record);
    assert_eq!(dtype.itemsize(), 8 + 16);
    let field_names: Vec<&str> = dtype
        .fields()
        .unwrap()
        .iter()
        .map(|(name, _)| name.as_str())
        .collect();
    assert_eq!(field_names, vec!["amount", "name"]);

    let back = from_host(&[3], &dtype).unwrap();
    assert_eq!(back, Shape::Composite(ds));
}

#[test]
fn record_with_unbounded_string_field_is_not_convertible() {
    let rec = Record::new([
        ("amount", Mono::CType(builtins().int64.clone())),
        ("name", Mono::String(StringType::new())),
    ])
    .unwrap();
    let ds = DataShape::new([fixed(3), Mono::Record(rec)]).unwrap();
    assert_eq!(
        to_host(&Shape::Composite(ds)),
        Err(ConvertError::Measure("string".to_owned()))
    );
}

#[test]
fn byte_string_dtype_maps_to_ascii_string() {
    let dtype = HostDType::new(HostKind::Bytes, 8);
    assert_eq!(
        from_host(&[], &dtype).unwrap(),
        Shape::Unit(Mono::String(StringType::with_len_and_encoding(
            8,
            Encoding::Ascii
        )))
    );
}

#[test]
fn unicode_dtype_maps_to_utf8_string_by_code_points() {
    let dtype = HostDType::new(HostKind::Unicode, 40);
    assert_eq!(
        from_host(&[], &dtype).unwrap(),
        Shape::Unit(Mono::String(StringType::with_len_and_encoding(
            10,
            Encoding::Utf8
        )))
    );
}

#[test]
fn unicode_dtype_with_ragged_itemsize_is_rejected() {
    // 10 bytes is not a whole number of 4-byte code points.
    let dtype = HostDType::new(HostKind::Unicode, 10);
    assert_eq!(
        from_host(&[], &dtype),
        Err(ConvertError::UnknownDType("str80".to_owned()))
    );
}

#[test]
fn fixed_utf8_string_round_trips() {
    let measure = Mono::String(StringType::with_len(10));
    let (_, dtype) = to_host(&Shape::Unit(measure.clone())).unwrap();
    assert_eq!(dtype, HostDType::new(HostKind::Unicode, 40));
    assert_eq!(from_host(&[], &dtype).unwrap(), Shape::Unit(measure));
}

#[test]
fn unbounded_string_is_not_convertible() {
    let result = to_host(&Shape::Unit(Mono::String(StringType::new())));
    assert_eq!(
        result,
        Err(ConvertError::Measure("string".to_owned()))
    );
}

#[test]
fn free_variable_axis_maps_to_unknown_length() {
    let ds = DataShape::new([Mono::Var(TypeVar::new("a")), int32()]).unwrap();
    let (host_shape, _) = to_host(&Shape::Composite(ds)).unwrap();
    assert_eq!(host_shape, vec![HostDim::Unknown]);
}

#[test]
fn integer_constant_axis_maps_to_its_value() {
    let ds = DataShape::new([Mono::IntegerConstant(7), int32()]).unwrap();
    let (host_shape, _) = to_host(&Shape::Composite(ds)).unwrap();
    assert_eq!(host_shape, vec![HostDim::Fixed(7)]);

    let negative = DataShape::new([Mono::IntegerConstant(-1), int32()]).unwrap();
    assert_eq!(
        to_host(&Shape::Composite(negative)),
        Err(ConvertError::Dimension("-1".to_owned()))
    );
}

#[test]
fn unsupported_dimensions_and_measures_fail() {
    let ranged = DataShape::new([Mono::Range(Range::upper_bounded(5)), int32()]).unwrap();
    assert_eq!(
        to_host(&Shape::Composite(ranged)),
        Err(ConvertError::Dimension("Range(0,5)".to_owned()))
    );

    let either = Mono::Either(Box::new(int32()), Box::new(Mono::Null));
    let sum = DataShape::new([fixed(3), either]).unwrap();
    assert_eq!(
        to_host(&Shape::Composite(sum)),
        Err(ConvertError::Measure("Either(int32,null)".to_owned()))
    );
}

#[test]
fn unknown_host_dtype_fails_lookup() {
    // A 3-byte integer matches no registered element type.
    let dtype = HostDType::new(HostKind::Int, 3);
    assert_eq!(
        from_host(&[], &dtype),
        Err(ConvertError::UnknownDType("int24".to_owned()))
    );
}

#[test]
fn to_host_dtype_discards_shape() {
    let ds = DataShape::new([fixed(3), fixed(2), int32()]).unwrap();
    let dtype = to_host_dtype(&Shape::Composite(ds)).unwrap();
    assert_eq!(dtype, HostDType::new(HostKind::Int, 4));
}

#[test]
fn inconsistent_structured_dtype_is_an_internal_error() {
    // Bypass the constructors to build a dtype whose item size does not
    // match its fields; the consistency guard must reject it.
    let bad = HostDType {
        kind: HostKind::Record,
        itemsize: 3,
        fields: Some(vec![("x".to_owned(), HostDType::new(HostKind::Int, 4))]),
    };
    assert!(matches!(
        verify_dtype(&bad),
        Err(ConvertError::Internal(_))
    ));
}

#[test]
fn overflowing_structured_dtype_fails_the_consistency_guard() {
    // Field sizes whose sum exceeds usize: the constructor saturates
    // instead of wrapping, and the guard rejects the result.
    let dtype = HostDType::record(vec![
        ("a".to_owned(), HostDType::new(HostKind::Bytes, usize::MAX)),
        ("b".to_owned(), HostDType::new(HostKind::Bytes, 8)),
    ]);
    assert_eq!(dtype.itemsize(), usize::MAX);
    assert!(matches!(
        verify_dtype(&dtype),
        Err(ConvertError::Internal(_))
    ));
}

#[test]
fn scalar_dispatch_is_total() {
    let b = builtins();
    assert_eq!(
        from_scalar(&HostScalar::Int(1)),
        Mono::CType(b.int32.clone())
    );
    assert_eq!(
        from_scalar(&HostScalar::Float(2.0)),
        Mono::CType(b.float64.clone())
    );
    assert_eq!(
        from_scalar(&HostScalar::Complex(0.0, 1.0)),
        Mono::CType(b.complex128.clone())
    );
    assert_eq!(
        from_scalar(&HostScalar::Str("x".to_owned())),
        Mono::String(StringType::new())
    );
    assert_eq!(
        from_scalar(&HostScalar::TimeDelta(60)),
        Mono::CType(b.timedelta64.clone())
    );
    assert_eq!(
        from_scalar(&HostScalar::Timestamp(0)),
        Mono::CType(b.datetime64.clone())
    );
    assert_eq!(
        from_scalar(&HostScalar::Other),
        Mono::CType(b.object.clone())
    );
}
