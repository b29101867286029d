#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::ctype::builtins;
use crate::mono::{Fixed, TypeVar};
use crate::record::Record;

fn int32() -> Mono {
    Mono::CType(builtins().int32.clone())
}

fn fixed(val: usize) -> Mono {
    Mono::Fixed(Fixed(val))
}

fn var(symbol: &str) -> Mono {
    Mono::Var(TypeVar::new(symbol))
}

#[test]
fn construction_splits_dims_and_measure() {
    let ds = DataShape::new([fixed(3), fixed(2), int32()]).unwrap();
    assert_eq!(ds.len(), 3);
    assert_eq!(ds.dims(), &[fixed(3), fixed(2)]);
    assert_eq!(ds.measure(), &int32());
    assert_eq!(ds.shape(), Some(vec![3, 2]));
}

#[test]
fn needs_at_least_two_parameters() {
    assert_eq!(
        DataShape::new([int32()]),
        Err(ShapeError::TooFewParameters { got: 1 })
    );
    assert_eq!(
        DataShape::new(Vec::<Mono>::new()),
        Err(ShapeError::TooFewParameters { got: 0 })
    );
}

#[test]
fn dimension_in_measure_position_fails() {
    assert_eq!(
        DataShape::new([fixed(3), fixed(2)]),
        Err(ShapeError::MeasureExpected {
            position: 1,
            found: "2".to_owned(),
        })
    );
}

#[test]
fn measure_in_dimension_position_fails() {
    assert_eq!(
        DataShape::new([int32(), int32()]),
        Err(ShapeError::DimensionExpected {
            position: 0,
            found: "int32".to_owned(),
        })
    );
}

#[test]
fn contextual_types_are_valid_in_both_positions() {
    // A free variable may serve as an axis or as the measure.
    let as_dim = DataShape::new([var("a"), int32()]).unwrap();
    assert_eq!(as_dim.dims(), &[var("a")]);

    let as_measure = DataShape::new([fixed(3), var("a")]).unwrap();
    assert_eq!(as_measure.measure(), &var("a"));
}

#[test]
fn composite_parameters_are_spliced_in_place() {
    let inner = DataShape::new([fixed(2), var("a")]).unwrap();
    let outer = DataShape::new([
        Shape::Unit(fixed(3)),
        Shape::Composite(inner),
        Shape::Unit(int32()),
    ])
    .unwrap();
    assert_eq!(outer.params(), &[fixed(3), fixed(2), var("a"), int32()]);
}

#[test]
fn itemsize_and_strides_for_fixed_shape() {
    // 3 x 2 x int32: 24 bytes per outer element, strides (8, 4).
    let ds = DataShape::new([fixed(3), fixed(2), int32()]).unwrap();
    assert_eq!(ds.c_itemsize(), Some(24));
    assert_eq!(ds.c_strides(), &[Some(8), Some(4)]);
}

#[test]
fn unknown_axis_poisons_outer_strides_only() {
    // The innermost stride is still the measure width; everything
    // outward from the variable axis is unknown.
    let ds = DataShape::new([fixed(3), var("a"), int32()]).unwrap();
    assert_eq!(ds.c_itemsize(), None);
    assert_eq!(ds.c_strides(), &[None, Some(4)]);
}

#[test]
fn variable_axis_has_no_static_itemsize() {
    let ds = DataShape::new([var("a"), int32()]).unwrap();
    assert_eq!(ds.c_itemsize(), None);
    assert_eq!(ds.c_strides(), &[Some(4)]);
}

#[test]
fn overflowing_axis_product_degrades_to_unknown_layout() {
    // Individually valid axes whose byte count exceeds usize; the
    // overflowing running size becomes unknown, never wraps.
    let ds = DataShape::new([fixed(usize::MAX / 2), fixed(3), int32()]).unwrap();
    assert_eq!(ds.c_itemsize(), None);
    assert_eq!(ds.c_strides(), &[Some(12), Some(4)]);

    // With a further outer axis the unknown size poisons its stride too.
    let outer = DataShape::new([fixed(2), fixed(usize::MAX / 2), fixed(3), int32()]).unwrap();
    assert_eq!(outer.c_itemsize(), None);
    assert_eq!(outer.c_strides(), &[None, Some(12), Some(4)]);
}

#[test]
fn measure_without_static_width_has_no_itemsize() {
    let rec = Record::new([("x", int32())]).unwrap();
    let ds = DataShape::new([fixed(3), Mono::Record(rec)]).unwrap();
    assert_eq!(ds.c_itemsize(), None);
    assert_eq!(ds.c_strides(), &[None]);
}

#[test]
fn product_concatenates_unit_operands() {
    let ds = product(fixed(3), product(fixed(2), int32()).unwrap()).unwrap();
    assert_eq!(ds.params(), &[fixed(3), fixed(2), int32()]);
}

#[test]
fn product_coerces_integers_to_constants() {
    let ds = product(2i64, int32()).unwrap();
    assert_eq!(ds.params(), &[Mono::IntegerConstant(2), int32()]);
}

#[test]
fn product_rejects_malformed_composition() {
    // Two dimensions with no measure is not a valid composite.
    assert!(product(fixed(3), fixed(2)).is_err());
}

#[test]
fn product_is_associative() {
    let a = fixed(3);
    let b = DataShape::new([fixed(2), var("x")]).unwrap();
    let c = int32();

    let left = product(product(a.clone(), b.clone()).unwrap(), c.clone()).unwrap();
    let right = product(a, product(b, c).unwrap()).unwrap();
    assert_eq!(left.params(), right.params());
    assert_eq!(left, right);
}

#[test]
fn structural_equality_ignores_cached_layout() {
    let a = DataShape::new([fixed(3), int32()]).unwrap();
    let b = product(fixed(3), int32()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn flatten_is_restartable_and_one_level() {
    let inner = DataShape::new([fixed(2), var("a")]).unwrap();
    let params = vec![Shape::Unit(fixed(3)), Shape::Composite(inner)];

    let once: Vec<Mono> = flatten(params.clone()).collect();
    let twice: Vec<Mono> = flatten(params).collect();
    assert_eq!(once, vec![fixed(3), fixed(2), var("a")]);
    assert_eq!(once, twice);
}

#[test]
fn simple_and_table_predicates() {
    let plain = DataShape::new([fixed(3), int32()]).unwrap();
    assert!(is_simple(&Shape::Composite(plain.clone())));
    assert!(array_like(&plain));
    assert!(!table_like(&plain));

    let rec = Record::new([("x", int32())]).unwrap();
    let table = DataShape::new([fixed(3), Mono::Record(rec)]).unwrap();
    assert!(table_like(&table));
    assert!(!array_like(&table));
    assert!(!is_simple(&Shape::Composite(table)));

    assert!(is_simple(&Shape::Unit(int32())));
    assert!(!is_simple(&Shape::Unit(Mono::Blob)));
}

// Operand strategies for the associativity property: left/middle
// operands are dimension-shaped (unit or composite ending in a free
// variable), the right operand terminates in a measure.
fn dim_operand() -> impl Strategy<Value = Shape> {
    prop_oneof![
        (1usize..10).prop_map(|n| Shape::Unit(fixed(n))),
        (1usize..10).prop_map(|n| {
            Shape::Composite(DataShape::new([fixed(n), var("x")]).unwrap())
        }),
    ]
}

fn measure_operand() -> impl Strategy<Value = Shape> {
    prop_oneof![
        Just(Shape::Unit(int32())),
        (1usize..10).prop_map(|n| {
            Shape::Composite(DataShape::new([fixed(n), int32()]).unwrap())
        }),
    ]
}

proptest! {
    #[test]
    fn product_is_associative_for_any_operand_mix(
        a in dim_operand(),
        b in dim_operand(),
        c in measure_operand(),
    ) {
        let left = product(product(a.clone(), b.clone()).unwrap(), c.clone()).unwrap();
        let right = product(a, product(b, c).unwrap()).unwrap();
        prop_assert_eq!(left.params(), right.params());
    }
}
