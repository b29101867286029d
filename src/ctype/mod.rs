//! Canonical element types and the builtin table.
//!
//! A [`CType`] is a measure with a globally unique name and a fixed byte
//! width. Construction is pure; publishing a type under its name is a
//! separate, explicit registry operation.
//!
//! The builtin kinds live in an immutable [`Builtins`] table, populated
//! once behind a `OnceLock` and read-only thereafter. User-named types go
//! in the explicitly-scoped [`crate::registry::TypeRegistry`] instead.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use crate::error::ShapeError;
use crate::mono::{Mono, Range};
use crate::string_type::StringType;


/// A sized element type mapping uniquely to a native type.
///
/// Equality is name-based only; the width is implied by the name.
#[derive(Clone, Debug, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CType {
    name: String,
    itemsize: usize,
}

impl CType {
    /// Create an element type. Pure: no registry mutation.
    pub fn new(name: &str, itemsize: usize) -> Self {
        CType {
            name: name.to_owned(),
            itemsize,
        }
    }

    /// Look up a builtin element type by name.
    ///
    /// Accepts the alias spellings (`int`, `float`, `double`) as well as
    /// the canonical names. Fails when the name is unknown or names a
    /// non-element builtin such as `blob`.
    pub fn from_name(name: &str) -> Result<&'static CType, ShapeError> {
        match builtins().lookup(name) {
            Some(Mono::CType(ct)) => Ok(ct),
            _ => Err(ShapeError::NotFound(name.to_owned())),
        }
    }

    /// The unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The size of one element of this type.
    pub fn itemsize(&self) -> usize {
        self.itemsize
    }
}

impl PartialEq for CType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl std::hash::Hash for CType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// The immutable table of builtin unit types.
///
/// Typed fields give infallible access to each kind; the name map backs
/// [`Builtins::lookup`] and includes the alias spellings.
#[allow(missing_docs)]
pub struct Builtins {
    pub bool_: CType,
    pub char: CType,

    pub int8: CType,
    pub int16: CType,
    pub int32: CType,
    pub int64: CType,

    pub uint8: CType,
    pub uint16: CType,
    pub uint32: CType,
    pub uint64: CType,

    pub float16: CType,
    pub float32: CType,
    pub float64: CType,
    pub float128: CType,

    pub complex64: CType,
    pub complex128: CType,
    pub complex256: CType,

    pub timedelta64: CType,
    pub datetime64: CType,

    pub void: CType,
    /// Opaque host-object type, pointer-sized.
    pub object: CType,

    by_name: FxHashMap<&'static str, Mono>,
}

impl Builtins {
    fn build() -> Self {
        let ct = CType::new;
        let ptr_size = std::mem::size_of::<usize>();

        let mut builtins = Builtins {
            bool_: ct("bool", 1),
            char: ct("char", 1),
            int8: ct("int8", 1),
            int16: ct("int16", 2),
            int32: ct("int32", 4),
            int64: ct("int64", 8),
            uint8: ct("uint8", 1),
            uint16: ct("uint16", 2),
            uint32: ct("uint32", 4),
            uint64: ct("uint64", 8),
            float16: ct("float16", 2),
            float32: ct("float32", 4),
            float64: ct("float64", 8),
            float128: ct("float128", 16),
            complex64: ct("complex64", 8),
            complex128: ct("complex128", 16),
            complex256: ct("complex256", 32),
            timedelta64: ct("timedelta64", 8),
            datetime64: ct("datetime64", 8),
            void: ct("void", 0),
            object: ct("object", ptr_size),
            by_name: FxHashMap::default(),
        };

        let ctypes = [
            &builtins.bool_,
            &builtins.char,
            &builtins.int8,
            &builtins.int16,
            &builtins.int32,
            &builtins.int64,
            &builtins.uint8,
            &builtins.uint16,
            &builtins.uint32,
            &builtins.uint64,
            &builtins.float16,
            &builtins.float32,
            &builtins.float64,
            &builtins.float128,
            &builtins.complex64,
            &builtins.complex128,
            &builtins.complex256,
            &builtins.timedelta64,
            &builtins.datetime64,
            &builtins.void,
            &builtins.object,
        ];
        let mut by_name = FxHashMap::default();
        for ctype in ctypes {
            // Builtin names are distinct by construction.
            by_name.insert(leak(ctype.name()), Mono::CType(ctype.clone()));
        }

        // C-style alias spellings.
        by_name.insert("int", Mono::CType(builtins.int32.clone()));
        by_name.insert("float", Mono::CType(builtins.float32.clone()));
        by_name.insert("double", Mono::CType(builtins.float64.clone()));

        // Non-element builtins.
        by_name.insert("NA", Mono::Null);
        by_name.insert("?", Mono::Dynamic);
        by_name.insert("top", Mono::Top);
        by_name.insert("blob", Mono::Blob);
        by_name.insert("string", Mono::String(StringType::new()));
        by_name.insert("Stream", Mono::Range(Range::unbounded(0)));

        builtins.by_name = by_name;
        builtins
    }

    /// Look up any builtin (element type or alias) by name.
    pub fn lookup(&self, name: &str) -> Option<&Mono> {
        self.by_name.get(name)
    }

    /// Iterate over all registered builtin names, unordered.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.by_name.keys().copied()
    }
}

// Map keys must outlive the table; builtin names are created exactly once.
fn leak(name: &str) -> &'static str {
    Box::leak(name.to_owned().into_boxed_str())
}

/// The process-wide builtin table, built on first access.
pub fn builtins() -> &'static Builtins {
    static TABLE: OnceLock<Builtins> = OnceLock::new();
    TABLE.get_or_init(Builtins::build)
}
