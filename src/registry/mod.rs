//! The user-facing type naming table.
//!
//! The builtin kinds live in the immutable [`crate::ctype::builtins`]
//! table; this registry holds the names a caller introduces at runtime
//! (named composites, published element types). It is an ordinary value
//! with explicit scope, typically owned by a parser environment, so
//! ordinary value construction never mutates process-wide state.
//!
//! # Design
//!
//! - `BTreeMap` storage for deterministic iteration order
//! - First writer wins: a later registration under a live name fails
//! - No removal; the table only grows

use std::collections::BTreeMap;

use crate::ctype::{builtins, CType};
use crate::error::ShapeError;
use crate::mono::Mono;
use crate::shape::Shape;


/// Name → type mapping for caller-introduced types.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    entries: BTreeMap<String, Shape>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        TypeRegistry::default()
    }

    /// Insert a type under `name`.
    ///
    /// Fails with a duplicate-name condition when the name is already
    /// taken, either here or by a builtin; the first entry is retained.
    pub fn register(&mut self, name: &str, shape: Shape) -> Result<(), ShapeError> {
        if self.entries.contains_key(name) || builtins().lookup(name).is_some() {
            return Err(ShapeError::DuplicateName(name.to_owned()));
        }
        tracing::debug!(name, "registered type");
        self.entries.insert(name.to_owned(), shape);
        Ok(())
    }

    /// Publish an element type under its own name.
    pub fn publish_ctype(&mut self, ctype: &CType) -> Result<(), ShapeError> {
        let name = ctype.name().to_owned();
        self.register(&name, Shape::Unit(Mono::CType(ctype.clone())))
    }

    /// Look up a registered type. Does not consult the builtin table.
    pub fn lookup(&self, name: &str) -> Result<&Shape, ShapeError> {
        self.entries
            .get(name)
            .ok_or_else(|| ShapeError::NotFound(name.to_owned()))
    }

    /// Resolve a name against this registry, falling back to builtins.
    pub fn resolve(&self, name: &str) -> Result<Shape, ShapeError> {
        if let Some(shape) = self.entries.get(name) {
            return Ok(shape.clone());
        }
        builtins()
            .lookup(name)
            .map(|mono| Shape::Unit(mono.clone()))
            .ok_or_else(|| ShapeError::NotFound(name.to_owned()))
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
