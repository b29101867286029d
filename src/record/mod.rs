//! The record measure: an ordered, named-field aggregate.

use crate::error::ShapeError;
use crate::mono::Mono;


/// A composite data structure of ordered fields mapped to types.
///
/// Field order is declaration order and is semantically significant
/// (it is the layout order on the host runtime side). Field names are
/// unique; duplicates are rejected at construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    fields: Vec<(String, Mono)>,
}

impl Record {
    /// Build a record from `(name, measure)` pairs.
    pub fn new<I, S>(fields: I) -> Result<Self, ShapeError>
    where
        I: IntoIterator<Item = (S, Mono)>,
        S: Into<String>,
    {
        let mut out: Vec<(String, Mono)> = Vec::new();
        for (name, ty) in fields {
            let name = name.into();
            if out.iter().any(|(existing, _)| *existing == name) {
                return Err(ShapeError::DuplicateField(name));
            }
            out.push((name, ty));
        }
        Ok(Record { fields: out })
    }

    /// The empty record.
    pub fn empty() -> Self {
        Record::default()
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// The type of a field, by name.
    pub fn get(&self, name: &str) -> Option<&Mono> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, ty)| ty)
    }

    /// Ordered `(name, type)` pairs.
    pub fn fields(&self) -> &[(String, Mono)] {
        &self.fields
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True for the empty record.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
