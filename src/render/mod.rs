//! Canonical textual rendering.
//!
//! Every monotype and composite renders to a canonical form that is both
//! the human display and a re-parseable type expression: constructor-call
//! syntax `Name(args...)` for atoms, comma-joined parameters for
//! composites, `{ name : type; ... }` for records. Collaborators rely on
//! this form for round-tripping, so the output is byte-stable.

use std::fmt;

use crate::ctype::CType;
use crate::mono::{Fixed, Mono, Range, TypeVar};
use crate::record::Record;
use crate::shape::{DataShape, Shape};
use crate::string_type::{Encoding, StringType};


impl fmt::Display for Mono {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mono::Null => f.write_str("null"),
            Mono::Dynamic => f.write_str("?"),
            Mono::Top => f.write_str("top"),
            Mono::Blob => f.write_str("blob"),
            Mono::IntegerConstant(val) => write!(f, "{val}"),
            Mono::StringConstant(val) => write!(f, "'{val}'"),
            Mono::CType(ct) => write!(f, "{ct}"),
            Mono::String(st) => write!(f, "{st}"),
            Mono::Varchar(maxlen) => write!(f, "varchar(maxlen={maxlen})"),
            Mono::Fixed(fixed) => write!(f, "{fixed}"),
            Mono::Var(var) => write!(f, "{var}"),
            Mono::Range(range) => write!(f, "{range}"),
            Mono::Either(a, b) => write!(f, "Either({a},{b})"),
            Mono::Option(ty) => write!(f, "Option({ty})"),
            Mono::Factor(params) => braces(f, params),
            Mono::Union(params) => braces(f, params),
            Mono::Record(rec) => write!(f, "{rec}"),
        }
    }
}

/// C-style enumeration syntax: `{a,b,c}`.
fn braces(f: &mut fmt::Formatter<'_>, params: &[Mono]) -> fmt::Result {
    f.write_str("{")?;
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{param}")?;
    }
    f.write_str("}")
}

impl fmt::Display for CType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl fmt::Display for TypeVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upper() {
            Some(upper) => write!(f, "Range({},{upper})", self.lower()),
            None => write!(f, "Range({},inf)", self.lower()),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical())
    }
}

impl fmt::Display for StringType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.fixlen(), self.encoding()) {
            (None, Encoding::Utf8) => f.write_str("string"),
            (Some(len), Encoding::Utf8) => write!(f, "string({len})"),
            (None, enc) => write!(f, "string('{enc}')"),
            (Some(len), enc) => write!(f, "string({len}, '{enc}')"),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{ ")?;
        for (i, (name, ty)) in self.fields().iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{name} : {ty}")?;
        }
        f.write_str(" }")
    }
}

impl fmt::Display for DataShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name() {
            return f.write_str(name);
        }
        for (i, param) in self.params().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Unit(mono) => write!(f, "{mono}"),
            Shape::Composite(ds) => write!(f, "{ds}"),
        }
    }
}
