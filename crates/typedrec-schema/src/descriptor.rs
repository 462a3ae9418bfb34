//! # Declared Type Descriptors
//!
//! A [`TypeDescriptor`] is the declared shape of a record field. It is
//! pure data: descriptors never hold references to other schemas, only
//! record type *names*, which the registry resolves when a value is
//! validated. That lets a schema mention itself or a type that has not
//! been registered yet.
//!
//! ## Shapes
//!
//! ```text
//! Scalar(kind)          str | int | float | bool | None
//! Record(name)          nested record, constructible from a map
//! SelfReference(name)   forward reference, matched by type name
//! Collection(element)   homogeneous list with one element type
//! Union(alternatives)   any one of; Optional[T] is Union[T, None]
//! Native(kind)          bare list / dict / set / tuple (no element type)
//! TypeVar(name)         unbound placeholder element type
//! ```
//!
//! `Native` and `TypeVar` exist so that the declarations the validator
//! must reject can be expressed and reported precisely.

use std::collections::BTreeSet;
use std::fmt;

/// Scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Str,
    Int,
    Float,
    Bool,
    /// The null type, used as the second half of `Optional[T]`.
    None,
}

impl ScalarKind {
    /// Runtime type name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::None => "None",
        }
    }
}

/// Bare, unparameterized native containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeKind {
    List,
    Map,
    Set,
    Tuple,
}

impl NativeKind {
    /// Runtime type name.
    pub fn name(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Map => "dict",
            Self::Set => "set",
            Self::Tuple => "tuple",
        }
    }
}

/// The declared type of a record field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Scalar(ScalarKind),
    Record(String),
    SelfReference(String),
    Collection(Box<TypeDescriptor>),
    Union(Vec<TypeDescriptor>),
    Native(NativeKind),
    TypeVar(String),
}

impl TypeDescriptor {
    pub fn str() -> Self {
        Self::Scalar(ScalarKind::Str)
    }

    pub fn int() -> Self {
        Self::Scalar(ScalarKind::Int)
    }

    pub fn float() -> Self {
        Self::Scalar(ScalarKind::Float)
    }

    pub fn bool() -> Self {
        Self::Scalar(ScalarKind::Bool)
    }

    pub fn none() -> Self {
        Self::Scalar(ScalarKind::None)
    }

    /// A nested record type.
    pub fn record(name: impl Into<String>) -> Self {
        Self::Record(name.into())
    }

    /// A forward reference to a record type by name.
    pub fn self_ref(name: impl Into<String>) -> Self {
        Self::SelfReference(name.into())
    }

    /// `List[element]`.
    pub fn list(element: TypeDescriptor) -> Self {
        Self::Collection(Box::new(element))
    }

    /// `Union[alternatives...]`.
    pub fn union(alternatives: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        Self::Union(alternatives.into_iter().collect())
    }

    /// `Optional[inner]`, i.e. `Union[inner, None]`.
    pub fn optional(inner: TypeDescriptor) -> Self {
        Self::Union(vec![inner, Self::none()])
    }

    /// A bare native container.
    pub fn native(kind: NativeKind) -> Self {
        Self::Native(kind)
    }

    /// An unbound type variable, e.g. the `T` of an unparameterized `List`.
    pub fn type_var(name: impl Into<String>) -> Self {
        Self::TypeVar(name.into())
    }

    /// The record type name this descriptor constructs from a map, if any.
    pub fn record_name(&self) -> Option<&str> {
        match self {
            Self::Record(name) | Self::SelfReference(name) => Some(name),
            _ => None,
        }
    }

    /// True when this descriptor is a bare native container, looking
    /// through any number of `Collection` layers.
    pub fn uses_native_collection(&self) -> bool {
        match self {
            Self::Collection(element) => element.uses_native_collection(),
            Self::Native(_) => true,
            _ => false,
        }
    }

    /// Every record type name mentioned anywhere in this descriptor.
    pub fn referenced_records(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        self.collect_records(&mut names);
        names
    }

    fn collect_records<'a>(&'a self, names: &mut BTreeSet<&'a str>) {
        match self {
            Self::Record(name) | Self::SelfReference(name) => {
                names.insert(name);
            }
            Self::Collection(element) => element.collect_records(names),
            Self::Union(alternatives) => {
                for alternative in alternatives {
                    alternative.collect_records(names);
                }
            }
            Self::Scalar(_) | Self::Native(_) | Self::TypeVar(_) => {}
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => f.write_str(kind.name()),
            Self::Record(name) => f.write_str(name),
            Self::SelfReference(name) => write!(f, "'{name}'"),
            Self::Collection(element) => write!(f, "List[{element}]"),
            Self::Union(alternatives) => {
                f.write_str("Union[")?;
                for (i, alternative) in alternatives.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{alternative}")?;
                }
                f.write_str("]")
            }
            Self::Native(kind) => f.write_str(kind.name()),
            Self::TypeVar(name) => write!(f, "~{name}"),
        }
    }
}
