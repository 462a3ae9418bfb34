//! # Type Reconciler
//!
//! Reconciles a field's runtime value against its declared
//! [`TypeDescriptor`]. It consumes the raw value and returns the value the
//! record will store: unchanged when it already conforms, or with raw maps
//! replaced by nested records when the declared type is constructible from
//! a map.
//!
//! ## Rules
//!
//! Checked in this order:
//!
//! 1. `null` is never validated.
//! 2. A self-reference to the owning type must hold a record of that type.
//! 3. A union must hold a value conforming to one of its alternatives. A
//!    list is first reconciled against each collection alternative in
//!    turn, as in rule 4.
//! 4. A list declared as a collection must name its element type, must not
//!    use native containers as elements, must not hold empty maps, and
//!    after coercing map elements every element must match.
//! 5. Any other value must conform to the declared type. Raw maps are
//!    turned into the declared record type; everything else is a mismatch.
//!
//! Scalars are never coerced. A `bool` supplied for a `str` field, or an
//! `int` for a `float`, is an error.

use serde_json::{Map, Value};
use typedrec_core::RecordError;

use crate::descriptor::{NativeKind, ScalarKind, TypeDescriptor};
use crate::registry::SchemaRegistry;
use crate::value::FieldValue;

impl SchemaRegistry {
    /// Reconcile `value` against the declared type of `owner.field`.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch`, `NativeCollectionMisuse`,
    /// `MissingElementType`, `EmptyNestedObject`, `ListShapeMismatch` or
    /// `NestedConstructionFailure` as described in the module docs, and
    /// propagates construction errors of list elements unchanged.
    pub fn reconcile(
        &self,
        owner: &str,
        field: &str,
        declared: &TypeDescriptor,
        value: FieldValue,
    ) -> Result<FieldValue, RecordError> {
        if value.is_null() {
            return Ok(value);
        }

        match declared {
            TypeDescriptor::SelfReference(name) if name == owner => {
                if conforms(&value, declared) {
                    return Ok(value);
                }
                return match value {
                    FieldValue::Map(map) => {
                        self.coerce_map(owner, field, declared, Some(name.as_str()), &map)
                    }
                    other => Err(type_mismatch(owner, field, owner, &other)),
                };
            }
            TypeDescriptor::Union(alternatives) => {
                let has_collection = alternatives
                    .iter()
                    .any(|alt| matches!(alt, TypeDescriptor::Collection(_)));
                return match (value, construction_target(declared)) {
                    (FieldValue::List(items), _) if has_collection => {
                        self.reconcile_union_list(owner, field, declared, alternatives, items)
                    }
                    (value, _) if alternatives.iter().any(|alt| conforms(&value, alt)) => {
                        Ok(value)
                    }
                    (FieldValue::Map(map), Some(target)) => {
                        self.coerce_map(owner, field, declared, Some(target), &map)
                    }
                    (other, _) => Err(type_mismatch(owner, field, declared, &other)),
                };
            }
            _ => {}
        }

        match (value, declared) {
            (FieldValue::List(_), TypeDescriptor::Native(NativeKind::List)) => {
                Err(RecordError::MissingElementType {
                    record: owner.to_string(),
                    field: field.to_string(),
                    declared: declared.to_string(),
                })
            }
            (FieldValue::List(items), TypeDescriptor::Collection(element)) => {
                self.reconcile_collection(owner, field, declared, element, items)
            }
            (value, _) if conforms(&value, declared) => Ok(value),
            (FieldValue::Map(map), _) => {
                if matches!(
                    declared,
                    TypeDescriptor::Collection(_) | TypeDescriptor::Native(_)
                ) {
                    return Err(native_misuse(owner, field, declared));
                }
                self.coerce_map(owner, field, declared, declared.record_name(), &map)
            }
            (other, _) => Err(type_mismatch(owner, field, declared, &other)),
        }
    }

    fn reconcile_collection(
        &self,
        owner: &str,
        field: &str,
        declared: &TypeDescriptor,
        element: &TypeDescriptor,
        items: Vec<FieldValue>,
    ) -> Result<FieldValue, RecordError> {
        if matches!(element, TypeDescriptor::TypeVar(_)) {
            return Err(RecordError::MissingElementType {
                record: owner.to_string(),
                field: field.to_string(),
                declared: declared.to_string(),
            });
        }
        if element.uses_native_collection() {
            return Err(native_misuse(owner, field, declared));
        }

        let target = construction_target(element);
        let mut coerced = Vec::with_capacity(items.len());
        for item in items {
            let item = match item {
                FieldValue::Map(map) if map.is_empty() => {
                    return Err(RecordError::EmptyNestedObject {
                        record: owner.to_string(),
                        field: field.to_string(),
                    });
                }
                FieldValue::Map(map) => match target {
                    Some(target) => {
                        tracing::trace!(record = owner, field, target, "coercing list element");
                        FieldValue::Record(self.construct_from_map(target, &map)?)
                    }
                    None => FieldValue::Map(map),
                },
                other => other,
            };
            coerced.push(item);
        }

        let value = FieldValue::List(coerced);
        if conforms(&value, declared) {
            Ok(value)
        } else {
            Err(RecordError::ListShapeMismatch {
                record: owner.to_string(),
                field: field.to_string(),
                value: value.to_string(),
                declared: declared.to_string(),
            })
        }
    }

    /// A list given for a union is reconciled against each collection
    /// alternative in order and the first that succeeds wins. Failing that,
    /// another alternative may still accept the list as is. With a single
    /// collection alternative its error is returned unchanged.
    fn reconcile_union_list(
        &self,
        owner: &str,
        field: &str,
        declared: &TypeDescriptor,
        alternatives: &[TypeDescriptor],
        items: Vec<FieldValue>,
    ) -> Result<FieldValue, RecordError> {
        let collections: Vec<(&TypeDescriptor, &TypeDescriptor)> = alternatives
            .iter()
            .filter_map(|alt| match alt {
                TypeDescriptor::Collection(element) => Some((alt, element.as_ref())),
                _ => None,
            })
            .collect();

        let mut last_err = None;
        for (alternative, element) in &collections {
            match self.reconcile_collection(owner, field, alternative, element, items.clone()) {
                Ok(value) => return Ok(value),
                Err(err) => last_err = Some(err),
            }
        }

        let value = FieldValue::List(items);
        if alternatives.iter().any(|alt| {
            !matches!(alt, TypeDescriptor::Collection(_)) && conforms(&value, alt)
        }) {
            return Ok(value);
        }
        match (collections.len(), last_err) {
            (1, Some(err)) => Err(err),
            _ => Err(type_mismatch(owner, field, declared, &value)),
        }
    }

    fn coerce_map(
        &self,
        owner: &str,
        field: &str,
        declared: &TypeDescriptor,
        target: Option<&str>,
        map: &Map<String, Value>,
    ) -> Result<FieldValue, RecordError> {
        let constructed = match target {
            Some(target) => self.construct_from_map(target, map),
            None => Err(RecordError::TypeMismatch {
                record: owner.to_string(),
                field: field.to_string(),
                expected: declared.to_string(),
                actual: "dict".to_string(),
                value: Value::Object(map.clone()).to_string(),
            }),
        };
        match constructed {
            Ok(record) => {
                tracing::trace!(record = owner, field, target = record.type_name(), "coerced map into nested record");
                Ok(FieldValue::Record(record))
            }
            Err(source) => Err(RecordError::NestedConstructionFailure {
                record: owner.to_string(),
                field: field.to_string(),
                declared: declared.to_string(),
                value: Value::Object(map.clone()).to_string(),
                source: Box::new(source),
            }),
        }
    }
}

/// Runtime type check, without coercion. Lists are checked element by
/// element; record-typed elements match by record type name.
pub fn conforms(value: &FieldValue, declared: &TypeDescriptor) -> bool {
    match (declared, value) {
        (TypeDescriptor::Scalar(kind), value) => matches!(
            (kind, value),
            (ScalarKind::Str, FieldValue::Str(_))
                | (ScalarKind::Int, FieldValue::Int(_))
                | (ScalarKind::Float, FieldValue::Float(_))
                | (ScalarKind::Bool, FieldValue::Bool(_))
                | (ScalarKind::None, FieldValue::Null)
        ),
        (
            TypeDescriptor::Record(name) | TypeDescriptor::SelfReference(name),
            FieldValue::Record(record),
        ) => record.type_name() == name,
        (TypeDescriptor::Collection(element), FieldValue::List(items)) => {
            items.iter().all(|item| conforms(item, element))
        }
        (TypeDescriptor::Union(alternatives), value) => {
            alternatives.iter().any(|alt| conforms(value, alt))
        }
        (TypeDescriptor::Native(NativeKind::List), FieldValue::List(_)) => true,
        (TypeDescriptor::Native(NativeKind::Map), FieldValue::Map(_)) => true,
        _ => false,
    }
}

/// The record type a raw map should be turned into for `declared`: the
/// record itself, or the single record alternative of a union. Unions with
/// several record alternatives are ambiguous and have no target.
fn construction_target(declared: &TypeDescriptor) -> Option<&str> {
    match declared {
        TypeDescriptor::Union(alternatives) => {
            let mut records = alternatives.iter().filter_map(TypeDescriptor::record_name);
            match (records.next(), records.next()) {
                (Some(only), None) => Some(only),
                _ => None,
            }
        }
        other => other.record_name(),
    }
}

fn type_mismatch(
    owner: &str,
    field: &str,
    expected: impl std::fmt::Display,
    value: &FieldValue,
) -> RecordError {
    RecordError::TypeMismatch {
        record: owner.to_string(),
        field: field.to_string(),
        expected: expected.to_string(),
        actual: value.type_name().to_string(),
        value: value.to_string(),
    }
}

fn native_misuse(owner: &str, field: &str, declared: &TypeDescriptor) -> RecordError {
    RecordError::NativeCollectionMisuse {
        record: owner.to_string(),
        field: field.to_string(),
        declared: declared.to_string(),
    }
}
