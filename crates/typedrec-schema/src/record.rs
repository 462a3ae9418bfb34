//! # Record Construction
//!
//! Construction is the only way to obtain a [`Record`]. It runs as a
//! pipeline over owned values:
//!
//! 1. bind named or positional arguments to declared fields;
//! 2. fill unsupplied fields from their defaults;
//! 3. split construction-only values off and run the init hook;
//! 4. reconcile every stored field against its declared type, replacing
//!    raw maps with nested records where the type calls for one;
//! 5. freeze the coerced values into a `Record`.
//!
//! Nothing mutates a record after step 5.

use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};
use typedrec_core::RecordError;

use crate::registry::{InitContext, RecordSchema, SchemaRegistry};
use crate::value::{FieldValue, Record};

impl SchemaRegistry {
    /// Construct a record from values supplied by field name.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRecordType`, `UnexpectedField`, `DuplicateField` or
    /// `MissingField` for binding problems, and any validation error the
    /// reconciler raises for the stored fields.
    pub fn construct<I, K, V>(&self, record: &str, args: I) -> Result<Record, RecordError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let schema = self.schema(record)?;
        let mut bound = HashMap::new();
        for (name, value) in args {
            let name = name.into();
            if schema.field_def(&name).is_none() {
                return Err(RecordError::UnexpectedField {
                    record: schema.name().to_string(),
                    field: name,
                });
            }
            if bound.contains_key(&name) {
                return Err(RecordError::DuplicateField {
                    record: schema.name().to_string(),
                    field: name,
                });
            }
            bound.insert(name, value.into());
        }
        self.build(schema, bound)
    }

    /// Construct a record from values in field declaration order.
    /// Construction-only fields take their declared position.
    ///
    /// # Errors
    ///
    /// Returns `TooManyArguments` when more values than fields are given,
    /// plus everything [`construct`](Self::construct) can return.
    pub fn construct_positional<I, V>(&self, record: &str, args: I) -> Result<Record, RecordError>
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        let schema = self.schema(record)?;
        let values: Vec<FieldValue> = args.into_iter().map(Into::into).collect();
        if values.len() > schema.fields().len() {
            return Err(RecordError::TooManyArguments {
                record: schema.name().to_string(),
                expected: schema.fields().len(),
                found: values.len(),
            });
        }
        let bound = schema
            .fields()
            .iter()
            .zip(values)
            .map(|(def, value)| (def.name().to_string(), value))
            .collect();
        self.build(schema, bound)
    }

    /// Construct a record from the entries of a raw JSON object.
    pub(crate) fn construct_from_map(
        &self,
        record: &str,
        map: &Map<String, Value>,
    ) -> Result<Record, RecordError> {
        self.construct(
            record,
            map.iter()
                .map(|(key, value)| (key.clone(), FieldValue::from_json(value.clone()))),
        )
    }

    fn build(
        &self,
        schema: &RecordSchema,
        mut bound: HashMap<String, FieldValue>,
    ) -> Result<Record, RecordError> {
        let mut fields = Vec::new();
        let mut init_args = BTreeMap::new();

        for def in schema.fields() {
            let value = match bound.remove(def.name()) {
                Some(value) => value,
                None => def.default().cloned().ok_or_else(|| RecordError::MissingField {
                    record: schema.name().to_string(),
                    field: def.name().to_string(),
                })?,
            };
            if def.is_construction_only() {
                init_args.insert(def.name().to_string(), value);
            } else {
                fields.push((def.name().to_string(), value));
            }
        }

        if let Some(hook) = schema.init_hook() {
            let mut ctx = InitContext {
                record: schema.name(),
                fields: &mut fields,
                init_args: &init_args,
            };
            hook(&mut ctx)?;
        }

        let fields = fields
            .into_iter()
            .zip(schema.stored_fields())
            .map(|((name, value), def)| {
                let value = self.reconcile(schema.name(), &name, def.ty(), value)?;
                Ok((name, value))
            })
            .collect::<Result<Vec<_>, RecordError>>()?;

        Ok(Record::new(schema.name(), fields))
    }
}
