//! # Schema Registry
//!
//! Record types carry an explicit, queryable schema: an ordered list of
//! [`FieldDef`]s registered under the record type name. The registry is
//! the side-table every validation and conversion consults.
//!
//! ## Two-Phase Registration
//!
//! Field descriptors refer to other record types by name only, so schemas
//! can be registered in any order, including self-referential and
//! mutually recursive ones. Names are resolved lazily when a value is
//! validated. Once every type has been declared,
//! [`SchemaRegistry::unresolved_references`] lists any name that still
//! has no schema.
//!
//! ## Thread Safety
//!
//! `SchemaRegistry` is `Send + Sync`. Registration takes `&mut self`;
//! construction and conversion only read it.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use typedrec_core::RecordError;

use crate::descriptor::TypeDescriptor;
use crate::value::FieldValue;

/// A single declared field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    name: String,
    ty: TypeDescriptor,
    default: Option<FieldValue>,
    construction_only: bool,
}

impl FieldDef {
    /// A required stored field.
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            construction_only: false,
        }
    }

    /// Give the field a default used when construction does not supply it.
    pub fn with_default(mut self, default: impl Into<FieldValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Mark the field as construction-only: it is accepted by construction
    /// and handed to the init hook, but never stored or serialized.
    pub fn construction_only(mut self) -> Self {
        self.construction_only = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &TypeDescriptor {
        &self.ty
    }

    pub fn default(&self) -> Option<&FieldValue> {
        self.default.as_ref()
    }

    pub fn is_construction_only(&self) -> bool {
        self.construction_only
    }

    /// Construction-only without a default.
    pub fn is_required_construction_only(&self) -> bool {
        self.construction_only && self.default.is_none()
    }
}

/// Initialization hook run after arguments are bound and before the
/// stored fields are validated.
pub type InitHook = Arc<dyn Fn(&mut InitContext<'_>) -> Result<(), RecordError> + Send + Sync>;

/// What an [`InitHook`] sees: construction-only values and mutable access
/// to the stored fields that are about to be validated.
pub struct InitContext<'a> {
    pub(crate) record: &'a str,
    pub(crate) fields: &'a mut Vec<(String, FieldValue)>,
    pub(crate) init_args: &'a BTreeMap<String, FieldValue>,
}

impl InitContext<'_> {
    /// Record type under construction.
    pub fn record(&self) -> &str {
        self.record
    }

    /// Value bound to a construction-only field.
    pub fn init_arg(&self, name: &str) -> Option<&FieldValue> {
        self.init_args.get(name)
    }

    /// Current value of a stored field.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Overwrite a stored field.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::UnexpectedField` if `field` is not a stored
    /// field of this record.
    pub fn set(&mut self, field: &str, value: impl Into<FieldValue>) -> Result<(), RecordError> {
        match self.fields.iter_mut().find(|(name, _)| name == field) {
            Some((_, slot)) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(RecordError::UnexpectedField {
                record: self.record.to_string(),
                field: field.to_string(),
            }),
        }
    }
}

/// The schema of one record type.
#[derive(Clone)]
pub struct RecordSchema {
    name: String,
    fields: Vec<FieldDef>,
    init_hook: Option<InitHook>,
}

impl fmt::Debug for RecordSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordSchema")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("init_hook", &self.init_hook.as_ref().map(|_| "<hook>"))
            .finish()
    }
}

impl RecordSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            init_hook: None,
        }
    }

    /// Append a field. Declaration order is the positional order and the
    /// key order of every map produced from the record.
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Install the init hook.
    pub fn on_init<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut InitContext<'_>) -> Result<(), RecordError> + Send + Sync + 'static,
    {
        self.init_hook = Some(Arc::new(hook));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn field_def(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub(crate) fn init_hook(&self) -> Option<&InitHook> {
        self.init_hook.as_ref()
    }

    /// Stored (non construction-only) fields.
    pub fn stored_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| !f.construction_only)
    }
}

/// Registry of record schemas, keyed by record type name.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Arc<RecordSchema>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a record schema.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::DuplicateField` if the schema declares the
    /// same field name twice.
    pub fn register(&mut self, schema: RecordSchema) -> Result<(), RecordError> {
        let mut seen = BTreeSet::new();
        for field in &schema.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(RecordError::DuplicateField {
                    record: schema.name.clone(),
                    field: field.name.clone(),
                });
            }
        }
        tracing::debug!(record = %schema.name, fields = schema.fields.len(), "registered record schema");
        self.schemas.insert(schema.name.clone(), Arc::new(schema));
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, schema: RecordSchema) -> Result<Self, RecordError> {
        self.register(schema)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&RecordSchema> {
        self.schemas.get(name).map(Arc::as_ref)
    }

    /// Look up a schema, failing for unknown names.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::UnknownRecordType` if `name` is not registered.
    pub fn schema(&self, name: &str) -> Result<&RecordSchema, RecordError> {
        self.get(name)
            .ok_or_else(|| RecordError::UnknownRecordType(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Names of all registered record types, sorted.
    pub fn record_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Record type names referenced by some field but never registered.
    pub fn unresolved_references(&self) -> BTreeSet<String> {
        self.schemas
            .values()
            .flat_map(|schema| schema.fields.iter())
            .flat_map(|field| field.ty.referenced_records())
            .filter(|name| !self.schemas.contains_key(*name))
            .map(str::to_string)
            .collect()
    }
}
