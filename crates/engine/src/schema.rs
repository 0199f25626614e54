//! Schema registry and index encoders
//!
//! A schema ties a document type to:
//! - an optional parse hook that validates (and may normalize) payloads
//! - an encoder that derives `sk1..sk4` and `text` from a payload
//! - a decode table naming each bound slot with an application alias
//!
//! The engine itself never reads the decode table. Only the schema-aware
//! [`Collection`](crate::Collection) uses it, to translate alias keys in
//! queries into slot names.

use crate::query::IndexKey;
use docket_core::job::{NAME_SLOT, RUN_AFTER_SLOT, STATUS_SLOT};
use docket_core::{DocketError, DocketResult, Payload, SlotKey, Slots};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Payload validation hook; the error text is reported as `InvalidInput`
pub type ParseHook = Arc<dyn Fn(Payload) -> Result<Payload, String> + Send + Sync>;

/// Payload to slot values
pub type Encoder = Arc<dyn Fn(&Payload) -> Slots + Send + Sync>;

/// Alias and description for one bound slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotBinding {
    /// Application field name
    pub alias: String,
    /// Human-readable description
    pub description: String,
}

/// A registered document schema
#[derive(Clone)]
pub struct SchemaDefinition {
    name: String,
    version: String,
    description: Option<String>,
    parse: Option<ParseHook>,
    encode: Encoder,
    bindings: Vec<(SlotKey, SlotBinding)>,
    read_only: bool,
}

impl SchemaDefinition {
    /// Schema named `name` at `version`, encoding payloads with `encode`
    pub fn new<F>(name: impl Into<String>, version: impl Into<String>, encode: F) -> Self
    where
        F: Fn(&Payload) -> Slots + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            version: version.into(),
            description: None,
            parse: None,
            encode: Arc::new(encode),
            bindings: Vec::new(),
            read_only: false,
        }
    }

    /// Set a description
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Refuse collection writes; the documents are owned by another writer
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Whether collection writes are refused
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Run `parse` on every payload before encoding
    pub fn parse_with<F>(mut self, parse: F) -> Self
    where
        F: Fn(Payload) -> Result<Payload, String> + Send + Sync + 'static,
    {
        self.parse = Some(Arc::new(parse));
        self
    }

    /// Bind `slot` to an application alias
    ///
    /// Conflicting bindings are reported by [`SchemaRegistry::register`].
    pub fn bind(
        mut self,
        slot: SlotKey,
        alias: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.bindings.push((
            slot,
            SlotBinding {
                alias: alias.into(),
                description: description.into(),
            },
        ));
        self
    }

    /// Schema name, stored as the document `type`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version recorded on documents written through this schema
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Optional description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Validate a payload with the parse hook, if any
    pub fn parse(&self, payload: Payload) -> DocketResult<Payload> {
        match &self.parse {
            Some(hook) => hook(payload).map_err(|reason| {
                DocketError::invalid_input(format!(
                    "payload rejected by schema '{}': {}",
                    self.name, reason
                ))
            }),
            None => Ok(payload),
        }
    }

    /// Derive slot values from a payload
    pub fn encode(&self, payload: &Payload) -> Slots {
        (self.encode)(payload)
    }

    /// Decode table, keyed by slot
    pub fn decode_table(&self) -> BTreeMap<SlotKey, SlotBinding> {
        self.bindings.iter().cloned().collect()
    }

    /// Binding for one slot
    pub fn binding(&self, slot: SlotKey) -> Option<&SlotBinding> {
        self.bindings
            .iter()
            .find(|(s, _)| *s == slot)
            .map(|(_, b)| b)
    }

    /// Translate an alias to its slot name; other keys pass through
    pub fn resolve_key<'a>(&self, key: &'a str) -> &'a str {
        match self.bindings.iter().find(|(_, b)| b.alias == key) {
            Some((slot, _)) => slot.as_str(),
            None => key,
        }
    }

    fn check_bindings(&self) -> DocketResult<()> {
        if self.name.is_empty() {
            return Err(DocketError::configuration("schema name must not be empty"));
        }
        let mut slots = HashSet::new();
        let mut aliases = HashSet::new();
        for (slot, binding) in &self.bindings {
            if !slots.insert(*slot) {
                return Err(DocketError::configuration(format!(
                    "schema '{}' binds {} more than once",
                    self.name, slot
                )));
            }
            if !aliases.insert(binding.alias.as_str()) {
                return Err(DocketError::configuration(format!(
                    "schema '{}' uses alias '{}' for more than one slot",
                    self.name, binding.alias
                )));
            }
            if binding.alias.parse::<IndexKey>().is_ok() {
                return Err(DocketError::configuration(format!(
                    "schema '{}' alias '{}' shadows an index key",
                    self.name, binding.alias
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for SchemaDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaDefinition")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("description", &self.description)
            .field("has_parse", &self.parse.is_some())
            .field("bindings", &self.bindings)
            .field("read_only", &self.read_only)
            .finish()
    }
}

/// Schema for job documents stored under `job_type`
///
/// Read-only: job slots are written by the queue alone, so the collection
/// serves alias-translated listing (`status`, `name`, `runAfter`) and
/// nothing else.
pub fn job_schema(job_type: &str) -> SchemaDefinition {
    SchemaDefinition::new(job_type, "1.0", |_: &Payload| Slots::new())
        .describe("Deferred work item")
        .bind(STATUS_SLOT, "status", "Job status")
        .bind(NAME_SLOT, "name", "Handler name")
        .bind(RUN_AFTER_SLOT, "runAfter", "Earliest time the job may run")
        .read_only()
}

/// Registered schemas, by name
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: RwLock<HashMap<String, Arc<SchemaDefinition>>>,
}

impl SchemaRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the job schema for `job_type`
    pub fn with_job_schema(job_type: &str) -> DocketResult<Self> {
        let registry = Self::new();
        registry.register(job_schema(job_type))?;
        Ok(registry)
    }

    /// Register a schema
    ///
    /// # Errors
    ///
    /// `Configuration` if the name is taken, a slot is bound twice, an alias
    /// names two slots, or an alias collides with an index key name.
    pub fn register(&self, schema: SchemaDefinition) -> DocketResult<Arc<SchemaDefinition>> {
        schema.check_bindings()?;
        let mut schemas = self.schemas.write();
        if schemas.contains_key(schema.name()) {
            return Err(DocketError::configuration(format!(
                "schema '{}' is already registered",
                schema.name()
            )));
        }
        let schema = Arc::new(schema);
        schemas.insert(schema.name().to_string(), Arc::clone(&schema));
        info!(
            schema = schema.name(),
            version = schema.version(),
            bound_slots = schema.bindings.len(),
            "schema registered"
        );
        Ok(schema)
    }

    /// Look up a schema
    pub fn get(&self, name: &str) -> Option<Arc<SchemaDefinition>> {
        self.schemas.read().get(name).cloned()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.schemas.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered schemas
    pub fn len(&self) -> usize {
        self.schemas.read().len()
    }

    /// Check if no schema is registered
    pub fn is_empty(&self) -> bool {
        self.schemas.read().is_empty()
    }
}
