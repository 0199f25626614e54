//! The Executor - single entry point for serialized commands.
//!
//! The Executor is a stateless dispatcher that routes commands to the
//! document store, job queue or log sink and converts results to outputs.

use std::sync::Arc;

use docket_engine::{DocumentStore, EngineConfig, JobQueue, LogSink, TracingLogSink};
use docket_storage::MemoryStore;
use tracing::debug;

use crate::handlers::{collection, document, job, log};
use crate::types::QueryParams;
use crate::{Command, Output, Result};

/// The command executor.
///
/// Holds handles to the store, its job queue and a log sink; all state lives
/// behind those handles. `Send + Sync` and cheap to clone.
///
/// # Example
///
/// ```text
/// let executor = Executor::in_memory()?;
/// let out = executor.execute(Command::Enqueue {
///     name: "email".into(),
///     context: json!({"to": "a@example.com"}),
///     run_after: None,
/// })?;
/// ```
#[derive(Clone)]
pub struct Executor {
    store: DocumentStore,
    jobs: JobQueue,
    logs: Arc<dyn LogSink>,
}

impl Executor {
    /// Executor over `store`, logging through `tracing`.
    pub fn new(store: DocumentStore) -> Self {
        Self::with_log_sink(store, Arc::new(TracingLogSink))
    }

    /// Executor over `store` with a custom log sink.
    pub fn with_log_sink(store: DocumentStore, logs: Arc<dyn LogSink>) -> Self {
        let jobs = store.jobs();
        Self { store, jobs, logs }
    }

    /// Executor over a fresh in-memory store with default configuration.
    pub fn in_memory() -> Result<Self> {
        Self::in_memory_with_config(EngineConfig::default())
    }

    /// Executor over a fresh in-memory store.
    pub fn in_memory_with_config(config: EngineConfig) -> Result<Self> {
        let store = DocumentStore::with_config(Arc::new(MemoryStore::new()), config)?;
        Ok(Self::new(store))
    }

    /// The underlying store, for typed access and schema registration.
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Execute a single command.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        let name = cmd.name();
        let result = self.dispatch(cmd);
        match &result {
            Ok(_) => debug!(command = name, "command executed"),
            Err(e) => debug!(command = name, error = %e, "command failed"),
        }
        result
    }

    /// Execute commands in order, one result per command.
    ///
    /// A failing command does not stop the ones after it; there is no
    /// rollback of earlier commands.
    pub fn execute_many(&self, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(cmd)).collect()
    }

    fn dispatch(&self, cmd: Command) -> Result<Output> {
        match cmd {
            // Document commands
            Command::Insert {
                doc_type,
                version,
                data,
                slots,
            } => document::insert(&self.store, doc_type, version, data, slots),
            Command::Get { id } => document::get(&self.store, id),
            Command::Query {
                doc_type,
                filter,
                order_by,
                take,
                after,
                text,
            } => document::query(
                &self.store,
                doc_type,
                QueryParams {
                    filter,
                    order_by,
                    take,
                    after,
                    text,
                },
            ),
            Command::Update { id, data, slots } => document::update(&self.store, id, data, slots),
            Command::Remove { id } => document::remove(&self.store, id),

            // Collection commands
            Command::CollectionInsert { collection, data } => {
                collection::insert(&self.store, collection, data)
            }
            Command::CollectionList {
                collection,
                filter,
                order_by,
                take,
                after,
                text,
            } => collection::list(
                &self.store,
                collection,
                QueryParams {
                    filter,
                    order_by,
                    take,
                    after,
                    text,
                },
            ),

            // Job commands
            Command::Enqueue {
                name,
                context,
                run_after,
            } => job::enqueue(&self.jobs, name, context, run_after),
            Command::Dequeue { id } => job::dequeue(&self.jobs, id),
            Command::UpdateJobStatus { id, status } => job::update_status(&self.jobs, id, status),
            Command::NextEligible { take } => job::next_eligible(
                &self.jobs,
                take.unwrap_or(self.store.config().default_take),
            ),

            // Log
            Command::EmitLog { body } => log::emit(self.logs.as_ref(), body),
        }
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
