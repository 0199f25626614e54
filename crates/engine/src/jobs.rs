//! Job queue over the document store
//!
//! Jobs are ordinary documents of the configured job type (default `"job"`)
//! with status, name and `runAfter` held in `sk1..sk3`. Every queue
//! operation is a store operation with a fixed shape:
//!
//! | Operation | Store call |
//! |-----------|------------|
//! | `enqueue` | `insert` with job slots |
//! | `dequeue` | `get` plus a type check |
//! | `update_status` | `modify` with the transition check inside |
//! | `next_eligible` | `query` on `status eq queued`, `runAfter lte now` |
//!
//! The transition check runs inside the adapter's read-modify-write. With
//! an adapter whose `modify_raw` is atomic, two workers racing to claim the
//! same job cannot both succeed; the loser sees `InvalidTransition`. With a
//! non-atomic adapter that race remains possible.

use crate::query::{Direction, Query, Term};
use crate::store::DocumentStore;
use docket_core::job::{STATUS_SLOT, RUN_AFTER_SLOT};
use docket_core::{DocketError, DocketResult, Document, DocumentId, Job, JobStatus, Payload, Timestamp};
use tracing::{debug, info, warn};

/// Version recorded on job documents
pub const JOB_VERSION: &str = "1.0";

/// Job queue handle
#[derive(Debug, Clone)]
pub struct JobQueue {
    store: DocumentStore,
}

impl JobQueue {
    /// Queue backed by `store`
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    fn job_type(&self) -> &str {
        &self.store.config().job_type
    }

    /// Create a queued job
    ///
    /// `run_after` defaults to now.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an empty name or a `run_after` past year 9999;
    /// nothing is written in either case.
    pub fn enqueue(
        &self,
        name: &str,
        context: Payload,
        run_after: Option<Timestamp>,
    ) -> DocketResult<Job> {
        if name.is_empty() {
            return Err(DocketError::invalid_input("job name must not be empty"));
        }
        let run_after = run_after.unwrap_or_else(Timestamp::now);
        if !run_after.has_fixed_width_text() {
            return Err(DocketError::invalid_input(format!(
                "runAfter {} is later than {}",
                run_after.to_rfc3339(),
                Timestamp::MAX_FIXED_WIDTH.to_rfc3339()
            )));
        }
        let doc = self.store.insert(
            self.job_type(),
            JOB_VERSION,
            context,
            Some(Job::slots(name, JobStatus::Queued, run_after)),
        )?;
        let job = Job::from_document(doc)?;
        info!(id = %job.id, name, run_after = %job.run_after, "job enqueued");
        Ok(job)
    }

    /// Fetch a job by id
    ///
    /// # Errors
    ///
    /// `NotFound` if the id is absent or names a document that is not a job.
    pub fn dequeue(&self, id: &DocumentId) -> DocketResult<Job> {
        let doc = self.store.get(id)?;
        if doc.doc_type != self.job_type() {
            return Err(DocketError::not_found(id));
        }
        Job::from_document(doc)
    }

    /// Move a job to `status`
    ///
    /// # Errors
    ///
    /// `NotFound` as for [`dequeue`](Self::dequeue); `InvalidTransition` if
    /// the state machine does not allow the change.
    pub fn update_status(&self, id: &DocumentId, status: JobStatus) -> DocketResult<Job> {
        let job_type = self.job_type().to_string();
        let result = self.store.modify(id, |mut doc: Document| {
            if doc.doc_type != job_type {
                return Err(DocketError::not_found(&doc.id));
            }
            let current = Job::status_of(&doc)?;
            if !current.can_transition_to(status) {
                return Err(DocketError::InvalidTransition {
                    id: doc.id.to_string(),
                    from: current,
                    to: status,
                });
            }
            *doc.slot_mut(STATUS_SLOT) = Some(status.as_str().to_string());
            Ok(doc)
        });

        match result {
            Ok(doc) => {
                let job = Job::from_document(doc)?;
                debug!(id = %job.id, status = %job.status, "job status updated");
                Ok(job)
            }
            Err(e) => {
                if e.is_invalid_transition() {
                    warn!(%id, error = %e, "job transition rejected");
                }
                Err(e)
            }
        }
    }

    /// Claim a queued job for processing
    pub fn claim(&self, id: &DocumentId) -> DocketResult<Job> {
        self.update_status(id, JobStatus::Active)
    }

    /// Up to `take` queued jobs that are due now, oldest first
    ///
    /// Read-only: the returned jobs are not claimed.
    pub fn next_eligible(&self, take: usize) -> DocketResult<Vec<Job>> {
        self.next_eligible_at(Timestamp::now(), take)
    }

    /// Up to `take` queued jobs due at `now`, oldest first
    pub fn next_eligible_at(&self, now: Timestamp, take: usize) -> DocketResult<Vec<Job>> {
        let query = Query::new(self.job_type())
            .filter(STATUS_SLOT.as_str(), Term::eq(JobStatus::Queued.as_str()))
            .filter(RUN_AFTER_SLOT.as_str(), Term::lte(now.to_rfc3339()))
            .order_by("createdAt", Direction::Ascending)
            .take(take);
        self.store
            .query(&query)?
            .documents
            .into_iter()
            .map(Job::from_document)
            .collect()
    }
}
