//! Job command handlers.

use docket_core::{DocumentId, JobStatus};
use docket_engine::JobQueue;

use crate::bridge::{parse_run_after, to_payload};
use crate::convert::convert_result;
use crate::{Output, Result};

/// Handle Enqueue command.
pub fn enqueue(
    jobs: &JobQueue,
    name: String,
    context: serde_json::Value,
    run_after: Option<String>,
) -> Result<Output> {
    let context = convert_result(to_payload(context))?;
    let run_after = convert_result(parse_run_after(run_after.as_deref()))?;
    Ok(Output::Job(convert_result(jobs.enqueue(&name, context, run_after))?))
}

/// Handle Dequeue command.
pub fn dequeue(jobs: &JobQueue, id: DocumentId) -> Result<Output> {
    Ok(Output::Job(convert_result(jobs.dequeue(&id))?))
}

/// Handle UpdateJobStatus command.
pub fn update_status(jobs: &JobQueue, id: DocumentId, status: JobStatus) -> Result<Output> {
    Ok(Output::Job(convert_result(jobs.update_status(&id, status))?))
}

/// Handle NextEligible command.
///
/// `take` falls back to the store's default page size.
pub fn next_eligible(jobs: &JobQueue, take: usize) -> Result<Output> {
    Ok(Output::Jobs(convert_result(jobs.next_eligible(take))?))
}
