//! Job queue behaviour through the public API.

use crate::common::*;
use docket::{DocketError, JobStatus, Timestamp};
use serde_json::json;
use std::time::Duration;

#[test]
fn processed_job_cannot_become_active() {
    let t = TestStore::new();
    let jobs = t.store.jobs();
    let job = jobs.enqueue("email", payload(json!({"to": "a"})), None).unwrap();
    jobs.update_status(&job.id, JobStatus::Active).unwrap();
    jobs.update_status(&job.id, JobStatus::Processed).unwrap();

    let err = jobs.update_status(&job.id, JobStatus::Active).unwrap_err();
    assert!(matches!(
        err,
        DocketError::InvalidTransition {
            from: JobStatus::Processed,
            to: JobStatus::Active,
            ..
        }
    ));
}

#[test]
fn queued_job_may_fail_directly() {
    let t = TestStore::new();
    let jobs = t.store.jobs();
    let job = jobs.enqueue("email", Payload::new(), None).unwrap();
    let failed = jobs.update_status(&job.id, JobStatus::Failed).unwrap();
    assert_eq!(failed.status, JobStatus::Failed);
    assert!(jobs
        .update_status(&job.id, JobStatus::Queued)
        .unwrap_err()
        .is_invalid_transition());
}

#[test]
fn jobs_are_queryable_as_documents() {
    let t = TestStore::new();
    let jobs = t.store.jobs();
    let a = jobs.enqueue("a", Payload::new(), None).unwrap();
    jobs.enqueue("b", Payload::new(), None).unwrap();
    jobs.claim(&a.id).unwrap();

    let page = t
        .store
        .query(&Query::new("job").filter("sk1", Term::eq("active")))
        .unwrap();
    assert_eq!(page.documents.len(), 1);
    assert_eq!(page.documents[0].id, a.id);
    assert_eq!(page.documents[0].sk2.as_deref(), Some("a"));
}

#[test]
fn future_jobs_wait_until_due() {
    let t = TestStore::new();
    let jobs = t.store.jobs();
    let now = Timestamp::now();
    let later = now.saturating_add(Duration::from_secs(600));
    let job = jobs.enqueue("later", Payload::new(), Some(later)).unwrap();

    assert!(jobs.next_eligible_at(now, 10).unwrap().is_empty());
    let due = jobs
        .next_eligible_at(later.saturating_add(Duration::from_secs(1)), 10)
        .unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].id, job.id);
}

#[test]
fn racing_workers_claim_each_job_once() {
    let t = TestStore::new();
    let jobs = t.store.jobs();
    let ids: Vec<_> = (0..20)
        .map(|i| jobs.enqueue(&format!("job-{}", i), Payload::new(), None).unwrap().id)
        .collect();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let jobs = jobs.clone();
            let ids = ids.clone();
            std::thread::spawn(move || ids.iter().filter(|id| jobs.claim(id).is_ok()).count())
        })
        .collect();
    let claimed: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(claimed, ids.len());
}
