//! Command executor driven by JSON, as an SDK would use it.

use docket::{Command, Executor, Output};
use serde_json::json;

fn run(ex: &Executor, value: serde_json::Value) -> Result<Output, docket::Error> {
    let cmd: Command = serde_json::from_value(value).expect("valid command json");
    ex.execute(cmd)
}

#[test]
fn json_commands_cover_document_lifecycle() {
    let ex = Executor::in_memory().unwrap();
    let out = run(
        &ex,
        json!({"Insert": {"type": "note", "version": "1.0", "data": {"t": "x"}, "slots": {"sk1": "a"}}}),
    )
    .unwrap();
    let Output::Document(doc) = out else {
        panic!("expected Document");
    };

    let encoded = serde_json::to_value(&doc).unwrap();
    assert_eq!(encoded["type"], "note");
    assert_eq!(encoded["sk1"], "a");
    assert!(encoded["createdAt"].is_string());

    run(&ex, json!({"Update": {"id": doc.id, "data": {"u": 1}}})).unwrap();
    let Output::QueryResult(page) =
        run(&ex, json!({"Query": {"type": "note", "where": {"sk1": {"eq": "a"}}}})).unwrap()
    else {
        panic!("expected QueryResult");
    };
    assert_eq!(page.documents[0].data["u"], 1);
    assert_eq!(page.documents[0].data["t"], "x");

    assert_eq!(run(&ex, json!({"Remove": {"id": doc.id}})).unwrap(), Output::Unit);
    let err = run(&ex, json!({"Get": {"id": doc.id}})).unwrap_err();
    assert_eq!(err.code(), "NotFound");
}

#[test]
fn json_job_transition_error_is_structured() {
    let ex = Executor::in_memory().unwrap();
    let Output::Job(job) = run(&ex, json!({"Enqueue": {"name": "email", "context": {}}})).unwrap()
    else {
        panic!("expected Job");
    };
    run(&ex, json!({"UpdateJobStatus": {"id": job.id, "status": "active"}})).unwrap();
    run(&ex, json!({"UpdateJobStatus": {"id": job.id, "status": "processed"}})).unwrap();

    let err = run(&ex, json!({"UpdateJobStatus": {"id": job.id, "status": "active"}})).unwrap_err();
    let wire = serde_json::to_value(&err).unwrap();
    assert_eq!(wire["InvalidTransition"]["from"], "processed");
    assert_eq!(wire["InvalidTransition"]["to"], "active");
}
