use std::path::PathBuf;
use std::sync::Once;

use chrono::{DateTime, Utc};
use docassist_core::{
    update, AppState, Effect, JobSource, JobStatus, Msg, RequestPhase, Severity,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

fn submit_file(state: AppState, path: &str) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::FileChosen {
            path: PathBuf::from(path),
        },
    )
}

fn submit_url(state: AppState, url: &str) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::UrlSubmitted {
            url: url.to_string(),
        },
    )
}

#[test]
fn file_submission_creates_pending_job_and_upload_effect() {
    init_logging();
    let (mut state, effects) = submit_file(AppState::new(), "/tmp/handbook.pdf");

    assert_eq!(
        effects,
        vec![Effect::UploadFile {
            job_id: 1,
            path: PathBuf::from("/tmp/handbook.pdf"),
        }]
    );
    let view = state.view();
    assert_eq!(view.jobs.len(), 1);
    assert_eq!(view.jobs[0].status, JobStatus::Pending);
    assert_eq!(
        view.jobs[0].source,
        JobSource::File {
            name: "handbook.pdf".to_string(),
        }
    );
    assert!(state.consume_dirty());
}

#[test]
fn url_submission_trims_and_creates_job() {
    init_logging();
    let (state, effects) = submit_url(AppState::new(), "  https://example.com/paper.pdf  ");

    assert_eq!(
        effects,
        vec![Effect::UploadUrl {
            job_id: 1,
            url: "https://example.com/paper.pdf".to_string(),
        }]
    );
    assert_eq!(
        state.view().jobs[0].source,
        JobSource::Url {
            url: "https://example.com/paper.pdf".to_string(),
        }
    );
}

#[test]
fn empty_url_is_rejected_without_a_job() {
    init_logging();
    let state = AppState::new();
    let before = state.clone();

    let (next, effects) = submit_url(state, "   ");

    assert_eq!(next, before);
    assert!(effects.is_empty());
}

#[test]
fn jobs_are_ordered_by_btree_key() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "https://b.example.com/doc.pdf");
    let (state, _) = submit_file(state, "/tmp/a.pdf");

    let ids: Vec<_> = state.view().jobs.iter().map(|j| j.job_id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn successful_upload_settles_job_once_and_notifies() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "https://example.com/doc.pdf");

    let (state, effects) = update(
        state,
        Msg::UploadFinished {
            job_id: 1,
            result: Ok("Document added to knowledge base".to_string()),
        },
    );

    let view = state.view();
    assert_eq!(view.jobs[0].status, JobStatus::Succeeded);
    assert_eq!(view.jobs[0].status_message, "Document added to knowledge base");
    let notification = view.notification.expect("success notification");
    assert_eq!(notification.severity, Severity::Success);
    assert_eq!(notification.message, "Document added to knowledge base");
    assert_eq!(effects, vec![Effect::ScheduleNotificationDismiss { seq: 1 }]);

    // A duplicate completion must not flip the settled status.
    let before = state.clone();
    let (next, effects) = update(
        state,
        Msg::UploadFinished {
            job_id: 1,
            result: Err("late failure".to_string()),
        },
    );
    assert_eq!(next, before);
    assert!(effects.is_empty());
    assert_eq!(next.view().jobs[0].status, JobStatus::Succeeded);
}

#[test]
fn failed_upload_settles_job_and_publishes_error_notification() {
    init_logging();
    let (state, _) = submit_file(AppState::new(), "/tmp/notes.pdf");

    let (state, effects) = update(
        state,
        Msg::UploadFinished {
            job_id: 1,
            result: Err("File type not allowed. Only PDF files are supported.".to_string()),
        },
    );

    let view = state.view();
    assert_eq!(view.jobs[0].status, JobStatus::Failed);
    let notification = view.notification.expect("error notification");
    assert_eq!(notification.severity, Severity::Error);
    assert_eq!(effects, vec![Effect::ScheduleNotificationDismiss { seq: 1 }]);
}

#[test]
fn upload_completion_for_unknown_job_is_ignored() {
    init_logging();
    let state = AppState::new();
    let before = state.clone();

    let (next, effects) = update(
        state,
        Msg::UploadFinished {
            job_id: 42,
            result: Ok("done".to_string()),
        },
    );

    assert_eq!(next, before);
    assert!(effects.is_empty());
}

#[test]
fn ingestion_runs_independently_of_a_sending_exchange() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::QuestionSubmitted {
            text: "What is RAG?".to_string(),
            at: DateTime::<Utc>::UNIX_EPOCH,
        },
    );
    assert_eq!(state.view().phase, RequestPhase::Sending);

    // Both submissions go through while the exchange is still outstanding.
    let (state, effects) = submit_file(state, "/tmp/one.pdf");
    assert_eq!(effects.len(), 1);
    let (state, effects) = submit_url(state, "https://example.com/two.pdf");
    assert_eq!(effects.len(), 1);
    assert_eq!(state.view().jobs.len(), 2);

    // A job settling mid-exchange never touches the conversation.
    let (state, _) = update(
        state,
        Msg::UploadFinished {
            job_id: 1,
            result: Err("upload failed".to_string()),
        },
    );
    let view = state.view();
    assert_eq!(view.phase, RequestPhase::Sending);
    assert_eq!(view.messages.len(), 1);
}

#[test]
fn jobs_settle_independently_of_each_other() {
    init_logging();
    let (state, _) = submit_file(AppState::new(), "/tmp/one.pdf");
    let (state, _) = submit_file(state, "/tmp/two.pdf");

    let (state, _) = update(
        state,
        Msg::UploadFinished {
            job_id: 2,
            result: Ok("two ingested".to_string()),
        },
    );

    let view = state.view();
    assert_eq!(view.jobs[0].status, JobStatus::Pending);
    assert_eq!(view.jobs[1].status, JobStatus::Succeeded);
}
