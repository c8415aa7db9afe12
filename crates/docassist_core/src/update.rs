use crate::conversation::{Role, FAILURE_NOTICE};
use crate::{AppState, Effect, JobSource, JobStatus, Msg, RequestPhase, Severity};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::QuestionSubmitted { text, at } => {
            // Empty input and reentrancy while Sending are both rejected
            // silently, before any state change.
            if text.trim().is_empty() || state.phase() == RequestPhase::Sending {
                return (state, Vec::new());
            }
            state.append_message(Role::User, text.clone(), at, false);
            state.begin_exchange();
            let mut effects = vec![Effect::AskQuestion { question: text }];
            push_follow_scroll(&state, &mut effects);
            effects
        }
        Msg::RetryRequested { message_index } => {
            if state.phase() == RequestPhase::Sending
                || !state.conversation().is_retryable(message_index)
            {
                return (state, Vec::new());
            }
            // The user message that produced the failure sits directly before
            // it; keep it and replay it, discarding the failed exchange.
            let question_index = message_index - 1;
            let question = state
                .conversation()
                .get(question_index)
                .map(|m| m.content.clone());
            let Some(question) = question else {
                return (state, Vec::new());
            };
            state.truncate_conversation(question_index);
            state.begin_exchange();
            let mut effects = vec![Effect::AskQuestion { question }];
            push_follow_scroll(&state, &mut effects);
            effects
        }
        Msg::AnswerArrived { result, at } => {
            // A completion with nothing outstanding is stale; drop it.
            if state.phase() != RequestPhase::Sending {
                return (state, Vec::new());
            }
            state.end_exchange();
            let mut effects = Vec::new();
            match result {
                Ok(answer) => {
                    state.append_message(Role::Assistant, answer, at, false);
                }
                Err(detail) => {
                    state.append_message(Role::Assistant, FAILURE_NOTICE.to_string(), at, true);
                    let seq = state.publish_notification(Severity::Error, detail);
                    effects.push(Effect::ScheduleNotificationDismiss { seq });
                }
            }
            push_follow_scroll(&state, &mut effects);
            effects
        }
        Msg::FileChosen { path } => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string_lossy().into_owned());
            let job_id = state.create_job(JobSource::File { name });
            vec![Effect::UploadFile { job_id, path }]
        }
        Msg::UrlSubmitted { url } => {
            let url = url.trim().to_string();
            if url.is_empty() {
                return (state, Vec::new());
            }
            let job_id = state.create_job(JobSource::Url { url: url.clone() });
            vec![Effect::UploadUrl { job_id, url }]
        }
        Msg::UploadFinished { job_id, result } => {
            let (status, severity, message) = match result {
                Ok(message) => (JobStatus::Succeeded, Severity::Success, message),
                Err(message) => (JobStatus::Failed, Severity::Error, message),
            };
            // settle_job refuses to touch a job that already left Pending;
            // a duplicate completion must not flip the status or re-notify.
            if !state.settle_job(job_id, status, message.clone()) {
                return (state, Vec::new());
            }
            let seq = state.publish_notification(severity, message);
            vec![Effect::ScheduleNotificationDismiss { seq }]
        }
        Msg::ViewportMoved {
            distance_from_bottom,
        } => {
            state.set_viewport_distance(distance_from_bottom);
            Vec::new()
        }
        Msg::JumpToLatestClicked => vec![Effect::ScrollToBottom],
        Msg::NotificationDismissed => {
            state.dismiss_notification();
            Vec::new()
        }
        Msg::NotificationTimerElapsed { seq } => {
            state.dismiss_notification_if_seq(seq);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn push_follow_scroll(state: &AppState, effects: &mut Vec<Effect>) {
    if state.follows_bottom() {
        effects.push(Effect::ScrollToBottom);
    }
}
