use chrono::Local;
use docassist_core::{
    AppViewModel, JobSource, JobStatus, Message, RequestPhase, Role, Severity,
};

const WELCOME: &str =
    "Hi! I'm here to help you with your documents. What would you like to know?";

/// Prints the transcript, job list, and notification to stdout.
pub fn render(view: &AppViewModel) {
    println!();
    if view.messages.is_empty() {
        println!("{WELCOME}");
    }
    for message in &view.messages {
        let stamp = message
            .created_at
            .with_timezone(&Local)
            .format("%H:%M:%S");
        let speaker = match message.role {
            Role::User => "you",
            Role::Assistant => "assistant",
        };
        println!("[{stamp}] {speaker}: {}", message.content);
        if message.retryable {
            println!("          (failed - /retry to resend)");
        }
    }
    if view.phase == RequestPhase::Sending {
        println!("assistant is typing...");
    }
    for job in &view.jobs {
        let status = match job.status {
            JobStatus::Pending => "uploading",
            JobStatus::Succeeded => "ingested",
            JobStatus::Failed => "failed",
        };
        let source = match &job.source {
            JobSource::File { name } => name.as_str(),
            JobSource::Url { url } => url.as_str(),
        };
        if job.status_message.is_empty() {
            println!("  [job {}] {source}: {status}", job.job_id);
        } else {
            println!(
                "  [job {}] {source}: {status} - {}",
                job.job_id, job.status_message
            );
        }
    }
    if let Some(notification) = &view.notification {
        let tag = match notification.severity {
            Severity::Info => "info",
            Severity::Success => "ok",
            Severity::Error => "error",
        };
        println!("  ({tag}) {}", notification.message);
    }
    if view.show_jump_to_latest {
        println!("  (scrolled up - /latest to jump to the newest message)");
    }
}

/// Prints the result of a transcript search without touching state.
pub fn render_search<'a>(query: &str, hits: impl Iterator<Item = &'a Message>) {
    println!();
    println!("matches for \"{query}\":");
    let mut any = false;
    for message in hits {
        any = true;
        let speaker = match message.role {
            Role::User => "you",
            Role::Assistant => "assistant",
        };
        println!("  {speaker}: {}", message.content);
    }
    if !any {
        println!("  (none)");
    }
}
