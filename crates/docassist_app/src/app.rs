use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chrono::Utc;
use client_logging::client_info;
use docassist_client::ClientSettings;
use docassist_core::{update, AppState, Msg};

use crate::effects::EffectRunner;
use crate::render;

/// Everything the main loop reacts to: terminal input or a state-machine
/// message from effect execution.
pub enum AppEvent {
    Line(String),
    Core(Msg),
}

pub fn run(settings: ClientSettings) -> anyhow::Result<()> {
    client_info!("connecting to {}", settings.base_url);
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(event_tx.clone(), settings)?;
    spawn_input_loop(event_tx);

    let mut state = AppState::new();
    render::render(&state.view());

    loop {
        // Coalesce rendering: drain whatever arrived, then render once if
        // anything marked the state dirty.
        let event = match event_rx.recv_timeout(Duration::from_millis(75)) {
            Ok(event) => event,
            Err(mpsc::RecvTimeoutError::Timeout) => AppEvent::Core(Msg::Tick),
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        };

        match event {
            AppEvent::Line(line) => {
                let Some(msg) = handle_line(&state, &line) else {
                    if line.trim() == "/quit" {
                        break;
                    }
                    continue;
                };
                state = dispatch(state, msg, &runner);
            }
            AppEvent::Core(msg) => {
                state = dispatch(state, msg, &runner);
            }
        }

        if state.consume_dirty() {
            render::render(&state.view());
        }
    }

    Ok(())
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let (state, effects) = update(state, msg);
    runner.run(effects);
    state
}

/// Maps an input line to a state-machine message. Search and quit are
/// handled in place and produce no message.
fn handle_line(state: &AppState, line: &str) -> Option<Msg> {
    let trimmed = line.trim();
    if let Some(rest) = trimmed.strip_prefix("/file ") {
        return Some(Msg::FileChosen {
            path: PathBuf::from(rest.trim()),
        });
    }
    if let Some(rest) = trimmed.strip_prefix("/url ") {
        return Some(Msg::UrlSubmitted {
            url: rest.to_string(),
        });
    }
    if trimmed == "/retry" || trimmed.starts_with("/retry ") {
        let index = trimmed
            .trim_start_matches("/retry")
            .trim()
            .parse::<usize>()
            .ok()
            .or_else(|| default_retry_index(state))?;
        return Some(Msg::RetryRequested {
            message_index: index,
        });
    }
    if let Some(rest) = trimmed.strip_prefix("/search ") {
        let query = rest.trim();
        render::render_search(query, state.conversation().search(query).iter());
        return None;
    }
    if trimmed == "/dismiss" {
        return Some(Msg::NotificationDismissed);
    }
    if trimmed == "/latest" {
        return Some(Msg::JumpToLatestClicked);
    }
    if trimmed == "/quit" || trimmed.is_empty() {
        return None;
    }
    Some(Msg::QuestionSubmitted {
        text: line.to_string(),
        at: Utc::now(),
    })
}

/// `/retry` without an index targets the most recent message when it is a
/// retryable failure.
fn default_retry_index(state: &AppState) -> Option<usize> {
    let last = state.conversation().len().checked_sub(1)?;
    state.conversation().is_retryable(last).then_some(last)
}

fn spawn_input_loop(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if event_tx.send(AppEvent::Line(line)).is_err() {
                break;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_becomes_a_question() {
        let state = AppState::new();
        match handle_line(&state, "What is RAG?") {
            Some(Msg::QuestionSubmitted { text, .. }) => assert_eq!(text, "What is RAG?"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn file_and_url_commands_map_to_ingestion_msgs() {
        let state = AppState::new();
        assert_eq!(
            handle_line(&state, "/file /tmp/doc.pdf"),
            Some(Msg::FileChosen {
                path: PathBuf::from("/tmp/doc.pdf"),
            })
        );
        assert_eq!(
            handle_line(&state, "/url https://example.com/doc.pdf"),
            Some(Msg::UrlSubmitted {
                url: "https://example.com/doc.pdf".to_string(),
            })
        );
    }

    #[test]
    fn retry_with_index_targets_that_message() {
        let state = AppState::new();
        assert_eq!(
            handle_line(&state, "/retry 3"),
            Some(Msg::RetryRequested { message_index: 3 })
        );
    }

    #[test]
    fn bare_retry_without_a_failed_tail_is_dropped() {
        let state = AppState::new();
        assert!(handle_line(&state, "/retry").is_none());
    }

    #[test]
    fn blank_lines_and_quit_produce_no_msg() {
        let state = AppState::new();
        assert!(handle_line(&state, "").is_none());
        assert!(handle_line(&state, "/quit").is_none());
    }
}
