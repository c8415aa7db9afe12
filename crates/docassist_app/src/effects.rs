use std::sync::mpsc;
use std::thread;

use chrono::Utc;
use client_logging::{client_info, client_warn};
use docassist_client::{ClientError, ClientEvent, ClientSettings, ServiceCommand, ServiceHandle};
use docassist_core::{Effect, Msg, NOTIFICATION_TIMEOUT};

use crate::app::AppEvent;

/// Executes the effects requested by the state machine: transport commands
/// go to the [`ServiceHandle`] worker, timers get their own thread, and the
/// terminal "scroll" resolves immediately.
pub struct EffectRunner {
    service: ServiceHandle,
    event_tx: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn new(
        event_tx: mpsc::Sender<AppEvent>,
        settings: ClientSettings,
    ) -> Result<Self, ClientError> {
        let (service, client_events) = ServiceHandle::new(settings)?;
        spawn_event_loop(client_events, event_tx.clone());
        Ok(Self { service, event_tx })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::AskQuestion { question } => {
                    client_info!("AskQuestion question_len={}", question.len());
                    self.service.submit(ServiceCommand::Ask { question });
                }
                Effect::UploadFile { job_id, path } => {
                    client_info!("UploadFile job_id={job_id} path={}", path.display());
                    self.service
                        .submit(ServiceCommand::UploadFile { job_id, path });
                }
                Effect::UploadUrl { job_id, url } => {
                    client_info!("UploadUrl job_id={job_id} url={url}");
                    self.service.submit(ServiceCommand::UploadUrl { job_id, url });
                }
                Effect::ScrollToBottom => {
                    // The terminal transcript always prints at the bottom;
                    // report the resulting position back to the core.
                    let _ = self.event_tx.send(AppEvent::Core(Msg::ViewportMoved {
                        distance_from_bottom: 0,
                    }));
                }
                Effect::ScheduleNotificationDismiss { seq } => {
                    let event_tx = self.event_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(NOTIFICATION_TIMEOUT);
                        let _ = event_tx
                            .send(AppEvent::Core(Msg::NotificationTimerElapsed { seq }));
                    });
                }
            }
        }
    }
}

fn spawn_event_loop(client_events: mpsc::Receiver<ClientEvent>, event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while let Ok(event) = client_events.recv() {
            let msg = match event {
                ClientEvent::AnswerReady { result } => Msg::AnswerArrived {
                    result: result.map_err(|err| {
                        client_warn!("exchange failed: {err}");
                        err.to_string()
                    }),
                    at: Utc::now(),
                },
                ClientEvent::UploadCompleted { job_id, result } => Msg::UploadFinished {
                    job_id,
                    result: result.map_err(|err| {
                        client_warn!("upload {job_id} failed: {err}");
                        err.to_string()
                    }),
                },
            };
            if event_tx.send(AppEvent::Core(msg)).is_err() {
                break;
            }
        }
    });
}
