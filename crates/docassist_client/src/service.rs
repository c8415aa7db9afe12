use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use crate::ask::{AnswerService, HttpAnswerService};
use crate::ingest::{HttpIngestService, IngestService};
use crate::types::{ClientError, ClientEvent, ClientSettings, JobId};

/// Transport commands issued by effect execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCommand {
    Ask { question: String },
    UploadFile { job_id: JobId, path: PathBuf },
    UploadUrl { job_id: JobId, url: String },
}

/// Handle to the transport worker: a dedicated thread driving a Tokio
/// runtime. Each command runs as its own task, so uploads proceed
/// concurrently with one another and with an outstanding ask; serializing
/// asks is the state machine's responsibility, not ours.
#[derive(Debug, Clone)]
pub struct ServiceHandle {
    cmd_tx: mpsc::Sender<ServiceCommand>,
}

impl ServiceHandle {
    /// Spawns the worker. Returns the command handle plus the receiver the
    /// caller drains for completion events.
    pub fn new(
        settings: ClientSettings,
    ) -> Result<(Self, mpsc::Receiver<ClientEvent>), ClientError> {
        let answer = Arc::new(HttpAnswerService::new(&settings)?);
        let ingest = Arc::new(HttpIngestService::new(&settings)?);
        let (cmd_tx, cmd_rx) = mpsc::channel::<ServiceCommand>();
        let (event_tx, event_rx) = mpsc::channel::<ClientEvent>();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    client_logging::client_error!("tokio runtime failed to start: {err}");
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let answer = answer.clone();
                let ingest = ingest.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = handle_command(answer.as_ref(), ingest.as_ref(), command).await;
                    let _ = event_tx.send(event);
                });
            }
        });

        Ok((Self { cmd_tx }, event_rx))
    }

    pub fn submit(&self, command: ServiceCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

async fn handle_command(
    answer: &dyn AnswerService,
    ingest: &dyn IngestService,
    command: ServiceCommand,
) -> ClientEvent {
    match command {
        ServiceCommand::Ask { question } => ClientEvent::AnswerReady {
            result: answer.ask(&question).await,
        },
        ServiceCommand::UploadFile { job_id, path } => ClientEvent::UploadCompleted {
            job_id,
            result: ingest.upload_file(&path).await,
        },
        ServiceCommand::UploadUrl { job_id, url } => ClientEvent::UploadCompleted {
            job_id,
            result: ingest.upload_url(&url).await,
        },
    }
}
