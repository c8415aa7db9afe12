//! Docassist client: HTTP transport to the answering service and effect
//! execution via the [`ServiceHandle`] worker.
mod ask;
mod ingest;
mod service;
mod types;
mod wire;

pub use ask::{AnswerService, HttpAnswerService};
pub use ingest::{HttpIngestService, IngestService};
pub use service::{ServiceCommand, ServiceHandle};
pub use types::{ClientError, ClientEvent, ClientSettings, FailureKind, JobId};
pub use wire::{AskRequest, AskResponse, IngestResponse, UrlIngestRequest};
