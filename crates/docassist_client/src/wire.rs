//! Wire contract for the answering service and the ingestion endpoints.
//!
//! The ask endpoint takes `{question, session_id, user_id}` and returns
//! `{"answer": text}`. An older `{messages: [...]}` / `{"response": text}`
//! shape exists in the wild and is deliberately not supported here.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AskRequest {
    pub question: String,
    pub session_id: String,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlIngestRequest {
    pub url: String,
}

/// Shared response shape of both upload endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IngestResponse {
    pub success: bool,
    pub message: String,
}
