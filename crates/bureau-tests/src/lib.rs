//! Shared test doubles for the integration tests in `tests/`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use bureau_core::error::{BureauError, Result};
use bureau_core::inference::InferenceClient;
use bureau_core::progress::{BatchObserver, Progress};
use bureau_core::ExtractionError;

/// Scripted reply for one document body.
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Failure(String),
}

/// In-memory [`InferenceClient`] keyed by document bytes.
#[derive(Default)]
pub struct ScriptedClient {
    replies: HashMap<Vec<u8>, Reply>,
    calls: Mutex<Vec<(String, Vec<u8>, String)>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, document: &[u8], text: impl Into<String>) -> Self {
        self.replies.insert(document.to_vec(), Reply::Text(text.into()));
        self
    }

    pub fn fail(mut self, document: &[u8], message: impl Into<String>) -> Self {
        self.replies
            .insert(document.to_vec(), Reply::Failure(message.into()));
        self
    }

    /// `(instruction, document, mime_type)` for every call, in call order.
    pub fn calls(&self) -> Vec<(String, Vec<u8>, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceClient for ScriptedClient {
    async fn infer(&self, instruction: &str, document: &[u8], mime_type: &str) -> Result<String> {
        self.calls.lock().unwrap().push((
            instruction.to_string(),
            document.to_vec(),
            mime_type.to_string(),
        ));
        match self.replies.get(document) {
            Some(Reply::Text(text)) => Ok(text.clone()),
            Some(Reply::Failure(message)) => Err(BureauError::Inference(message.clone())),
            None => Err(BureauError::Inference("no scripted reply".to_string())),
        }
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

/// Observer event, in the order the orchestrator emitted it.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Progress(Progress),
    Error(ExtractionError),
}

#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<Event>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn progress(&self) -> Vec<Progress> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Progress(p) => Some(p),
                Event::Error(_) => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<ExtractionError> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Error(err) => Some(err),
                Event::Progress(_) => None,
            })
            .collect()
    }
}

impl BatchObserver for RecordingObserver {
    fn on_progress(&self, progress: Progress) {
        self.events.lock().unwrap().push(Event::Progress(progress));
    }

    fn on_error(&self, error: &ExtractionError) {
        self.events.lock().unwrap().push(Event::Error(error.clone()));
    }
}

pub fn json_reply(bureau: &str, category: &str, title: &str) -> String {
    serde_json::json!({ "bureau": bureau, "category": category, "title": title }).to_string()
}
