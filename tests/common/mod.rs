//! Shared helpers for the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use imagebuilder::build::{BuildError, BuildService, BuildSubscription, ProviderSpec};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Server-sent-events body with one `data:` event per value.
pub fn sse_body(events: &[Value]) -> String {
    events
        .iter()
        .map(|event| format!("data: {}\n\n", event))
        .collect()
}

/// Build service that replays a fixed list of payloads on every `open`.
#[derive(Clone, Default)]
pub struct ScriptedService {
    payloads: Vec<String>,
    pub opened: Arc<Mutex<Vec<String>>>,
    pub closed: Arc<AtomicUsize>,
}

impl ScriptedService {
    pub fn new(events: &[Value]) -> Self {
        Self {
            payloads: events.iter().map(Value::to_string).collect(),
            ..Default::default()
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }

    pub fn close_count(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BuildService for ScriptedService {
    async fn open(&self, spec: &ProviderSpec) -> Result<Box<dyn BuildSubscription>, BuildError> {
        self.opened.lock().unwrap().push(spec.to_string());
        Ok(Box::new(ScriptedSubscription {
            payloads: self.payloads.iter().cloned().collect(),
            closed: Arc::clone(&self.closed),
        }))
    }
}

struct ScriptedSubscription {
    payloads: VecDeque<String>,
    closed: Arc<AtomicUsize>,
}

#[async_trait]
impl BuildSubscription for ScriptedSubscription {
    async fn next_payload(&mut self) -> Option<Result<String, BuildError>> {
        self.payloads.pop_front().map(Ok)
    }

    fn close(self: Box<Self>) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}
