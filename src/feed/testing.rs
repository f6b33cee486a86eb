//! In-memory fetcher for unit tests

use super::fetcher::Fetcher;
use super::types::{Category, RawRecord};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// Scripted response for one fetch call
#[derive(Debug, Clone)]
pub enum Reply {
    Records(Vec<RawRecord>),
    Fail(String),
}

/// Record whose fields are `id{n}`, `description{n}` and `gifUrl{n}`
pub fn record(n: usize) -> RawRecord {
    RawRecord {
        id: Some(format!("id{n}")),
        description: Some(format!("description{n}")),
        gif_url: Some(format!("gifUrl{n}")),
    }
}

/// Page holding records `range`
pub fn page(range: std::ops::Range<usize>) -> Reply {
    Reply::Records(range.map(record).collect())
}

/// Replays scripted replies in order, repeating the last one once the
/// script runs out, and records every `(category, page)` request.
#[derive(Debug, Default)]
pub struct ScriptedFetcher {
    replies: Mutex<VecDeque<Reply>>,
    last: Mutex<Option<Reply>>,
    calls: Mutex<Vec<(Category, u32)>>,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedFetcher {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            ..Default::default()
        }
    }

    /// Every fetch waits for a permit on `gate` after being recorded
    pub fn gated(replies: impl IntoIterator<Item = Reply>, gate: Arc<Semaphore>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(replies)
        }
    }

    pub fn calls(&self) -> Vec<(Category, u32)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn pages(&self) -> Vec<u32> {
        self.calls().into_iter().map(|(_, page)| page).collect()
    }

    fn next_reply(&self) -> Reply {
        let mut last = self.last.lock().unwrap();
        if let Some(reply) = self.replies.lock().unwrap().pop_front() {
            *last = Some(reply);
        }
        last.clone().unwrap_or(Reply::Records(Vec::new()))
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, category: Category, page: u32) -> Result<Vec<RawRecord>> {
        self.calls.lock().unwrap().push((category, page));
        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .map_err(anyhow::Error::new)?
                .forget();
        }
        match self.next_reply() {
            Reply::Records(records) => Ok(records),
            Reply::Fail(message) => Err(anyhow::anyhow!(message).into()),
        }
    }
}
