//! In-memory collaborators for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::probe::{ProbeError, ProbeResponse, ProbeTransport};
use crate::store::{StoreResult, Target, TargetStore};

/// Store returning queued results in order, then empty reads.
pub(crate) struct ScriptedStore {
    script: Mutex<VecDeque<StoreResult<Vec<Target>>>>,
}

impl ScriptedStore {
    pub(crate) fn new(script: Vec<StoreResult<Vec<Target>>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
        }
    }
}

#[async_trait]
impl TargetStore for ScriptedStore {
    async fn load_targets(&self) -> StoreResult<Vec<Target>> {
        self.script.lock().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Store that always returns the same targets.
pub(crate) struct StaticStore(pub(crate) Vec<Target>);

#[async_trait]
impl TargetStore for StaticStore {
    async fn load_targets(&self) -> StoreResult<Vec<Target>> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Ok { status: u16, body: &'static str },
    Transport(&'static str),
    Read(&'static str),
}

/// Transport answering per address after a fixed delay.
///
/// Unknown addresses answer `200 ok` immediately.
#[derive(Default)]
pub(crate) struct FakeTransport {
    replies: HashMap<String, (Duration, Reply)>,
    started: AtomicUsize,
    finished: AtomicUsize,
    timeouts: Mutex<Vec<Duration>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, address: &str, delay: Duration, reply: Reply) -> Self {
        self.replies.insert(address.to_string(), (delay, reply));
        self
    }

    pub(crate) fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub(crate) fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }

    /// Timeouts received, in call order.
    pub(crate) fn timeouts(&self) -> Vec<Duration> {
        self.timeouts.lock().clone()
    }
}

#[async_trait]
impl ProbeTransport for FakeTransport {
    async fn get(&self, address: &str, timeout: Duration) -> Result<ProbeResponse, ProbeError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        self.timeouts.lock().push(timeout);
        let (delay, reply) = self
            .replies
            .get(address)
            .cloned()
            .unwrap_or((Duration::ZERO, Reply::Ok { status: 200, body: "ok" }));

        tokio::time::sleep(delay).await;
        self.finished.fetch_add(1, Ordering::SeqCst);

        match reply {
            Reply::Ok { status, body } => Ok(ProbeResponse {
                status,
                body: body.as_bytes().to_vec(),
            }),
            Reply::Transport(msg) => Err(ProbeError::Transport(msg.to_string())),
            Reply::Read(msg) => Err(ProbeError::Read(msg.to_string())),
        }
    }
}
