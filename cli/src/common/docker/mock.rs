//! In-memory `DaemonClient` for tests.
//!
//! `RecordingDaemon` records every call in order, hands out sequential
//! container IDs (`container-1`, `container-2`, ...) and can be told to fail
//! at a chosen stage or to never finish waiting.

use crate::core::error::Result;
use anyhow::anyhow;
use async_trait::async_trait;
use futures_util::{stream, StreamExt};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use std::time::Duration;

use super::client::{ContainerInfo, ContainerSpec, DaemonClient, LogStream, WaitOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Pull(String),
    Create(ContainerSpec),
    Start(String),
    Wait(String),
    Logs(String),
    Stop(String, Duration),
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Pull,
    Create,
    Start,
    Wait,
    /// Yields the configured chunks, an error, then one more chunk.
    LogsMidStream,
    Stop,
    List,
}

#[derive(Default)]
pub struct RecordingDaemon {
    calls: Mutex<Vec<Call>>,
    fail_at: Option<FailAt>,
    hang_on_wait: bool,
    exit_code: i64,
    logs: Vec<Vec<u8>>,
    containers: Vec<ContainerInfo>,
    created: AtomicUsize,
    open_streams: Arc<AtomicUsize>,
}

impl RecordingDaemon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(mut self, stage: FailAt) -> Self {
        self.fail_at = Some(stage);
        self
    }

    pub fn hanging_on_wait(mut self) -> Self {
        self.hang_on_wait = true;
        self
    }

    pub fn with_exit_code(mut self, code: i64) -> Self {
        self.exit_code = code;
        self
    }

    pub fn with_logs(mut self, chunks: &[&str]) -> Self {
        self.logs = chunks.iter().map(|c| c.as_bytes().to_vec()).collect();
        self
    }

    pub fn with_containers(mut self, ids: &[&str]) -> Self {
        self.containers = ids
            .iter()
            .map(|id| ContainerInfo {
                id: id.to_string(),
                ..Default::default()
            })
            .collect();
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Log streams handed out and not yet dropped.
    pub fn open_log_streams(&self) -> usize {
        self.open_streams.load(Ordering::SeqCst)
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, stage: FailAt) -> Result<()> {
        if self.fail_at == Some(stage) {
            Err(anyhow!("simulated {:?} failure", stage))
        } else {
            Ok(())
        }
    }
}

/// Counts a log stream as open until it is dropped.
struct StreamGuard(Arc<AtomicUsize>);

impl StreamGuard {
    fn open(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }

    fn hold(&self) {}
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DaemonClient for RecordingDaemon {
    async fn pull_image(&self, reference: &str) -> Result<()> {
        self.record(Call::Pull(reference.to_string()));
        self.check(FailAt::Pull)
    }

    async fn create_container(&self, spec: &ContainerSpec) -> Result<String> {
        self.record(Call::Create(spec.clone()));
        self.check(FailAt::Create)?;
        let n = self.created.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("container-{}", n))
    }

    async fn start_container(&self, id: &str) -> Result<()> {
        self.record(Call::Start(id.to_string()));
        self.check(FailAt::Start)
    }

    async fn wait_container(&self, id: &str) -> Result<WaitOutcome> {
        self.record(Call::Wait(id.to_string()));
        self.check(FailAt::Wait)?;
        if self.hang_on_wait {
            return futures_util::future::pending().await;
        }
        Ok(WaitOutcome::Exited {
            status_code: self.exit_code,
        })
    }

    fn container_logs<'a>(&'a self, id: &'a str) -> LogStream<'a> {
        self.record(Call::Logs(id.to_string()));
        let guard = StreamGuard::open(&self.open_streams);
        let mut items: Vec<Result<Vec<u8>>> = self.logs.iter().cloned().map(Ok).collect();
        if self.fail_at == Some(FailAt::LogsMidStream) {
            items.push(Err(anyhow!("log stream interrupted")));
            items.push(Ok(b"unread".to_vec()));
        }
        stream::iter(items)
            .map(move |item| {
                guard.hold();
                item
            })
            .boxed()
    }

    async fn stop_container(&self, id: &str, grace: Duration) -> Result<()> {
        self.record(Call::Stop(id.to_string(), grace));
        self.check(FailAt::Stop)
    }

    async fn list_containers(&self) -> Result<Vec<ContainerInfo>> {
        self.record(Call::List);
        self.check(FailAt::List)?;
        Ok(self.containers.clone())
    }
}
