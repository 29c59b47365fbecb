//! Shared test fixtures for path, session, and app test modules.
//!
//! Std-only temp directories, a recording engine, a recording render sink,
//! and a scripted channel that logs every interaction in order.

use crate::engine::{Disruption, Engine};
use crate::error::EngineError;
use crate::session::LineChannel;
use crate::ui::render::RenderSink;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!("nucleus-{prefix}-{millis}-{suffix}"));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    /// Root directory path for this fixture.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build a child path under the fixture root.
    pub fn child(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.child(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// One observable interaction during a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    Prompt,
    Read(Option<String>),
    Evaluate(String),
    Report(Disruption),
    Release,
}

/// Ordered, shareable log of [`ChannelEvent`]s.
#[derive(Debug, Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<ChannelEvent>>>);

impl EventLog {
    pub fn push(&self, event: ChannelEvent) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<ChannelEvent> {
        self.0.lock().unwrap().clone()
    }

    pub fn releases(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| **e == ChannelEvent::Release)
            .count()
    }
}

/// Channel that replays a fixed list of lines, then reports end of input.
pub struct ScriptedChannel {
    lines: VecDeque<String>,
    log: EventLog,
    fail_after: Option<usize>,
    reads: usize,
}

impl ScriptedChannel {
    pub fn new<I, S>(lines: I) -> (Self, EventLog)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let log = EventLog::default();
        let channel = Self {
            lines: lines.into_iter().map(Into::into).collect(),
            log: log.clone(),
            fail_after: None,
            reads: 0,
        };
        (channel, log)
    }

    /// Make the read after `reads` successful reads fail with an I/O error.
    pub fn failing_after(mut self, reads: usize) -> Self {
        self.fail_after = Some(reads);
        self
    }
}

#[async_trait]
impl LineChannel for ScriptedChannel {
    async fn prompt(&mut self) -> io::Result<()> {
        self.log.push(ChannelEvent::Prompt);
        Ok(())
    }

    async fn read_line(&mut self) -> io::Result<Option<String>> {
        if self.fail_after == Some(self.reads) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "scripted failure"));
        }
        self.reads += 1;
        let line = self.lines.pop_front();
        self.log.push(ChannelEvent::Read(line.clone()));
        Ok(line)
    }

    async fn report_failure(&mut self, err: &EngineError) -> io::Result<()> {
        self.log.push(ChannelEvent::Report(err.kind));
        Ok(())
    }

    fn release(&mut self) {
        self.log.push(ChannelEvent::Release);
    }
}

/// A call received by [`RecordingEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Execute(PathBuf),
    Evaluate(String),
}

/// Engine stub that records calls and fails on selected sources.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    calls: Mutex<Vec<EngineCall>>,
    failures: HashMap<String, Disruption>,
    fail_all: Option<Disruption>,
    log: Option<EventLog>,
}

impl RecordingEngine {
    /// Fail evaluation of exactly `source` with `kind`.
    pub fn failing_on(source: &str, kind: Disruption) -> Self {
        let mut engine = Self::default();
        engine.failures.insert(source.to_string(), kind);
        engine
    }

    /// Fail every call with `kind`.
    pub fn failing_all(kind: Disruption) -> Self {
        Self {
            fail_all: Some(kind),
            ..Self::default()
        }
    }

    /// Mirror evaluate calls into a channel's event log.
    pub fn with_log(mut self, log: EventLog) -> Self {
        self.log = Some(log);
        self
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn evaluated(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                EngineCall::Evaluate(source) => Some(source),
                EngineCall::Execute(_) => None,
            })
            .collect()
    }

    fn outcome(&self, key: &str) -> Result<(), EngineError> {
        match self.fail_all.or_else(|| self.failures.get(key).copied()) {
            Some(kind) => Err(EngineError::new(kind, format!("{kind}: scripted failure"))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Engine for RecordingEngine {
    async fn execute(&self, path: &Path) -> Result<(), EngineError> {
        self.calls
            .lock()
            .unwrap()
            .push(EngineCall::Execute(path.to_path_buf()));
        self.outcome(&path.display().to_string())
    }

    async fn evaluate(&self, source: &str) -> Result<(), EngineError> {
        self.calls
            .lock()
            .unwrap()
            .push(EngineCall::Evaluate(source.to_string()));
        if let Some(log) = &self.log {
            log.push(ChannelEvent::Evaluate(source.to_string()));
        }
        self.outcome(source)
    }
}

/// Render sink that keeps every line as `<kind>: <text>`.
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    fn record(&self, kind: &str, text: &str) {
        self.entries.lock().unwrap().push(format!("{kind}: {text}"));
    }
}

impl RenderSink for RecordingSink {
    fn error(&self, msg: &str) {
        self.record("error", msg);
    }

    fn warn(&self, msg: &str) {
        self.record("warn", msg);
    }

    fn engine_failure(&self, err: &EngineError) {
        self.record("engine", &err.to_string());
    }

    fn banner(&self, text: &str) {
        self.record("banner", text);
    }

    fn output(&self, text: &str) {
        self.record("output", text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_dir_fixture_writes_and_resolves_paths() {
        let fixture = TestTempDir::new("fixture");
        let file = fixture.write_text("nested/file.nuc", "print 1");
        assert_eq!(fs::read_to_string(file).unwrap(), "print 1");
    }

    #[tokio::test]
    async fn recording_engine_fails_only_selected_sources() {
        let engine = RecordingEngine::failing_on("bad", Disruption::Reference);
        assert!(engine.evaluate("good").await.is_ok());
        let err = engine.evaluate("bad").await.unwrap_err();
        assert_eq!(err.kind, Disruption::Reference);
        assert_eq!(engine.evaluated(), vec!["good".to_string(), "bad".to_string()]);
    }
}
