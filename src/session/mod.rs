//! Interactive read-evaluate session.
//!
//! A session moves through three states:
//!
//! - `Idle`: constructed, no channel held yet;
//! - `Running`: the channel is acquired and the loop prompts, waits for one
//!   line, and forwards it to the engine;
//! - `Terminated`: the exit sentinel or end of input was seen (or the channel
//!   failed) and the channel has been released.
//!
//! Iterations never overlap. The next prompt is shown only once the engine
//! call for the previous line has returned, successfully or not. A failed
//! evaluation is reported and the loop carries on.

mod channel;

pub use channel::{LineChannel, StreamChannel};

use crate::engine::Engine;
use crate::error::SessionError;
use channel::ChannelGuard;

/// Input line that ends the session.
pub const EXIT_SENTINEL: &str = "exit";

/// Lifecycle state of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
    Terminated,
}

/// Why a session ended normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    ExitSentinel,
    EndOfInput,
}

/// Counters reported when a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub reason: EndReason,
    /// Lines forwarded to the engine.
    pub evaluated: usize,
    /// Forwarded lines the engine reported as failed.
    pub failed: usize,
}

/// Outcome of one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Finished(SessionSummary),
}

/// One interactive run, from channel acquisition to release.
pub struct Session<'e, C: LineChannel> {
    engine: &'e dyn Engine,
    channel: Option<ChannelGuard<C>>,
    state: SessionState,
    evaluated: usize,
    failed: usize,
}

impl<'e, C: LineChannel> Session<'e, C> {
    pub fn new(engine: &'e dyn Engine) -> Self {
        Self {
            engine,
            channel: None,
            state: SessionState::Idle,
            evaluated: 0,
            failed: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Acquire `channel` and enter `Running`.
    pub fn start(&mut self, channel: C) -> Result<(), SessionError> {
        if self.state != SessionState::Idle {
            return Err(SessionError::AlreadyStarted);
        }
        self.channel = Some(ChannelGuard::acquire(channel));
        self.state = SessionState::Running;
        tracing::debug!("session running");
        Ok(())
    }

    /// Run one prompt/read/evaluate iteration.
    pub async fn step(&mut self) -> Result<Step, SessionError> {
        if self.state != SessionState::Running {
            return Err(SessionError::NotRunning);
        }
        match self.iterate().await {
            Ok(None) => Ok(Step::Continue),
            Ok(Some(reason)) => Ok(Step::Finished(self.finish(reason))),
            Err(err) => {
                self.terminate();
                tracing::debug!(error = %err, "session channel failed");
                Err(SessionError::Io(err))
            }
        }
    }

    /// Start on `channel` and loop until the session ends.
    pub async fn run(mut self, channel: C) -> Result<SessionSummary, SessionError> {
        self.start(channel)?;
        loop {
            if let Step::Finished(summary) = self.step().await? {
                return Ok(summary);
            }
        }
    }

    async fn iterate(&mut self) -> std::io::Result<Option<EndReason>> {
        let Some(guard) = self.channel.as_mut() else {
            return Ok(Some(EndReason::EndOfInput));
        };
        let channel = guard.channel_mut();

        channel.prompt().await?;
        let Some(line) = channel.read_line().await? else {
            return Ok(Some(EndReason::EndOfInput));
        };
        if line == EXIT_SENTINEL {
            return Ok(Some(EndReason::ExitSentinel));
        }

        self.evaluated += 1;
        if let Err(err) = self.engine.evaluate(&line).await {
            self.failed += 1;
            tracing::debug!(kind = %err.kind, "evaluation failed");
            channel.report_failure(&err).await?;
        }
        Ok(None)
    }

    fn finish(&mut self, reason: EndReason) -> SessionSummary {
        self.terminate();
        let summary = SessionSummary {
            reason,
            evaluated: self.evaluated,
            failed: self.failed,
        };
        tracing::debug!(?reason, evaluated = summary.evaluated, failed = summary.failed, "session ended");
        summary
    }

    fn terminate(&mut self) {
        if let Some(mut guard) = self.channel.take() {
            guard.release();
        }
        self.state = SessionState::Terminated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Disruption;
    use crate::testsupport::{ChannelEvent, RecordingEngine, ScriptedChannel};

    #[tokio::test]
    async fn exit_as_first_line_evaluates_nothing() {
        let engine = RecordingEngine::default();
        let (channel, log) = ScriptedChannel::new(["exit", "print 1"]);

        let summary = Session::new(&engine).run(channel).await.unwrap();

        assert_eq!(summary.reason, EndReason::ExitSentinel);
        assert_eq!(summary.evaluated, 0);
        assert!(engine.calls().is_empty());
        assert_eq!(log.releases(), 1);
    }

    #[tokio::test]
    async fn each_line_is_evaluated_before_the_next_prompt() {
        let engine = RecordingEngine::default();
        let (channel, log) = ScriptedChannel::new(["a", "b", "exit"]);
        let engine = engine.with_log(log.clone());

        let summary = Session::new(&engine).run(channel).await.unwrap();

        assert_eq!(summary.evaluated, 2);
        assert_eq!(
            log.events(),
            vec![
                ChannelEvent::Prompt,
                ChannelEvent::Read(Some("a".into())),
                ChannelEvent::Evaluate("a".into()),
                ChannelEvent::Prompt,
                ChannelEvent::Read(Some("b".into())),
                ChannelEvent::Evaluate("b".into()),
                ChannelEvent::Prompt,
                ChannelEvent::Read(Some("exit".into())),
                ChannelEvent::Release,
            ]
        );
    }

    #[tokio::test]
    async fn end_of_input_terminates_cleanly() {
        let engine = RecordingEngine::default();
        let (channel, log) = ScriptedChannel::new(["print 1"]);

        let summary = Session::new(&engine).run(channel).await.unwrap();

        assert_eq!(summary.reason, EndReason::EndOfInput);
        assert_eq!(engine.evaluated(), vec!["print 1".to_string()]);
        assert_eq!(log.releases(), 1);
    }

    #[tokio::test]
    async fn failed_evaluation_is_reported_and_the_session_continues() {
        let engine = RecordingEngine::failing_on("boom", Disruption::Syntax);
        let (channel, log) = ScriptedChannel::new(["boom", "after", "exit"]);

        let summary = Session::new(&engine).run(channel).await.unwrap();

        assert_eq!(summary.evaluated, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(engine.evaluated(), vec!["boom".to_string(), "after".to_string()]);
        let events = log.events();
        let report = events
            .iter()
            .position(|e| matches!(e, ChannelEvent::Report(Disruption::Syntax)))
            .expect("failure reported");
        assert_eq!(events[report + 1], ChannelEvent::Prompt);
        assert_eq!(events[report + 2], ChannelEvent::Read(Some("after".into())));
    }

    #[tokio::test]
    async fn sentinel_must_match_exactly() {
        let engine = RecordingEngine::default();
        let (channel, _log) = ScriptedChannel::new([" exit", "EXIT", "exit "]);

        let summary = Session::new(&engine).run(channel).await.unwrap();

        assert_eq!(summary.reason, EndReason::EndOfInput);
        assert_eq!(summary.evaluated, 3);
    }

    #[tokio::test]
    async fn channel_failure_still_releases() {
        let engine = RecordingEngine::default();
        let (channel, log) = ScriptedChannel::new(["a"]);
        let channel = channel.failing_after(1);

        let err = Session::new(&engine).run(channel).await.unwrap_err();

        assert!(matches!(err, SessionError::Io(_)));
        assert_eq!(engine.evaluated(), vec!["a".to_string()]);
        assert_eq!(log.releases(), 1);
    }

    #[tokio::test]
    async fn state_machine_transitions() {
        let engine = RecordingEngine::default();
        let (channel, log) = ScriptedChannel::new(["x", "exit"]);
        let mut session = Session::new(&engine);
        assert_eq!(session.state(), SessionState::Idle);
        assert!(matches!(session.step().await, Err(SessionError::NotRunning)));

        session.start(channel).unwrap();
        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(session.step().await.unwrap(), Step::Continue);
        assert!(matches!(session.step().await.unwrap(), Step::Finished(_)));
        assert_eq!(session.state(), SessionState::Terminated);
        assert_eq!(log.releases(), 1);

        let (again, _) = ScriptedChannel::new(["exit"]);
        assert!(matches!(session.start(again), Err(SessionError::AlreadyStarted)));
        assert!(matches!(session.step().await, Err(SessionError::NotRunning)));
    }

    #[tokio::test]
    async fn dropping_a_running_session_releases_the_channel() {
        let engine = RecordingEngine::default();
        let (channel, log) = ScriptedChannel::new(["x"]);
        let mut session = Session::new(&engine);
        session.start(channel).unwrap();
        drop(session);
        assert_eq!(log.releases(), 1);
    }
}
