//! Engine adapter that drives the Nucleus VM as a child process.

use super::{Disruption, Engine};
use crate::config::EngineConfig;
use crate::error::EngineError;
use async_trait::async_trait;
use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::process::Command;

/// Whether the child may read from the front-end's stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChildInput {
    Inherit,
    Closed,
}

/// Runs `<program> <args..> <path>` for files and
/// `<program> <args..> <eval_flag> <source>` for inline source.
///
/// Stdout is inherited so program output reaches the user directly. Stderr is
/// captured: on success it is forwarded as-is, on failure it becomes the
/// diagnostic carried by [`EngineError`].
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    program: String,
    args: Vec<String>,
    eval_flag: String,
}

impl ProcessEngine {
    pub fn new(program: impl Into<String>, args: Vec<String>, eval_flag: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args,
            eval_flag: eval_flag.into(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.program.clone(),
            config.args.clone(),
            config.eval_flag.clone(),
        )
    }

    /// Program name or path this adapter launches.
    pub fn program(&self) -> &str {
        &self.program
    }

    fn execute_args(&self, path: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.args.iter().map(OsString::from).collect();
        args.push(path.as_os_str().to_os_string());
        args
    }

    fn evaluate_args(&self, source: &str) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.args.iter().map(OsString::from).collect();
        args.push(OsString::from(&self.eval_flag));
        args.push(OsString::from(source));
        args
    }

    async fn run(&self, args: Vec<OsString>, input: ChildInput) -> Result<(), EngineError> {
        let mut cmd = Command::new(&self.program);
        // An abandoned call must not leave the VM running behind the session.
        cmd.kill_on_drop(true);
        cmd.args(&args)
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .stdin(match input {
                ChildInput::Inherit => Stdio::inherit(),
                ChildInput::Closed => Stdio::null(),
            });

        tracing::debug!(program = %self.program, argc = args.len(), "spawning engine");
        let child = cmd.spawn().map_err(|err| {
            EngineError::new(
                Disruption::Unavailable,
                format!("failed to start engine `{}`: {err}", self.program),
            )
        })?;
        let output = child.wait_with_output().await.map_err(|err| {
            EngineError::new(
                Disruption::Unavailable,
                format!("failed waiting on engine `{}`: {err}", self.program),
            )
        })?;

        if output.status.success() {
            if let Err(err) = forward_diagnostic(&mut tokio::io::stderr(), &output.stderr).await {
                tracing::debug!(program = %self.program, error = %err, "could not forward engine stderr");
            }
            return Ok(());
        }

        let diagnostic = String::from_utf8_lossy(&output.stderr).into_owned();

        let kind = Disruption::from_status(output.status);
        tracing::debug!(program = %self.program, status = ?output.status.code(), %kind, "engine failed");
        Err(EngineError::new(kind, diagnostic))
    }
}

/// Pass a successful run's stderr through untouched.
async fn forward_diagnostic<W>(writer: &mut W, bytes: &[u8]) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    if bytes.is_empty() {
        return Ok(());
    }
    writer.write_all(bytes).await?;
    writer.flush().await
}

#[async_trait]
impl Engine for ProcessEngine {
    async fn execute(&self, path: &Path) -> Result<(), EngineError> {
        self.run(self.execute_args(path), ChildInput::Inherit).await
    }

    async fn evaluate(&self, source: &str) -> Result<(), EngineError> {
        self.run(self.evaluate_args(source), ChildInput::Closed).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh_engine(script: &str) -> ProcessEngine {
        // `sh -c script name ...rest` binds the appended operands to $1, $2.
        ProcessEngine::new(
            "sh",
            vec!["-c".into(), script.into(), "nucleus-vm".into()],
            "--eval",
        )
    }

    #[test]
    fn execute_appends_the_path_after_configured_args() {
        let engine = ProcessEngine::new("vm", vec!["--quiet".into()], "--eval");
        let args = engine.execute_args(Path::new("/tmp/main.nuc"));
        assert_eq!(
            args,
            vec![OsString::from("--quiet"), OsString::from("/tmp/main.nuc")]
        );
    }

    #[test]
    fn evaluate_passes_source_as_one_argument() {
        let engine = ProcessEngine::new("vm", Vec::new(), "-e");
        let args = engine.evaluate_args("let x = 1; print x");
        assert_eq!(
            args,
            vec![OsString::from("-e"), OsString::from("let x = 1; print x")]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn evaluate_succeeds_when_engine_exits_zero() {
        let engine = sh_engine(r#"test "$1" = "--eval" && test "$2" = "1+1""#);
        engine.evaluate("1+1").await.expect("evaluate should succeed");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failure_carries_status_category_and_stderr_verbatim() {
        let engine = sh_engine("printf 'Syntax Error: unexpected token' >&2; exit 65");
        let err = engine.evaluate("let").await.unwrap_err();
        assert_eq!(err.kind, Disruption::Syntax);
        assert_eq!(err.message, "Syntax Error: unexpected token");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn execute_hands_the_path_to_the_engine() {
        let fixture = crate::testsupport::TestTempDir::new("process-engine");
        let path = fixture.write_text("main.nuc", "print 1");
        let engine = sh_engine(r#"test -f "$1" || exit 70"#);
        engine.execute(&path).await.expect("execute should succeed");

        let missing = fixture.child("gone.nuc");
        let err = engine.execute(&missing).await.unwrap_err();
        assert_eq!(err.kind, Disruption::Io);
    }

    struct ClosedWriter;

    impl AsyncWrite for ClosedWriter {
        fn poll_write(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
            _buf: &[u8],
        ) -> std::task::Poll<io::Result<usize>> {
            std::task::Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed")))
        }

        fn poll_flush(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<io::Result<()>> {
            std::task::Poll::Ready(Ok(()))
        }

        fn poll_shutdown(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<io::Result<()>> {
            std::task::Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn forwarded_diagnostic_is_written_verbatim() {
        let mut out = Vec::new();
        forward_diagnostic(&mut out, b"warning: unused \xff\n").await.unwrap();
        assert_eq!(out, b"warning: unused \xff\n".to_vec());
    }

    #[tokio::test]
    async fn forwarding_failure_is_reported_to_the_caller() {
        let err = forward_diagnostic(&mut ClosedWriter, b"note").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        forward_diagnostic(&mut ClosedWriter, b"").await.unwrap();
    }

    #[tokio::test]
    async fn missing_program_is_unavailable() {
        let engine = ProcessEngine::new("nucleus-vm-does-not-exist-4b1f", Vec::new(), "--eval");
        let err = engine.evaluate("1").await.unwrap_err();
        assert_eq!(err.kind, Disruption::Unavailable);
        assert!(err.message.contains("nucleus-vm-does-not-exist-4b1f"));
    }
}
