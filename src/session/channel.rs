//! The session's input/output channel and its release guard.

use crate::error::EngineError;
use crate::ui::render::Renderer;
use async_trait::async_trait;
use std::io::{self, IsTerminal};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// Line-oriented channel an interactive session reads from.
#[async_trait]
pub trait LineChannel: Send {
    /// Display the prompt ahead of the next read.
    async fn prompt(&mut self) -> io::Result<()>;

    /// Wait for one line of input, without its line terminator.
    ///
    /// Returns `Ok(None)` once the input stream has closed.
    async fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Surface a failed evaluation to the user.
    async fn report_failure(&mut self, err: &EngineError) -> io::Result<()>;

    /// Release the channel. The owning guard calls this exactly once.
    fn release(&mut self);
}

/// Scoped ownership of a [`LineChannel`].
///
/// Release happens either explicitly or on drop, whichever comes first, and
/// never twice.
pub(crate) struct ChannelGuard<C: LineChannel> {
    channel: C,
    released: bool,
}

impl<C: LineChannel> ChannelGuard<C> {
    pub(crate) fn acquire(channel: C) -> Self {
        tracing::debug!("session channel acquired");
        Self {
            channel,
            released: false,
        }
    }

    pub(crate) fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    pub(crate) fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.channel.release();
        tracing::debug!("session channel released");
    }
}

impl<C: LineChannel> Drop for ChannelGuard<C> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Channel over an async reader/writer pair.
///
/// The prompt goes to the writer; failures are rendered on stderr through the
/// [`Renderer`].
pub struct StreamChannel<R, W> {
    reader: R,
    writer: W,
    prompt: String,
    renderer: Renderer,
    newline_on_eof: bool,
    released: bool,
}

impl<R, W> StreamChannel<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W, prompt: impl Into<String>, renderer: Renderer) -> Self {
        Self {
            reader,
            writer,
            prompt: prompt.into(),
            renderer,
            newline_on_eof: false,
            released: false,
        }
    }

    /// Terminate the prompt line when input ends, so the shell starts clean.
    pub fn with_newline_on_eof(mut self, enabled: bool) -> Self {
        self.newline_on_eof = enabled;
        self
    }

    /// Consume the channel, handing back the writer (used to inspect output).
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl StreamChannel<BufReader<tokio::io::Stdin>, tokio::io::Stdout> {
    /// Channel bound to the process's standard input and output.
    ///
    /// `color` only takes effect when stdout is a terminal.
    pub fn stdio(prompt_label: &str, color: bool) -> Self {
        let interactive = io::stdin().is_terminal();
        let prompt_renderer = Renderer::new(color && io::stdout().is_terminal());
        Self::new(
            BufReader::new(tokio::io::stdin()),
            tokio::io::stdout(),
            prompt_renderer.prompt_text(prompt_label),
            Renderer::new(color && io::stderr().is_terminal()),
        )
        .with_newline_on_eof(interactive)
    }
}

#[async_trait]
impl<R, W> LineChannel for StreamChannel<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn prompt(&mut self) -> io::Result<()> {
        if self.released {
            return Ok(());
        }
        self.writer.write_all(self.prompt.as_bytes()).await?;
        self.writer.flush().await
    }

    async fn read_line(&mut self) -> io::Result<Option<String>> {
        if self.released {
            return Ok(None);
        }
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf).await? == 0 {
            if self.newline_on_eof {
                self.writer.write_all(b"\n").await?;
                self.writer.flush().await?;
            }
            return Ok(None);
        }
        if buf.ends_with(b"\n") {
            buf.pop();
            if buf.ends_with(b"\r") {
                buf.pop();
            }
        }
        // Undecodable bytes become U+FFFD; the line is still forwarded.
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    async fn report_failure(&mut self, err: &EngineError) -> io::Result<()> {
        self.renderer.engine_failure(err);
        Ok(())
    }

    /// Stop prompting and reading; the handles close when the channel drops.
    fn release(&mut self) {
        self.released = true;
    }
}
