//! Streaming relay through an external encoder process.
//!
//! The encoder is fed the whole WAV buffer on stdin by one task while another
//! task reads stdout in chunks and pushes them into a bounded channel. The
//! receiving half becomes the HTTP response body, so the encoder is only read
//! as fast as the client drains the response.

use std::io;
use std::process::Stdio;

use bytes::Bytes;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, error, warn};

use super::encoder::EncoderCommand;

/// Chunks buffered between the encoder reader and the response writer.
pub const RELAY_CHANNEL_CAPACITY: usize = 16;

const READ_CHUNK_SIZE: usize = 16 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    /// The encoder could not be launched; nothing has been sent yet.
    #[error("Failed to start encoder '{program}': {source}")]
    Startup {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Encoded audio in the order the encoder produced it. An `Err` item means the
/// encoder failed mid-stream and the output is truncated.
pub type EncodedStream = ReceiverStream<io::Result<Bytes>>;

/// Launch `command`, feed it `input` and return its stdout as a stream.
///
/// Must be called from within a tokio runtime.
pub fn spawn_transcoder(
    command: &EncoderCommand,
    input: Bytes,
) -> Result<EncodedStream, TranscodeError> {
    let startup_error = |source: io::Error| TranscodeError::Startup {
        program: command.program.clone(),
        source,
    };

    let mut child = Command::new(&command.program)
        .args(&command.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(startup_error)?;

    let stdin = child
        .stdin
        .take()
        .ok_or_else(|| startup_error(io::Error::other("encoder stdin not captured")))?;
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| startup_error(io::Error::other("encoder stdout not captured")))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| startup_error(io::Error::other("encoder stderr not captured")))?;

    debug!(
        program = %command.program,
        pid = ?child.id(),
        input_bytes = input.len(),
        "Encoder started"
    );

    let (tx, rx) = mpsc::channel(RELAY_CHANNEL_CAPACITY);

    tokio::spawn(feed_input(stdin, input));
    tokio::spawn(log_diagnostics(stderr));
    tokio::spawn(relay_output(child, stdout, tx));

    Ok(ReceiverStream::new(rx))
}

/// Write the whole input, then close stdin so the encoder sees end-of-input.
async fn feed_input(mut stdin: ChildStdin, input: Bytes) {
    if let Err(e) = stdin.write_all(&input).await {
        // Usually a broken pipe because the encoder already exited; the relay
        // task reports the exit status.
        warn!(error = %e, "Failed to write audio to encoder stdin");
        return;
    }
    if let Err(e) = stdin.shutdown().await {
        warn!(error = %e, "Failed to close encoder stdin");
    }
}

async fn log_diagnostics(stderr: ChildStderr) {
    let mut lines = BufReader::new(stderr).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => warn!(target: "encoder", "{line}"),
            Ok(None) => break,
            Err(e) => {
                debug!(error = %e, "Stopped reading encoder stderr");
                break;
            }
        }
    }
}

/// Pump stdout into `tx` until EOF, then surface a failed exit as a stream error.
async fn relay_output(
    mut child: Child,
    mut stdout: ChildStdout,
    tx: mpsc::Sender<io::Result<Bytes>>,
) {
    let mut buf = vec![0u8; READ_CHUNK_SIZE];
    let mut relayed = 0usize;

    loop {
        match stdout.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                relayed += n;
                if tx.send(Ok(Bytes::copy_from_slice(&buf[..n]))).await.is_err() {
                    // Response body dropped; `child` is killed on drop.
                    debug!(relayed, "Response closed before encoder finished");
                    return;
                }
            }
            Err(e) => {
                error!(error = %e, relayed, "Failed to read encoder output");
                let _ = tx.send(Err(e)).await;
                return;
            }
        }
    }

    match child.wait().await {
        Ok(status) if status.success() => {
            debug!(relayed, "Encoder finished");
        }
        Ok(status) => {
            error!(%status, relayed, "Encoder exited with failure after streaming began");
            let _ = tx
                .send(Err(io::Error::other(format!("encoder exited with {status}"))))
                .await;
        }
        Err(e) => {
            error!(error = %e, relayed, "Failed to wait for encoder");
            let _ = tx.send(Err(e)).await;
        }
    }
}
