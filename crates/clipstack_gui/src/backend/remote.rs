//! TCP connection to the external backend process.
//!
//! Frames are newline-delimited JSON. Writing happens on the bridge worker
//! thread; a dedicated reader thread parses incoming frames into a channel so
//! replies and unsolicited pushes share one ordered stream. When the reader
//! exits (EOF or read error) the channel closes and the worker reports the
//! disconnect.

use clipstack_core::proto::{ClientFrame, Command, PushEvent, ServerFrame};
use clipstack_core::AppError;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::net::TcpStream;
use std::thread;
use tracing::{debug, warn};

/// One window's connection to the backend bridge endpoint.
pub struct RemoteConn {
    writer: BufWriter<TcpStream>,
    frames: Receiver<ServerFrame>,
    next_request_id: u64,
}

impl RemoteConn {
    /// Connect to the backend and start the frame reader thread.
    ///
    /// # Errors
    /// Returns a transport error when the TCP connection cannot be
    /// established or the reader thread cannot be spawned.
    pub fn connect(addr: &str) -> Result<Self, AppError> {
        let stream = TcpStream::connect(addr)?;
        let reader_stream = stream.try_clone()?;
        let (frame_tx, frames) = unbounded();
        thread::Builder::new()
            .name("clipstack-bridge-reader".to_string())
            .spawn(move || read_frames(reader_stream, frame_tx))
            .map_err(AppError::Transport)?;
        debug!("connected to backend at {}", addr);
        Ok(Self {
            writer: BufWriter::new(stream),
            frames,
            next_request_id: 0,
        })
    }

    /// Incoming frame stream: replies interleaved with pushed events.
    pub(crate) fn frames(&self) -> &Receiver<ServerFrame> {
        &self.frames
    }

    /// Send an invocation request and return its id for reply matching.
    pub(crate) fn send_request(&mut self, command: Command) -> Result<u64, AppError> {
        self.next_request_id += 1;
        let id = self.next_request_id;
        self.send_frame(&ClientFrame::Request { id, command })?;
        Ok(id)
    }

    /// Relay a window-to-window event through the backend.
    pub(crate) fn send_emit(&mut self, event: PushEvent) -> Result<(), AppError> {
        self.send_frame(&ClientFrame::Emit { event })
    }

    fn send_frame(&mut self, frame: &ClientFrame) -> Result<(), AppError> {
        let mut line = serde_json::to_vec(frame)?;
        line.push(b'\n');
        self.writer.write_all(&line)?;
        self.writer.flush()?;
        Ok(())
    }
}

fn read_frames(stream: TcpStream, tx: Sender<ServerFrame>) {
    let reader = BufReader::new(stream);
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!("backend read failed: {}", err);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<ServerFrame>(&line) {
            Ok(frame) => {
                if tx.send(frame).is_err() {
                    break;
                }
            }
            Err(err) => warn!("dropping malformed backend frame: {}", err),
        }
    }
    // Dropping `tx` closes the frame channel; the worker observes the
    // disconnect on its next receive.
}
