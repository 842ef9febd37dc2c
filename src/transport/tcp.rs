//! TCP Transport
//!
//! Blocking socket exchange against the projector's control port.

use std::io::{self, ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use bytes::BytesMut;

use crate::error::{ExchangePhase, PanelError, Result};
use crate::protocol::{decode_reply, encode_frame, Command};
use super::{ExchangeOptions, Reply, StopReason, Target, Transport};

/// Size of a single socket read
const READ_CHUNK: usize = 4096;

/// Transport over a fresh TCP connection per exchange
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpTransport;

impl TcpTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Transport for TcpTransport {
    fn exchange(&self, target: &Target, command: &Command, options: &ExchangeOptions)
        -> Result<Reply> {
        target.validate()?;
        options.validate()?;

        let frame = encode_frame(command, target.wrap_cr);
        let addr = target.to_string();
        let started = Instant::now();

        tracing::trace!("{}: IDLE -> CONNECTING", addr);
        let mut stream = connect(target, options.timeout)?;
        tracing::trace!("{}: CONNECTED", addr);

        let phase_err = |phase: ExchangePhase| {
            let addr = addr.clone();
            move |source: io::Error| PanelError::Transport { phase, addr, source }
        };

        stream
            .set_write_timeout(Some(options.timeout))
            .map_err(phase_err(ExchangePhase::Sending))?;
        stream
            .set_nodelay(true)
            .map_err(phase_err(ExchangePhase::Sending))?;

        stream
            .write_all(&frame)
            .map_err(phase_err(ExchangePhase::Sending))?;
        tracing::trace!("{}: SENT {} bytes", addr, frame.len());

        tracing::trace!("{}: READING", addr);
        let (buf, stop) = drain(&mut stream, options).map_err(phase_err(ExchangePhase::Reading))?;

        drop(stream);
        let elapsed = started.elapsed();
        tracing::trace!("{}: CLOSED after {:?} ({:?})", addr, elapsed, stop);

        Ok(Reply {
            text: decode_reply(&buf),
            bytes_read: buf.len(),
            elapsed,
            stop,
        })
    }
}

/// Resolve the target and connect to the first address that answers
fn connect(target: &Target, timeout: Duration) -> Result<TcpStream> {
    let resolve_err = |reason: String| PanelError::Resolve {
        host: target.host.clone(),
        port: target.port,
        reason,
    };

    let addrs: Vec<SocketAddr> = (target.host.as_str(), target.port)
        .to_socket_addrs()
        .map_err(|e| resolve_err(e.to_string()))?
        .collect();

    if addrs.is_empty() {
        return Err(resolve_err("no addresses found".to_string()));
    }

    let mut last_err = None;
    for addr in &addrs {
        match TcpStream::connect_timeout(addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                tracing::debug!("connect to {} failed: {}", addr, e);
                last_err = Some(e);
            }
        }
    }

    Err(PanelError::Transport {
        phase: ExchangePhase::Connecting,
        addr: target.to_string(),
        source: last_err.unwrap_or_else(|| io::Error::new(ErrorKind::NotFound, "no addresses")),
    })
}

/// Read until the peer goes idle, closes, or the hard deadline passes
///
/// Each read waits at most `timeout`, and never past the deadline.
fn drain(stream: &mut TcpStream, options: &ExchangeOptions) -> io::Result<(BytesMut, StopReason)> {
    let deadline = Instant::now() + options.ceiling();
    let mut buf = BytesMut::with_capacity(READ_CHUNK);
    let mut chunk = [0u8; READ_CHUNK];
    let mut current_wait = None;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Ok((buf, StopReason::Deadline));
        }

        let wait = remaining.min(options.timeout);
        if current_wait != Some(wait) {
            stream.set_read_timeout(Some(wait))?;
            current_wait = Some(wait);
        }

        match stream.read(&mut chunk) {
            Ok(0) => return Ok((buf, StopReason::PeerClosed)),
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
            // Unix reports an expired read timeout as WouldBlock, Windows as TimedOut
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                let stop = if wait < options.timeout {
                    StopReason::Deadline
                } else {
                    StopReason::Idle
                };
                return Ok((buf, stop));
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}
