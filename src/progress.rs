//! Best-effort scan progress spinner drawn from a background thread.
//!
//! The walk side only ever calls `try_send`, so a slow terminal can never
//! stall the scan; ticks that don't fit in the channel are dropped.

use crossbeam_channel::{bounded, RecvTimeoutError, Sender, TrySendError};
use crossterm::{cursor, queue, style::Print, terminal};
use std::io::{self, Write};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::cancel::CancelToken;
use crate::tree::{Entry, WalkObserver};

const REDRAW_INTERVAL: Duration = Duration::from_millis(100);
const CHANNEL_CAPACITY: usize = 64;
const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Handle to a running (or disabled) progress indicator.
pub struct Progress {
    tx: Option<Sender<u64>>,
    handle: Option<JoinHandle<()>>,
    seen: u64,
}

impl Progress {
    /// A no-op indicator.
    pub fn disabled() -> Self {
        Self {
            tx: None,
            handle: None,
            seen: 0,
        }
    }

    /// Spawn the indicator drawing to stderr.
    pub fn start(cancel: CancelToken) -> Self {
        Self::start_with(io::stderr(), cancel)
    }

    /// Spawn the indicator drawing to `writer`.
    pub fn start_with<W: Write + Send + 'static>(mut writer: W, cancel: CancelToken) -> Self {
        let (tx, rx) = bounded::<u64>(CHANNEL_CAPACITY);
        let handle = thread::spawn(move || {
            let mut latest = 0u64;
            let mut frame = 0usize;
            let mut last_draw: Option<Instant> = None;
            loop {
                match rx.recv_timeout(REDRAW_INTERVAL) {
                    Ok(n) => latest = n,
                    Err(RecvTimeoutError::Timeout) => {}
                    Err(RecvTimeoutError::Disconnected) => break,
                }
                if cancel.is_cancelled() {
                    break;
                }
                if latest > 0 && last_draw.map_or(true, |t| t.elapsed() >= REDRAW_INTERVAL) {
                    let _ = draw(&mut writer, SPINNER[frame % SPINNER.len()], latest);
                    frame += 1;
                    last_draw = Some(Instant::now());
                }
            }
            if last_draw.is_some() {
                let _ = clear(&mut writer);
            }
        });
        Self {
            tx: Some(tx),
            handle: Some(handle),
            seen: 0,
        }
    }

    /// Stop the indicator and wait for its thread to clear the line.
    pub fn finish(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl WalkObserver for Progress {
    fn on_entry(&mut self, _entry: &Entry) {
        self.seen += 1;
        if let Some(tx) = &self.tx {
            match tx.try_send(self.seen) {
                Ok(()) | Err(TrySendError::Full(_)) => {}
                Err(TrySendError::Disconnected(_)) => {
                    self.tx = None;
                }
            }
        }
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn draw<W: Write>(writer: &mut W, spinner: char, count: u64) -> io::Result<()> {
    queue!(
        writer,
        cursor::MoveToColumn(0),
        terminal::Clear(terminal::ClearType::CurrentLine),
        Print(format!("{spinner} Scanning files: {count}"))
    )?;
    writer.flush()
}

fn clear<W: Write>(writer: &mut W) -> io::Result<()> {
    queue!(
        writer,
        cursor::MoveToColumn(0),
        terminal::Clear(terminal::ClearType::CurrentLine)
    )?;
    writer.flush()
}
