// External summarizer boundary and its subprocess transport.
//
// The process gets the intensity as its only argument and the document on
// stdin. Stdout and stderr are read line by line; progress bars and ML
// framework banners are dropped before the remaining lines are joined.
use crate::config::ExternalConfig;
use crate::error::ExternalError;
use parking_lot::{Condvar, Mutex};
use std::io::{BufRead, BufReader, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const NOISE_MARKERS: &[&str] = &["%", "it/s", "tensorflow", "oneDNN"];
const POLL_INTERVAL: Duration = Duration::from_millis(20);

pub trait ExternalSummarizer: Send + Sync {
    fn summarize(&self, text: &str, intensity: u32) -> Result<String, ExternalError>;
}

/// Progress percentages, iteration rates and framework banners.
pub fn is_noise(line: &str) -> bool {
    NOISE_MARKERS.iter().any(|marker| line.contains(marker))
}

pub fn locate_script(candidates: &[PathBuf]) -> Result<PathBuf, ExternalError> {
    candidates
        .iter()
        .find(|p| p.exists())
        .cloned()
        .ok_or_else(|| ExternalError::Unavailable {
            searched: candidates.to_vec(),
        })
}

/// Counting semaphore bounding how many summarizer processes run at once.
struct ProcessPermits {
    limit: usize,
    running: Mutex<usize>,
    freed: Condvar,
}

struct Permit<'a> {
    permits: &'a ProcessPermits,
}

impl ProcessPermits {
    fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            running: Mutex::new(0),
            freed: Condvar::new(),
        }
    }

    fn acquire(&self, deadline: Instant) -> Option<Permit<'_>> {
        let mut running = self.running.lock();
        while *running >= self.limit {
            if self.freed.wait_until(&mut running, deadline).timed_out() && *running >= self.limit {
                return None;
            }
        }
        *running += 1;
        Some(Permit { permits: self })
    }
}

impl Drop for Permit<'_> {
    fn drop(&mut self) {
        let mut running = self.permits.running.lock();
        *running = running.saturating_sub(1);
        self.permits.freed.notify_one();
    }
}

pub struct ProcessSummarizer {
    interpreter: Option<String>,
    candidates: Vec<PathBuf>,
    timeout: Duration,
    permits: ProcessPermits,
}

impl ProcessSummarizer {
    pub fn from_config(config: &ExternalConfig) -> Self {
        Self {
            interpreter: config.interpreter.clone(),
            candidates: config.script_candidates.clone(),
            timeout: config.timeout(),
            permits: ProcessPermits::new(config.max_concurrent),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn command(&self, script: &Path, intensity: u32) -> Command {
        let mut command = match &self.interpreter {
            Some(interpreter) => {
                let mut c = Command::new(interpreter);
                c.arg(script);
                c
            }
            None => Command::new(script),
        };
        command
            .arg(intensity.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }

    fn run(
        &self,
        script: &Path,
        text: &str,
        intensity: u32,
        deadline: Instant,
    ) -> Result<String, ExternalError> {
        let mut child = self.command(script, intensity).spawn().map_err(|e| {
            ExternalError::Execution(format!("failed to start {}: {}", script.display(), e))
        })?;

        // Input is written on its own thread so a child that prints before
        // draining stdin cannot deadlock against us.
        let writer = match child.stdin.take() {
            Some(mut stdin) => {
                let input = text.to_owned();
                thread::spawn(move || -> std::io::Result<()> {
                    stdin.write_all(input.as_bytes())?;
                    stdin.flush()
                })
            }
            None => {
                terminate(&mut child);
                return Err(ExternalError::Execution("stdin was not captured".to_string()));
            }
        };

        let (tx, rx) = mpsc::channel();
        if let Some(stdout) = child.stdout.take() {
            forward_lines(stdout, tx.clone());
        }
        if let Some(stderr) = child.stderr.take() {
            forward_lines(stderr, tx.clone());
        }
        drop(tx);

        let mut output = String::new();
        loop {
            match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
                Ok(line) => {
                    if !is_noise(&line) {
                        output.push_str(&line);
                        output.push(' ');
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {
                    terminate(&mut child);
                    return Err(ExternalError::Timeout(self.timeout));
                }
            }
        }

        let status = match wait_until(&mut child, deadline)? {
            Some(status) => status,
            None => {
                terminate(&mut child);
                return Err(ExternalError::Timeout(self.timeout));
            }
        };

        match writer.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                return Err(ExternalError::Execution(format!("failed to write input: {}", e)))
            }
            Err(_) => return Err(ExternalError::Execution("input writer panicked".to_string())),
        }

        if !status.success() {
            warn!(code = ?status.code(), script = %script.display(), "external summarizer exited with non-zero status");
        }

        Ok(output.trim().to_string())
    }
}

impl ExternalSummarizer for ProcessSummarizer {
    fn summarize(&self, text: &str, intensity: u32) -> Result<String, ExternalError> {
        let script = locate_script(&self.candidates)?;
        // waiting for a slot and running the process share one deadline
        let deadline = Instant::now() + self.timeout;
        let _permit = self
            .permits
            .acquire(deadline)
            .ok_or(ExternalError::Busy(self.timeout))?;
        debug!(script = %script.display(), intensity, "running external summarizer");
        self.run(&script, text, intensity, deadline)
    }
}

fn forward_lines<R: Read + Send + 'static>(stream: R, tx: Sender<String>) {
    thread::spawn(move || {
        for_each_line(BufReader::new(stream), |line| tx.send(line).is_ok());
    });
}

/// Calls `emit` for every line, where a line ends at `\n`, `\r` or `\r\n`.
/// Progress bars redraw with a bare `\r`, so that has to end a line too.
/// A trailing unterminated line is emitted at end of stream. Stops early
/// when `emit` returns false.
fn for_each_line<R: BufRead, F: FnMut(String) -> bool>(mut reader: R, mut emit: F) {
    let mut line = Vec::new();
    let mut after_cr = false;
    loop {
        let buf = match reader.fill_buf() {
            Ok([]) => break,
            Ok(buf) => buf,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(_) => break,
        };
        let consumed = buf.len();
        for &byte in buf {
            match byte {
                b'\n' if after_cr => after_cr = false,
                b'\r' | b'\n' => {
                    after_cr = byte == b'\r';
                    let text = String::from_utf8_lossy(&line).into_owned();
                    line.clear();
                    if !emit(text) {
                        return;
                    }
                }
                _ => {
                    after_cr = false;
                    line.push(byte);
                }
            }
        }
        reader.consume(consumed);
    }
    if !line.is_empty() {
        emit(String::from_utf8_lossy(&line).into_owned());
    }
}

fn wait_until(child: &mut Child, deadline: Instant) -> Result<Option<ExitStatus>, ExternalError> {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(Some(status)),
            Ok(None) if Instant::now() >= deadline => return Ok(None),
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(e) => {
                return Err(ExternalError::Execution(format!(
                    "failed to wait for summarizer: {}",
                    e
                )))
            }
        }
    }
}

fn terminate(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
