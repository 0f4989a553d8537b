//! External formatter.
//!
//! A formatter is an external program that reads a whole document on standard input
//! and writes the formatted document on standard output. Anything written to its
//! standard error, or a non-zero exit status, means that formatting failed.

use crate::config::Formatter;
use crate::error::{Error, Result};
use std::io::{Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Captured output of a formatter run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Output {
    pub stdout: String,
    pub stderr: String,
}

/// Runs formatters on behalf of an editing session.
pub trait Runner {
    /// Runs `formatter` with `input` as its standard input and returns whatever it
    /// wrote, or an error if it could not be run to completion.
    fn run(&self, formatter: &Formatter, input: &str) -> Result<Output>;
}

/// Returns the formatted text produced by running `formatter` over `input` with
/// `runner`, treating any diagnostic output as failure.
pub fn format(runner: &dyn Runner, formatter: &Formatter, input: &str) -> Result<String> {
    let out = runner.run(formatter, input)?;
    if out.stderr.is_empty() {
        Ok(out.stdout)
    } else {
        let cause = match out.stderr.trim() {
            "" => "unexpected output on standard error",
            cause => cause,
        };
        Err(Error::formatter(&formatter.command, cause))
    }
}

/// A [`Runner`] that spawns the formatter as a child process and kills it if it has
/// not finished within `timeout`.
#[derive(Clone, Debug)]
pub struct ProcessRunner {
    timeout: Duration,
}

impl ProcessRunner {
    /// Interval between checks on whether the child process has exited.
    const POLL_INTERVAL: Duration = Duration::from_millis(10);

    pub fn new(timeout: Duration) -> ProcessRunner {
        ProcessRunner { timeout }
    }

    fn wait(&self, child: &mut Child, command: &str) -> Result<ExitStatus> {
        let start = Instant::now();
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => (),
                Err(e) => {
                    stop(child);
                    return Err(Error::formatter(command, &e.to_string()));
                }
            }
            if start.elapsed() >= self.timeout {
                stop(child);
                return Err(Error::formatter_timeout(
                    command,
                    self.timeout.as_millis() as u64,
                ));
            }
            thread::sleep(Self::POLL_INTERVAL);
        }
    }
}

impl Runner for ProcessRunner {
    fn run(&self, formatter: &Formatter, input: &str) -> Result<Output> {
        let command = &formatter.command;
        log::debug!("running formatter: {command} {:?}", formatter.args);

        let mut child = Command::new(command)
            .args(&formatter.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::formatter(command, &e.to_string()))?;

        // Both output streams are drained on separate threads while input is being
        // written, otherwise a child that fills a pipe would never finish reading.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());
        let written = child.stdin.take().map(|mut stdin| {
            let input = input.to_string();
            thread::spawn(move || stdin.write_all(input.as_bytes()))
        });

        let status = self.wait(&mut child, command)?;
        if let Some(written) = written {
            // A formatter may exit without consuming its input, which surfaces here
            // as a broken pipe and is decided by the exit status instead.
            let _ = written.join();
        }
        let stdout = collect(stdout, command)?;
        let stderr = collect(stderr, command)?;

        if status.success() {
            Ok(Output { stdout, stderr })
        } else if !stderr.is_empty() {
            Ok(Output { stdout, stderr })
        } else {
            Err(Error::formatter(command, &format!("exited with {status}")))
        }
    }
}

/// Kills `child` and reaps it so that no zombie process is left behind.
fn stop(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

type Drain = Option<JoinHandle<std::io::Result<Vec<u8>>>>;

fn drain<R>(reader: Option<R>) -> Drain
where
    R: Read + Send + 'static,
{
    reader.map(|mut reader| {
        thread::spawn(move || {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).map(|_| bytes)
        })
    })
}

fn collect(drain: Drain, command: &str) -> Result<String> {
    match drain {
        Some(handle) => {
            let bytes = handle
                .join()
                .map_err(|_| Error::formatter(command, "output reader panicked"))??;
            String::from_utf8(bytes).map_err(|e| Error::formatter(command, &e.to_string()))
        }
        None => Ok(String::new()),
    }
}
