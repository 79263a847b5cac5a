//! Downstream consumers of finished documents
//!
//! Delivery is two steps: the whole document is written, then the sink is
//! finished, which blocks until the consumer reports its status.

use lh_common::{LighthouseError, Result};
use log::debug;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

pub const DEFAULT_CONSUMER: &str = "lh-pipe";

pub trait DocumentSink {
    /// Hand over the complete document
    fn write_document(&mut self, document: &[u8]) -> Result<()>;

    /// Wait for the consumer to finish with the document
    fn finish(&mut self) -> Result<()>;
}

/// Write `document` to `sink` and wait for it to be consumed
pub fn deliver(sink: &mut dyn DocumentSink, document: &[u8]) -> Result<()> {
    debug!("delivering {} byte document", document.len());
    sink.write_document(document)?;
    sink.finish()?;
    debug!("document consumed");
    Ok(())
}

/// Pipes the document into a child process's standard input. The unit's
/// filename is passed as the last argument.
pub struct ProcessSink {
    program: String,
    args: Vec<String>,
    child: Option<Child>,
    /// The consumer closed its input early; reported once its status is known
    broken_pipe: Option<io::Error>,
}

impl ProcessSink {
    pub fn new(program: &str, args: &[String], filename: &str) -> Self {
        let mut args = args.to_vec();
        args.push(filename.to_string());
        Self {
            program: program.to_string(),
            args,
            child: None,
            broken_pipe: None,
        }
    }

    /// Record how writing to `child` went. Any failure other than a broken
    /// pipe ends delivery here, so the child is reaped before returning.
    fn settle_write(&mut self, mut child: Child, result: io::Result<()>) -> Result<()> {
        match result {
            Ok(()) => {
                self.child = Some(child);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                debug!("{} closed its input early", self.program);
                self.child = Some(child);
                self.broken_pipe = Some(e);
                Ok(())
            }
            Err(e) => {
                match child.wait() {
                    Ok(status) => debug!("{} exited with {} after a failed write", self.program, status),
                    Err(wait_err) => debug!("waiting for {}: {}", self.program, wait_err),
                }
                Err(LighthouseError::resource(format!("writing to {}", self.program), e))
            }
        }
    }
}

impl DocumentSink for ProcessSink {
    fn write_document(&mut self, document: &[u8]) -> Result<()> {
        debug!("spawning {} {}", self.program, self.args.join(" "));
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| LighthouseError::resource(format!("spawning {}", self.program), e))?;

        let result = match child.stdin.take() {
            // Dropping stdin closes the pipe so the consumer sees end of input
            Some(mut stdin) => stdin.write_all(document).and_then(|()| stdin.flush()),
            None => Err(io::Error::new(io::ErrorKind::BrokenPipe, "consumer stdin unavailable")),
        };
        self.settle_write(child, result)
    }

    fn finish(&mut self) -> Result<()> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        let status = child
            .wait()
            .map_err(|e| LighthouseError::resource(format!("waiting for {}", self.program), e))?;
        if status.success() {
            match self.broken_pipe.take() {
                Some(e) => Err(LighthouseError::resource(format!("writing to {}", self.program), e)),
                None => Ok(()),
            }
        } else {
            Err(LighthouseError::ConsumerFailed {
                status: status.code().unwrap_or(-1),
            })
        }
    }
}

/// Writes the document to a file
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentSink for FileSink {
    fn write_document(&mut self, document: &[u8]) -> Result<()> {
        fs::write(&self.path, document)
            .map_err(|e| LighthouseError::resource(format!("writing {}", self.path.display()), e))
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

pub struct StdoutSink;

impl DocumentSink for StdoutSink {
    fn write_document(&mut self, document: &[u8]) -> Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(document)?;
        out.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Keeps the document in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    document: Vec<u8>,
    finished: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &[u8] {
        &self.document
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl DocumentSink for MemorySink {
    fn write_document(&mut self, document: &[u8]) -> Result<()> {
        self.document.extend_from_slice(document);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}
