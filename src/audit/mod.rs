use std::{
    cell::RefCell,
    fmt::{Debug, Display},
    fs::OpenOptions,
    io::{self, Write},
    path::PathBuf,
    rc::Rc,
};

use chrono::Local;

use crate::domain::history::TIMESTAMP_FORMAT;

/// Destination of audit lines.
pub trait AuditSink {
    fn append(&mut self, line: &str) -> io::Result<()>;
}

/// Appends to a file, creating it on first use.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AuditSink for FileSink {
    fn append(&mut self, line: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")
    }
}

/// Shared in-memory sink; clones observe the same lines.
#[derive(Debug, Clone, Default)]
pub struct MemorySink(Rc<RefCell<Vec<String>>>);

impl MemorySink {
    pub fn lines(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

impl AuditSink for MemorySink {
    fn append(&mut self, line: &str) -> io::Result<()> {
        self.0.borrow_mut().push(line.to_owned());
        Ok(())
    }
}

/// Records every wrapped operation without changing its outcome.
#[derive(Default)]
pub struct Auditor {
    sink: Option<Box<dyn AuditSink>>,
}

impl Auditor {
    pub fn new(sink: impl AuditSink + 'static) -> Self {
        Self {
            sink: Some(Box::new(sink)),
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self::new(FileSink::new(path))
    }

    pub fn audited<T, E, A, F>(&mut self, operation: &str, args: A, op: F) -> Result<T, E>
    where
        T: Debug,
        E: Display,
        A: Debug,
        F: FnOnce() -> Result<T, E>,
    {
        let result = op();

        if let Some(sink) = self.sink.as_mut() {
            let outcome = match &result {
                Ok(value) => format!("{value:?}"),
                Err(err) => format!("error: {err}"),
            };
            let line = format!(
                "[{}] operation={operation} args={args:?} result={outcome}",
                Local::now().format(TIMESTAMP_FORMAT)
            );

            if let Err(err) = sink.append(&line) {
                tracing::warn!(%operation, error = %err, "could not write audit log");
            }
        }

        result
    }
}
