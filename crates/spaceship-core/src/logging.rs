//! Structured request log.
//!
//! The client reports calls through a [`LogSink`] only when the debug flag is
//! set in its [`ClientConfig`](crate::ClientConfig). Events name the
//! operation, method and path; credentials never reach a sink.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CoreError, UtcDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Error,
}

/// One JSON line in the request log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub timestamp: UtcDateTime,
    pub level: LogLevel,
    pub message: String,
    /// Correlates the request and response events of one call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<Uuid>,
}

impl LogEvent {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: UtcDateTime::now(),
            level,
            message: message.into(),
            request_id: None,
        }
    }

    pub fn debug(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Debug, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, message)
    }

    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = Some(request_id);
        self
    }
}

/// Append-only destination for [`LogEvent`]s. Sink failures never fail a call.
pub trait LogSink: Send + Sync {
    fn record(&self, event: &LogEvent);
}

/// Forwards events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct FacadeSink;

impl LogSink for FacadeSink {
    fn record(&self, event: &LogEvent) {
        let request_id = event
            .request_id
            .map(|id| id.to_string())
            .unwrap_or_default();
        match event.level {
            LogLevel::Debug => log::debug!("[{request_id}] {}", event.message),
            LogLevel::Info => log::info!("[{request_id}] {}", event.message),
            LogLevel::Error => log::error!("[{request_id}] {}", event.message),
        }
    }
}

/// Writes one serialized event per line.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn try_record(&self, event: &LogEvent) -> Result<(), CoreError> {
        let mut line = serde_json::to_string(event)?;
        line.push('\n');
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        writer.write_all(line.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> LogSink for JsonLinesSink<W> {
    fn record(&self, event: &LogEvent) {
        if let Err(error) = self.try_record(event) {
            log::warn!("failed to write request log entry: {error}");
        }
    }
}

/// JSON-lines sink appending to a file on disk.
pub type FileLogSink = JsonLinesSink<File>;

impl JsonLinesSink<File> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        Ok(Self::new(file))
    }
}
