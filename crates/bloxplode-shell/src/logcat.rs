// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `MakeWriter` that sends each formatted tracing event to the Android log.
//
// An app process has no useful stdout, so on device the fmt subscriber writes
// through this instead. Every event gets its own writer, buffered until drop
// and then emitted as one log line at the priority matching its level.

use std::ffi::{CStr, CString};
use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Log tag used for every line.
pub const TAG: &str = "Bloxplode";

/// Android log priorities (`android_LogPriority`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Priority {
    Verbose = 2,
    Debug = 3,
    Info = 4,
    Warn = 5,
    Error = 6,
}

impl From<&Level> for Priority {
    fn from(level: &Level) -> Self {
        if *level == Level::ERROR {
            Priority::Error
        } else if *level == Level::WARN {
            Priority::Warn
        } else if *level == Level::INFO {
            Priority::Info
        } else if *level == Level::DEBUG {
            Priority::Debug
        } else {
            Priority::Verbose
        }
    }
}

/// Destination for finished log lines.
pub trait LogSink {
    fn write(&self, priority: Priority, tag: &CStr, text: &CStr);
}

/// Turn one formatted event into a C string. The trailing newline is
/// dropped and interior NULs are removed. Empty output yields `None`.
pub fn to_line(bytes: &[u8]) -> Option<CString> {
    let trimmed = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let cleaned: Vec<u8> = trimmed.iter().copied().filter(|&b| b != 0).collect();
    if cleaned.is_empty() {
        return None;
    }
    CString::new(cleaned).ok()
}

#[derive(Debug, Clone)]
pub struct Logcat<S> {
    tag: CString,
    sink: S,
}

impl<S: LogSink> Logcat<S> {
    pub fn new(tag: &str, sink: S) -> Self {
        let tag = to_line(tag.as_bytes()).unwrap_or_else(|| CString::from(c"Bloxplode"));
        Self { tag, sink }
    }

    pub fn writer(&self, priority: Priority) -> LogcatWriter<'_, S> {
        LogcatWriter {
            logcat: self,
            priority,
            buffer: Vec::new(),
        }
    }
}

impl<'a, S: LogSink + 'a> MakeWriter<'a> for Logcat<S> {
    type Writer = LogcatWriter<'a, S>;

    fn make_writer(&'a self) -> Self::Writer {
        self.writer(Priority::Info)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        self.writer(Priority::from(meta.level()))
    }
}

/// Buffers one event; the line is emitted when the writer is dropped.
pub struct LogcatWriter<'a, S: LogSink> {
    logcat: &'a Logcat<S>,
    priority: Priority,
    buffer: Vec<u8>,
}

impl<S: LogSink> io::Write for LogcatWriter<'_, S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: LogSink> Drop for LogcatWriter<'_, S> {
    fn drop(&mut self) {
        if let Some(text) = to_line(&self.buffer) {
            self.logcat.sink.write(self.priority, &self.logcat.tag, &text);
        }
    }
}

/// The device log, through `liblog`.
#[cfg(target_os = "android")]
#[derive(Debug, Clone, Copy)]
pub struct Liblog;

#[cfg(target_os = "android")]
#[link(name = "log")]
unsafe extern "C" {
    fn __android_log_write(
        prio: std::ffi::c_int,
        tag: *const std::ffi::c_char,
        text: *const std::ffi::c_char,
    ) -> std::ffi::c_int;
}

#[cfg(target_os = "android")]
impl LogSink for Liblog {
    fn write(&self, priority: Priority, tag: &CStr, text: &CStr) {
        // SAFETY: both pointers come from live NUL-terminated C strings.
        unsafe {
            __android_log_write(priority as std::ffi::c_int, tag.as_ptr(), text.as_ptr());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<(Priority, String, String)>>>);

    impl Recorder {
        fn lines(&self) -> Vec<(Priority, String, String)> {
            self.0.lock().unwrap().clone()
        }
    }

    impl LogSink for Recorder {
        fn write(&self, priority: Priority, tag: &CStr, text: &CStr) {
            self.0.lock().unwrap().push((
                priority,
                tag.to_string_lossy().into_owned(),
                text.to_string_lossy().into_owned(),
            ));
        }
    }

    #[test]
    fn levels_map_to_android_priorities() {
        assert_eq!(Priority::from(&Level::ERROR), Priority::Error);
        assert_eq!(Priority::from(&Level::WARN), Priority::Warn);
        assert_eq!(Priority::from(&Level::INFO), Priority::Info);
        assert_eq!(Priority::from(&Level::DEBUG), Priority::Debug);
        assert_eq!(Priority::from(&Level::TRACE), Priority::Verbose);
        assert_eq!(Priority::Warn as i32, 5);
    }

    #[test]
    fn lines_are_trimmed_and_nul_free() {
        assert_eq!(to_line(b"rumble ignored\n").unwrap().as_bytes(), b"rumble ignored");
        assert_eq!(to_line(b"a\0b").unwrap().as_bytes(), b"ab");
        assert!(to_line(b"\n").is_none());
        assert!(to_line(b"").is_none());
    }

    #[test]
    fn one_event_becomes_one_line() {
        let recorder = Recorder::default();
        let logcat = Logcat::new(TAG, recorder.clone());

        let mut writer = logcat.writer(Priority::Warn);
        write!(writer, "failed to expose ").unwrap();
        writeln!(writer, "native interface").unwrap();
        assert!(recorder.lines().is_empty());
        drop(writer);

        drop(logcat.writer(Priority::Info));

        assert_eq!(
            recorder.lines(),
            vec![(
                Priority::Warn,
                "Bloxplode".to_owned(),
                "failed to expose native interface".to_owned()
            )]
        );
    }

    #[test]
    fn subscriber_events_reach_the_sink_at_their_level() {
        let recorder = Recorder::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(Logcat::new(TAG, recorder.clone()))
            .with_ansi(false)
            .without_time()
            .with_level(false)
            .with_max_level(Level::TRACE)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("window unavailable");
            tracing::debug!(duration_ms = 40, "rumble");
        });

        let lines = recorder.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].0, Priority::Warn);
        assert!(lines[0].2.contains("window unavailable"));
        assert_eq!(lines[1].0, Priority::Debug);
        assert!(lines[1].2.contains("duration_ms=40"));
    }
}
