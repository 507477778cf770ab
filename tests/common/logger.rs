//! Per-test progress logging on stderr.
//!
//! Each line carries the test name, the current phase and the elapsed time,
//! so a hanging mock-Hub test shows where it stopped. Set `TEST_LOG_JSON=1`
//! for one JSON object per line, and `TEST_LOG_QUIET=1` to silence debug
//! lines.
#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Instant;

use serde_json::json;

pub struct TestLogger {
    name: String,
    start: Instant,
    phase: Mutex<&'static str>,
}

impl TestLogger {
    #[must_use]
    pub fn new(name: &str) -> Self {
        let log = Self {
            name: name.to_string(),
            start: Instant::now(),
            phase: Mutex::new("init"),
        };
        log.emit("info", "start");
        log
    }

    /// Move to `phase` (`setup`, `execute`, `verify`).
    pub fn phase(&self, phase: &'static str) {
        if let Ok(mut current) = self.phase.lock() {
            *current = phase;
        }
        self.debug("phase change");
    }

    pub fn debug(&self, message: &str) {
        if std::env::var("TEST_LOG_QUIET").is_err() {
            self.emit("debug", message);
        }
    }

    pub fn http_request(&self, method: &str, url: &str) {
        self.debug(&format!("{method} {url}"));
    }

    pub fn finish_ok(&self) {
        self.emit("info", "passed");
    }

    fn emit(&self, level: &str, message: &str) {
        let phase = self.phase.lock().map_or("?", |p| *p);
        let elapsed_ms = u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX);
        if std::env::var("TEST_LOG_JSON").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true")) {
            eprintln!(
                "{}",
                json!({
                    "test": self.name,
                    "level": level,
                    "phase": phase,
                    "elapsed_ms": elapsed_ms,
                    "message": message,
                })
            );
        } else {
            eprintln!("[{}] {level} {phase} +{elapsed_ms}ms {message}", self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_are_tracked() {
        let log = TestLogger::new("phases_are_tracked");
        log.phase("execute");
        assert_eq!(*log.phase.lock().unwrap(), "execute");
        log.finish_ok();
    }
}
