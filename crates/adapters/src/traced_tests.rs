// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::unit::FakeUnitLoader;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// A writer that captures log output for testing
#[derive(Clone, Default)]
struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn contents(&self) -> String {
        let logs = self.logs.lock().unwrap();
        String::from_utf8_lossy(&logs).to_string()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run a test with captured tracing output
fn with_tracing<F, Fut>(f: F) -> (String, Fut::Output)
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future,
{
    let logs = CapturedLogs::default();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(logs.clone())
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(f())
    });

    (logs.contents(), result)
}

#[test]
fn successful_load_logs_span_and_completion() {
    let (logs, result) = with_tracing(|| async {
        let traced = TracedUnitLoader::new(FakeUnitLoader::new());
        traced.load(&UnitId::from("lib/charts.js")).await
    });

    assert!(result.is_ok());
    assert!(logs.contains("unit.load"), "missing span. Logs:\n{logs}");
    assert!(logs.contains("lib/charts.js"), "missing unit. Logs:\n{logs}");
    assert!(logs.contains("loaded"), "missing completion. Logs:\n{logs}");
    assert!(logs.contains("elapsed_ms"), "missing timing. Logs:\n{logs}");
}

#[test]
fn failed_load_logs_error_and_passes_it_through() {
    let (logs, result) = with_tracing(|| async {
        let fake = FakeUnitLoader::new();
        fake.always_fail("lib/broken.js");
        let traced = TracedUnitLoader::new(fake);
        traced.load(&UnitId::from("lib/broken.js")).await
    });

    assert!(matches!(result, Err(UnitLoadError::Failed(_))));
    assert!(
        logs.contains("load attempt failed"),
        "missing failure. Logs:\n{logs}"
    );
    assert!(logs.contains("WARN"), "expected warn level. Logs:\n{logs}");
}

#[tokio::test]
async fn wrapper_delegates_to_inner_loader() {
    let fake = FakeUnitLoader::new();
    let traced = TracedUnitLoader::new(fake.clone());

    traced.load(&UnitId::from("a.js")).await.unwrap();

    assert_eq!(fake.attempts("a.js"), 1);
    assert_eq!(traced.inner().attempts("a.js"), 1);
}
