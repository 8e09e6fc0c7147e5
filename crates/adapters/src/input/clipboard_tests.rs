// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use parking_lot::Mutex;
use std::sync::Arc;
use tandem_core::test_support::exchange_string;

#[test]
fn default_command_is_never_empty() {
    assert!(!default_clipboard_command().is_empty());
}

#[tokio::test]
async fn reads_clipboard_through_command() {
    let dir = tempfile::tempdir().unwrap();
    let board = dir.path().join("clipboard");
    std::fs::write(&board, format!("  {}  ", exchange_string("xyz="))).unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let command = vec!["cat".to_string(), board.display().to_string()];
    let mut provider =
        ClipboardProvider::new(command, InputFormat::default(), Duration::from_millis(10));
    provider.start(Arc::new(move |v| sink.lock().push(v))).await.unwrap();

    for _ in 0..200 {
        if !seen.lock().is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    // Unchanged clipboard is not reported again
    tokio::time::sleep(Duration::from_millis(50)).await;
    provider.stop().await;

    assert_eq!(*seen.lock(), vec![exchange_string("xyz=")]);
}

#[tokio::test]
async fn failing_command_reports_nothing() {
    let seen = Arc::new(Mutex::new(Vec::<String>::new()));
    let sink = Arc::clone(&seen);
    let mut provider = ClipboardProvider::new(
        vec!["false".to_string()],
        InputFormat::default(),
        Duration::from_millis(10),
    );
    provider.start(Arc::new(move |v| sink.lock().push(v))).await.unwrap();
    tokio::time::sleep(Duration::from_millis(60)).await;
    provider.stop().await;

    assert!(seen.lock().is_empty());
}
