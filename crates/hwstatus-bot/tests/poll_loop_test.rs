//! Poll loop scenarios driven by in-memory sources and senders.

use async_trait::async_trait;
use hwstatus_api::StatusSource;
use hwstatus_bot::{failure_message, IterationOutcome, MessageSender, Notifier, PollLoop, PollState};
use hwstatus_common::test_utils::{init_test_logging, payload_fixtures};
use hwstatus_common::{ChatId, HomeworkError, Result, Watermark};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const START: Watermark = Watermark(1_700_000_000);

/// One scripted answer of the fake API.
#[derive(Clone)]
enum Reply {
    Payload(Value),
    Timeout,
    Status(u16),
}

/// Replays scripted replies and records every requested watermark.
#[derive(Clone, Default)]
struct ScriptedSource {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    requested: Arc<Mutex<Vec<Watermark>>>,
}

impl ScriptedSource {
    fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().collect())),
            requested: Arc::default(),
        }
    }

    fn requested(&self) -> Vec<Watermark> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatusSource for ScriptedSource {
    async fn fetch_statuses(&self, watermark: Watermark) -> Result<Value> {
        self.requested.lock().unwrap().push(watermark);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("script exhausted");

        match reply {
            Reply::Payload(value) => Ok(value),
            Reply::Timeout => Err(HomeworkError::transport(
                watermark,
                io::Error::new(io::ErrorKind::TimedOut, "operation timed out"),
            )),
            Reply::Status(status) => Err(HomeworkError::UpstreamStatus { status }),
        }
    }
}

/// Records delivered texts; fails the next `failures` sends.
#[derive(Clone, Default)]
struct RecordingSender {
    sent: Arc<Mutex<Vec<String>>>,
    failures: Arc<AtomicUsize>,
    attempts: Arc<AtomicUsize>,
}

impl RecordingSender {
    fn failing(failures: usize) -> Self {
        let sender = Self::default();
        sender.failures.store(failures, Ordering::SeqCst);
        sender
    }

    fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send_text(&self, _chat_id: &ChatId, text: &str) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(HomeworkError::delivery("Too Many Requests: retry after 5"));
        }
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

fn poll_loop(
    source: &ScriptedSource,
    sender: &RecordingSender,
) -> PollLoop<ScriptedSource, RecordingSender> {
    init_test_logging();
    PollLoop::with_state(
        source.clone(),
        Notifier::new(sender.clone(), ChatId("42".to_string())),
        Duration::from_secs(600),
        PollState::new(START),
    )
}

fn approved_message(name: &str) -> String {
    format!(
        "Изменился статус проверки работы \"{name}\". Работа проверена: ревьюеру всё понравилось. Ура!"
    )
}

#[tokio::test]
async fn test_identical_payloads_notify_once() {
    let payload = payload_fixtures::single("approved", "hw_final", 1_700_000_600);
    let source = ScriptedSource::new(vec![Reply::Payload(payload); 3]);
    let sender = RecordingSender::default();
    let mut poll = poll_loop(&source, &sender);

    assert_eq!(
        poll.run_iteration().await,
        IterationOutcome::Notified {
            watermark: Watermark(1_700_000_600)
        }
    );
    assert_eq!(poll.run_iteration().await, IterationOutcome::Duplicate);
    assert_eq!(poll.run_iteration().await, IterationOutcome::Duplicate);

    assert_eq!(sender.sent(), vec![approved_message("hw_final")]);
    assert_eq!(
        source.requested(),
        vec![START, Watermark(1_700_000_600), Watermark(1_700_000_600)]
    );
    assert_eq!(poll.state().watermark, Watermark(1_700_000_600));
}

#[tokio::test]
async fn test_empty_homeworks_send_nothing() {
    let source = ScriptedSource::new([Reply::Payload(payload_fixtures::empty(1_700_000_900))]);
    let sender = RecordingSender::default();
    let mut poll = poll_loop(&source, &sender);

    assert_eq!(poll.run_iteration().await, IterationOutcome::NoUpdates);

    assert_eq!(sender.attempts(), 0);
    assert_eq!(poll.state(), &PollState::new(START));
}

#[tokio::test]
async fn test_status_changes_are_each_delivered() {
    let source = ScriptedSource::new([
        Reply::Payload(payload_fixtures::single("reviewing", "hw", 1_700_000_100)),
        Reply::Payload(payload_fixtures::single("rejected", "hw", 1_700_000_200)),
        Reply::Payload(payload_fixtures::single("approved", "hw", 1_700_000_300)),
    ]);
    let sender = RecordingSender::default();
    let mut poll = poll_loop(&source, &sender);

    for _ in 0..3 {
        assert!(matches!(
            poll.run_iteration().await,
            IterationOutcome::Notified { .. }
        ));
    }

    let sent = sender.sent();
    assert_eq!(sent.len(), 3);
    assert!(sent[0].ends_with("Работа взята на проверку ревьюером."));
    assert!(sent[1].ends_with("Работа проверена: у ревьюера есть замечания."));
    assert_eq!(sent[2], approved_message("hw"));
    assert_eq!(poll.state().watermark, Watermark(1_700_000_300));
    assert_eq!(poll.state().last_notified_message.as_deref(), Some(sent[2].as_str()));
}

#[tokio::test]
async fn test_failed_delivery_keeps_watermark_and_retries() {
    let payload = payload_fixtures::single("approved", "hw", 1_700_000_600);
    let source = ScriptedSource::new(vec![Reply::Payload(payload); 2]);
    let sender = RecordingSender::failing(1);
    let mut poll = poll_loop(&source, &sender);

    assert_eq!(poll.run_iteration().await, IterationOutcome::DeliveryFailed);
    assert_eq!(poll.state(), &PollState::new(START));

    assert_eq!(
        poll.run_iteration().await,
        IterationOutcome::Notified {
            watermark: Watermark(1_700_000_600)
        }
    );
    assert_eq!(source.requested(), vec![START, START]);
    assert_eq!(sender.attempts(), 2);
    assert_eq!(sender.sent(), vec![approved_message("hw")]);
}

#[tokio::test]
async fn test_missing_current_date_advances_to_local_time() {
    let payload = json!({ "homeworks": [{ "status": "approved", "homework_name": "hw" }] });
    let source = ScriptedSource::new([Reply::Payload(payload)]);
    let sender = RecordingSender::default();
    let mut poll = poll_loop(&source, &sender);
    let before = Watermark::now();

    let outcome = poll.run_iteration().await;

    match outcome {
        IterationOutcome::Notified { watermark } => assert!(watermark >= before),
        other => panic!("expected notification, got {other:?}"),
    }
    assert!(poll.state().watermark > START);
}

#[tokio::test]
async fn test_list_payload_is_reported_and_loop_survives() {
    let source = ScriptedSource::new([
        Reply::Payload(json!([{ "homeworks": [] }])),
        Reply::Payload(payload_fixtures::single("approved", "hw", 1_700_000_600)),
    ]);
    let sender = RecordingSender::default();
    let mut poll = poll_loop(&source, &sender);

    match poll.run_iteration().await {
        IterationOutcome::Failed { message, reported } => {
            assert!(reported);
            assert!(message.contains("не является словарём"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(poll.state().watermark, START);

    assert!(matches!(
        poll.run_iteration().await,
        IterationOutcome::Notified { .. }
    ));
    assert_eq!(sender.sent().len(), 2);
}

#[tokio::test]
async fn test_repeated_timeout_notifies_once() {
    let source = ScriptedSource::new([Reply::Timeout, Reply::Timeout]);
    let sender = RecordingSender::default();
    let mut poll = poll_loop(&source, &sender);

    let first = poll.run_iteration().await;
    let second = poll.run_iteration().await;

    assert!(matches!(first, IterationOutcome::Failed { reported: true, .. }));
    assert!(matches!(second, IterationOutcome::Failed { reported: false, .. }));

    let sent = sender.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("operation timed out"));
    assert_eq!(source.requested(), vec![START, START]);
}

#[tokio::test]
async fn test_different_failures_are_each_reported() {
    let source = ScriptedSource::new([Reply::Status(500), Reply::Status(502), Reply::Status(502)]);
    let sender = RecordingSender::default();
    let mut poll = poll_loop(&source, &sender);

    for _ in 0..3 {
        poll.run_iteration().await;
    }

    assert_eq!(
        sender.sent(),
        vec![
            failure_message(&HomeworkError::UpstreamStatus { status: 500 }),
            failure_message(&HomeworkError::UpstreamStatus { status: 502 }),
        ]
    );
}

#[tokio::test]
async fn test_failure_memory_survives_a_success() {
    let source = ScriptedSource::new([
        Reply::Status(500),
        Reply::Payload(payload_fixtures::empty(1_700_000_100)),
        Reply::Status(500),
    ]);
    let sender = RecordingSender::default();
    let mut poll = poll_loop(&source, &sender);

    poll.run_iteration().await;
    assert_eq!(poll.run_iteration().await, IterationOutcome::NoUpdates);
    let third = poll.run_iteration().await;

    assert!(matches!(third, IterationOutcome::Failed { reported: false, .. }));
    assert_eq!(sender.sent().len(), 1);
}

#[tokio::test]
async fn test_undelivered_failure_is_still_remembered() {
    let source = ScriptedSource::new([Reply::Status(503), Reply::Status(503)]);
    let sender = RecordingSender::failing(1);
    let mut poll = poll_loop(&source, &sender);

    let first = poll.run_iteration().await;
    let second = poll.run_iteration().await;

    assert!(matches!(first, IterationOutcome::Failed { reported: false, .. }));
    assert!(matches!(second, IterationOutcome::Failed { reported: false, .. }));
    assert_eq!(sender.attempts(), 1);
    assert_eq!(
        poll.state().last_error_message,
        Some(failure_message(&HomeworkError::UpstreamStatus { status: 503 }))
    );
}

#[tokio::test]
async fn test_unknown_status_is_reported_without_moving_watermark() {
    let source = ScriptedSource::new([Reply::Payload(payload_fixtures::single(
        "on_hold",
        "hw",
        1_700_000_600,
    ))]);
    let sender = RecordingSender::default();
    let mut poll = poll_loop(&source, &sender);

    match poll.run_iteration().await {
        IterationOutcome::Failed { message, .. } => assert!(message.contains("on_hold")),
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(poll.state().watermark, START);
    assert_eq!(poll.state().last_notified_message, None);
}

#[tokio::test(start_paused = true)]
async fn test_run_sleeps_between_iterations() {
    let payload = payload_fixtures::empty(1_700_000_000);
    let source = ScriptedSource::new(vec![Reply::Payload(payload); 3]);
    let sender = RecordingSender::default();
    let poll = poll_loop(&source, &sender);

    let handle = tokio::spawn(poll.run());

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(source.requested().len(), 1);

    tokio::time::sleep(Duration::from_secs(600)).await;
    assert_eq!(source.requested().len(), 2);

    handle.abort();
}
