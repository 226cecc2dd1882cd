//! Integration Tests für Entprellung, Event-Queue und AT-Handshake
//!
//! Diese Tests laufen auf dem Host (x86_64) und nutzen ScriptedTransport

use std::collections::VecDeque;

use embassy_futures::block_on;
use esp_core::at::{AT_RESPONSE_TIMEOUT_MS, CMD_AT, CMD_DEV_EUI, CMD_VERSION, LINE_CAPACITY};
use esp_core::handshake::{MSG_CONNECTED, MSG_NOT_RESPONDING};
use esp_core::input::EVENT_QUEUE_CAPACITY;
use esp_core::{
    AtClient, AtError, ButtonEvent, ButtonEventKind, Debouncer, DeviceEui, Edge, EventQueue,
    HandshakeOutcome, QueueFull, SerialError, SerialTransport, StatusReporter, process_events,
    run_handshake,
};

// ============================================================================
// Scripted Transport + Recording Reporter
// ============================================================================

/// Antwortet auf jedes gesendete Kommando mit dem nächsten Skript-Eintrag
///
/// `None` = Modul schweigt (read_byte läuft in den Timeout).
#[derive(Default)]
pub struct ScriptedTransport {
    pub script: VecDeque<Option<&'static [u8]>>,
    pub rx: VecDeque<u8>,
    pub writes: Vec<String>,
    pub timeouts: Vec<u64>,
    pub fail_writes: bool,
}

impl ScriptedTransport {
    pub fn new(script: &[Option<&'static [u8]>]) -> Self {
        Self {
            script: script.iter().copied().collect(),
            ..Self::default()
        }
    }

    /// Bytes liegen bereits im Empfangspuffer (ohne Kommando)
    pub fn with_pending(bytes: &[u8]) -> Self {
        Self {
            rx: bytes.iter().copied().collect(),
            ..Self::default()
        }
    }
}

impl SerialTransport for ScriptedTransport {
    async fn write_all(&mut self, bytes: &[u8]) -> Result<(), SerialError> {
        if self.fail_writes {
            return Err(SerialError::Io);
        }
        self.writes
            .push(String::from_utf8(bytes.to_vec()).expect("ASCII command"));
        if let Some(Some(reply)) = self.script.pop_front() {
            self.rx.extend(reply.iter().copied());
        }
        Ok(())
    }

    async fn read_byte(&mut self, timeout_ms: u64) -> Result<u8, SerialError> {
        match self.rx.pop_front() {
            Some(byte) => Ok(byte),
            None => {
                self.timeouts.push(timeout_ms);
                Err(SerialError::Timeout)
            }
        }
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    pub messages: Vec<String>,
}

impl StatusReporter for RecordingReporter {
    fn report(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

const fn reply(bytes: &'static [u8]) -> Option<&'static [u8]> {
    Some(bytes)
}

const OK: Option<&'static [u8]> = reply(b"+AT: OK\r\n");
const VERSION: Option<&'static [u8]> = reply(b"+VER: 4.0.11\r\n");
const DEV_EUI: Option<&'static [u8]> = reply(b"+ID: DevEui, 2C:F7:F1:20:32:30:A5:70\r\n");

fn press(timestamp_ms: u64) -> ButtonEvent {
    ButtonEvent {
        kind: ButtonEventKind::Press,
        timestamp_ms,
    }
}

fn release(timestamp_ms: u64) -> ButtonEvent {
    ButtonEvent {
        kind: ButtonEventKind::Release,
        timestamp_ms,
    }
}

// ============================================================================
// Tests: Debouncer
// ============================================================================

#[test]
fn test_debounce_rejects_edges_closer_than_window() {
    let mut debouncer = Debouncer::new();
    assert!(debouncer.on_edge(Edge::Falling, 1000).is_some());
    assert!(debouncer.on_edge(Edge::Falling, 1019).is_none());
}

#[test]
fn test_debounce_accepts_edges_at_window() {
    let mut debouncer = Debouncer::new();
    assert!(debouncer.on_edge(Edge::Falling, 1000).is_some());
    assert!(debouncer.on_edge(Edge::Falling, 1020).is_some());
}

#[test]
fn test_debounce_bounce_burst_yields_press_then_release() {
    let mut debouncer = Debouncer::new();
    let edges = [
        (Edge::Falling, 100),
        (Edge::Rising, 101),
        (Edge::Falling, 103),
        (Edge::Rising, 250),
        (Edge::Falling, 252),
        (Edge::Rising, 255),
    ];

    let events: Vec<ButtonEvent> = edges
        .iter()
        .filter_map(|&(edge, t)| debouncer.on_edge(edge, t))
        .collect();

    assert_eq!(events, vec![press(100), release(250)]);
}

#[test]
fn test_rejected_edge_does_not_extend_window() {
    let mut debouncer = Debouncer::new();
    assert!(debouncer.on_edge(Edge::Falling, 0).is_some());
    assert!(debouncer.on_edge(Edge::Rising, 15).is_none());
    assert!(debouncer.on_edge(Edge::Rising, 20).is_some());
}

// ============================================================================
// Tests: EventQueue
// ============================================================================

#[test]
fn test_queue_keeps_oldest_and_drops_newest() {
    let mut queue = EventQueue::new();
    let (mut tx, mut rx) = queue.split();

    for t in 0..EVENT_QUEUE_CAPACITY as u64 {
        assert!(tx.try_push(press(t)).is_ok());
    }
    let overflow = press(EVENT_QUEUE_CAPACITY as u64);
    assert_eq!(tx.try_push(overflow), Err(QueueFull(overflow)));
    assert_eq!(rx.len(), EVENT_QUEUE_CAPACITY);

    for t in 0..EVENT_QUEUE_CAPACITY as u64 {
        assert_eq!(rx.poll(), Some(press(t)));
    }
    assert_eq!(rx.poll(), None);
}

#[test]
fn test_queue_accepts_again_after_drain() {
    let mut queue = EventQueue::new();
    let (mut tx, mut rx) = queue.split();

    for t in 0..=EVENT_QUEUE_CAPACITY as u64 {
        let _ = tx.try_push(press(t));
    }
    assert!(rx.poll().is_some());
    assert!(tx.try_push(release(99)).is_ok());
}

// ============================================================================
// Tests: Line Reader
// ============================================================================

#[test]
fn test_read_line_strips_cr_anywhere() {
    let mut client = AtClient::new(ScriptedTransport::with_pending(b"\r+A\rT: O\rK\r\n"));
    let line = block_on(client.read_line(AT_RESPONSE_TIMEOUT_MS)).unwrap();
    assert_eq!(line.as_str(), "+AT: OK");
}

#[test]
fn test_read_line_stops_at_capacity() {
    let mut pending = vec![b'A'; 200];
    pending.extend_from_slice(b"\r\n+VER: 4.0.11\r\n");
    let mut client = AtClient::new(ScriptedTransport::with_pending(&pending));

    let line = block_on(client.read_line(AT_RESPONSE_TIMEOUT_MS)).unwrap();
    assert_eq!(line.as_str().len(), LINE_CAPACITY);

    // Überlauf samt Terminator ist verbraucht
    let next = block_on(client.read_line(AT_RESPONSE_TIMEOUT_MS)).unwrap();
    assert_eq!(next.as_str(), "+VER: 4.0.11");
}

#[test]
fn test_read_line_full_line_consumes_its_terminator() {
    let mut pending = vec![b'A'; LINE_CAPACITY];
    pending.extend_from_slice(b"\r\n+VER: 4.0.11\r\n");
    let mut client = AtClient::new(ScriptedTransport::with_pending(&pending));

    let first = block_on(client.read_line(AT_RESPONSE_TIMEOUT_MS)).unwrap();
    let second = block_on(client.read_line(AT_RESPONSE_TIMEOUT_MS)).unwrap();

    assert_eq!(first.as_str().len(), LINE_CAPACITY);
    assert_eq!(second.as_str(), "+VER: 4.0.11");
}

#[test]
fn test_read_line_full_line_without_terminator() {
    let pending = vec![b'A'; LINE_CAPACITY];
    let mut client = AtClient::new(ScriptedTransport::with_pending(&pending));

    let line = block_on(client.read_line(AT_RESPONSE_TIMEOUT_MS)).unwrap();
    assert_eq!(line.as_str().len(), LINE_CAPACITY);
}

#[test]
fn test_read_line_times_out_without_bytes() {
    let mut client = AtClient::new(ScriptedTransport::default());
    let result = block_on(client.read_line(AT_RESPONSE_TIMEOUT_MS));
    assert_eq!(result, Err(AtError::ReadTimeout));
    assert_eq!(client.transport().timeouts, vec![AT_RESPONSE_TIMEOUT_MS]);
}

#[test]
fn test_read_line_discards_partial_line_on_timeout() {
    let mut client = AtClient::new(ScriptedTransport::with_pending(b"+VER: 4.0"));
    let result = block_on(client.read_line(AT_RESPONSE_TIMEOUT_MS));
    assert_eq!(result, Err(AtError::ReadTimeout));
}

#[test]
fn test_read_line_empty_line() {
    let mut client = AtClient::new(ScriptedTransport::with_pending(b"\r\n"));
    let line = block_on(client.read_line(AT_RESPONSE_TIMEOUT_MS)).unwrap();
    assert_eq!(line.as_str(), "");
}

// ============================================================================
// Tests: AT-Kommandos
// ============================================================================

#[test]
fn test_check_connection_succeeds_on_third_attempt() {
    let mut client = AtClient::new(ScriptedTransport::new(&[None, None, reply(b"OK\r\n")]));

    assert_eq!(block_on(client.check_connection()), Ok(3));
    assert_eq!(client.transport().writes, vec![CMD_AT; 3]);
}

#[test]
fn test_check_connection_gives_up_after_five_attempts() {
    let mut client = AtClient::new(ScriptedTransport::new(&[
        reply(b"+AT: ERROR\r\n"),
        None,
        reply(b"+AT: ERROR\r\n"),
        None,
        None,
        OK,
    ]));

    assert_eq!(
        block_on(client.check_connection()),
        Err(AtError::NotResponding { attempts: 5 })
    );
    assert_eq!(client.transport().writes.len(), 5);
}

#[test]
fn test_check_connection_each_attempt_has_its_own_timeout() {
    let mut client = AtClient::new(ScriptedTransport::default());
    let _ = block_on(client.check_connection());
    assert_eq!(client.transport().timeouts, vec![AT_RESPONSE_TIMEOUT_MS; 5]);
}

#[test]
fn test_check_connection_write_failure() {
    let mut transport = ScriptedTransport::new(&[OK]);
    transport.fail_writes = true;
    let mut client = AtClient::new(transport);

    assert_eq!(
        block_on(client.check_connection()),
        Err(AtError::NotResponding { attempts: 5 })
    );
}

#[test]
fn test_check_version_requires_marker() {
    let mut client = AtClient::new(ScriptedTransport::new(&[VERSION]));
    let line = block_on(client.check_version()).unwrap();
    assert_eq!(line.as_str(), "+VER: 4.0.11");
    assert_eq!(client.transport().writes, vec![CMD_VERSION]);

    let mut client = AtClient::new(ScriptedTransport::new(&[reply(b"+AT: OK\r\n")]));
    assert_eq!(
        block_on(client.check_version()),
        Err(AtError::UnexpectedResponse)
    );
}

#[test]
fn test_check_version_has_no_retry() {
    let mut client = AtClient::new(ScriptedTransport::new(&[None, VERSION]));
    assert_eq!(block_on(client.check_version()), Err(AtError::ReadTimeout));
    assert_eq!(client.transport().writes.len(), 1);
}

#[test]
fn test_check_device_eui() {
    let mut client = AtClient::new(ScriptedTransport::new(&[DEV_EUI]));
    let (line, eui) = block_on(client.check_device_eui()).unwrap();
    assert_eq!(line.as_str(), "+ID: DevEui, 2C:F7:F1:20:32:30:A5:70");
    assert_eq!(eui.unwrap().as_str(), "2CF7F1203230A570");
    assert_eq!(client.transport().writes, vec![CMD_DEV_EUI]);
}

#[test]
fn test_check_device_eui_marker_decides_success() {
    let mut client = AtClient::new(ScriptedTransport::new(&[reply(b"+ID: DevEui\r\n")]));
    let (line, eui) = block_on(client.check_device_eui()).unwrap();
    assert_eq!(line.as_str(), "+ID: DevEui");
    assert_eq!(eui, None);

    let mut client =
        AtClient::new(ScriptedTransport::new(&[reply(b"+ID: AppEui, 01:02\r\n")]));
    assert_eq!(
        block_on(client.check_device_eui()),
        Err(AtError::UnexpectedResponse)
    );
}

#[test]
fn test_dev_eui_reformatting() {
    let eui = DeviceEui::parse("+ID: DevEui, AB:CD:EF:01:23:45:67:89").unwrap();
    assert_eq!(eui.to_string(), "ABCDEF0123456789");
}

// ============================================================================
// Tests: Handshake
// ============================================================================

#[test]
fn test_handshake_completes() {
    let mut client = AtClient::new(ScriptedTransport::new(&[OK, VERSION, DEV_EUI]));
    let mut reporter = RecordingReporter::default();

    let outcome = block_on(run_handshake(&mut client, &mut reporter));

    assert_eq!(outcome, HandshakeOutcome::Completed);
    assert_eq!(
        reporter.messages,
        vec![
            MSG_CONNECTED,
            "+VER: 4.0.11",
            "+ID: DevEui, 2C:F7:F1:20:32:30:A5:70",
            "2CF7F1203230A570",
        ]
    );
}

#[test]
fn test_handshake_reports_raw_line_for_unparsable_dev_eui() {
    let mut client = AtClient::new(ScriptedTransport::new(&[
        OK,
        VERSION,
        reply(b"+ID: DevEui, 2C:F7:F1:20:32:30:A5:7\r\n"),
    ]));
    let mut reporter = RecordingReporter::default();

    let outcome = block_on(run_handshake(&mut client, &mut reporter));

    assert_eq!(outcome, HandshakeOutcome::Completed);
    assert_eq!(
        reporter.messages,
        vec![
            MSG_CONNECTED,
            "+VER: 4.0.11",
            "+ID: DevEui, 2C:F7:F1:20:32:30:A5:7",
        ]
    );
}

#[test]
fn test_handshake_without_connection() {
    let mut client = AtClient::new(ScriptedTransport::default());
    let mut reporter = RecordingReporter::default();

    let outcome = block_on(run_handshake(&mut client, &mut reporter));

    assert_eq!(outcome, HandshakeOutcome::NoConnection);
    assert_eq!(reporter.messages, vec![MSG_NOT_RESPONDING]);
    assert_eq!(client.transport().writes, vec![CMD_AT; 5]);
}

#[test]
fn test_handshake_bad_version_skips_dev_eui() {
    let mut queue = EventQueue::new();
    let (mut tx, mut rx) = queue.split();
    tx.try_push(press(0)).unwrap();

    let mut client = AtClient::new(ScriptedTransport::new(&[
        OK,
        reply(b"+AT: ERROR\r\n"),
        DEV_EUI,
    ]));
    let mut reporter = RecordingReporter::default();

    let handshakes = block_on(process_events(&mut rx, &mut client, &mut reporter));

    assert_eq!(handshakes, 1);
    assert_eq!(reporter.messages, vec![MSG_CONNECTED, MSG_NOT_RESPONDING]);
    assert_eq!(client.transport().writes, vec![CMD_AT, CMD_VERSION]);
}

#[test]
fn test_handshake_dev_eui_timeout() {
    let mut client = AtClient::new(ScriptedTransport::new(&[OK, VERSION, None]));
    let mut reporter = RecordingReporter::default();

    let outcome = block_on(run_handshake(&mut client, &mut reporter));

    assert_eq!(outcome, HandshakeOutcome::DevEuiFailed);
    assert_eq!(
        reporter.messages,
        vec![MSG_CONNECTED, "+VER: 4.0.11", MSG_NOT_RESPONDING]
    );
}

#[test]
fn test_release_events_are_consumed_without_action() {
    let mut queue = EventQueue::new();
    let (mut tx, mut rx) = queue.split();
    tx.try_push(release(10)).unwrap();
    tx.try_push(release(50)).unwrap();

    let mut client = AtClient::new(ScriptedTransport::new(&[OK]));
    let mut reporter = RecordingReporter::default();

    let handshakes = block_on(process_events(&mut rx, &mut client, &mut reporter));

    assert_eq!(handshakes, 0);
    assert!(rx.is_empty());
    assert!(client.transport().writes.is_empty());
    assert!(reporter.messages.is_empty());
}

#[test]
fn test_queued_presses_run_sequential_handshakes() {
    let mut queue = EventQueue::new();
    let (mut tx, mut rx) = queue.split();
    let mut debouncer = Debouncer::new();

    for (edge, t) in [
        (Edge::Falling, 0),
        (Edge::Rising, 120),
        (Edge::Falling, 300),
        (Edge::Rising, 410),
    ] {
        if let Some(event) = debouncer.on_edge(edge, t) {
            tx.try_push(event).unwrap();
        }
    }

    let mut client = AtClient::new(ScriptedTransport::new(&[
        OK, VERSION, DEV_EUI, OK, VERSION, DEV_EUI,
    ]));
    let mut reporter = RecordingReporter::default();

    let handshakes = block_on(process_events(&mut rx, &mut client, &mut reporter));

    assert_eq!(handshakes, 2);
    assert_eq!(reporter.messages.len(), 8);
    assert_eq!(
        client.transport().writes,
        vec![CMD_AT, CMD_VERSION, CMD_DEV_EUI, CMD_AT, CMD_VERSION, CMD_DEV_EUI]
    );
}
