use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Mutex as StdMutex;
use std::sync::Arc;
use tokio::sync::mpsc;

static ANSI_ESCAPE_RE: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"\x1B\[[0-?]*[ -/]*[@-~]").expect("valid ansi escape regex")
});

/// Strip terminal escape sequences and bare carriage returns from a chunk of
/// process output before it reaches subscribers.
pub fn strip_ansi(value: &str) -> String {
    ANSI_ESCAPE_RE.replace_all(value, "").replace('\r', "")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StreamChannel {
    Stdout,
    Stderr,
}

impl StreamChannel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

/// One line of process output. Ephemeral: delivered at most once per
/// subscriber, in emission order, never replayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamEvent {
    pub channel: StreamChannel,
    pub line: String,
}

/// Accumulates raw output chunks and yields complete lines. Partial lines are
/// carried across chunk boundaries, and a `\r\n` pair split over two chunks
/// counts as a single terminator. The pending partial line is bounded: excess
/// leading bytes are dropped and accounted.
#[derive(Debug)]
pub struct LineSplitter {
    pending: Vec<u8>,
    skip_lf_next: bool,
    max_pending_bytes: Option<usize>,
    dropped_bytes: usize,
}

impl LineSplitter {
    pub fn new(max_pending_bytes: Option<usize>) -> Self {
        Self {
            pending: Vec::new(),
            skip_lf_next: false,
            max_pending_bytes,
            dropped_bytes: 0,
        }
    }

    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        for &byte in chunk {
            if std::mem::take(&mut self.skip_lf_next) && byte == b'\n' {
                continue;
            }
            match byte {
                b'\n' => lines.push(self.take_pending()),
                b'\r' => {
                    lines.push(self.take_pending());
                    self.skip_lf_next = true;
                }
                _ => {
                    self.pending.push(byte);
                    if let Some(max) = self.max_pending_bytes {
                        if self.pending.len() > max {
                            let excess = self.pending.len() - max;
                            self.pending.drain(..excess);
                            self.dropped_bytes = self.dropped_bytes.saturating_add(excess);
                        }
                    }
                }
            }
        }
        lines
    }

    /// Bytes discarded by the pending-line bound since the last call.
    pub fn take_dropped_bytes(&mut self) -> usize {
        std::mem::take(&mut self.dropped_bytes)
    }

    /// Remaining partial line, consumed. Call once the stream has closed.
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.take_pending())
        }
    }

    fn take_pending(&mut self) -> String {
        let bytes = std::mem::take(&mut self.pending);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

/// Broadcast-of-one subscriber slot. Registering a new subscriber replaces
/// the previous one; callers needing independent views multiplex downstream.
#[derive(Clone, Default)]
pub struct SubscriberSlot {
    sender: Arc<StdMutex<Option<mpsc::UnboundedSender<StreamEvent>>>>,
}

impl SubscriberSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber, displacing any existing one. The displaced
    /// receiver observes channel closure and no further events.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<StreamEvent> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut slot = self.sender.lock().expect("subscriber slot lock");
        *slot = Some(sender);
        receiver
    }

    pub fn unsubscribe(&self) {
        let mut slot = self.sender.lock().expect("subscriber slot lock");
        *slot = None;
    }

    /// Deliver an event to the current subscriber, if any. A subscriber that
    /// dropped its receiver is cleared on the next emission.
    pub fn emit(&self, event: StreamEvent) {
        let mut slot = self.sender.lock().expect("subscriber slot lock");
        if let Some(sender) = slot.as_ref() {
            if sender.send(event).is_err() {
                *slot = None;
            }
        }
    }

    pub fn emit_line(&self, channel: StreamChannel, line: String) {
        self.emit(StreamEvent { channel, line });
    }
}

#[cfg(test)]
mod tests {
    use super::{strip_ansi, LineSplitter, StreamChannel, SubscriberSlot};

    #[test]
    fn splits_mixed_terminators() {
        let mut splitter = LineSplitter::new(None);
        let lines = splitter.push(b"a\nb\r\nc\rd");
        assert_eq!(lines, vec!["a", "b", "c"]);
        assert_eq!(splitter.finish().as_deref(), Some("d"));
    }

    #[test]
    fn carries_partial_lines_across_chunks() {
        let mut splitter = LineSplitter::new(None);
        assert!(splitter.push(b"hel").is_empty());
        assert_eq!(splitter.push(b"lo\nwor"), vec!["hello"]);
        assert_eq!(splitter.push(b"ld\n"), vec!["world"]);
        assert_eq!(splitter.finish(), None);
    }

    #[test]
    fn crlf_split_across_chunks_is_one_terminator() {
        let mut splitter = LineSplitter::new(None);
        assert_eq!(splitter.push(b"one\r"), vec!["one"]);
        assert_eq!(splitter.push(b"\ntwo\n"), vec!["two"]);
    }

    #[test]
    fn bounds_pending_bytes_and_accounts_drops() {
        let mut splitter = LineSplitter::new(Some(4));
        let _ = splitter.push(b"abcdef");
        assert_eq!(splitter.take_dropped_bytes(), 2);
        assert_eq!(splitter.finish().as_deref(), Some("cdef"));
    }

    #[test]
    fn strips_color_codes() {
        assert_eq!(strip_ansi("\x1B[31mred\x1B[0m"), "red");
    }

    #[test]
    fn new_subscriber_displaces_previous() {
        let slot = SubscriberSlot::new();
        let mut first = slot.subscribe();
        slot.emit_line(StreamChannel::Stdout, "one".to_string());
        assert_eq!(first.try_recv().expect("first event").line, "one");

        let mut second = slot.subscribe();
        slot.emit_line(StreamChannel::Stdout, "two".to_string());
        // The displaced receiver sees closure, never the new event.
        assert!(first.try_recv().is_err());
        assert_eq!(second.try_recv().expect("second event").line, "two");
    }

    #[test]
    fn emission_order_is_preserved() {
        let slot = SubscriberSlot::new();
        let mut receiver = slot.subscribe();
        for index in 0..5 {
            slot.emit_line(StreamChannel::Stdout, format!("line {index}"));
        }
        for index in 0..5 {
            assert_eq!(receiver.try_recv().expect("event").line, format!("line {index}"));
        }
    }

    #[test]
    fn dropped_receiver_is_cleared_on_emit() {
        let slot = SubscriberSlot::new();
        let receiver = slot.subscribe();
        drop(receiver);
        slot.emit_line(StreamChannel::Stderr, "lost".to_string());
        // Slot recovers: a fresh subscriber receives subsequent events.
        let mut fresh = slot.subscribe();
        slot.emit_line(StreamChannel::Stderr, "kept".to_string());
        assert_eq!(fresh.try_recv().expect("event").line, "kept");
    }
}
