use crate::keycodes::{kc, lsft, Kc, Keycode, DIGITS, LETTERS};
use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::warn;

/// Output handed to the framework's HID layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Press(Keycode),
    Release(Keycode),
    /// Press immediately followed by release.
    Tap(Keycode),
}

/// Queue between the keymap glue and the report writer.
#[derive(Debug, Clone)]
pub struct HostQueue {
    tx: Sender<HostEvent>,
    rx: Receiver<HostEvent>,
}

impl Default for HostQueue {
    fn default() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }
}

impl HostQueue {
    pub fn sender(&self) -> Sender<HostEvent> {
        self.tx.clone()
    }

    pub fn receiver(&self) -> Receiver<HostEvent> {
        self.rx.clone()
    }

    pub fn send(&self, event: HostEvent) {
        // `rx` lives as long as the queue, so the channel never disconnects.
        let _ = self.tx.send(event);
    }

    /// Takes every event queued so far.
    pub fn drain(&self) -> Vec<HostEvent> {
        self.rx.try_iter().collect()
    }
}

/// Keycode that types `c` on a US layout.
pub fn char_to_keycode(c: char) -> Option<Keycode> {
    let keycode = match c {
        'a'..='z' => kc(LETTERS[(c as u8 - b'a') as usize]),
        'A'..='Z' => lsft(LETTERS[(c as u8 - b'A') as usize]),
        '0'..='9' => kc(DIGITS[(c as u8 - b'0') as usize]),
        ' ' => kc(Kc::Space),
        '\n' => kc(Kc::Enter),
        '\t' => kc(Kc::Tab),
        '!' => lsft(Kc::N1),
        '@' => lsft(Kc::N2),
        '#' => lsft(Kc::N3),
        '$' => lsft(Kc::N4),
        '%' => lsft(Kc::N5),
        '^' => lsft(Kc::N6),
        '&' => lsft(Kc::N7),
        '*' => lsft(Kc::N8),
        '(' => lsft(Kc::N9),
        ')' => lsft(Kc::N0),
        '-' => kc(Kc::Minus),
        '_' => lsft(Kc::Minus),
        '=' => kc(Kc::Equal),
        '+' => lsft(Kc::Equal),
        '[' => kc(Kc::LeftBracket),
        '{' => lsft(Kc::LeftBracket),
        ']' => kc(Kc::RightBracket),
        '}' => lsft(Kc::RightBracket),
        '\\' => kc(Kc::Backslash),
        '|' => lsft(Kc::Backslash),
        ';' => kc(Kc::Semicolon),
        ':' => lsft(Kc::Semicolon),
        '\'' => kc(Kc::Quote),
        '"' => lsft(Kc::Quote),
        '`' => kc(Kc::Grave),
        '~' => lsft(Kc::Grave),
        ',' => kc(Kc::Comma),
        '<' => lsft(Kc::Comma),
        '.' => kc(Kc::Dot),
        '>' => lsft(Kc::Dot),
        '/' => kc(Kc::Slash),
        '?' => lsft(Kc::Slash),
        _ => return None,
    };
    Some(keycode)
}

/// Types `text` as a sequence of taps. Returns the number of taps queued.
pub fn send_string(queue: &HostQueue, text: &str) -> usize {
    let mut sent = 0;
    for c in text.chars() {
        match char_to_keycode(c) {
            Some(keycode) => {
                queue.send(HostEvent::Tap(keycode));
                sent += 1;
            }
            None => warn!("No keycode for {:?}, skipped", c),
        }
    }
    sent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_to_keycode() {
        assert_eq!(char_to_keycode('='), Some(kc(Kc::Equal)));
        assert_eq!(char_to_keycode('!'), Some(lsft(Kc::N1)));
        assert_eq!(char_to_keycode('q'), Some(kc(Kc::Q)));
        assert_eq!(char_to_keycode('Q'), Some(lsft(Kc::Q)));
        assert_eq!(char_to_keycode('0'), Some(kc(Kc::N0)));
        assert_eq!(char_to_keycode('7'), Some(kc(Kc::N7)));
        assert_eq!(char_to_keycode('é'), None);
    }

    #[test]
    fn test_send_string_queues_taps_in_order() {
        let queue = HostQueue::default();
        assert_eq!(send_string(&queue, "!="), 2);
        assert_eq!(
            queue.drain(),
            vec![HostEvent::Tap(lsft(Kc::N1)), HostEvent::Tap(kc(Kc::Equal))]
        );
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_send_string_skips_unmapped() {
        let queue = HostQueue::default();
        assert_eq!(send_string(&queue, "a→b"), 2);
        assert_eq!(
            queue.drain(),
            vec![HostEvent::Tap(kc(Kc::A)), HostEvent::Tap(kc(Kc::B))]
        );
    }

    #[test]
    fn test_receiver_sees_events_from_cloned_sender() {
        let queue = HostQueue::default();
        let rx = queue.receiver();
        queue.sender().send(HostEvent::Press(kc(Kc::Home))).unwrap();
        assert_eq!(rx.try_recv(), Ok(HostEvent::Press(kc(Kc::Home))));
    }
}
