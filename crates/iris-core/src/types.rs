use crate::keycodes::Keycode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// Matrix rows across both halves (5 per half).
pub const MATRIX_ROWS: usize = 10;
/// Matrix columns per half.
pub const MATRIX_COLS: usize = 6;

/// Row and column in the switch matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPos {
    pub row: u8, // 0..5 left half, 5..10 right half
    pub col: u8, // 0 = outer edge on both halves
}

impl KeyPos {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub const fn in_matrix(self) -> bool {
        (self.row as usize) < MATRIX_ROWS && (self.col as usize) < MATRIX_COLS
    }
}

/// Side of the split keyboard a key physically sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    /// The left half owns the first half of the matrix rows.
    pub const fn of(pos: KeyPos) -> Hand {
        if (pos.row as usize) < MATRIX_ROWS / 2 {
            Hand::Left
        } else {
            Hand::Right
        }
    }
}

/// Keymap layers, in stacking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Layer {
    Qwerty = 0,
    Lower = 1,
    Raise = 2,
}

impl Layer {
    pub const COUNT: usize = 3;
    pub const ALL: [Layer; Layer::COUNT] = [Layer::Qwerty, Layer::Lower, Layer::Raise];

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Layer::Qwerty => "_QWERTY",
            Layer::Lower => "_LOWER",
            Layer::Raise => "_RAISE",
        };
        f.write_str(name)
    }
}

/// A key event as delivered by the firmware framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRecord {
    pub pos: KeyPos,
    pub pressed: bool,
    /// Set by the tap-hold engine: 0 while held (or resolved as hold), >0 for taps.
    pub tap_count: u8,
    pub time: Instant,
}

impl KeyRecord {
    pub fn press(pos: KeyPos, time: Instant) -> Self {
        Self {
            pos,
            pressed: true,
            tap_count: 0,
            time,
        }
    }

    pub fn release(pos: KeyPos, time: Instant) -> Self {
        Self {
            pos,
            pressed: false,
            tap_count: 0,
            time,
        }
    }

    pub fn tapped(mut self, count: u8) -> Self {
        self.tap_count = count;
        self
    }

    pub fn hand(&self) -> Hand {
        Hand::of(self.pos)
    }
}

/// The tap-hold key currently pressed and not yet decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeldKey {
    pub keycode: Keycode,
    pub pos: KeyPos,
    pub pressed_at: Instant,
}

impl HeldKey {
    pub fn new(keycode: Keycode, record: &KeyRecord) -> Self {
        Self {
            keycode,
            pos: record.pos,
            pressed_at: record.time,
        }
    }

    pub fn hand(&self) -> Hand {
        Hand::of(self.pos)
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.pressed_at)
    }
}
