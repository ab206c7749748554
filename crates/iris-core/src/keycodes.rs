use crate::types::Layer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Basic keycodes. Discriminants are the QMK basic keycode values, which match
/// the HID keyboard usage page for everything below the media range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Kc {
    A = 0x04,
    B = 0x05,
    C = 0x06,
    D = 0x07,
    E = 0x08,
    F = 0x09,
    G = 0x0A,
    H = 0x0B,
    I = 0x0C,
    J = 0x0D,
    K = 0x0E,
    L = 0x0F,
    M = 0x10,
    N = 0x11,
    O = 0x12,
    P = 0x13,
    Q = 0x14,
    R = 0x15,
    S = 0x16,
    T = 0x17,
    U = 0x18,
    V = 0x19,
    W = 0x1A,
    X = 0x1B,
    Y = 0x1C,
    Z = 0x1D,
    N1 = 0x1E,
    N2 = 0x1F,
    N3 = 0x20,
    N4 = 0x21,
    N5 = 0x22,
    N6 = 0x23,
    N7 = 0x24,
    N8 = 0x25,
    N9 = 0x26,
    N0 = 0x27,
    Enter = 0x28,
    Escape = 0x29,
    Backspace = 0x2A,
    Tab = 0x2B,
    Space = 0x2C,
    Minus = 0x2D,
    Equal = 0x2E,
    LeftBracket = 0x2F,
    RightBracket = 0x30,
    Backslash = 0x31,
    Semicolon = 0x33,
    Quote = 0x34,
    Grave = 0x35,
    Comma = 0x36,
    Dot = 0x37,
    Slash = 0x38,
    Home = 0x4A,
    Delete = 0x4C,
    End = 0x4D,
    Right = 0x4F,
    Left = 0x50,
    Down = 0x51,
    Up = 0x52,
    KpSlash = 0x54,
    KpAsterisk = 0x55,
    KpMinus = 0x56,
    KpPlus = 0x57,
    KpEqual = 0x67,
    Mute = 0xA8,
    VolumeUp = 0xA9,
    VolumeDown = 0xAA,
    MediaNext = 0xAB,
    MediaPrev = 0xAC,
    MediaPlay = 0xAE,
    LeftCtrl = 0xE0,
    LeftShift = 0xE1,
    LeftAlt = 0xE2,
    LeftGui = 0xE3,
    RightCtrl = 0xE4,
    RightShift = 0xE5,
    RightAlt = 0xE6,
    RightGui = 0xE7,
}

/// Letters in alphabetical order.
pub const LETTERS: [Kc; 26] = [
    Kc::A, Kc::B, Kc::C, Kc::D, Kc::E, Kc::F, Kc::G, Kc::H, Kc::I, Kc::J, Kc::K, Kc::L, Kc::M,
    Kc::N, Kc::O, Kc::P, Kc::Q, Kc::R, Kc::S, Kc::T, Kc::U, Kc::V, Kc::W, Kc::X, Kc::Y, Kc::Z,
];

/// Digits indexed by value ('0' first).
pub const DIGITS: [Kc; 10] = [
    Kc::N0, Kc::N1, Kc::N2, Kc::N3, Kc::N4, Kc::N5, Kc::N6, Kc::N7, Kc::N8, Kc::N9,
];

impl Kc {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn is_modifier(self) -> bool {
        self.code() >= Kc::LeftCtrl.code()
    }

    pub fn name(self) -> &'static str {
        match self {
            Kc::A => "KC_A",
            Kc::B => "KC_B",
            Kc::C => "KC_C",
            Kc::D => "KC_D",
            Kc::E => "KC_E",
            Kc::F => "KC_F",
            Kc::G => "KC_G",
            Kc::H => "KC_H",
            Kc::I => "KC_I",
            Kc::J => "KC_J",
            Kc::K => "KC_K",
            Kc::L => "KC_L",
            Kc::M => "KC_M",
            Kc::N => "KC_N",
            Kc::O => "KC_O",
            Kc::P => "KC_P",
            Kc::Q => "KC_Q",
            Kc::R => "KC_R",
            Kc::S => "KC_S",
            Kc::T => "KC_T",
            Kc::U => "KC_U",
            Kc::V => "KC_V",
            Kc::W => "KC_W",
            Kc::X => "KC_X",
            Kc::Y => "KC_Y",
            Kc::Z => "KC_Z",
            Kc::N1 => "KC_1",
            Kc::N2 => "KC_2",
            Kc::N3 => "KC_3",
            Kc::N4 => "KC_4",
            Kc::N5 => "KC_5",
            Kc::N6 => "KC_6",
            Kc::N7 => "KC_7",
            Kc::N8 => "KC_8",
            Kc::N9 => "KC_9",
            Kc::N0 => "KC_0",
            Kc::Enter => "KC_ENT",
            Kc::Escape => "KC_ESC",
            Kc::Backspace => "KC_BSPC",
            Kc::Tab => "KC_TAB",
            Kc::Space => "KC_SPC",
            Kc::Minus => "KC_MINS",
            Kc::Equal => "KC_EQL",
            Kc::LeftBracket => "KC_LBRC",
            Kc::RightBracket => "KC_RBRC",
            Kc::Backslash => "KC_BSLS",
            Kc::Semicolon => "KC_SCLN",
            Kc::Quote => "KC_QUOT",
            Kc::Grave => "KC_GRV",
            Kc::Comma => "KC_COMM",
            Kc::Dot => "KC_DOT",
            Kc::Slash => "KC_SLSH",
            Kc::Home => "KC_HOME",
            Kc::Delete => "KC_DEL",
            Kc::End => "KC_END",
            Kc::Right => "KC_RGHT",
            Kc::Left => "KC_LEFT",
            Kc::Down => "KC_DOWN",
            Kc::Up => "KC_UP",
            Kc::KpSlash => "KC_PSLS",
            Kc::KpAsterisk => "KC_PAST",
            Kc::KpMinus => "KC_PMNS",
            Kc::KpPlus => "KC_PPLS",
            Kc::KpEqual => "KC_PEQL",
            Kc::Mute => "KC_MUTE",
            Kc::VolumeUp => "KC_VOLU",
            Kc::VolumeDown => "KC_VOLD",
            Kc::MediaNext => "KC_MNXT",
            Kc::MediaPrev => "KC_MPRV",
            Kc::MediaPlay => "KC_MPLY",
            Kc::LeftCtrl => "KC_LCTL",
            Kc::LeftShift => "KC_LSFT",
            Kc::LeftAlt => "KC_LALT",
            Kc::LeftGui => "KC_LGUI",
            Kc::RightCtrl => "KC_RCTL",
            Kc::RightShift => "KC_RSFT",
            Kc::RightAlt => "KC_RALT",
            Kc::RightGui => "KC_RGUI",
        }
    }
}

/// Modifier set. `right` selects the right-hand variants, as in QMK's 5-bit encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Mods {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub gui: bool,
    pub right: bool,
}

impl Mods {
    pub const LCTL: Mods = Mods::new(true, false, false, false, false);
    pub const LSFT: Mods = Mods::new(false, true, false, false, false);
    pub const LALT: Mods = Mods::new(false, false, true, false, false);
    pub const LGUI: Mods = Mods::new(false, false, false, true, false);
    pub const RCTL: Mods = Mods::new(true, false, false, false, true);
    pub const RSFT: Mods = Mods::new(false, true, false, false, true);
    pub const RALT: Mods = Mods::new(false, false, true, false, true);
    pub const RGUI: Mods = Mods::new(false, false, false, true, true);
    pub const HYPR: Mods = Mods::new(true, true, true, true, false);

    // macOS names
    pub const LOPT: Mods = Mods::LALT;
    pub const LCMD: Mods = Mods::LGUI;
    pub const ROPT: Mods = Mods::RALT;
    pub const RCMD: Mods = Mods::RGUI;

    pub const fn new(ctrl: bool, shift: bool, alt: bool, gui: bool, right: bool) -> Self {
        Self {
            ctrl,
            shift,
            alt,
            gui,
            right,
        }
    }

    pub const fn with(self, other: Mods) -> Mods {
        Mods {
            ctrl: self.ctrl || other.ctrl,
            shift: self.shift || other.shift,
            alt: self.alt || other.alt,
            gui: self.gui || other.gui,
            right: self.right || other.right,
        }
    }

    pub const fn bits(self) -> u8 {
        (self.ctrl as u8) | (self.shift as u8) << 1 | (self.alt as u8) << 2 | (self.gui as u8) << 3
            | (self.right as u8) << 4
    }
}

impl fmt::Display for Mods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Mods::HYPR {
            return f.write_str("HYPR");
        }
        let side = if self.right { 'R' } else { 'L' };
        let mut first = true;
        for (on, name) in [
            (self.ctrl, "CTL"),
            (self.shift, "SFT"),
            (self.alt, "ALT"),
            (self.gui, "GUI"),
        ] {
            if on {
                if !first {
                    f.write_str("|")?;
                }
                write!(f, "{}{}", side, name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Keycodes defined by this keymap rather than by the framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomKey {
    /// Types `==`.
    DoubleEqual,
    /// Types `!=`.
    NotEqual,
    /// Locks the current layer on.
    LayerLock,
}

/// Action assigned to a key position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keycode {
    No,
    Basic(Kc),
    /// Basic key sent with modifiers held, e.g. `LCMD(KC_Z)`.
    Modified(Mods, Kc),
    /// Tap sends the key, hold applies the modifiers.
    ModTap(Mods, Kc),
    /// Tap sends the key, hold activates the layer.
    LayerTap(Layer, Kc),
    Custom(CustomKey),
    Boot,
    EeClear,
}

impl Keycode {
    pub const fn is_tap_hold(self) -> bool {
        matches!(self, Keycode::ModTap(..) | Keycode::LayerTap(..))
    }

    /// The keycode sent when a tap-hold key is tapped.
    pub const fn tap_keycode(self) -> Option<Keycode> {
        match self {
            Keycode::ModTap(_, kc) | Keycode::LayerTap(_, kc) => Some(Keycode::Basic(kc)),
            _ => None,
        }
    }

    pub const fn layer(self) -> Option<Layer> {
        match self {
            Keycode::LayerTap(layer, _) => Some(layer),
            _ => None,
        }
    }
}

impl From<Kc> for Keycode {
    fn from(kc: Kc) -> Self {
        Keycode::Basic(kc)
    }
}

impl fmt::Display for Keycode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Keycode::No => f.write_str("KC_NO"),
            Keycode::Basic(kc) => f.write_str(kc.name()),
            Keycode::Modified(mods, kc) => write!(f, "{}({})", mods, kc.name()),
            Keycode::ModTap(mods, kc) => write!(f, "MT({}, {})", mods, kc.name()),
            Keycode::LayerTap(layer, kc) => write!(f, "LT({}, {})", layer, kc.name()),
            Keycode::Custom(CustomKey::DoubleEqual) => f.write_str("DOUBLE_EQUAL"),
            Keycode::Custom(CustomKey::NotEqual) => f.write_str("NOT_EQUAL"),
            Keycode::Custom(CustomKey::LayerLock) => f.write_str("LLOCK"),
            Keycode::Boot => f.write_str("QK_BOOT"),
            Keycode::EeClear => f.write_str("EE_CLR"),
        }
    }
}

pub const fn kc(kc: Kc) -> Keycode {
    Keycode::Basic(kc)
}

pub const fn lsft(kc: Kc) -> Keycode {
    Keycode::Modified(Mods::LSFT, kc)
}

pub const fn mt(mods: Mods, kc: Kc) -> Keycode {
    Keycode::ModTap(mods, kc)
}

pub const fn lt(layer: Layer, kc: Kc) -> Keycode {
    Keycode::LayerTap(layer, kc)
}

pub const KC_NO: Keycode = Keycode::No;
pub const QK_BOOT: Keycode = Keycode::Boot;
pub const EE_CLR: Keycode = Keycode::EeClear;

pub const DOUBLE_EQUAL: Keycode = Keycode::Custom(CustomKey::DoubleEqual);
pub const NOT_EQUAL: Keycode = Keycode::Custom(CustomKey::NotEqual);
pub const LLOCK: Keycode = Keycode::Custom(CustomKey::LayerLock);

pub const LOCK_SCREEN: Keycode = Keycode::Modified(Mods::LGUI.with(Mods::LCTL), Kc::Q);
pub const UNDO: Keycode = Keycode::Modified(Mods::LCMD, Kc::Z);
pub const REDO: Keycode = Keycode::Modified(Mods::LCMD.with(Mods::LSFT), Kc::Z);
pub const SELECT_LINE: Keycode = Keycode::Modified(Mods::LCMD, Kc::LeftShift);
pub const SELECT_WORD: Keycode = Keycode::Modified(Mods::LOPT, Kc::LeftShift);

// Shifted symbols
pub const KC_UNDS: Keycode = lsft(Kc::Minus);
pub const KC_COLN: Keycode = lsft(Kc::Semicolon);
pub const KC_LCBR: Keycode = lsft(Kc::LeftBracket);
pub const KC_RCBR: Keycode = lsft(Kc::RightBracket);
pub const KC_LPRN: Keycode = lsft(Kc::N9);
pub const KC_RPRN: Keycode = lsft(Kc::N0);
pub const KC_LABK: Keycode = lsft(Kc::Comma);
pub const KC_RABK: Keycode = lsft(Kc::Dot);

// Home-row mods
pub const HRM_A: Keycode = mt(Mods::LSFT, Kc::A);
pub const HRM_S: Keycode = mt(Mods::LCTL, Kc::S);
pub const HRM_D: Keycode = mt(Mods::LOPT, Kc::D);
pub const HRM_F: Keycode = mt(Mods::LCMD, Kc::F);
pub const HRM_G: Keycode = mt(Mods::RCMD, Kc::G);
pub const HRM_H: Keycode = mt(Mods::RCMD, Kc::H);
pub const HRM_J: Keycode = mt(Mods::LCMD, Kc::J);
pub const HRM_K: Keycode = mt(Mods::ROPT, Kc::K);
pub const HRM_L: Keycode = mt(Mods::RCTL, Kc::L);
pub const HRM_SCLN: Keycode = mt(Mods::RSFT, Kc::Semicolon);

// Thumb cluster
pub const SPC_LOWER: Keycode = lt(Layer::Lower, Kc::Space);
pub const ENT_RAISE: Keycode = lt(Layer::Raise, Kc::Enter);
pub const BSPC_HYPR: Keycode = mt(Mods::HYPR, Kc::Backspace);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mod_bits_follow_qmk_encoding() {
        assert_eq!(Mods::LCTL.bits(), 0x01);
        assert_eq!(Mods::LSFT.bits(), 0x02);
        assert_eq!(Mods::LALT.bits(), 0x04);
        assert_eq!(Mods::LGUI.bits(), 0x08);
        assert_eq!(Mods::RSFT.bits(), 0x12);
        assert_eq!(Mods::HYPR.bits(), 0x0F);
        assert_eq!(Mods::LCMD.with(Mods::LSFT).bits(), 0x0A);
    }

    #[test]
    fn test_tap_keycode() {
        assert_eq!(SPC_LOWER.tap_keycode(), Some(kc(Kc::Space)));
        assert_eq!(BSPC_HYPR.tap_keycode(), Some(kc(Kc::Backspace)));
        assert_eq!(HRM_A.tap_keycode(), Some(kc(Kc::A)));
        assert_eq!(UNDO.tap_keycode(), None);
        assert_eq!(KC_NO.tap_keycode(), None);
    }

    #[test]
    fn test_tap_hold_classification() {
        assert!(HRM_F.is_tap_hold());
        assert!(ENT_RAISE.is_tap_hold());
        assert!(!kc(Kc::Space).is_tap_hold());
        assert!(!LLOCK.is_tap_hold());
        assert_eq!(ENT_RAISE.layer(), Some(Layer::Raise));
        assert_eq!(HRM_F.layer(), None);
    }

    #[test]
    fn test_display_uses_qmk_names() {
        assert_eq!(SPC_LOWER.to_string(), "LT(_LOWER, KC_SPC)");
        assert_eq!(BSPC_HYPR.to_string(), "MT(HYPR, KC_BSPC)");
        assert_eq!(HRM_SCLN.to_string(), "MT(RSFT, KC_SCLN)");
        assert_eq!(REDO.to_string(), "LSFT|LGUI(KC_Z)");
        assert_eq!(QK_BOOT.to_string(), "QK_BOOT");
    }

    #[test]
    fn test_modifier_range() {
        assert!(Kc::LeftShift.is_modifier());
        assert!(Kc::RightGui.is_modifier());
        assert!(!Kc::MediaPlay.is_modifier());
    }
}
