use crate::keycodes::Keycode;
use crate::keymap::keycode_at;
use crate::types::{KeyPos, Layer, MATRIX_COLS, MATRIX_ROWS};
use std::ops::Range;

/// Per-key LEDs followed by underglow.
pub const LED_COUNT: usize = 68;
pub const PER_KEY_LED_COUNT: u8 = 56;

pub const HUE_MAGENTA: u8 = 213;
pub const HUE_CORAL: u8 = 11;
pub const HUE_SPRINGGREEN: u8 = 106;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Integer HSV to RGB conversion on the 0..=255 hue wheel.
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    if hsv.s == 0 {
        return Rgb::new(hsv.v, hsv.v, hsv.v);
    }

    let h = hsv.h as u16;
    let s = hsv.s as u16;
    let v = hsv.v as u16;

    let region = h * 6 / 255;
    let remainder = (h * 2 - region * 85) * 3;

    let p = ((v * (255 - s)) >> 8) as u8;
    let q = ((v * (255 - ((s * remainder) >> 8))) >> 8) as u8;
    let t = ((v * (255 - ((s * (255 - remainder)) >> 8))) >> 8) as u8;
    let v = hsv.v;

    match region {
        0 | 6 => Rgb::new(v, t, p),
        1 => Rgb::new(q, v, p),
        2 => Rgb::new(p, v, t),
        3 => Rgb::new(p, q, v),
        4 => Rgb::new(t, p, v),
        _ => Rgb::new(v, p, q),
    }
}

/// Matrix position to LED index. Unpopulated matrix cells have no LED.
#[rustfmt::skip]
pub const LED_MAP: [[Option<u8>; MATRIX_COLS]; MATRIX_ROWS] = [
    [Some(0), Some(1), Some(2), Some(3), Some(4), Some(5)],
    [Some(6), Some(7), Some(8), Some(9), Some(10), Some(11)],
    [Some(12), Some(13), Some(14), Some(15), Some(16), Some(17)],
    [Some(18), Some(19), Some(20), Some(21), Some(22), Some(23)],
    [None, None, Some(24), Some(25), Some(26), Some(27)],
    [Some(28), Some(29), Some(30), Some(31), Some(32), Some(33)],
    [Some(34), Some(35), Some(36), Some(37), Some(38), Some(39)],
    [Some(40), Some(41), Some(42), Some(43), Some(44), Some(45)],
    [Some(46), Some(47), Some(48), Some(49), Some(50), Some(51)],
    [None, None, Some(52), Some(53), Some(54), Some(55)],
];

/// Seam to the LED driver.
pub trait LedSink {
    fn set_color(&mut self, index: u8, rgb: Rgb);
    fn set_all(&mut self, rgb: Rgb);
}

/// In-memory LED buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedFrame {
    pub leds: [Rgb; LED_COUNT],
}

impl Default for LedFrame {
    fn default() -> Self {
        Self {
            leds: [Rgb::BLACK; LED_COUNT],
        }
    }
}

impl LedFrame {
    pub fn at(&self, pos: KeyPos) -> Option<Rgb> {
        let index = LED_MAP.get(pos.row as usize)?.get(pos.col as usize).copied().flatten()?;
        Some(self.leds[index as usize])
    }
}

impl LedSink for LedFrame {
    fn set_color(&mut self, index: u8, rgb: Rgb) {
        if let Some(led) = self.leds.get_mut(index as usize) {
            *led = rgb;
        }
    }

    fn set_all(&mut self, rgb: Rgb) {
        self.leds = [rgb; LED_COUNT];
    }
}

/// Paints the layer indicator for `layer` at brightness `val`.
///
/// The base layer paints every LED magenta. Other layers colour each key by
/// what it does on that layer: bootloader red, EEPROM clear white, unassigned
/// off, anything else the layer colour. Only LEDs in `led_range` are written
/// on those layers. Always returns `false` so the framework keeps going.
pub fn render_indicators(layer: Layer, val: u8, led_range: Range<u8>, sink: &mut impl LedSink) -> bool {
    let hue = match layer {
        Layer::Raise => HUE_CORAL,
        Layer::Lower => HUE_SPRINGGREEN,
        Layer::Qwerty => {
            sink.set_all(hsv_to_rgb(Hsv::new(HUE_MAGENTA, 255, val)));
            return false;
        }
    };

    let layer_rgb = hsv_to_rgb(Hsv::new(hue, 255, val));
    let boot_rgb = hsv_to_rgb(Hsv::new(0, 255, val));
    let ee_clr_rgb = hsv_to_rgb(Hsv::new(0, 0, val));

    for (row, cols) in LED_MAP.iter().enumerate() {
        for (col, led) in cols.iter().enumerate() {
            let Some(index) = *led else { continue };
            if !led_range.contains(&index) {
                continue;
            }
            let rgb = match keycode_at(layer, KeyPos::new(row as u8, col as u8)) {
                Keycode::Boot => boot_rgb,
                Keycode::EeClear => ee_clr_rgb,
                Keycode::No => Rgb::BLACK,
                _ => layer_rgb,
            };
            sink.set_color(index, rgb);
        }
    }

    false
}
