use crate::keycodes::*;
use crate::types::{KeyPos, Layer, MATRIX_COLS, MATRIX_ROWS};

/// Number of physical keys on the Iris CE.
pub const KEY_COUNT: usize = 56;

pub type LayerMatrix = [[Keycode; MATRIX_COLS]; MATRIX_ROWS];

/// Maps keys listed in visual order (left to right, top to bottom, thumbs last)
/// onto the switch matrix.
///
/// The four main rows list six left keys then six right keys; the bottom row
/// also carries the two inner keys between the halves. Right-half matrix
/// columns are mirrored so column 0 is the outer edge on both halves.
pub const fn layout(k: [Keycode; KEY_COUNT]) -> LayerMatrix {
    [
        [k[0], k[1], k[2], k[3], k[4], k[5]],
        [k[12], k[13], k[14], k[15], k[16], k[17]],
        [k[24], k[25], k[26], k[27], k[28], k[29]],
        [k[36], k[37], k[38], k[39], k[40], k[41]],
        [KC_NO, KC_NO, k[50], k[51], k[52], k[42]],
        [k[11], k[10], k[9], k[8], k[7], k[6]],
        [k[23], k[22], k[21], k[20], k[19], k[18]],
        [k[35], k[34], k[33], k[32], k[31], k[30]],
        [k[49], k[48], k[47], k[46], k[45], k[44]],
        [KC_NO, KC_NO, k[55], k[54], k[53], k[43]],
    ]
}

const fn k(kc: Kc) -> Keycode {
    Keycode::Basic(kc)
}

const XXX: Keycode = KC_NO;

#[rustfmt::skip]
pub const KEYMAPS: [LayerMatrix; Layer::COUNT] = [
    // ┌───────┬───────┬───────┬───────┬───────┬───────┐               ┌───────┬───────┬───────┬───────┬───────┬───────┐
    // │   =   │   1   │   2   │   3   │   4   │   5   │               │   6   │   7   │   8   │   9   │   0   │   -   │
    // │  TAB  │   Q   │   W   │   E   │   R   │   T   │               │   Y   │   U   │   I   │   O   │   P   │   \   │
    // │  ESC  │ SFT/A │ CTL/S │ OPT/D │ CMD/F │ CMD/G │               │ CMD/H │ CMD/J │ OPT/K │ CTL/L │ SFT/; │   '   │
    // │  ENT  │   Z   │   X   │   C   │   V   │   B   │ HOME  │ │  END  │   N   │   M   │   ,   │   .   │   /   │   `   │
    // └───────┴───────┴───────┴──┬────┴──┬────┴──┬────┴──┬────┘ └──┬────┴──┬────┴──┬────┴──┬────┴───────┴───────┘
    //                            │  SFT  │  CMD  │LWR/SPC│         │RSE/ENT│  CTL  │HYP/BSP│
    //                            └───────┴───────┴───────┘         └───────┴───────┴───────┘
    layout([
        k(Kc::Equal), k(Kc::N1), k(Kc::N2), k(Kc::N3), k(Kc::N4), k(Kc::N5),
        k(Kc::N6), k(Kc::N7), k(Kc::N8), k(Kc::N9), k(Kc::N0), k(Kc::Minus),
        k(Kc::Tab), k(Kc::Q), k(Kc::W), k(Kc::E), k(Kc::R), k(Kc::T),
        k(Kc::Y), k(Kc::U), k(Kc::I), k(Kc::O), k(Kc::P), k(Kc::Backslash),
        k(Kc::Escape), HRM_A, HRM_S, HRM_D, HRM_F, HRM_G,
        HRM_H, HRM_J, HRM_K, HRM_L, HRM_SCLN, k(Kc::Quote),
        k(Kc::Enter), k(Kc::Z), k(Kc::X), k(Kc::C), k(Kc::V), k(Kc::B), k(Kc::Home),
        k(Kc::End), k(Kc::N), k(Kc::M), k(Kc::Comma), k(Kc::Dot), k(Kc::Slash), k(Kc::Grave),
        k(Kc::LeftShift), k(Kc::LeftGui), SPC_LOWER,
        ENT_RAISE, k(Kc::RightCtrl), BSPC_HYPR,
    ]),
    // │ BOOT  │EE CLR │       │       │       │       │               │       │       │       │       │       │       │
    // │       │       │       │       │       │       │               │       │       │       │       │ UNDO  │ REDO  │
    // │       │  SFT  │  CTL  │  OPT  │  CMD  │       │               │ LEFT  │ DOWN  │  UP   │ RIGHT │       │       │
    // │       │       │       │SEL WRD│SEL LN │       │       │ │LYR LCK│       │       │       │       │       │       │
    //                            │       │       │       │         │  ENT  │       │  DEL  │
    layout([
        QK_BOOT, EE_CLR, XXX, XXX, XXX, XXX,
        XXX, XXX, XXX, XXX, XXX, XXX,
        XXX, XXX, XXX, XXX, XXX, XXX,
        XXX, XXX, XXX, XXX, UNDO, REDO,
        XXX, k(Kc::LeftShift), k(Kc::LeftCtrl), k(Kc::LeftAlt), k(Kc::LeftGui), XXX,
        k(Kc::Left), k(Kc::Down), k(Kc::Up), k(Kc::Right), XXX, XXX,
        XXX, XXX, XXX, SELECT_WORD, SELECT_LINE, XXX, XXX,
        LLOCK, XXX, XXX, XXX, XXX, XXX, XXX,
        XXX, XXX, XXX,
        k(Kc::Enter), XXX, k(Kc::Delete),
    ]),
    // │       │       │       │       │       │       │               │       │       │       │       │EE CLR │ BOOT  │
    // │       │   _   │   /   │   +   │   -   │   *   │               │       │       │       │       │       │       │
    // │       │   :   │   [   │   {   │   (   │   <   │               │       │ PLAY  │ PREV  │ NEXT  │       │       │
    // │       │       │   ]   │   }   │   )   │   >   │LCK SCR│ │  END  │       │ MUTE  │ VOL-  │ VOL+  │       │       │
    //                            │  !=   │   =   │  ==   │         │       │       │       │
    layout([
        XXX, XXX, XXX, XXX, XXX, XXX,
        XXX, XXX, XXX, XXX, EE_CLR, QK_BOOT,
        XXX, KC_UNDS, k(Kc::KpSlash), k(Kc::KpPlus), k(Kc::KpMinus), k(Kc::KpAsterisk),
        XXX, XXX, XXX, XXX, XXX, XXX,
        XXX, KC_COLN, k(Kc::LeftBracket), KC_LCBR, KC_LPRN, KC_LABK,
        XXX, k(Kc::MediaPlay), k(Kc::MediaPrev), k(Kc::MediaNext), XXX, XXX,
        XXX, XXX, k(Kc::RightBracket), KC_RCBR, KC_RPRN, KC_RABK, LOCK_SCREEN,
        XXX, XXX, k(Kc::Mute), k(Kc::VolumeDown), k(Kc::VolumeUp), XXX, XXX,
        NOT_EQUAL, k(Kc::KpEqual), DOUBLE_EQUAL,
        XXX, XXX, XXX,
    ]),
];

/// Keycode assigned to `pos` on `layer`; `KC_NO` outside the matrix.
pub fn keycode_at(layer: Layer, pos: KeyPos) -> Keycode {
    if !pos.in_matrix() {
        return KC_NO;
    }
    KEYMAPS[layer.index()][pos.row as usize][pos.col as usize]
}

/// First matrix position on `layer` holding `keycode`, scanning row by row.
pub fn position_of(layer: Layer, keycode: Keycode) -> Option<KeyPos> {
    KEYMAPS[layer.index()]
        .iter()
        .enumerate()
        .find_map(|(row, cols)| {
            cols.iter()
                .position(|k| *k == keycode)
                .map(|col| KeyPos::new(row as u8, col as u8))
        })
}

/// Iterates every matrix position.
pub fn positions() -> impl Iterator<Item = KeyPos> {
    (0..MATRIX_ROWS as u8).flat_map(|row| (0..MATRIX_COLS as u8).map(move |col| KeyPos::new(row, col)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Hand;

    #[test]
    fn test_base_layer_corners() {
        assert_eq!(keycode_at(Layer::Qwerty, KeyPos::new(0, 0)), kc(Kc::Equal));
        // Right half is mirrored: the outer column of row 5 holds '-'.
        assert_eq!(keycode_at(Layer::Qwerty, KeyPos::new(5, 0)), kc(Kc::Minus));
        assert_eq!(keycode_at(Layer::Qwerty, KeyPos::new(5, 5)), kc(Kc::N6));
        assert_eq!(keycode_at(Layer::Qwerty, KeyPos::new(8, 0)), kc(Kc::Grave));
    }

    #[test]
    fn test_thumb_cluster_positions() {
        assert_eq!(position_of(Layer::Qwerty, SPC_LOWER), Some(KeyPos::new(4, 4)));
        assert_eq!(position_of(Layer::Qwerty, ENT_RAISE), Some(KeyPos::new(9, 4)));
        assert_eq!(position_of(Layer::Qwerty, BSPC_HYPR), Some(KeyPos::new(9, 2)));
        assert_eq!(keycode_at(Layer::Qwerty, KeyPos::new(4, 5)), kc(Kc::Home));
        assert_eq!(keycode_at(Layer::Qwerty, KeyPos::new(9, 5)), kc(Kc::End));
    }

    #[test]
    fn test_home_row_mods_sit_on_expected_hands() {
        for key in [HRM_A, HRM_S, HRM_D, HRM_F, HRM_G] {
            let pos = position_of(Layer::Qwerty, key).unwrap();
            assert_eq!(Hand::of(pos), Hand::Left, "{} should be left", key);
        }
        for key in [HRM_H, HRM_J, HRM_K, HRM_L, HRM_SCLN] {
            let pos = position_of(Layer::Qwerty, key).unwrap();
            assert_eq!(Hand::of(pos), Hand::Right, "{} should be right", key);
        }
    }

    #[test]
    fn test_unpopulated_cells_are_no() {
        for layer in Layer::ALL {
            for row in [4u8, 9] {
                for col in [0u8, 1] {
                    assert_eq!(keycode_at(layer, KeyPos::new(row, col)), KC_NO);
                }
            }
        }
    }

    #[test]
    fn test_out_of_matrix_is_no() {
        assert_eq!(keycode_at(Layer::Qwerty, KeyPos::new(10, 0)), KC_NO);
        assert_eq!(keycode_at(Layer::Raise, KeyPos::new(0, 6)), KC_NO);
    }

    #[test]
    fn test_raise_and_lower_specials() {
        assert_eq!(keycode_at(Layer::Lower, KeyPos::new(0, 0)), QK_BOOT);
        assert_eq!(keycode_at(Layer::Lower, KeyPos::new(0, 1)), EE_CLR);
        assert_eq!(keycode_at(Layer::Raise, KeyPos::new(5, 0)), QK_BOOT);
        assert_eq!(keycode_at(Layer::Raise, KeyPos::new(5, 1)), EE_CLR);
        assert_eq!(position_of(Layer::Lower, LLOCK), Some(KeyPos::new(9, 5)));
        assert_eq!(position_of(Layer::Raise, DOUBLE_EQUAL), Some(KeyPos::new(4, 4)));
        assert_eq!(position_of(Layer::Raise, NOT_EQUAL), Some(KeyPos::new(4, 2)));
        assert_eq!(position_of(Layer::Raise, LOCK_SCREEN), Some(KeyPos::new(4, 5)));
    }

    #[test]
    fn test_every_layer_maps_all_positions() {
        let populated = positions()
            .filter(|pos| !(matches!(pos.row, 4 | 9) && pos.col < 2))
            .count();
        assert_eq!(populated, KEY_COUNT);
    }
}
