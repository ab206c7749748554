pub mod error;
pub mod host;
pub mod keyboard;
pub mod keycodes;
pub mod keymap;
pub mod layer_lock;
pub mod layers;
pub mod profile;
pub mod rgb;
pub mod tap_hold;
pub mod types;

pub use error::ProfileError;
pub use keyboard::{Keyboard, KEYBOARD};
pub use keycodes::{Kc, Keycode, Mods};
pub use profile::{load_profile, Profile};
pub use tap_hold::{should_force_hold, timeout_for, TapHoldHooks, TapHoldPolicy};
pub use types::{Hand, HeldKey, KeyPos, KeyRecord, Layer};
