use crate::keycodes::{kc, Kc, Keycode, BSPC_HYPR, ENT_RAISE, SPC_LOWER};
use crate::profile::{Profile, DEFAULT_TIMEOUT_MS};
use crate::types::{Hand, HeldKey, KeyRecord};

const SPC: Keycode = kc(Kc::Space);
const TAB: Keycode = kc(Kc::Tab);

/// Decides whether `candidate`, pressed while `held` is undecided, forces
/// `held` to resolve as a hold right away.
///
/// Thumb keys and Space/Tab always do, so same-hand combos like
/// Cmd+Space work without waiting. Everything else only chords across hands;
/// same-hand presses are treated as rolls and left to the timeout.
pub fn should_force_hold(
    _held: Keycode,
    candidate: Keycode,
    held_hand: Hand,
    candidate_hand: Hand,
) -> bool {
    match candidate {
        SPC | TAB | BSPC_HYPR | SPC_LOWER | ENT_RAISE => true,
        _ => held_hand != candidate_hand,
    }
}

/// Timeout in ms the timing engine should use for `held`. Zero means the key
/// resolves as a hold as soon as another key is pressed.
pub fn timeout_for(held: Keycode) -> u16 {
    match held {
        BSPC_HYPR | SPC_LOWER | ENT_RAISE => 0,
        _ => DEFAULT_TIMEOUT_MS,
    }
}

/// Callbacks the external tap-hold engine invokes.
pub trait TapHoldHooks {
    /// Chord query: `other` was pressed while `held` is undecided.
    fn chord(&self, held: &HeldKey, other_keycode: Keycode, other: &KeyRecord) -> bool;

    /// Timeout query, asked before the engine starts its countdown.
    fn timeout(&self, held: Keycode) -> u16;
}

/// Table-driven form of the policy, built from a [`Profile`].
#[derive(Debug, Clone, PartialEq)]
pub struct TapHoldPolicy {
    always_chord: Vec<Keycode>,
    instant_hold: Vec<Keycode>,
    default_timeout_ms: u16,
}

impl Default for TapHoldPolicy {
    fn default() -> Self {
        Self::new(&Profile::default())
    }
}

impl TapHoldPolicy {
    pub fn new(profile: &Profile) -> Self {
        Self {
            always_chord: profile.always_chord.clone(),
            instant_hold: profile.instant_hold.clone(),
            default_timeout_ms: profile.default_timeout_ms,
        }
    }

    pub fn should_force_hold(
        &self,
        _held: Keycode,
        candidate: Keycode,
        held_hand: Hand,
        candidate_hand: Hand,
    ) -> bool {
        self.always_chord.contains(&candidate) || held_hand != candidate_hand
    }

    pub fn timeout_for(&self, held: Keycode) -> u16 {
        if self.instant_hold.contains(&held) {
            0
        } else {
            self.default_timeout_ms
        }
    }

    pub fn default_timeout_ms(&self) -> u16 {
        self.default_timeout_ms
    }
}

impl TapHoldHooks for TapHoldPolicy {
    fn chord(&self, held: &HeldKey, other_keycode: Keycode, other: &KeyRecord) -> bool {
        self.should_force_hold(held.keycode, other_keycode, held.hand(), other.hand())
    }

    fn timeout(&self, held: Keycode) -> u16 {
        self.timeout_for(held)
    }
}
