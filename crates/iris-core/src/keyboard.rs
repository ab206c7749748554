use crate::host::{send_string, HostEvent, HostQueue};
use crate::keycodes::{CustomKey, Keycode};
use crate::keymap;
use crate::layer_lock::LayerLock;
use crate::layers::LayerState;
use crate::profile::Profile;
use crate::rgb::{self, LedSink};
use crate::tap_hold::TapHoldPolicy;
use crate::types::{KeyPos, KeyRecord, Layer};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::ops::Range;
use std::time::{Duration, Instant};
use tracing::{debug, info};

lazy_static::lazy_static! {
    pub static ref KEYBOARD: Mutex<Keyboard> = Mutex::new(Keyboard::default());
}

/// Keymap-level state the framework calls into.
pub struct Keyboard {
    policy: TapHoldPolicy,
    layers: LayerState,
    layer_lock: LayerLock,
    host: HostQueue,
    rgb_val: u8,
    // Keycode resolved at press time, so releases hit the same key after a layer change.
    pressed: HashMap<KeyPos, Keycode>,
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::new(Profile::default())
    }
}

impl Keyboard {
    pub fn new(profile: Profile) -> Self {
        info!(
            "Keyboard: tap-hold timeout {}ms, layer lock idle timeout {:?}",
            profile.default_timeout_ms, profile.layer_lock_idle_timeout_ms
        );
        Self {
            policy: TapHoldPolicy::new(&profile),
            layers: LayerState::empty(),
            layer_lock: LayerLock::new(idle_timeout(&profile)),
            host: HostQueue::default(),
            rgb_val: profile.rgb_val,
            pressed: HashMap::new(),
        }
    }

    /// Swaps tuning. Layers stay as they are; locks on layers that are no
    /// longer on are dropped.
    pub fn set_profile(&mut self, profile: Profile) {
        info!("Keyboard: profile updated");
        self.policy = TapHoldPolicy::new(&profile);
        self.layer_lock.drop_stale(self.layers);
        self.layer_lock.set_idle_timeout(idle_timeout(&profile));
        self.rgb_val = profile.rgb_val;
    }

    pub fn policy(&self) -> &TapHoldPolicy {
        &self.policy
    }

    pub fn host(&self) -> &HostQueue {
        &self.host
    }

    pub fn layer_state(&self) -> LayerState {
        self.layers
    }

    pub fn current_layer(&self) -> Layer {
        self.layers.highest_layer()
    }

    pub fn layer_on(&mut self, layer: Layer) {
        debug!("Layer on: {}", layer);
        self.layers.layer_on(layer);
    }

    pub fn layer_off(&mut self, layer: Layer) {
        debug!("Layer off: {}", layer);
        self.layers.layer_off(layer);
    }

    pub fn is_layer_locked(&self, layer: Layer) -> bool {
        self.layer_lock.is_locked(layer)
    }

    /// Keycode at `pos` on the current highest layer.
    pub fn keycode_at(&self, pos: KeyPos) -> Keycode {
        keymap::keycode_at(self.current_layer(), pos)
    }

    /// User-level record hook. Returns `false` when the event was consumed and
    /// the framework should skip its default handling.
    pub fn process_record(&mut self, keycode: Keycode, record: &KeyRecord) -> bool {
        if !self.layer_lock.process(keycode, record, &mut self.layers) {
            return false;
        }

        match keycode {
            Keycode::Custom(CustomKey::DoubleEqual) if record.pressed => {
                debug!("DOUBLE_EQUAL");
                send_string(&self.host, "==");
            }
            Keycode::Custom(CustomKey::NotEqual) if record.pressed => {
                debug!("NOT_EQUAL");
                send_string(&self.host, "!=");
            }
            _ => {}
        }

        true
    }

    /// Full path for a resolved key event: keymap lookup, the user hook, then
    /// the default action.
    pub fn handle_record(&mut self, record: &KeyRecord) {
        let keycode = if record.pressed {
            let keycode = self.keycode_at(record.pos);
            self.pressed.insert(record.pos, keycode);
            keycode
        } else {
            self.pressed
                .remove(&record.pos)
                .unwrap_or_else(|| self.keycode_at(record.pos))
        };

        if !self.process_record(keycode, record) {
            return;
        }

        self.default_action(keycode, record);
    }

    fn default_action(&mut self, keycode: Keycode, record: &KeyRecord) {
        match keycode {
            Keycode::No | Keycode::Custom(_) => {}
            Keycode::LayerTap(layer, _) if record.tap_count == 0 => {
                if record.pressed {
                    self.layer_on(layer);
                } else {
                    self.layer_off(layer);
                }
            }
            Keycode::LayerTap(..) | Keycode::ModTap(..) if record.tap_count > 0 => {
                if let Some(tap) = keycode.tap_keycode() {
                    self.emit(tap, record.pressed);
                }
            }
            _ => self.emit(keycode, record.pressed),
        }
    }

    fn emit(&self, keycode: Keycode, pressed: bool) {
        let event = if pressed {
            HostEvent::Press(keycode)
        } else {
            HostEvent::Release(keycode)
        };
        self.host.send(event);
    }

    /// Matrix-scan hook.
    pub fn task(&mut self, now: Instant) {
        self.layer_lock.task(now, &mut self.layers);
    }

    pub fn render_indicators(&self, led_range: Range<u8>, sink: &mut impl LedSink) -> bool {
        rgb::render_indicators(self.current_layer(), self.rgb_val, led_range, sink)
    }
}

fn idle_timeout(profile: &Profile) -> Option<Duration> {
    profile
        .layer_lock_idle_timeout_ms
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
}
