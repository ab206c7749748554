//! Layer lock: a key that keeps the current layer on after its layer key is
//! released, until the lock key is pressed again.

use crate::keycodes::{Keycode, LLOCK};
use crate::layers::LayerState;
use crate::types::{KeyRecord, Layer};
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct LayerLock {
    locked: LayerState,
    idle_timeout: Option<Duration>,
    last_activity: Option<Instant>,
}

impl LayerLock {
    pub fn new(idle_timeout: Option<Duration>) -> Self {
        Self {
            locked: LayerState::empty(),
            idle_timeout,
            last_activity: None,
        }
    }

    pub fn is_locked(&self, layer: Layer) -> bool {
        self.locked.is_on(layer)
    }

    /// Returns `false` when the event was consumed.
    pub fn process(&mut self, keycode: Keycode, record: &KeyRecord, layers: &mut LayerState) -> bool {
        self.last_activity = Some(record.time);
        self.drop_stale(*layers);

        if keycode == LLOCK {
            if record.pressed {
                self.invert(layers.highest_layer(), layers);
            }
            return false;
        }

        if let Keycode::LayerTap(layer, _) = keycode {
            // Held layer-tap released while its layer is locked: keep the layer on.
            if record.tap_count == 0 && !record.pressed && self.is_locked(layer) {
                return false;
            }
        }

        true
    }

    /// Drops locks on layers that were turned off elsewhere.
    pub fn drop_stale(&mut self, layers: LayerState) {
        let dropped = self.locked.difference(layers);
        if !dropped.is_empty() {
            debug!("Layer lock dropped for {:?}", dropped.iter().collect::<Vec<_>>());
            self.locked.retain(layers);
        }
    }

    pub fn set_idle_timeout(&mut self, idle_timeout: Option<Duration>) {
        self.idle_timeout = idle_timeout;
    }

    pub fn invert(&mut self, layer: Layer, layers: &mut LayerState) {
        if self.is_locked(layer) {
            layers.layer_off(layer);
            debug!("Layer {} unlocked", layer);
        } else {
            layers.layer_on(layer);
            debug!("Layer {} locked", layer);
        }
        self.locked.invert(layer);
    }

    pub fn all_off(&mut self, layers: &mut LayerState) {
        for layer in self.locked.iter() {
            layers.layer_off(layer);
        }
        self.locked.clear();
    }

    /// Periodic hook; unlocks everything once the idle timeout elapses.
    pub fn task(&mut self, now: Instant, layers: &mut LayerState) {
        let (Some(timeout), Some(last)) = (self.idle_timeout, self.last_activity) else {
            return;
        };
        if !self.locked.is_empty() && now.saturating_duration_since(last) > timeout {
            debug!("Layer lock idle timeout");
            self.all_off(layers);
            self.last_activity = Some(now);
        }
    }
}
