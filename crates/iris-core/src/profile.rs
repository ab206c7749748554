use crate::error::ProfileError;
use crate::keycodes::{kc, Kc, Keycode, BSPC_HYPR, ENT_RAISE, SPC_LOWER};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

pub const DEFAULT_TIMEOUT_MS: u16 = 1000;

/// Candidate keys that always complete a chord, whichever hand they are on.
pub const ALWAYS_CHORD_KEYS: [Keycode; 5] = [
    kc(Kc::Space),
    kc(Kc::Tab),
    BSPC_HYPR,
    SPC_LOWER,
    ENT_RAISE,
];

/// Tap-hold keys whose timeout is zero.
pub const INSTANT_HOLD_KEYS: [Keycode; 3] = [BSPC_HYPR, SPC_LOWER, ENT_RAISE];

/// User-tunable settings for the tap-hold policy and the keyboard glue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    #[serde(default = "default_timeout_ms")]
    pub default_timeout_ms: u16,
    #[serde(default = "default_always_chord")]
    pub always_chord: Vec<Keycode>,
    #[serde(default = "default_instant_hold")]
    pub instant_hold: Vec<Keycode>,
    /// Unlock all locked layers after this long without key activity.
    #[serde(default)]
    pub layer_lock_idle_timeout_ms: Option<u64>,
    #[serde(default = "default_rgb_val")]
    pub rgb_val: u8,
}

fn default_timeout_ms() -> u16 {
    DEFAULT_TIMEOUT_MS
}

fn default_always_chord() -> Vec<Keycode> {
    ALWAYS_CHORD_KEYS.to_vec()
}

fn default_instant_hold() -> Vec<Keycode> {
    INSTANT_HOLD_KEYS.to_vec()
}

fn default_rgb_val() -> u8 {
    255
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            default_timeout_ms: DEFAULT_TIMEOUT_MS,
            always_chord: default_always_chord(),
            instant_hold: default_instant_hold(),
            layer_lock_idle_timeout_ms: None,
            rgb_val: 255,
        }
    }
}

impl Profile {
    pub fn from_json(content: &str) -> Result<Self, ProfileError> {
        let profile: Profile = serde_json::from_str(content)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.default_timeout_ms == 0 {
            return Err(ProfileError::ZeroDefaultTimeout);
        }
        if let Some(key) = self.instant_hold.iter().find(|k| !k.is_tap_hold()) {
            return Err(ProfileError::NotTapHold(*key));
        }
        Ok(())
    }
}

pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<Profile> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read profile {}", path.display()))?;
    let profile = Profile::from_json(&content)
        .with_context(|| format!("invalid profile {}", path.display()))?;
    info!(
        "Profile loaded from {}: timeout={}ms, {} chord keys, {} instant keys",
        path.display(),
        profile.default_timeout_ms,
        profile.always_chord.len(),
        profile.instant_hold.len()
    );
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycodes::{Mods, HRM_A};
    use crate::types::Layer;
    use std::io::Write;

    #[test]
    fn test_empty_json_gives_defaults() {
        let profile = Profile::from_json("{}").unwrap();
        assert_eq!(profile, Profile::default());
    }

    #[test]
    fn test_partial_override() {
        let profile = Profile::from_json(
            r#"{
                "default_timeout_ms": 800,
                "instant_hold": [{"LayerTap": ["Raise", "Enter"]}],
                "layer_lock_idle_timeout_ms": 60000
            }"#,
        )
        .unwrap();
        assert_eq!(profile.default_timeout_ms, 800);
        assert_eq!(profile.instant_hold, vec![Keycode::LayerTap(Layer::Raise, Kc::Enter)]);
        assert_eq!(profile.always_chord, ALWAYS_CHORD_KEYS.to_vec());
        assert_eq!(profile.layer_lock_idle_timeout_ms, Some(60000));
        assert_eq!(profile.rgb_val, 255);
    }

    #[test]
    fn test_mod_tap_json_shape() {
        let profile = Profile::from_json(
            r#"{"instant_hold": [{"ModTap": [{"shift": true}, "A"]}]}"#,
        )
        .unwrap();
        assert_eq!(profile.instant_hold, vec![HRM_A]);
        assert_eq!(profile.instant_hold[0], Keycode::ModTap(Mods::LSFT, Kc::A));
    }

    #[test]
    fn test_rejects_non_tap_hold_instant_key() {
        let err = Profile::from_json(r#"{"instant_hold": [{"Basic": "Space"}]}"#).unwrap_err();
        assert!(matches!(err, ProfileError::NotTapHold(Keycode::Basic(Kc::Space))));
    }

    #[test]
    fn test_rejects_zero_default_timeout() {
        let err = Profile::from_json(r#"{"default_timeout_ms": 0}"#).unwrap_err();
        assert!(matches!(err, ProfileError::ZeroDefaultTimeout));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Profile::from_json("{ default_timeout_ms: }").unwrap_err();
        assert!(matches!(err, ProfileError::Parse(_)));
    }

    #[test]
    fn test_load_profile_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"rgb_val": 120}}"#).unwrap();
        let profile = load_profile(file.path()).unwrap();
        assert_eq!(profile.rgb_val, 120);
        assert_eq!(profile.default_timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_load_profile_missing_file() {
        let err = load_profile("/nonexistent/iris-profile.json").unwrap_err();
        assert!(err.to_string().contains("failed to read profile"));
    }

    #[test]
    fn test_round_trip_default() {
        let json = serde_json::to_string(&Profile::default()).unwrap();
        assert_eq!(Profile::from_json(&json).unwrap(), Profile::default());
    }
}
