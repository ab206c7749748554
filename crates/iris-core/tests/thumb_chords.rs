use iris_core::keycodes::{kc, Kc, BSPC_HYPR, ENT_RAISE, HRM_D, HRM_F, HRM_J, SPC_LOWER};
use iris_core::keymap::keycode_at;
use iris_core::tap_hold::{should_force_hold, timeout_for, TapHoldHooks, TapHoldPolicy};
use iris_core::types::{HeldKey, KeyPos, KeyRecord, Layer};
use iris_core::Profile;
use std::time::{Duration, Instant};

fn held_at(pos: KeyPos, t0: Instant) -> HeldKey {
    HeldKey::new(keycode_at(Layer::Qwerty, pos), &KeyRecord::press(pos, t0))
}

fn press_after(pos: KeyPos, t0: Instant, ms: u64) -> (KeyRecord, iris_core::Keycode) {
    (
        KeyRecord::press(pos, t0 + Duration::from_millis(ms)),
        keycode_at(Layer::Qwerty, pos),
    )
}

#[test]
fn cmd_space_on_same_hand_resolves_hold() {
    let policy = TapHoldPolicy::default();
    let t0 = Instant::now();

    // CMD/F held, then Lower/Space from the same (left) thumb.
    let held = held_at(KeyPos::new(2, 4), t0);
    let (space, space_kc) = press_after(KeyPos::new(4, 4), t0, 40);
    assert_eq!(space_kc, SPC_LOWER);
    assert_eq!(held.hand(), space.hand());
    assert!(policy.chord(&held, space_kc, &space));
}

#[test]
fn same_hand_roll_waits_for_timeout() {
    let policy = TapHoldPolicy::default();
    let t0 = Instant::now();

    // OPT/D then F: a left-hand roll, not a chord.
    let held = held_at(KeyPos::new(2, 3), t0);
    assert_eq!(held.keycode, HRM_D);
    let (f, f_kc) = press_after(KeyPos::new(2, 4), t0, 25);
    assert!(!policy.chord(&held, f_kc, &f));
    assert_eq!(policy.timeout(held.keycode), 1000);
}

#[test]
fn opposite_hand_key_chords() {
    let policy = TapHoldPolicy::default();
    let t0 = Instant::now();

    let held = held_at(KeyPos::new(2, 4), t0);
    assert_eq!(held.keycode, HRM_F);
    // CMD/J on the right half.
    let (j, j_kc) = press_after(KeyPos::new(7, 4), t0, 10);
    assert_eq!(j_kc, HRM_J);
    assert!(policy.chord(&held, j_kc, &j));
}

#[test]
fn thumb_keys_hold_immediately() {
    let policy = TapHoldPolicy::default();
    for pos in [KeyPos::new(4, 4), KeyPos::new(9, 4), KeyPos::new(9, 2)] {
        let key = keycode_at(Layer::Qwerty, pos);
        assert!([SPC_LOWER, ENT_RAISE, BSPC_HYPR].contains(&key));
        assert_eq!(policy.timeout(key), 0);
        assert_eq!(timeout_for(key), 0);
    }
}

#[test]
fn plain_space_and_tab_chord_from_any_hand() {
    let t0 = Instant::now();
    let held = held_at(KeyPos::new(7, 4), t0);
    for candidate in [kc(Kc::Space), kc(Kc::Tab)] {
        assert!(should_force_hold(
            held.keycode,
            candidate,
            held.hand(),
            held.hand()
        ));
    }
}

#[test]
fn profile_loaded_policy_follows_overrides() {
    let profile = Profile::from_json(r#"{"default_timeout_ms": 250, "instant_hold": []}"#)
        .expect("valid profile");
    let policy = TapHoldPolicy::new(&profile);
    assert_eq!(policy.timeout_for(SPC_LOWER), 250);
    assert_eq!(policy.timeout_for(HRM_F), 250);
}
