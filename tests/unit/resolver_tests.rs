//! Unit tests for device discovery precedence and resolution.

#![allow(clippy::expect_used)]

use hostmon_cli::error::SetupError;

use crate::helpers::DeviceTree;

// ── Precedence ────────────────────────────────────────────────────────────────

#[test]
fn vendor_alias_wins_regardless_of_raw_nodes() {
    let tree = DeviceTree::new();
    let vendor = tree.add_alias("usb-Espressif_USB_JTAG_serial_debug_unit_7C-if00");
    tree.add_node("ttyUSB0");
    tree.add_node("ttyACM0");
    tree.add_node("ttyACM1");

    let resolved = tree.scanner().resolve(None).expect("resolve");
    assert_eq!(resolved, vendor);
}

#[test]
fn vendor_match_is_case_insensitive() {
    let tree = DeviceTree::new();
    let vendor = tree.add_alias("usb-ESPRESSIF_unit_01-if00");

    let resolved = tree.scanner().resolve(None).expect("resolve");
    assert_eq!(resolved, vendor);
}

#[test]
fn generic_alias_used_only_when_vendor_tier_empty() {
    let tree = DeviceTree::new();
    let generic = tree.add_alias("usb-FTDI_ttyconverter_A50285BI-if00-port0");
    tree.add_node("ttyUSB0");

    let resolved = tree.scanner().resolve(None).expect("resolve");
    assert_eq!(resolved, generic);
}

#[test]
fn raw_node_used_when_both_alias_tiers_empty() {
    let tree = DeviceTree::new();
    let node = tree.add_node("ttyACM0");

    let resolved = tree.scanner().resolve(None).expect("resolve");
    assert_eq!(resolved, node);
}

// ── Ambiguity ─────────────────────────────────────────────────────────────────

#[test]
fn vendor_collision_is_fatal_and_lists_only_vendor_candidates() {
    let tree = DeviceTree::new();
    let a = tree.add_alias("usb-Espressif_unit_A-if00");
    let b = tree.add_alias("usb-Espressif_unit_B-if00");
    // Would be a valid generic candidate, but the decisive tier already
    // collided; it must never be consulted.
    tree.add_alias("usb-Generic_ttyconverter-if00");

    let err = tree.scanner().resolve(None).expect_err("ambiguous");
    match err {
        SetupError::AmbiguousDevice(candidates) => {
            assert_eq!(candidates, vec![a, b]);
        }
        other => panic!("expected AmbiguousDevice, got {other:?}"),
    }
}

#[test]
fn raw_node_collision_is_fatal() {
    let tree = DeviceTree::new();
    let acm = tree.add_node("ttyACM0");
    let usb = tree.add_node("ttyUSB0");

    let err = tree.scanner().resolve(None).expect_err("ambiguous");
    match err {
        SetupError::AmbiguousDevice(candidates) => {
            assert_eq!(candidates, vec![acm, usb]);
        }
        other => panic!("expected AmbiguousDevice, got {other:?}"),
    }
}

#[test]
fn ambiguity_message_lists_every_candidate_path() {
    let tree = DeviceTree::new();
    let a = tree.add_alias("usb-Espressif_unit_A-if00");
    let b = tree.add_alias("usb-Espressif_unit_B-if00");

    let err = tree.scanner().resolve(None).expect_err("ambiguous");
    let msg = err.to_string();
    assert!(msg.contains(&a.display().to_string()));
    assert!(msg.contains(&b.display().to_string()));
}

// ── Override ──────────────────────────────────────────────────────────────────

#[test]
fn existing_override_bypasses_all_tiers() {
    let tree = DeviceTree::new();
    tree.add_alias("usb-Espressif_unit_A-if00");
    tree.add_alias("usb-Espressif_unit_B-if00");
    let override_path = tree.add_node("ttyS9");

    let resolved = tree
        .scanner()
        .resolve(Some(&override_path))
        .expect("resolve");
    assert_eq!(resolved, override_path);
}

#[test]
fn missing_override_is_fatal_even_with_a_unique_candidate() {
    let tree = DeviceTree::new();
    tree.add_alias("usb-Espressif_unit_A-if00");
    let missing = tree.dev.join("ttyUSB7");

    let err = tree
        .scanner()
        .resolve(Some(&missing))
        .expect_err("missing override");
    assert!(matches!(err, SetupError::OverridePathNotFound(p) if p == missing));
}

// ── Absence ───────────────────────────────────────────────────────────────────

#[test]
fn empty_tiers_report_no_device_found() {
    let tree = DeviceTree::new();
    let err = tree.scanner().resolve(None).expect_err("no device");
    assert!(matches!(err, SetupError::NoDeviceFound));
}

#[test]
fn missing_scan_directories_behave_as_empty_tiers() {
    let tree = DeviceTree::new();
    std::fs::remove_dir_all(&tree.by_id).expect("remove by-id");

    let err = tree.scanner().resolve(None).expect_err("no device");
    assert!(matches!(err, SetupError::NoDeviceFound));
}
