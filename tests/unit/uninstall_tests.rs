//! Unit tests for the uninstaller's preserve/remove asymmetry.

#![allow(clippy::expect_used)]

use hostmon_cli::commands::{install, uninstall};
use hostmon_cli::layout::HostLayout;

use crate::helpers::{DeviceTree, FakePkg, FakeSystemd, FakeVenv, install_args, quiet_ctx};

fn host_root() -> (tempfile::TempDir, HostLayout) {
    let root = tempfile::tempdir().expect("tempdir");
    let layout = HostLayout::with_root(root.path());
    (root, layout)
}

async fn install_fixture(layout: &HostLayout, tree: &DeviceTree) {
    install::run(
        &install_args(false, false, None),
        layout,
        &tree.scanner(),
        &FakePkg::new(),
        &FakeVenv::new(),
        &FakeSystemd::new(),
        &quiet_ctx(),
    )
    .await
    .expect("install fixture");
}

#[tokio::test]
async fn uninstall_removes_program_state_but_preserves_config() {
    let (_root, layout) = host_root();
    let tree = DeviceTree::new();
    tree.add_alias("usb-Espressif_unit_7C-if00");
    install_fixture(&layout, &tree).await;
    let config_before = std::fs::read_to_string(layout.config_path()).expect("config");

    let svc = FakeSystemd::new();
    uninstall::run(&layout, &svc, &quiet_ctx())
        .await
        .expect("uninstall");

    assert!(!layout.program_dir.exists());
    assert!(!layout.unit_path().exists());
    assert_eq!(svc.disables.get(), 1);

    let config_after = std::fs::read_to_string(layout.config_path()).expect("config survives");
    assert_eq!(config_after, config_before);
}

#[tokio::test]
async fn uninstall_on_a_clean_host_succeeds() {
    let (_root, layout) = host_root();
    let svc = FakeSystemd::new();

    uninstall::run(&layout, &svc, &quiet_ctx())
        .await
        .expect("uninstall");

    // Deregistration is still attempted; everything else was absent.
    assert_eq!(svc.disables.get(), 1);
}

#[tokio::test]
async fn reinstall_after_uninstall_reuses_the_preserved_config() {
    let (_root, layout) = host_root();
    let tree = DeviceTree::new();
    tree.add_alias("usb-Espressif_unit_7C-if00");
    install_fixture(&layout, &tree).await;
    let config_first = std::fs::read_to_string(layout.config_path()).expect("config");

    uninstall::run(&layout, &FakeSystemd::new(), &quiet_ctx())
        .await
        .expect("uninstall");
    install_fixture(&layout, &tree).await;

    let config_second = std::fs::read_to_string(layout.config_path()).expect("config");
    assert_eq!(config_second, config_first);
}
