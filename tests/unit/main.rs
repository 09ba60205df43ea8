//! Unit tests for the hostmon setup CLI
//!
//! These tests use fake collaborators and temp-directory layouts; they run
//! fast and never touch the real package manager, systemd, or /dev.

mod resolver_tests;
mod uninstall_tests;
