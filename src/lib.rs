//! hl-hostmon setup CLI library — exposes modules for integration testing.

#![cfg_attr(test, allow(clippy::expect_used))]

pub mod cli;
pub mod command_runner;
pub mod commands;
pub mod config;
pub mod device;
pub mod error;
pub mod layout;
pub mod output;
pub mod pkg;
pub mod privilege;
pub mod systemd;
pub mod venv;
