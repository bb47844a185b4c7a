//! Configuration layer for the `n8n-webhook` binary.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The URI has no default and must come from the CLI or the file.
//!
//! Query parameters and headers are **merged**: CLI pairs override TOML entries
//! with the same key and keep the others. Authentication is **replaced**: any of
//! `--bearer`, `--basic` or `--auth-header` discards the `[authentication]` table.
//! `--body` replaces `[webhook.body]`, and `--from` replaces `webhook.from`; a body
//! and a file from any mix of sources is a configuration error.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
