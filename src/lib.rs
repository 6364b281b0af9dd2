//! # fedipost
//!
//! A command-line client for posting status updates to a Mastodon-compatible
//! instance.
//!
//! This library provides functionality to:
//! - Register an OAuth application and sign in with the password grant
//! - Persist the instance URL and token between runs
//! - Prompt interactively for status text and visibility, then post it
//!
//! ## Modules
//!
//! - [`app`] - Session controller (configure, authenticate, post loop)
//! - [`app_deps`] - Traits over the network client and prompts
//! - [`cli`] - Command-line arguments
//! - [`config`] - Persisted session record
//! - [`instance`] - HTTP client for the instance API
//! - [`prompt`] - Interactive terminal prompts
//! - [`validation`] - Input validation utilities
//! - [`paths`] - Config file and `.env` resolution
//! - [`error`] - Error formatting utilities
//! - [`errors`] - Structured error types
//! - [`constants`] - Application constants

pub mod app;
pub mod app_deps;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod errors;
pub mod instance;
pub mod paths;
pub mod prompt;
pub mod validation;
