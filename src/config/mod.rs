//! # Configuration Module
//!
//! This module handles application configuration loading and management.
//! Configuration can be loaded from:
//! - Environment variables (prefixed with APP__, plus DIORITE_HOST,
//!   DIORITE_PORT and DIORITE_NAME)
//! - Configuration files (config/default.toml, config/{environment}.toml)
//! - .env files (via dotenvy)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use diorite::config::Settings;
//!
//! let settings = Settings::load()?;
//! println!("Connecting to {}:{}", settings.client.host, settings.client.port);
//! ```

mod settings;

pub use settings::*;
