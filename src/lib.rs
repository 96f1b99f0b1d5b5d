//! Locale core for the Fleetify fleet and legal-case management app.
//!
//! Everything lives under [`i18n`]; [`config`] reads the environment the
//! binaries run in.

pub mod config;
pub mod i18n;
