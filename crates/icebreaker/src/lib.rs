//! Persistence for the icebreaker bot: team installation records and user
//! opt-in records kept in a partitioned table store.
//!
//! ## Modules
//!
//! - [`config`] – `StoreSettings` loaded from the environment
//! - [`provider`] – `BotDataProvider`, the operations the bot calls
//! - [`storage`] – table store backends and the `StoreConnector` trait
//! - [`cli`] / [`output`] – the `icebreaker` command line

pub mod cli;
pub mod config;
pub mod output;
pub mod provider;
pub mod storage;

pub use config::StoreSettings;
pub use provider::{BotDataProvider, SettingsSource};
pub use storage::StoreConnector;
