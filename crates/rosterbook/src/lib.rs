//! `rosterbook` - A local user registry
//!
//! This library provides the core functionality for keeping an ordered
//! collection of user records (name, email, city) on the local machine:
//! a registry view-model over a persistent slot store, plus the terminal
//! form and CLI surfaces built on top of it.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod record;
pub mod registry;
pub mod store;
pub mod view;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use record::{Draft, UserRecord};
pub use registry::{Registry, SubmitOutcome};
pub use store::SlotStore;
