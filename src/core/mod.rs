//! Core logic: launch requests, the strategy chain, and the opener itself.
//!
//! Nothing in this module spawns processes.  Issuing a request goes through
//! the [`opener::Launcher`] trait, implemented in `platform`.

pub mod context;
pub mod error;
pub mod intent;
pub mod opener;
pub mod strategy;
