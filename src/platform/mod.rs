//! Platform integration: how launch requests actually reach the device.
//!
//! Everything here shells out to the Android command-line tools (`am`,
//! `getprop`).  Output meant for the caller goes to **stdout**; diagnostics go
//! to stderr through `tracing`.

pub mod am;
pub mod dry_run;
pub mod props;
