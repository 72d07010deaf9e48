//! Application layer – async completion and the reply handed to the caller.

pub mod reply;
pub mod runtime;
