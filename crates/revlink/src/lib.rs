//! Revlink - resolve commit references to project tracker, code browser or
//! portal URLs.

pub mod server;
