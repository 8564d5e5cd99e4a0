//! Admin report binary support: configuration and the demonstration flow.

pub mod config;
pub mod demo;

pub use config::Config;
pub use demo::{run, DemoOutcome};
