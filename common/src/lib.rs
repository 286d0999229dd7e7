//! Shared primitives for the Paz workspace.
//!
//! Both the core engine (`pazcore`) and the UI-side bridge (`bridge`) build
//! their error types on top of [`ErrorLocation`], so every error crossing a
//! crate boundary reports where it was raised.

pub mod error;

pub use error::error_location::ErrorLocation;

#[cfg(test)]
mod tests;
