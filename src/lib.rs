//! globe-tv: a world TV directory with a built-in stream relay.
//!
//! The crate is organized around a channel catalog embedded at build time,
//! a classification layer that annotates channels for playback, and a thin
//! HTTP surface that serves the directory and relays streams.

pub mod catalog;
pub mod classify;
pub mod config;
pub mod errors;
pub mod models;
pub mod proxy;
pub mod services;
pub mod web;
