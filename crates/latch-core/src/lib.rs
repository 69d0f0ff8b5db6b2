//! # latch-core
//!
//! Core domain types for the latchd door-lock service.
//!
//! This crate provides the types shared across all latchd crates:
//! - The `LockAction` audit vocabulary with its kind/cause classification
//! - Entity structs for the door status, lock configuration, and log entries
//! - JSON response types returned by the HTTP gateway

pub mod actions;
pub mod entities;
pub mod responses;

pub use actions::{ActionCause, ActionKind, LockAction};
pub use entities::{DoorStatus, LockConfig, LogEntry};
