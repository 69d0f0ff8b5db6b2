//! # latchd
//!
//! Daemon wiring for the single-door lock service: the tiny_http gateway
//! and the request router. The binary entry point lives in `main.rs`.

pub mod gateway;
pub mod router;
