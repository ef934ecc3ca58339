//! Adapters - implementations of ports against concrete infrastructure.

pub mod http;
pub mod storage;
pub mod websocket;
