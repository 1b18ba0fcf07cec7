//! Request middleware.
//!
//! `Trace` opens a correlation scope and logs each request. Bearer token
//! extraction lives with the HTTP adapter in `inbound::http::auth`.

pub mod trace;

pub use trace::Trace;
