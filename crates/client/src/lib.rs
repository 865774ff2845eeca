//! Session-side library for filmlog.
//!
//! This is the counterpart of the server in `filmlog-api`: an HTTP client
//! plus the in-session state that drives a UI. The shared [`state::Store`]
//! holds the reducer-managed [`state::ClientState`]; the controllers in
//! [`search`], [`watched`] and [`browse`] do the fetching and dispatch
//! results into the store; [`app::App`] is the composition root that wires
//! them together and runs the one-shot bootstrap.
//!
//! The store never performs I/O. All network calls live in the controllers,
//! and every fetch is tagged with a generation so results that arrive after
//! the initiating view has moved on are discarded instead of dispatched.

pub mod api;
pub mod app;
pub mod browse;
pub mod search;
pub mod state;
pub mod watched;
