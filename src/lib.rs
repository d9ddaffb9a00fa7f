//! Client-side state and API layer for a personal video-game backlog tracker.
//!
//! [`api`] wraps the REST backend, [`auth`] delegates sign-in to an identity
//! provider, and [`state`] keeps the backlog, playing, history, calendar and
//! all-games lists consistent as the library changes.

pub mod api;
pub mod auth;
pub mod config;
pub mod dto;
mod error;
pub mod state;

#[cfg(test)]
mod test_support;

pub use error::StoreError;
