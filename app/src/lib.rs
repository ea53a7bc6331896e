//! # Snake Patrol App
//!
//! Windowed front end for the patrol engine. The app owns no simulation
//! state of its own: it starts an [`engine::Engine`], forwards form input
//! through [`sim::validate_spawn`], and renders whatever the latest
//! [`engine::EngineSnapshot`] says is on the board.
//!
//! ## Module Organization
//!
//! - [`panel`]: Grid and snake rendering
//! - [`controls`]: Bottom control strip with the creation form

pub mod controls;
pub mod panel;
