//! Departure board server.
//!
//! Backs a smart-home dashboard widget that answers: "when does my bus
//! leave?" for one configured stop, using Entur real-time data.

pub mod domain;
pub mod entur;
pub mod resolver;
pub mod settings;
pub mod web;
