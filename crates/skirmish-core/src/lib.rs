//! Core types and definitions for the SKIRMISH arena.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry helpers, components, commands, events, snapshots, the weapon
//! table, and tuning constants. It has no dependency on any runtime.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod geometry;
pub mod state;
pub mod types;
pub mod weapons;
