//! Integration test modules for midilink

pub mod config;
pub mod connections;
pub mod topology;
