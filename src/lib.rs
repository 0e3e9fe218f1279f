//! Genesis - Intelligent Project Scaffolding
//!
//! Scaffolds new projects from a curated catalog of remote blueprints or
//! by delegating file generation to an external AI service.

pub mod blueprint;
pub mod cli;
pub mod config;
pub mod error;
pub mod generate;
pub mod manifest;
pub mod project;
pub mod publish;
pub mod ui;

pub use error::{GenesisError, GenesisResult};
