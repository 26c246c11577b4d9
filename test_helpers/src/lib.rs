//! Test helpers shared across the nodebind workspace.
//!
//! - [`env`] serialises environment mutation behind RAII guards.
//! - [`figment`] runs option-loading code inside a `figment::Jail`.
//! - [`fixtures`] holds JSON documents describing configuration trees.

pub mod env;
pub mod figment;
pub mod fixtures;
