//! Evaluation-phase tests.
//!
//! # Test Organization
//!
//! - `assignment` - simple, compound and unpacking assignment
//! - `scoping` - shadowing, name errors, deletion
//! - `containers` - self-referencing and aliased containers
//! - `control_flow` - loops and control signals
//! - `exceptions` - raise, try/except matching
//! - `functions` - argument binding, closures, recursion limit
//! - `sandbox` - attribute policy
//! - `host` - the embedding API

mod assignment;
mod containers;
mod control_flow;
mod exceptions;
mod functions;
mod host;
mod sandbox;
mod scoping;
