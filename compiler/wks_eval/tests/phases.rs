// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end script tests, organised by pipeline phase.
//!
//! Every test goes through the public host API: source text in, an
//! executed `ScriptModule` (or a `ScriptError`) and printed output out.
//!
//! # Organization
//!
//! - `parse/` - literals and syntax errors (`wks_lexer`, `wks_parse`)
//! - `eval/` - evaluation semantics, scoping, exceptions, sandbox
//! - `common/` - shared helpers
//!
//! # Running Phase Tests
//!
//! ```bash
//! cargo test -p wks_eval --test phases
//! cargo test -p wks_eval --test phases eval::scoping
//! ```

#[path = "phases/common/mod.rs"]
mod common;

#[path = "phases/parse/mod.rs"]
mod parse;

#[path = "phases/eval/mod.rs"]
mod eval;
