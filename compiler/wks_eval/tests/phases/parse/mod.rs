//! Parse-phase tests: literal decoding and syntax errors, observed through
//! a full run.

mod literals;
mod syntax_errors;
