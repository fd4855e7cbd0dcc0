//! Detection Tests
//!
//! ## Structure
//! - `scenarios` - Module-level outcomes for typical trees
//! - `packages` - Package queries and directory inheritance
//! - `memoization` - The lazy package index is built once
//! - `collection` - Which files count as license files
//! - `exceptions` - The whole-module exception override
//! - `io` - Unreadable and oversized files

pub mod exceptions;
pub mod scenarios;
