//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `dependency-duplicator` command-line tool. Each subcommand is defined in its
//! own file.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic by calling into the `dependency_duplicator` library.

pub mod apply;
pub mod completions;
pub mod tree;
pub mod validate;
