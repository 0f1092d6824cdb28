//! Shared fixtures for the completion cache test suite and benchmarks.

pub mod syntax;
