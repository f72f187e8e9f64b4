//! Storage backends.
//!
//! The [`crescent_core::DocumentStore`] trait is defined in the core crate;
//! this module holds the bundled backends. Only the in-memory store ships
//! today - it backs the CLI demo and every test suite, and doubles as the
//! reference for the last-writer-wins overwrite semantics real backends
//! must honor.

pub mod memory;

pub use memory::MemoryStore;
