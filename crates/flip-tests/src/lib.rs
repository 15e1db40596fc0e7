//! Integration tests for the flipbook crates.
//!
//! End-to-end coverage of the sequence container contract over the
//! in-memory native store: indexing, slicing, structural edits, cache
//! coherency and proxy lifetimes.
