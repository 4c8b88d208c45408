//! Backend-agnostic database test suites, instantiated by each store implementation.

pub mod metadata_tests;
