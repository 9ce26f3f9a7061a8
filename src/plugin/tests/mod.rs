//! Plugin System Tests
//!
//! Registry and dispatcher tests with mock implementations.
