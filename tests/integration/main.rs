//! Integration test suite.
//!
//! Every test runs against its own SQLite file and reports directory inside a
//! temporary directory, so tests are independent and need no external services.
//!
//! Run with: cargo test --test integration

mod test_helpers;

mod attendance_tests;
mod catalog_tests;
mod projects_tests;
mod reports_tests;
