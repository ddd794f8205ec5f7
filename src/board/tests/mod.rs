//! Tests for the board subsystem.

mod audit_tests;
mod domain_tests;
mod support;
