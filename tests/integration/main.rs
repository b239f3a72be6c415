//! Integration tests for the harvest pipeline
//!
//! These tests use wiremock to stand in for real websites and tempfile
//! directories for every on-disk artifact.

mod common;
mod crawl_tests;
mod extract_tests;
mod pipeline_tests;
