//! Integration tests for Portal-Mirror
//!
//! Tree crawls run against an in-memory renderer; downloads and full runs
//! use wiremock to stand in for the portal.

mod common;
mod download_tests;
mod mirror_tests;
