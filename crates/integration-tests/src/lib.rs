//! Integration tests for Driftwood.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p driftwood-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `action_boundary` - Action result wire shape
//! - `segment_model` - Segment kind and payload agreement
//! - `content_pipeline` - Slug, markdown, and excerpt properties
//!
//! These tests exercise cross-crate behavior that doesn't need a live
//! database; repository and route tests against `PostgreSQL` run with the
//! server deployed in front of a scratch database.
