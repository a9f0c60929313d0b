//! Integration tests for Layer 1: Loader
//!
//! Tests for telemetry loading, session tables, and race directories.
