//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: RaceTime, Position, Status, Message, and Error.

mod errors;
