//! Placement Test Utility Functions
//!
//! ## Current API
//!
//! - Generate balanced exams from a question bank
//! - Validate generated exams
//! - Parse and validate question banks
//! - Score answers and place students on a belt
//!
pub mod bank;
pub mod error;
pub mod generation;
pub mod misc;
pub mod rng;
