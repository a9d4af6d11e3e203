//! Test utilities.
//!
//! This module provides:
//! - Test data factories for creating valid waitlist fixtures
//! - Fakes for the referral code and key-value store ports
//! - A builder for `AppState` backed by in-memory storage

mod app_state_builder;
mod factories;
mod fakes;

pub use app_state_builder::*;
pub use factories::*;
pub use fakes::*;
