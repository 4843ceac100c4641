//! Test utilities for Foodgram services.
//!
//! Provides `MockAuth`, request builders and image fixtures.
//! Import from tests only, never from production code.

pub mod auth;
pub mod fixture;
pub mod request;
