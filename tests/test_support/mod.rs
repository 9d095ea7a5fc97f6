//! Some support utilities for the tests
//! Note: Must be imported in each test file

#![allow(unused)] // For test support

// region:    --- Modules

mod checks;
mod helpers;

pub use checks::*;
pub use helpers::*;

type TestResult<T> = core::result::Result<T, Box<dyn std::error::Error>>; // For tests.

// endregion: --- Modules
