pub mod checker;
pub mod cli;
pub mod commands;
pub mod config;
pub mod contrast;
pub mod error;
pub mod images;
pub mod og_images;
pub mod output;
pub mod rules;
pub mod scanner;
pub mod site;
pub mod source;

pub use error::{Result, WcagGuardError};

pub const EXIT_SUCCESS: i32 = 0;
/// At least one blocking issue was reported.
pub const EXIT_VIOLATIONS_FOUND: i32 = 1;
/// A precondition failed (missing build output, bad configuration); no
/// report was produced.
pub const EXIT_PRECONDITION_FAILED: i32 = 1;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
