//! Small terminal utility for tracking screen time by hand. Sessions are started and stopped
//! explicitly, summed per day and overall, checked against a daily limit and can be exported as
//! csv. Nothing is kept once the process exits.
//!

pub mod cli;
pub mod export;
pub mod tracker;
pub mod utils;
