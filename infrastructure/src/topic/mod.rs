//! Topic sources
//!
//! Derives a topic descriptor from the working copy.

mod git;

pub use git::GitTopicSource;
