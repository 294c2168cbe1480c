//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod consult;
pub mod consume_events;
#[cfg(test)]
pub(crate) mod test_support;
