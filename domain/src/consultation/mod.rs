//! Consultation subdomain
//!
//! - [`entities::Consultation`]: one question/answer exchange and its state machine
//! - [`value_objects::Confidence`]: caller confidence score (0–100)
//! - [`value_objects::Topic`]: the topic a consultation is threaded under

pub mod entities;
pub mod value_objects;
