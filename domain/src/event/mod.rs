//! Chat event subdomain
//!
//! - [`entities::ChatEvent`]: one entry in a long-poll batch
//! - [`entities::Reply`]: the message payload a human sends back
//! - [`subscription::Subscription`]: a server-side event queue and its cursor

pub mod entities;
pub mod subscription;
