//! Ambient plumbing shared by Nestling services: tracing setup, health
//! endpoints, and common tower layers.

pub mod health;
pub mod middleware;
pub mod tracing;
