//! Domain types shared across the Nestling backend.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod conflict;
pub mod id;
