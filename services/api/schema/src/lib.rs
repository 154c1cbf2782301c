//! Database entities for the Nestling API service.

pub mod children;
pub mod expenditure;
pub mod expenditure_child_tag;
pub mod parent_auth;
pub mod parent_phone_certify;
