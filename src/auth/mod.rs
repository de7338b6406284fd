//! Principals and authorization policies

pub mod policy;
pub mod principal;

pub use policy::{authorize, evaluate, Decision, Policy};
pub use principal::Principal;
