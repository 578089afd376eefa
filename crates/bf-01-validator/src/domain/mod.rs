//! Validator domain: rules, canonical forms, and the registration gate.

pub mod canonical;
pub mod errors;
pub mod registration;
pub mod rules;
