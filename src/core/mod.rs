//! Core business logic for token splitting and validation.
//!
//! This module contains the domain logic separated from any outer
//! surface. Everything here is pure and synchronous: the enclosing
//! program supplies the token and the clock and consumes the results.

pub mod base64url;
pub mod payload;
pub mod resolver;
pub mod serializer;
pub mod validator;
