//! Typed operation methods on [`SubsonicClient`](crate::SubsonicClient).
//!
//! Each method maps its arguments onto request parameters, issues a single
//! call and projects the relevant field out of the decoded payload.

mod annotation;
mod browsing;
mod retrieval;
mod system;
