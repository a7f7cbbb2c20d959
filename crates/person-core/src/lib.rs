//! Core types and trait definitions for the person service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::PersonStore`]; avatar transports
//! implement [`avatar::AvatarFetcher`]. [`service::PersonService`] ties the
//! two together.

pub mod avatar;
pub mod error;
pub mod person;
pub mod service;
pub mod store;

pub use error::{Error, Result};
pub use person::{Person, PersonId};
pub use service::PersonService;
