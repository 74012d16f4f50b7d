//! Domains module containing business logic organized by bounded contexts.
//!
//! The server currently hosts a single domain: prompts compiled from a
//! declarative registry.

pub mod prompts;
