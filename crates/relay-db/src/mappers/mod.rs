//! Entity ↔ model mappers

mod message;
mod reaction;
