//! # Data Transfer Objects
//!
//! Query-string parameters accepted by the API and the documents it returns.

pub mod catalog;
pub mod query;
pub mod reports;
