//! bagtrack - a small, self-hostable baggage tracking service
//!
//! A thin HTTP CRUD layer over a journaled bag store, consumed by a
//! single-page dashboard that lists, filters, and mutates bag records.

pub mod cli;
pub mod http_server;
pub mod model;
pub mod observability;
pub mod store;
