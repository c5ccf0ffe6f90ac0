//! Bag API HTTP server
//!
//! Maps the four store operations onto the HTTP/JSON contract consumed by
//! the dashboard.
//!
//! # Endpoints
//!
//! - `GET /api/bags` - list all bags
//! - `POST /api/bags` - create a bag
//! - `PUT /api/bags/:id` - partial update
//! - `DELETE /api/bags/:id` - delete, acknowledged regardless of existence
//! - `GET /health` - health check
//! - `GET /` - service banner

pub mod bag_routes;
pub mod config;
pub mod errors;
pub mod server;

pub use bag_routes::{bag_routes, BagState, DeleteAck};
pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
