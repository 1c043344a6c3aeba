// Read-only JSON API over the loaded catalog

pub mod handlers;
pub mod models;
pub mod routes;
