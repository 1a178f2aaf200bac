pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod server;
pub mod state;
pub mod templates;
