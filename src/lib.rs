pub mod core;
pub mod dtos;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod services;
pub mod start;
pub mod state;
