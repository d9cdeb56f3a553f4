pub mod app;
pub mod config;
pub mod countries;
pub mod graphql;
pub mod render;
