//! A small todo API built with axum and sqlx.
//!
//! Items are stored in Postgres and exposed as CRUD routes, with
//! interactive documentation served at `/swagger-ui`.

pub mod api;
pub mod app;
pub mod infra;
