//! The item API.

pub mod item_api;
pub mod item_repository;
pub mod item_service;
