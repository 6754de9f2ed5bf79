//! The hello API.

pub mod hello_api;
