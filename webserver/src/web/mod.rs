//! Web layer: route handlers

pub mod handlers;
