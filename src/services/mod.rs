// src/services/mod.rs
pub mod view_service;
