// src/web/mod.rs
pub mod csrf;
pub mod routes;
pub mod student_handlers;
