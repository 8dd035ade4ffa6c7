// src/lib.rs
//
// View server for a single student's profile and attendance roster, sitting
// in front of the attendance REST backend.
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod templates;
pub mod view;
pub mod web;
