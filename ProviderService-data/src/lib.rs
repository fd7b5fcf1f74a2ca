// Provider Service Data
// This crate owns storage of practices and providers

// Database connection management
pub mod database;

// Repository implementations for data access
pub mod repository;

// Data storage models
pub mod models;
