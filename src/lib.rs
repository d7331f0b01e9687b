// src/lib.rs

pub mod config;
pub mod inventory;
pub mod shopify;
