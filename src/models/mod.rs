// src/models/mod.rs

pub mod coordinate;
pub mod question;
pub mod score;
pub mod session;
