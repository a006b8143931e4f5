// src/handlers/mod.rs

pub mod distractor;
pub mod question;
pub mod submission;
