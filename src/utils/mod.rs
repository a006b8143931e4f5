// src/utils/mod.rs

pub mod chapter;
