//! The built-in format handlers

pub mod id3;
pub mod mp4;
