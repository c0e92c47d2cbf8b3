// Sukashi batch watermarking library

pub mod config;
pub mod logging;
pub mod walker;
pub mod watermark;
