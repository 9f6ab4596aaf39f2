/// Image file handling
///
/// This module handles:
/// - Scanning the input folder and decoding images (store.rs)
/// - Cutting, resizing and writing crops (export.rs)

pub mod export;
pub mod store;
