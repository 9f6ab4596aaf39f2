/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The crop square and output size (crop.rs)
/// - Moving through the image list (navigation.rs)
/// - The application state driven by UI events (session.rs)

pub mod crop;
pub mod data;
pub mod navigation;
pub mod session;
