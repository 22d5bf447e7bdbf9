//! # Static Files Module
//!
//! Serves the public site (HTML, styles, scripts, images) from a root
//! directory, refusing any path that would leave it.

pub mod handlers;
pub mod mime;
pub mod resolver;


pub use handlers::serve_static;
pub use resolver::StaticRoot;
