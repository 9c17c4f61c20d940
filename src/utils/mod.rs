//! Small helpers shared by the catalog and renderer.

pub mod escape;
pub mod minify;
pub mod url;
