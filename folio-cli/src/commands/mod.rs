pub mod render;
pub mod toc;
