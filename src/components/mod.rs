pub mod canvas;
pub mod circuit;
pub mod particles;
