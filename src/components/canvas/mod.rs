//! Drawing surface, frame clock and browser glue shared by the backgrounds.

mod driver;
mod host;
pub mod smooth;
mod surface;

pub use driver::{Engine, FrameDriver, RESIZE_QUIET_MS, ResizeDebounce, Viewport};
pub use host::{HostError, Sizing, attach, entropy_seed, read_viewport, window};
pub use surface::{ColorStop, LineCap, Paint, Rgb, Surface};

#[cfg(test)]
pub(crate) use surface::recording;
