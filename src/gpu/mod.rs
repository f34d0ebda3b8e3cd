mod blit;
mod context;

pub use blit::CanvasBlit;
pub use context::GpuContext;
