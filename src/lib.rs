//! A windowed viewer for two-dimensional toroidal cellular automata.
//!
//! The crate draws an engine-owned grid as a gridded pixel canvas,
//! schedules generations against the window's frame clock, and maps
//! keyboard and pointer input onto engine edits. The update rule itself
//! lives behind the [`Engine`] trait; any automaton that exposes one
//! byte per cell can be hosted.
//!
//! [`run`] opens a winit window and drives everything. The lower-level
//! pieces ([`session::Session`], [`render::RenderController`],
//! [`scheduler::Scheduler`]) are public for embedders that bring their
//! own host.

mod app;
mod gpu;

pub mod bitgrid;
pub mod config;
pub mod engine;
pub mod fps;
pub mod painter;
pub mod patterns;
pub mod render;
pub mod scheduler;
pub mod session;
pub mod stamp;
pub mod testing;

pub use app::run;
pub use config::ViewerConfig;
pub use engine::{Engine, FillMode};
pub use session::{ClickModifiers, Command, Session};
