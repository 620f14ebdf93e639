#![forbid(unsafe_code)]

pub mod anim;
pub mod config;
pub mod encode;
pub mod error;
pub mod glyph;
pub mod pipeline;
pub mod prompts;
pub mod render;
pub mod surface;
pub mod task;
pub mod text;
pub mod vocab;

pub use config::GenConfig;
pub use error::{SymrowError, SymrowResult};
pub use pipeline::{TaskPair, TaskPipeline};
pub use render::{RowLayout, StateRenderer};
pub use surface::{FrameRgba, Surface};
pub use task::TaskData;
pub use vocab::{Glyph, ShapeKind, SymbolType};
