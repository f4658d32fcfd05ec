//! InkPad Core Library
//!
//! Platform-agnostic scene, interaction modes, animations and scene
//! mutations for the InkPad drawing canvas.

pub mod animation;
pub mod brush;
pub mod camera;
pub mod canvas;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod input;
pub mod mode;
pub mod ops;
pub mod session;
pub mod shapes;
pub mod surface;

pub use animation::{AnimationHandle, AnimationTask, Animator, Easing, Tween};
pub use brush::{BrushConfig, BrushOptions, NamedColor};
pub use camera::Camera;
pub use canvas::{Canvas, CanvasDocument};
pub use config::CanvasConfig;
pub use dispatcher::dispatch;
pub use error::{CanvasError, CanvasResult};
pub use input::{Cursor, PointerEvent, PointerState};
pub use mode::{Mode, ModeController};
pub use ops::GroupHandle;
pub use session::Session;
pub use shapes::{SerializableColor, Shape, ShapeId, ShapeKind};
pub use surface::SceneSurface;
