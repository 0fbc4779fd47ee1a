pub mod camera;
pub mod config;
pub mod error;
pub mod frame;
pub mod loader;
pub mod math;
pub mod renderer;
pub mod scene;
pub mod sphere;

pub use camera::{Camera, Ray};
pub use error::RenderError;
pub use frame::FrameBuffer;
pub use loader::{load_scene, parse_scene, SceneFile};
pub use renderer::{RenderStats, Renderer, BACKGROUND_COLOR, DEFAULT_MAX_DEPTH};
pub use scene::{Light, Pigment, Scene, Texture};
pub use sphere::Sphere;
