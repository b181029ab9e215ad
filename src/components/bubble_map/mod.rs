mod camera;
mod component;
mod layout;
mod loader;
mod relations;
mod render;
mod simulation;
mod state;
mod types;

pub use component::BubbleMapCanvas;
pub use loader::{fetch_catalog, fetch_text, load_image};
pub use types::{RelationView, Track, TrackDetail};
