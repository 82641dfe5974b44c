mod component;
mod reconcile;
mod render;
pub mod scale;
mod state;
mod types;

pub use component::ForceGraphCanvas;
pub use types::{GraphSnapshot, PathLink, PathNode, ROOT_ID};
