mod camera;
mod component;
mod frame;
mod highlight;
mod index;
mod render;
pub mod scale;
mod simulation;
mod state;
mod types;

pub use component::ForceGraphCanvas;
pub use types::GraphData;
