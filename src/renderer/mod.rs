//! WebGPU rendering module
//!
//! Scene building is plain vertex generation in playfield pixels; the
//! pipeline maps those to NDC and draws one triangle list per frame.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState, playfield_to_ndc};
pub use scene::build_frame;
pub use vertex::Vertex;
