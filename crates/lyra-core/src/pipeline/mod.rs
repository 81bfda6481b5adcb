pub mod config;
mod detect;
mod engine;
mod render;

pub use detect::detect_stars;
pub use engine::{
    compare_outputs, pipeline_input, Pipeline, PipelineInput, PipelineOutput, SyntheticPipeline,
};
pub use render::{project_catalog, render_star_field, ProjectedStar};
