//! Form submission: transport seam, HTTP transport and the submission pipeline.

mod outcome;
mod pipeline;
mod transport;

pub use outcome::*;
pub use pipeline::SubmissionPipeline;
pub use transport::*;
