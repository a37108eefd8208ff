/// Application submodules for rowsift
///
/// The pipeline driver lives here, separate from the reader, filter and
/// printer it composes.
pub mod pipeline;

pub use pipeline::{Pipeline, RunSummary};
