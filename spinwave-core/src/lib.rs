//! Platform-independent core of the spinwave player: track catalog,
//! frequency sampling, and the per-frame visualizer pipeline
//! (bar geometry, peak-hold, pulse glow).

pub mod catalog;
pub mod config;
pub mod frame;
pub mod geometry;
pub mod peaks;
pub mod pulse;
pub mod sampler;
pub mod track;
pub mod transport;

pub use catalog::TrackCatalog;
pub use config::VisualizerConfig;
pub use frame::{BarDraw, FramePlan, VisualizerSession};
pub use geometry::{DisplayGeometry, SurfaceSize};
pub use sampler::{FftSampler, FrequencySource};
pub use track::Track;
