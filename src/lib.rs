pub mod app;
pub mod charge;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod field;
pub mod geometry;
pub mod grid;
pub mod init_config;
pub mod profiler;
pub mod scene;
pub mod tracer;
pub mod viewer;

pub use charge::{Charge, ChargeSet, Polarity};
pub use config::TraceParameters;
pub use field::force_at;
pub use geometry::{Segment, Viewport};
pub use grid::{par_sample_grid, sample_grid};
pub use tracer::{par_trace_lines, trace_lines, FieldLine, Termination};
pub use viewer::{Frame, Viewer};

#[cfg(feature = "profiling")]
use once_cell::sync::Lazy;
#[cfg(feature = "profiling")]
use parking_lot::Mutex;

#[cfg(feature = "profiling")]
pub static PROFILER: Lazy<Mutex<profiler::Profiler>> =
    Lazy::new(|| Mutex::new(profiler::Profiler::new()));
