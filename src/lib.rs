//! `esmbenchviz` draws the figures used to benchmark Earth System Models:
//! portrait plots of metric grids, Taylor diagrams and scatter plots with
//! image navigation. Figures are built as a scene graph and rendered to SVG,
//! PNG or a standalone interactive HTML page.

/// The esmbenchviz Command Line Interface.
pub mod cli;

/// Named colormaps and value to color mapping.
pub mod colormap;

/// Error types.
pub mod error;

/// Cell partitioning and circle/line intersections.
pub mod geometry;

/// Input documents and config files.
pub mod io;

/// Figure builders and renderers.
pub mod plot;

/// Python bindings.
#[cfg(feature = "python")]
pub mod python;

/// Subcommand dispatch.
pub mod run;

/// Utility functions.
pub mod utils;
