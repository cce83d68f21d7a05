//!
//! Invoked by calling:
//! `esmbenchviz <portrait|taylor|scatter> <args>`

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;

use svg::Document;
use usvg::{fontdb, TreeParsing, TreeTextToPath};

use crate::error;

pub use self::render::{HtmlRenderer, Renderer, SvgRenderer};
pub use self::scene::{Figure, Layout};

/// Axis ticks and placement.
pub mod axis;

/// Figure layout in pixel space.
pub mod chart;

/// Chart components.
pub mod component;

/// Portrait plot grid shaping.
pub mod grid;

/// Portrait plot builder.
pub mod portrait;

/// SVG and HTML renderers.
pub mod render;

/// Scatter plot builder.
pub mod scatter;

/// Declarative scene graph.
pub mod scene;

/// SVG styling functions.
pub mod style;

/// Taylor diagram builder.
pub mod taylor;

/// Dropdown, image panel, buttons and navigation state.
pub mod widget;

pub fn save_svg(document: &Document, output: &Path) -> Result<(), error::Error> {
    svg::save(output, document)?;
    Ok(())
}

pub fn save_png(document: &Document, output: &Path) -> Result<(), error::Error> {
    let mut fontdb = fontdb::Database::new();
    fontdb.load_system_fonts();
    let mut buf = Vec::new();
    svg::write(&mut buf, document)?;
    let opt = usvg::Options::default();
    let mut tree = usvg::Tree::from_data(buf.as_slice(), &opt)
        .map_err(|e| error::Error::RenderError(e.to_string()))?;
    tree.convert_text(&fontdb);

    let width = 2000;
    let height = (width as f64 * tree.size.height() / tree.size.width()) as u32;
    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| error::Error::RenderError(format!("unable to allocate {}x{} image", width, height)))?;
    resvg::render(
        &tree,
        resvg::FitTo::Size(width, height),
        tiny_skia::Transform::default(),
        pixmap.as_mut(),
    )
    .ok_or_else(|| error::Error::RenderError("unable to rasterise figure".to_string()))?;
    pixmap
        .save_png(output)
        .map_err(|e| error::Error::RenderError(e.to_string()))?;
    Ok(())
}

pub fn save_html(page: &str, output: &Path) -> Result<(), error::Error> {
    fs::write(output, page)?;
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Suffix {
    PNG,
    SVG,
    HTML,
}

impl FromStr for Suffix {
    type Err = error::Error;
    fn from_str(input: &str) -> Result<Suffix, Self::Err> {
        match input.to_lowercase().as_str() {
            "png" => Ok(Suffix::PNG),
            "svg" => Ok(Suffix::SVG),
            "html" | "htm" => Ok(Suffix::HTML),
            _ => Err(error::Error::InvalidImageSuffix(input.to_string())),
        }
    }
}

/// Write a layout to `output`, choosing the format from the file suffix.
pub fn save_by_suffix(layout: &Layout, output: &Path) -> Result<(), error::Error> {
    let suffix_str = output
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_string();
    match Suffix::from_str(&suffix_str)? {
        Suffix::PNG => save_png(&SvgRenderer.render(layout)?, output),
        Suffix::SVG => save_svg(&SvgRenderer.render(layout)?, output),
        Suffix::HTML => save_html(&HtmlRenderer.render(layout)?, output),
    }?;
    log::info!("saved {}", output.display());
    Ok(())
}

fn opener() -> (&'static str, Vec<&'static str>) {
    if cfg!(target_os = "macos") {
        ("open", vec![])
    } else if cfg!(target_os = "windows") {
        ("cmd", vec!["/C", "start", ""])
    } else {
        ("xdg-open", vec![])
    }
}

/// Write the layout as an HTML page in the temp directory and ask the
/// desktop to open it.
pub fn show(layout: &Layout) -> Result<PathBuf, error::Error> {
    let page = HtmlRenderer.render(layout)?;
    let path = std::env::temp_dir().join(format!("esmbenchviz-{}.html", std::process::id()));
    save_html(&page, &path)?;
    let (program, args) = opener();
    Command::new(program)
        .args(args)
        .arg(&path)
        .spawn()
        .map_err(|e| error::Error::RenderError(format!("unable to open {}: {}", path.display(), e)))?;
    log::info!("opened {}", path.display());
    Ok(path)
}
