//!
//! Named colormaps sampled into discrete hex palettes.

use colorous::{Color, Gradient};
use serde::{Deserialize, Serialize};

use crate::error;

/// Colormaps the portrait and Taylor builders may ask for.
pub trait ColormapSource {
    /// Sample `count` evenly spaced hex colors from the named colormap.
    fn sample(&self, name: &str, count: usize) -> Result<Vec<String>, error::Error>;
}

/// Colormap source backed by the `colorous` gradients and schemes.
#[derive(Clone, Copy, Debug, Default)]
pub struct Colorous;

enum Scheme {
    Continuous(Gradient),
    Categorical(&'static [Color]),
}

fn lookup(name: &str) -> Option<Scheme> {
    let scheme = match name.to_lowercase().as_str() {
        "viridis" => Scheme::Continuous(colorous::VIRIDIS),
        "inferno" => Scheme::Continuous(colorous::INFERNO),
        "magma" => Scheme::Continuous(colorous::MAGMA),
        "plasma" => Scheme::Continuous(colorous::PLASMA),
        "cividis" => Scheme::Continuous(colorous::CIVIDIS),
        "turbo" => Scheme::Continuous(colorous::TURBO),
        "cubehelix" => Scheme::Continuous(colorous::CUBEHELIX),
        "warm" => Scheme::Continuous(colorous::WARM),
        "cool" => Scheme::Continuous(colorous::COOL),
        "rainbow" => Scheme::Continuous(colorous::RAINBOW),
        "sinebow" => Scheme::Continuous(colorous::SINEBOW),
        "rdbu" => Scheme::Continuous(colorous::RED_BLUE),
        "rdgy" => Scheme::Continuous(colorous::RED_GREY),
        "rdylbu" => Scheme::Continuous(colorous::RED_YELLOW_BLUE),
        "rdylgn" => Scheme::Continuous(colorous::RED_YELLOW_GREEN),
        "spectral" => Scheme::Continuous(colorous::SPECTRAL),
        "brbg" => Scheme::Continuous(colorous::BROWN_GREEN),
        "prgn" => Scheme::Continuous(colorous::PURPLE_GREEN),
        "piyg" => Scheme::Continuous(colorous::PINK_GREEN),
        "puor" => Scheme::Continuous(colorous::PURPLE_ORANGE),
        "blues" => Scheme::Continuous(colorous::BLUES),
        "greens" => Scheme::Continuous(colorous::GREENS),
        "greys" => Scheme::Continuous(colorous::GREYS),
        "oranges" => Scheme::Continuous(colorous::ORANGES),
        "purples" => Scheme::Continuous(colorous::PURPLES),
        "reds" => Scheme::Continuous(colorous::REDS),
        "bugn" => Scheme::Continuous(colorous::BLUE_GREEN),
        "bupu" => Scheme::Continuous(colorous::BLUE_PURPLE),
        "gnbu" => Scheme::Continuous(colorous::GREEN_BLUE),
        "orrd" => Scheme::Continuous(colorous::ORANGE_RED),
        "pubugn" => Scheme::Continuous(colorous::PURPLE_BLUE_GREEN),
        "pubu" => Scheme::Continuous(colorous::PURPLE_BLUE),
        "purd" => Scheme::Continuous(colorous::PURPLE_RED),
        "rdpu" => Scheme::Continuous(colorous::RED_PURPLE),
        "ylgnbu" => Scheme::Continuous(colorous::YELLOW_GREEN_BLUE),
        "ylgn" => Scheme::Continuous(colorous::YELLOW_GREEN),
        "ylorbr" => Scheme::Continuous(colorous::YELLOW_ORANGE_BROWN),
        "ylorrd" => Scheme::Continuous(colorous::YELLOW_ORANGE_RED),
        "tab10" | "category10" => Scheme::Categorical(&colorous::CATEGORY10),
        "tableau10" => Scheme::Categorical(&colorous::TABLEAU10),
        "accent" => Scheme::Categorical(&colorous::ACCENT),
        "dark2" => Scheme::Categorical(&colorous::DARK2),
        "paired" => Scheme::Categorical(&colorous::PAIRED),
        "pastel1" => Scheme::Categorical(&colorous::PASTEL1),
        "pastel2" => Scheme::Categorical(&colorous::PASTEL2),
        "set1" => Scheme::Categorical(&colorous::SET1),
        "set2" => Scheme::Categorical(&colorous::SET2),
        "set3" => Scheme::Categorical(&colorous::SET3),
        _ => return None,
    };
    Some(scheme)
}

impl Scheme {
    fn eval(&self, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        match self {
            Scheme::Continuous(gradient) => gradient.eval_continuous(t),
            Scheme::Categorical(colors) => {
                let index = ((t * colors.len() as f64) as usize).min(colors.len() - 1);
                colors[index]
            }
        }
    }
}

/// Split a trailing `_r` off a colormap name.
fn parse_name(name: &str) -> (&str, bool) {
    match name.strip_suffix("_r") {
        Some(base) => (base, true),
        None => (name, false),
    }
}

fn sample_positions(count: usize) -> impl Iterator<Item = f64> {
    (0..count).map(move |i| {
        if count == 1 {
            0.0
        } else {
            i as f64 / (count - 1) as f64
        }
    })
}

impl ColormapSource for Colorous {
    fn sample(&self, name: &str, count: usize) -> Result<Vec<String>, error::Error> {
        Ok(sample_colors(name, count)?.into_iter().map(color_to_hex).collect())
    }
}

fn sample_colors(name: &str, count: usize) -> Result<Vec<Color>, error::Error> {
    if count < 1 {
        return Err(error::Error::InvalidColorCount);
    }
    let (base, reversed) = parse_name(name);
    let scheme = lookup(base).ok_or_else(|| error::Error::UnknownColormap(name.to_string()))?;
    Ok(sample_positions(count)
        .map(|t| scheme.eval(if reversed { 1.0 - t } else { t }))
        .collect())
}

/// Convert a colorous::Color to 6 digit hex string
/// # Examples
///
/// ```
/// # use colorous::Color;
/// # use esmbenchviz::colormap::color_to_hex;
/// assert_eq!(color_to_hex(Color {r: 255, g: 127, b: 0}), "#ff7f00");
/// ```
pub fn color_to_hex(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// Generate `count` hex colors from a named colormap.
pub fn get_colors_from_cmap(name: &str, count: usize) -> Result<Vec<String>, error::Error> {
    Colorous.sample(name, count)
}

/// Generate RGB colors from a named colormap, optionally normalizing the
/// sample positions to `[vmin, vmax]` first.
pub fn generate_colormap(
    name: &str,
    count: usize,
    vmin: Option<f64>,
    vmax: Option<f64>,
) -> Result<Vec<Color>, error::Error> {
    let colors = match (vmin, vmax) {
        (Some(low), Some(high)) if high != low => {
            if count < 1 {
                return Err(error::Error::InvalidColorCount);
            }
            let (base, reversed) = parse_name(name);
            let scheme =
                lookup(base).ok_or_else(|| error::Error::UnknownColormap(name.to_string()))?;
            sample_positions(count)
                .map(|t| (t - low) / (high - low))
                .map(|t| scheme.eval(if reversed { 1.0 - t } else { t }))
                .collect()
        }
        _ => sample_colors(name, count)?,
    };
    Ok(colors)
}

/// A colormap given either by name or as an explicit list of colors.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ColormapSpec {
    Name(String),
    Colors(Vec<String>),
}

impl Default for ColormapSpec {
    fn default() -> ColormapSpec {
        ColormapSpec::Name("Spectral".to_string())
    }
}

/// Resolve a colormap spec to `count` colors.
///
/// Explicit lists are truncated to `count` and must hold at least that many.
pub fn load_colormap(spec: &ColormapSpec, count: usize) -> Result<Vec<String>, error::Error> {
    match spec {
        ColormapSpec::Name(name) => get_colors_from_cmap(name, count),
        ColormapSpec::Colors(colors) => {
            if colors.len() < count {
                return Err(error::Error::InsufficientColors {
                    available: colors.len(),
                    requested: count,
                });
            }
            Ok(colors[..count].to_vec())
        }
    }
}

/// Maps scalar values linearly onto a discrete palette.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorMapper {
    pub palette: Vec<String>,
    pub low: f64,
    pub high: f64,
    pub nan_color: String,
}

impl ColorMapper {
    pub fn map(&self, value: f64) -> String {
        if value.is_nan() || self.palette.is_empty() {
            return self.nan_color.clone();
        }
        let last = self.palette.len() - 1;
        if value <= self.low || self.high <= self.low {
            return self.palette[0].clone();
        }
        if value >= self.high {
            return self.palette[last].clone();
        }
        let key = ((value - self.low) / (self.high - self.low) * self.palette.len() as f64) as usize;
        self.palette[key.min(last)].clone()
    }
}

/// Look up colors for categorical factors; repeated factors share the
/// color of their first occurrence.
pub fn factor_colors(values: &[String], factors: &[String], palette: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|value| {
            match factors.iter().position(|factor| factor == value) {
                Some(index) if index < palette.len() => palette[index].clone(),
                _ => "gray".to_string(),
            }
        })
        .collect()
}
