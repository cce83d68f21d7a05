use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};
use clap_num::number_range;
use serde::{Deserialize, Serialize};

use crate::error;

/// Top level arguments to `esmbenchviz`
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Print debug messages
    #[arg(long, short = 'v', global = true, default_value_t = false)]
    pub verbose: bool,
    #[clap(subcommand)]
    pub cmd: SubCommand,
}

/// `esmbenchviz` subcommands
#[derive(Subcommand, Debug)]
pub enum SubCommand {
    /// Draw a portrait plot from a 2-D or stacked 3-D array.
    /// Called as `esmbenchviz portrait`
    Portrait(PortraitArgs),
    /// Draw a Taylor diagram from standard deviations and correlations.
    /// Called as `esmbenchviz taylor`
    Taylor(TaylorArgs),
    /// Draw a scatter plot with an optional image panel.
    /// Called as `esmbenchviz scatter`
    Scatter(ScatterArgs),
}

/// Where the categorical x-axis is drawn.
#[derive(ValueEnum, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AxisLocation {
    #[default]
    Above,
    Below,
    Both,
}

impl FromStr for AxisLocation {
    type Err = error::Error;
    fn from_str(input: &str) -> Result<AxisLocation, Self::Err> {
        match input {
            "above" => Ok(AxisLocation::Above),
            "below" => Ok(AxisLocation::Below),
            "both" => Ok(AxisLocation::Both),
            _ => Err(error::Error::InvalidAxisLocation(input.to_string())),
        }
    }
}

/// Where the colorbar is attached.
#[derive(ValueEnum, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorbarPlace {
    Left,
    #[default]
    Right,
    Above,
    Below,
    Center,
}

impl FromStr for ColorbarPlace {
    type Err = error::Error;
    fn from_str(input: &str) -> Result<ColorbarPlace, Self::Err> {
        match input {
            "left" => Ok(ColorbarPlace::Left),
            "right" => Ok(ColorbarPlace::Right),
            "above" => Ok(ColorbarPlace::Above),
            "below" => Ok(ColorbarPlace::Below),
            "center" => Ok(ColorbarPlace::Center),
            _ => Err(error::Error::InvalidColorbarPlace(input.to_string())),
        }
    }
}

/// Tick label font style.
#[derive(ValueEnum, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Bold,
    #[serde(rename = "bold italic")]
    BoldItalic,
}

impl FromStr for FontStyle {
    type Err = error::Error;
    fn from_str(input: &str) -> Result<FontStyle, Self::Err> {
        match input {
            "normal" => Ok(FontStyle::Normal),
            "italic" => Ok(FontStyle::Italic),
            "bold" => Ok(FontStyle::Bold),
            "bold italic" | "bold-italic" => Ok(FontStyle::BoldItalic),
            _ => Err(error::Error::InvalidFontStyle(input.to_string())),
        }
    }
}

impl FontStyle {
    pub fn is_bold(&self) -> bool {
        matches!(self, FontStyle::Bold | FontStyle::BoldItalic)
    }

    pub fn is_italic(&self) -> bool {
        matches!(self, FontStyle::Italic | FontStyle::BoldItalic)
    }
}

/// A plot dimension in pixels, or `auto` to size from the data.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(try_from = "SizeValue", into = "SizeValue")]
pub enum PlotSize {
    Fixed(f64),
    Auto,
}

impl Default for PlotSize {
    fn default() -> PlotSize {
        PlotSize::Fixed(600.0)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SizeValue {
    Number(f64),
    Text(String),
}

impl TryFrom<SizeValue> for PlotSize {
    type Error = error::Error;
    fn try_from(value: SizeValue) -> Result<PlotSize, Self::Error> {
        match value {
            SizeValue::Number(pixels) => Ok(PlotSize::Fixed(pixels)),
            SizeValue::Text(text) => PlotSize::from_str(&text),
        }
    }
}

impl From<PlotSize> for SizeValue {
    fn from(size: PlotSize) -> SizeValue {
        match size {
            PlotSize::Fixed(pixels) => SizeValue::Number(pixels),
            PlotSize::Auto => SizeValue::Text("auto".to_string()),
        }
    }
}

impl FromStr for PlotSize {
    type Err = error::Error;
    fn from_str(input: &str) -> Result<PlotSize, Self::Err> {
        if input == "auto" {
            return Ok(PlotSize::Auto);
        }
        match input.parse::<f64>() {
            Ok(pixels) if pixels > 0.0 => Ok(PlotSize::Fixed(pixels)),
            _ => Err(error::Error::Validation(format!(
                "plot size should be a positive number or auto, not {}",
                input
            ))),
        }
    }
}

impl fmt::Display for PlotSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotSize::Fixed(pixels) => write!(f, "{}", pixels),
            PlotSize::Auto => write!(f, "auto"),
        }
    }
}

fn tick_font_size(s: &str) -> Result<u32, String> {
    number_range(s, 4, 72)
}

fn plot_width(s: &str) -> Result<u32, String> {
    number_range(s, 100, 4000)
}

fn positive_float(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(v) if v > 0.0 => Ok(v),
        Ok(v) => Err(format!("{} is not positive", v)),
        Err(e) => Err(e.to_string()),
    }
}

/// Options to pass to `esmbenchviz portrait`
#[derive(Parser, Debug, Default)]
pub struct PortraitArgs {
    /// Path to input data (JSON, YAML or CSV grid)
    #[arg(long, short = 'i')]
    pub input: PathBuf,
    /// Output filename (.svg, .png or .html)
    #[arg(long, short = 'o', default_value_t = String::from("output.svg"))]
    pub output: String,
    /// Path to YAML or JSON file of plot options
    #[arg(long = "config", short = 'c')]
    pub config_file: Option<PathBuf>,
    /// Plot title
    #[arg(long, short = 't')]
    pub title: Option<String>,
    /// Colormap name
    #[arg(long)]
    pub cmap: Option<String>,
    /// Bin edges for a discrete colormap (<edge1>,<edge2>,...)
    #[arg(long = "cmap-bounds", value_delimiter = ',', allow_hyphen_values = true)]
    pub cmap_bounds: Option<Vec<f64>>,
    /// Color scale limits (<min>,<max>)
    #[arg(long, value_delimiter = ',', num_args = 2, allow_hyphen_values = true)]
    pub vrange: Option<Vec<f64>>,
    /// Plot width in pixels or auto
    #[arg(long)]
    pub width: Option<PlotSize>,
    /// Plot height in pixels or auto
    #[arg(long)]
    pub height: Option<PlotSize>,
    /// X-axis location
    #[arg(long = "xaxis-location", value_enum)]
    pub xaxis_location: Option<AxisLocation>,
    /// X-axis tick label rotation in degrees
    #[arg(long = "xaxis-rotation")]
    pub xaxis_rotation: Option<f64>,
    /// Colorbar placement
    #[arg(long = "cbar-place", value_enum)]
    pub cbar_place: Option<ColorbarPlace>,
    /// Colorbar tick label font size in px (4 - 72)
    #[arg(long = "cbar-tick-fontsize", value_parser = tick_font_size)]
    pub cbar_tick_fontsize: Option<u32>,
    /// Legend labels for stacked divisions
    #[arg(long = "legend-labels", value_delimiter = ',')]
    pub legend_labels: Option<Vec<String>>,
    /// Flag to add secondary values to tooltips
    #[arg(long, default_value_t = false)]
    pub annotate: bool,
    /// Flag to open cell links on click
    #[arg(long, default_value_t = false)]
    pub clickable: bool,
    /// Flag to keep the first row at the bottom
    #[arg(long = "no-invert", default_value_t = false)]
    pub no_invert: bool,
    /// Flag to open the plot in a browser
    #[arg(long, default_value_t = false)]
    pub show: bool,
}

/// Options to pass to `esmbenchviz taylor`
#[derive(Parser, Debug, Default)]
pub struct TaylorArgs {
    /// Path to input data (JSON or YAML)
    #[arg(long, short = 'i')]
    pub input: PathBuf,
    /// Output filename (.svg, .png or .html)
    #[arg(long, short = 'o', default_value_t = String::from("output.svg"))]
    pub output: String,
    /// Path to YAML or JSON file of plot options
    #[arg(long = "config", short = 'c')]
    pub config_file: Option<PathBuf>,
    /// Plot title
    #[arg(long, short = 't')]
    pub title: Option<String>,
    /// Colormap name
    #[arg(long)]
    pub colormap: Option<String>,
    /// Spacing of standard deviation arcs
    #[arg(long, value_parser = positive_float)]
    pub step: Option<f64>,
    /// Plot width in pixels (100 - 4000)
    #[arg(long, value_parser = plot_width)]
    pub width: Option<u32>,
    /// Flag to normalize by the reference standard deviation
    #[arg(long, default_value_t = false)]
    pub normalize: bool,
    /// Flag to omit the reference point
    #[arg(long = "no-reference", default_value_t = false)]
    pub no_reference: bool,
    /// Flag to open the plot in a browser
    #[arg(long, default_value_t = false)]
    pub show: bool,
}

/// Options to pass to `esmbenchviz scatter`
#[derive(Parser, Debug, Default)]
pub struct ScatterArgs {
    /// Path to input data (JSON or YAML)
    #[arg(long, short = 'i')]
    pub input: PathBuf,
    /// Output filename (.svg, .png or .html)
    #[arg(long, short = 'o', default_value_t = String::from("output.svg"))]
    pub output: String,
    /// Path to YAML or JSON file of plot options
    #[arg(long = "config", short = 'c')]
    pub config_file: Option<PathBuf>,
    /// Plot title
    #[arg(long, short = 't')]
    pub title: Option<String>,
    /// Plot width in pixels (100 - 4000)
    #[arg(long, value_parser = plot_width)]
    pub width: Option<u32>,
    /// Plot height in pixels (100 - 4000)
    #[arg(long, value_parser = plot_width)]
    pub height: Option<u32>,
    /// Flag to open the plot in a browser
    #[arg(long, default_value_t = false)]
    pub show: bool,
}

/// Command line argument parser
pub fn parse() -> Arguments {
    Arguments::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_enums() {
        assert_eq!(<AxisLocation as FromStr>::from_str("both").unwrap(), AxisLocation::Both);
        assert!(matches!(
            <AxisLocation as FromStr>::from_str("middle"),
            Err(error::Error::InvalidAxisLocation(_))
        ));
        assert_eq!(<ColorbarPlace as FromStr>::from_str("center").unwrap(), ColorbarPlace::Center);
        assert!(matches!(
            <ColorbarPlace as FromStr>::from_str("top"),
            Err(error::Error::InvalidColorbarPlace(_))
        ));
        assert_eq!(<FontStyle as FromStr>::from_str("bold italic").unwrap(), FontStyle::BoldItalic);
        assert!(<FontStyle as FromStr>::from_str("oblique").is_err());
    }

    #[test]
    fn test_plot_size() {
        assert_eq!(PlotSize::from_str("auto").unwrap(), PlotSize::Auto);
        assert_eq!(PlotSize::from_str("450").unwrap(), PlotSize::Fixed(450.0));
        assert!(PlotSize::from_str("-3").is_err());
        let size: PlotSize = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(size, PlotSize::Auto);
        let size: PlotSize = serde_json::from_str("300").unwrap();
        assert_eq!(size, PlotSize::Fixed(300.0));
    }

    #[test]
    fn test_font_style_serde() {
        let style: FontStyle = serde_yaml::from_str("bold italic").unwrap();
        assert_eq!(style, FontStyle::BoldItalic);
    }

    #[test]
    fn test_cli_args() {
        let args = Arguments::try_parse_from([
            "esmbenchviz",
            "portrait",
            "-i",
            "data.json",
            "--width",
            "auto",
            "--xaxis-location",
            "both",
            "--cmap-bounds",
            "-1,0,1",
        ])
        .unwrap();
        match args.cmd {
            SubCommand::Portrait(options) => {
                assert_eq!(options.width, Some(PlotSize::Auto));
                assert_eq!(options.xaxis_location, Some(AxisLocation::Both));
                assert_eq!(options.cmap_bounds, Some(vec![-1.0, 0.0, 1.0]));
                assert_eq!(options.output, "output.svg");
            }
            _ => panic!("expected portrait subcommand"),
        }
    }
}
