//!
//! Portrait plots: a grid of cells, each split into one polygon per stacked
//! division and colored by value.

use log;
use serde::{Deserialize, Serialize};

use crate::cli::{AxisLocation, ColorbarPlace, FontStyle, PlotSize};
use crate::colormap::{ColorMapper, Colorous, ColormapSource};
use crate::error;
use crate::utils::{capitalize, nan_max, nan_min, nice_ticks};

use super::grid::{axis_labels, shape_cells, to_source, Grid, ShapeOptions};
use super::scene::{
    AxisSpec, ColorBar, Figure, Fill, Glyph, Interaction, Layout, Range, Side, Stroke, Toolbar,
    Tooltip,
};

/// A user supplied tooltip, either field rows or an HTML template.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TooltipSpec {
    Html(String),
    Fields(Vec<(String, String)>),
}

impl From<&TooltipSpec> for Tooltip {
    fn from(spec: &TooltipSpec) -> Tooltip {
        match spec {
            TooltipSpec::Html(template) => Tooltip::Html(template.clone()),
            TooltipSpec::Fields(pairs) => Tooltip::Fields(pairs.clone()),
        }
    }
}

/// Font size (pt) and style for one axis' tick labels.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AxisFont {
    pub size: Option<u32>,
    pub style: Option<FontStyle>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PortraitOptions {
    pub width: PlotSize,
    pub height: PlotSize,
    pub annotate: bool,
    pub vrange: Option<(f64, f64)>,
    pub xaxis_font: AxisFont,
    pub yaxis_font: AxisFont,
    pub xaxis_location: AxisLocation,
    pub xaxis_rotation: f64,
    pub title: Option<String>,
    pub cmap: String,
    pub cmap_bounds: Option<Vec<f64>>,
    pub cbar_place: ColorbarPlace,
    pub cbar_tick_fontsize: Option<u32>,
    pub invert_yaxis: bool,
    pub clickable: bool,
    pub legend_name: String,
    pub legend_labels: Option<Vec<String>>,
    pub img_url: Option<Vec<String>>,
    pub tooltips: Option<TooltipSpec>,
    pub url_open: Option<Vec<String>>,
    pub missing_color: String,
    pub aspect_scale: f64,
    pub show_plot: bool,
    pub toolbar: bool,
    pub logo: bool,
    pub debug: bool,
}

impl Default for PortraitOptions {
    fn default() -> PortraitOptions {
        PortraitOptions {
            width: PlotSize::Fixed(600.0),
            height: PlotSize::Fixed(600.0),
            annotate: false,
            vrange: None,
            xaxis_font: AxisFont::default(),
            yaxis_font: AxisFont::default(),
            xaxis_location: AxisLocation::Above,
            xaxis_rotation: 45.0,
            title: None,
            cmap: "RdBu_r".to_string(),
            cmap_bounds: None,
            cbar_place: ColorbarPlace::Right,
            cbar_tick_fontsize: None,
            invert_yaxis: true,
            clickable: false,
            legend_name: "Group".to_string(),
            legend_labels: None,
            img_url: None,
            tooltips: None,
            url_open: None,
            missing_color: "grey".to_string(),
            aspect_scale: 1.0,
            show_plot: false,
            toolbar: true,
            logo: true,
            debug: false,
        }
    }
}

fn image_tooltip(legend_name: &str, with_division: bool) -> String {
    let mut template = String::from(
        "<div><div><img src=\"@img\" alt=\"@img\" width=\"300\" height=\"200\" \
         style=\"float: left; margin: 0px 5px 5px 0px;\" border=\"1\"></img><br>\
         <span style=\"font-size: 14px\">\
         <font color=darkgreen>Model:</font> <b>@yname</b><br>\
         <font color=darkgreen>Variable:</font> <b>@xname</b><br>",
    );
    if with_division {
        template.push_str(&format!(
            "<font color=darkgreen>{}:</font> <b>@position_description</b><br>",
            capitalize(legend_name)
        ));
    }
    template.push_str(
        "<font color=darkgreen>Value (Nor.):</font> @field<br>\
         <font color=darkgreen>Value (Act.):</font> @field2</span></div></div>",
    );
    template
}

fn field_tooltip(options: &PortraitOptions, with_division: bool, divisions: usize) -> Tooltip {
    let mut pairs = vec![
        ("Model".to_string(), "@yname".to_string()),
        ("Variable".to_string(), "@xname".to_string()),
    ];
    if with_division {
        pairs.push((capitalize(&options.legend_name), "@position_description".to_string()));
    }
    pairs.push(("Value (Nor.)".to_string(), "@field".to_string()));
    if options.annotate {
        pairs.push(("Value (Act.)".to_string(), "@field2".to_string()));
    }
    if options.debug && divisions > 1 {
        pairs.push(("Position".to_string(), "@position".to_string()));
    }
    Tooltip::Fields(pairs)
}

fn axis_spec(side: Side, rotation: f64, font: &AxisFont) -> AxisSpec {
    AxisSpec {
        side,
        label: None,
        rotation,
        font_size: font.size.map(|size| format!("{}pt", size)),
        font_style: font.style.unwrap_or_default(),
    }
}

/// Color domain: the explicit range or the NaN-aware data extent, widened
/// to cover any bin edges.
fn color_domain(values: &[f64], vrange: Option<(f64, f64)>, bounds: Option<&Vec<f64>>) -> (f64, f64) {
    let (mut vmin, mut vmax) = match vrange {
        Some((a, b)) => (a.min(b), a.max(b)),
        None => (
            nan_min(values).unwrap_or(0.0),
            nan_max(values).unwrap_or(1.0),
        ),
    };
    if let Some(edges) = bounds {
        if let (Some(low), Some(high)) = (nan_min(edges), nan_max(edges)) {
            vmin = vmin.min(low);
            vmax = vmax.max(high);
        }
    }
    (vmin, vmax)
}

/// Build a portrait plot using the default colormap source.
pub fn portrait_plot<S: AsRef<str>>(
    data: &Grid,
    x_labels: &[S],
    y_labels: &[S],
    annotate_data: Option<&Grid>,
    options: &PortraitOptions,
) -> Result<Figure, error::Error> {
    portrait_plot_with(data, x_labels, y_labels, annotate_data, options, &Colorous)
}

/// Build a portrait plot, sampling the palette from `colormaps`.
pub fn portrait_plot_with<S: AsRef<str>, C: ColormapSource>(
    data: &Grid,
    x_labels: &[S],
    y_labels: &[S],
    annotate_data: Option<&Grid>,
    options: &PortraitOptions,
    colormaps: &C,
) -> Result<Figure, error::Error> {
    let x_labels: Vec<String> = x_labels.iter().map(|s| s.as_ref().to_string()).collect();
    let y_labels: Vec<String> = y_labels.iter().map(|s| s.as_ref().to_string()).collect();
    if let Some(bounds) = &options.cmap_bounds {
        if bounds.len() < 2 {
            return Err(error::Error::Validation(
                "cmap_bounds needs at least two edges".to_string(),
            ));
        }
    }

    let annotation = if options.annotate {
        Some(annotate_data.unwrap_or(data))
    } else {
        None
    };
    let records = shape_cells(
        data,
        annotation,
        &x_labels,
        &y_labels,
        &ShapeOptions {
            invert_yaxis: options.invert_yaxis,
            legend_labels: options.legend_labels.as_deref(),
            img_url: options.img_url.as_deref(),
            url_open: options.url_open.as_deref(),
        },
    )?;
    let source = to_source(&records);
    let with_division = source.contains("position_description");

    let width = match options.width {
        PlotSize::Fixed(pixels) => pixels,
        PlotSize::Auto => (data.cols * 30 + 150) as f64,
    };
    let height = match options.height {
        PlotSize::Fixed(pixels) => pixels,
        PlotSize::Auto => (data.rows * 30) as f64,
    };

    let x_factors = axis_labels(&x_labels, data.cols);
    let mut y_factors = axis_labels(&y_labels, data.rows);
    if options.invert_yaxis {
        y_factors.reverse();
    }

    let mut tools = vec!["hover".to_string()];
    if options.clickable {
        tools.push("tap".to_string());
    }
    tools.push("save".to_string());

    let hover = match &options.tooltips {
        Some(spec) => Tooltip::from(spec),
        None if options.img_url.is_some() => {
            Tooltip::Html(image_tooltip(&options.legend_name, with_division))
        }
        None => field_tooltip(options, with_division, data.divisions),
    };

    let x_axes = match options.xaxis_location {
        AxisLocation::Above => vec![axis_spec(Side::Above, options.xaxis_rotation, &options.xaxis_font)],
        AxisLocation::Below => vec![axis_spec(Side::Below, options.xaxis_rotation, &options.xaxis_font)],
        AxisLocation::Both => vec![
            axis_spec(Side::Above, options.xaxis_rotation, &options.xaxis_font),
            axis_spec(Side::Below, options.xaxis_rotation, &options.xaxis_font),
        ],
    };

    let color_count = match &options.cmap_bounds {
        Some(bounds) => bounds.len() - 1,
        None => 255,
    };
    let palette = colormaps.sample(&options.cmap, color_count)?;
    let values: Vec<f64> = records.iter().map(|r| r.value).collect();
    let (vmin, vmax) = color_domain(&values, options.vrange, options.cmap_bounds.as_ref());
    log::debug!("color domain [{}, {}] over {} colors", vmin, vmax, color_count);
    let mapper = ColorMapper {
        palette,
        low: vmin,
        high: vmax,
        nan_color: options.missing_color.clone(),
    };

    let color_bar = ColorBar {
        mapper: mapper.clone(),
        place: options.cbar_place,
        tick_font_size: match options.cbar_tick_fontsize {
            Some(size) => format!("{}px", size),
            None => "12px".to_string(),
        },
        ticks: nice_ticks(vmin, vmax, 10),
        label_standoff: 6.0,
    };

    let glyph = Glyph::Patches {
        source,
        xs: "xs".to_string(),
        ys: "ys".to_string(),
        fill: Fill::Mapped {
            field: "field".to_string(),
            mapper,
        },
        line: Stroke {
            color: "black".to_string(),
            width: 0.5,
            ..Default::default()
        },
        interaction: Interaction {
            hover: Some(hover),
            open_url: if options.clickable {
                Some("@url".to_string())
            } else {
                None
            },
        },
    };

    let figure = Figure {
        title: options.title.clone(),
        title_centered: options.title.is_some(),
        width,
        height,
        min_border: 50.0,
        aspect_scale: options.aspect_scale,
        x_range: Range::Categorical(x_factors),
        y_range: Range::Categorical(y_factors),
        x_axes,
        y_axes: vec![axis_spec(Side::Left, 0.0, &options.yaxis_font)],
        show_axes: true,
        show_grid: false,
        glyphs: vec![glyph],
        labels: vec![],
        color_bar: Some(color_bar),
        legend: None,
        toolbar: Toolbar {
            tools,
            visible: options.toolbar,
            logo: options.logo,
        },
        navigation: None,
    };
    log::debug!(
        "portrait plot {}x{} with {} polygons",
        width,
        height,
        figure.patch_count()
    );

    if options.show_plot {
        if let Err(err) = super::show(&Layout::from(figure.clone())) {
            log::warn!("unable to show plot: {}", err);
        }
    }
    Ok(figure)
}
