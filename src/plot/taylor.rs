//!
//! Taylor diagrams: models placed in polar coordinates by standard
//! deviation (radius) and correlation (angle), with reference arcs for
//! standard deviation and centred RMSE.

use std::f64::consts::FRAC_PI_2;
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::cli::FontStyle;
use crate::colormap::{factor_colors, load_colormap, ColormapSpec};
use crate::error;
use crate::geometry::{
    angle_with_x_axis, find_circle_intersection, find_circle_y_axis_intersection,
    find_line_circle_intersection,
};
use crate::utils::format_float;

use super::scene::{
    Align, Column, DataSource, Dash, Figure, Fill, Glyph, Interaction, Label, Layout, Legend,
    Range, Stroke, Toolbar, Tooltip,
};
use super::widget::{navigation_buttons, ImageDisplay, Navigation, PanelEntry, Select};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TaylorOptions {
    pub title: String,
    pub normalize: bool,
    pub step: f64,
    pub show_reference: bool,
    pub reference_name: String,
    pub reference_image: Option<String>,
    pub colormap: ColormapSpec,
    pub width: f64,
    pub show_plot: bool,
    pub images: Option<Vec<Option<String>>>,
    pub logo: bool,
    pub debug: bool,
}

impl Default for TaylorOptions {
    fn default() -> TaylorOptions {
        TaylorOptions {
            title: "Interactive Taylor Diagram".to_string(),
            normalize: false,
            step: 0.2,
            show_reference: true,
            reference_name: "Reference".to_string(),
            reference_image: None,
            colormap: ColormapSpec::Name("Spectral".to_string()),
            width: 600.0,
            show_plot: false,
            images: None,
            logo: true,
            debug: false,
        }
    }
}

/// Centred root mean square difference between a model and the reference.
/// # Examples
///
/// ```
/// # use esmbenchviz::plot::taylor::rmse;
/// assert_eq!(rmse(1.0, 1.0, 1.0), 0.0);
/// assert!((rmse(1.0, 1.2, 0.7) - 0.76_f64.sqrt()).abs() < 1e-12);
/// ```
pub fn rmse(refstd: f64, std: f64, corr: f64) -> f64 {
    (refstd.powi(2) + std.powi(2) - 2.0 * refstd * std * corr).sqrt()
}

/// Evenly spaced values from `start` up to but excluding `stop`.
fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let count = ((stop - start) / step).ceil().max(0.0) as usize;
    (0..count).map(|i| start + i as f64 * step).collect()
}

fn arc(x: f64, y: f64, radius: f64, start: f64, end: f64, line: Stroke) -> Glyph {
    Glyph::Arc {
        x,
        y,
        radius,
        start,
        end,
        line,
    }
}

fn stroke(color: &str, width: f64, dash: Dash) -> Stroke {
    Stroke {
        color: color.to_string(),
        width,
        dash,
        alpha: 0.3,
    }
}

/// Standard deviation arcs with labels, dashed RMSE arcs about the
/// reference point, RMSE labels and the reference standard deviation arc.
pub fn add_reference_arcs(figure: &mut Figure, max_stddev: f64, step: f64, refstd: f64) {
    let radii = arange(step, max_stddev + 2.0 * step, step);
    let outermost = match radii.last() {
        Some(radius) => *radius,
        None => return,
    };
    for (n, radius) in radii.iter().enumerate() {
        let line = if n < radii.len() - 1 {
            stroke("gray", 1.0, Dash::Solid)
        } else {
            stroke("black", 3.0, Dash::Solid)
        };
        figure.add_glyph(arc(0.0, 0.0, *radius, 0.0, FRAC_PI_2, line));
        figure.add_label(Label {
            font_size: "10pt".to_string(),
            align: Align::Right,
            alpha: 0.7,
            y_offset: -12.0,
            ..Label::new(radius + 0.05, 0.0, &format!("{:.1}", radius))
        });

        let mut start = 0.0;
        for (x, y) in find_circle_intersection(refstd, 0.0, *radius, 0.0, 0.0, outermost) {
            if x > 0.0 && y > 0.0 {
                start = angle_with_x_axis(refstd, 0.0, x, y).to_radians();
            }
        }
        let mut end = PI;
        for (_, y) in find_circle_y_axis_intersection(refstd, 0.0, *radius) {
            if y > 0.0 {
                end = angle_with_x_axis(refstd, 0.0, 0.0, y).to_radians();
            }
        }
        figure.add_glyph(arc(refstd, 0.0, *radius, start, end, stroke("gray", 1.0, Dash::Dashed)));
    }
    add_rmse_labels(figure, &radii, refstd);
    figure.add_glyph(arc(0.0, 0.0, refstd, 0.0, FRAC_PI_2, stroke("black", 2.0, Dash::Solid)));
}

/// Place an RMSE label where each RMSE arc crosses the line from the
/// reference point to the top of the outermost arc.
pub fn add_rmse_labels(figure: &mut Figure, rmse_values: &[f64], refstd: f64) {
    let outermost = match rmse_values.last() {
        Some(value) => *value,
        None => return,
    };
    for rmse_value in rmse_values {
        let intersections =
            find_line_circle_intersection(refstd, 0.0, 0.0, outermost, refstd, 0.0, *rmse_value);
        let fallback = (1.0 - rmse_value / 2.0, rmse_value / 1.18, 40.0);
        // the second crossing lies between the reference point and the axis
        let (x, y, angle) = match intersections.last() {
            Some((x, y)) if *x > 0.0 && *y > 0.0 => {
                (*x, *y, angle_with_x_axis(refstd, 0.0, *x, *y) - 90.0)
            }
            _ => fallback,
        };
        figure.add_label(Label {
            font_size: "8pt".to_string(),
            align: Align::Center,
            alpha: 0.7,
            angle: angle.to_radians(),
            ..Label::new(x, y, &format!("{:.2}", rmse_value))
        });
    }
}

fn correlation_text(correlation: f64) -> String {
    if correlation.fract() == 0.0 {
        format!("{:.1}", correlation)
    } else {
        format_float(correlation, None)
    }
}

/// Correlation spokes from the origin with their labels.
pub fn add_reference_lines(figure: &mut Figure, max_radius: f64) {
    let mut correlations: Vec<f64> = (0..10).map(|i| i as f64 / 10.0).collect();
    correlations.extend([0.95, 0.99, 1.0]);
    correlations.reverse();
    for correlation in correlations {
        let angle = correlation.acos();
        let line = if angle == 0.0 || angle == FRAC_PI_2 {
            stroke("black", 3.0, Dash::Solid)
        } else {
            stroke("gray", 1.0, Dash::Dotted)
        };
        let x = max_radius * correlation;
        let y = max_radius * angle.sin();
        figure.add_glyph(Glyph::Line {
            xs: vec![0.0, x],
            ys: vec![0.0, y],
            line,
        });
        figure.add_label(Label {
            font_size: "8pt".to_string(),
            alpha: 0.7,
            x_offset: 5.0,
            y_offset: 5.0,
            ..Label::new(x, y, &correlation_text(correlation))
        });
    }
}

fn unique_entries(names: &[String], colors: &[String]) -> Vec<(String, String)> {
    let mut entries: Vec<(String, String)> = vec![];
    for (name, color) in names.iter().zip(colors.iter()) {
        if !entries.iter().any(|(n, _)| n == name) {
            entries.push((name.clone(), color.clone()));
        }
    }
    entries
}

const IMAGE_TOOLTIP: &str = "<div><img src=\"@images\" alt=\"\" style=\"width:100px;height:auto;\"/>\
<div><strong>Model:</strong> @names</div>\
<div><strong>STD:</strong> @std_devs{0.000}</div>\
<div><strong>COR:</strong> @correlations{0.000}</div>\
<div><strong>RMSE:</strong> @rmse{0.000}</div></div>";

/// Build a Taylor diagram.
///
/// Returns a single figure, or a row of the figure and an image navigation
/// panel when `options.images` is given.
pub fn taylor_diagram<S: AsRef<str>>(
    std_devs: &[f64],
    correlations: &[f64],
    names: &[S],
    refstd: f64,
    options: &TaylorOptions,
) -> Result<Layout, error::Error> {
    if std_devs.len() != correlations.len() || std_devs.len() != names.len() {
        return Err(error::Error::Validation(
            "The lengths of 'std_devs', 'correlations', and 'names' must be equal.".to_string(),
        ));
    }
    if let Some(images) = &options.images {
        if images.len() != std_devs.len() {
            return Err(error::Error::Validation(
                "The lengths of 'std_devs', 'correlations', 'names', and 'images' must be equal."
                    .to_string(),
            ));
        }
    }
    if options.step.is_nan() || options.step <= 0.0 {
        return Err(error::Error::Validation("'step' must be positive.".to_string()));
    }

    let width = options.width;
    let height = width;
    let mut names: Vec<String> = names.iter().map(|s| s.as_ref().to_string()).collect();
    let mut std_devs = std_devs.to_vec();
    let mut correlations = correlations.to_vec();
    let mut images = options.images.clone();
    let mut colormap = options.colormap.clone();

    let (refstd, std_name) = if options.normalize {
        std_devs.iter_mut().for_each(|s| *s /= refstd);
        (1.0, "Normalized St. Dv.")
    } else {
        (refstd, "Standard Deviation")
    };

    if options.show_reference {
        names.push(options.reference_name.clone());
        std_devs.push(refstd);
        correlations.push(1.0);
        if let Some(list) = images.as_mut() {
            list.push(options.reference_image.clone());
        }
        if let ColormapSpec::Colors(colors) = &mut colormap {
            colors.push("black".to_string());
        }
    }

    let rmse_values: Vec<f64> = std_devs
        .iter()
        .zip(correlations.iter())
        .map(|(s, c)| rmse(refstd, *s, *c))
        .collect();
    let xs: Vec<f64> = std_devs
        .iter()
        .zip(correlations.iter())
        .map(|(r, c)| r * c.acos().cos())
        .collect();
    let ys: Vec<f64> = std_devs
        .iter()
        .zip(correlations.iter())
        .map(|(r, c)| r * c.acos().sin())
        .collect();

    let max_stddev = std_devs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let max_stddev = if max_stddev.is_finite() { max_stddev } else { refstd };
    let step = options.step;
    let max_range = max_stddev * 1.1 + step;

    let mut figure = Figure {
        title: Some(options.title.clone()),
        width,
        height,
        x_range: Range::Numeric([-step, max_range]),
        y_range: Range::Numeric([-step, max_range]),
        x_axes: vec![],
        y_axes: vec![],
        show_axes: false,
        show_grid: false,
        toolbar: Toolbar {
            tools: ["tap", "pan", "wheel_zoom", "box_zoom", "reset"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            visible: true,
            logo: options.logo,
        },
        ..Default::default()
    };

    add_reference_arcs(&mut figure, max_stddev, step, refstd);
    add_reference_lines(&mut figure, max_stddev + step);

    let palette = load_colormap(&colormap, names.len())?;
    log::debug!("selected colors: {:?}", palette);
    let colors = factor_colors(&names, &names, &palette);

    let mut source = DataSource::new()
        .with("x", Column::Numbers(xs.clone()))
        .with("y", Column::Numbers(ys.clone()))
        .with("names", Column::Texts(names.clone()))
        .with("std_devs", Column::Numbers(std_devs.clone()))
        .with("correlations", Column::Numbers(correlations.clone()))
        .with("rmse", Column::Numbers(rmse_values.clone()));
    if let Some(list) = &images {
        source.insert("images", Column::OptionalTexts(list.clone()));
    }
    log::debug!("taylor diagram source with {} points", source.len());

    let hover = if images.is_some() {
        Tooltip::Html(IMAGE_TOOLTIP.to_string())
    } else {
        Tooltip::fields(&[
            ("Model", "@names"),
            (std_name, "@std_devs{0.000}"),
            ("Correlation", "@correlations{0.000}"),
            ("RMSE", "@rmse{0.000}"),
        ])
    };

    for (i, name) in names.iter().enumerate() {
        figure.add_label(Label {
            font_size: "8pt".to_string(),
            x_offset: 5.0,
            y_offset: 5.0,
            ..Label::new(xs[i], ys[i], name)
        });
    }
    figure.legend = Some(Legend {
        location: "top_right".to_string(),
        entries: unique_entries(&names, &colors),
    });
    figure.add_glyph(Glyph::Scatter {
        source,
        x: "x".to_string(),
        y: "y".to_string(),
        size: 10.0,
        fill: Fill::PerRow(colors),
        legend_field: Some("names".to_string()),
        interaction: Interaction {
            hover: Some(hover),
            open_url: None,
        },
    });

    figure.add_label(Label {
        font_style: FontStyle::Italic,
        align: Align::Center,
        ..Label::new(max_range / 2.0, -0.18, "Standard Deviation")
    });
    figure.add_label(Label {
        font_style: FontStyle::Italic,
        align: Align::Center,
        angle: (-45.0_f64).to_radians(),
        ..Label::new(max_range / 1.5, max_range / 1.4, "Correlation")
    });

    let layout = match images {
        None => Layout::from(figure),
        Some(list) => {
            let display = ImageDisplay::new(width, height);
            let entries = list
                .iter()
                .enumerate()
                .map(|(i, image)| PanelEntry {
                    image: image.clone(),
                    fields: vec![
                        ("STD".to_string(), format_float(std_devs[i], None)),
                        ("COR".to_string(), format_float(correlations[i], None)),
                        ("RMSE".to_string(), format_float(rmse_values[i], None)),
                    ],
                })
                .collect();
            figure.navigation = Some(Navigation {
                names: names.clone(),
                entries,
                max_height: display.max_height,
            });
            let mut select = Select::new(&names);
            select.width = display.width;
            let (previous, next) = navigation_buttons();
            Layout::Row(vec![
                Layout::from(figure),
                Layout::Column(vec![
                    Layout::Select(select),
                    Layout::Display(display),
                    Layout::Row(vec![Layout::Button(previous), Layout::Button(next)]),
                ]),
            ])
        }
    };

    if options.show_plot {
        if let Err(err) = super::show(&layout) {
            log::warn!("unable to show plot: {}", err);
        }
    }
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn arcs(figure: &Figure) -> Vec<(f64, f64, f64, f64, f64, Stroke)> {
        figure
            .glyphs
            .iter()
            .filter_map(|g| match g {
                Glyph::Arc {
                    x,
                    y,
                    radius,
                    start,
                    end,
                    line,
                } => Some((*x, *y, *radius, *start, *end, line.clone())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_rmse() {
        assert_eq!(rmse(1.0, 1.0, 1.0), 0.0);
        assert!(close(rmse(1.0, 1.2, 0.7), 0.76_f64.sqrt()));
    }

    #[test]
    fn test_arange() {
        assert_eq!(arange(0.5, 2.0, 0.5), vec![0.5, 1.0, 1.5]);
        assert!(arange(1.0, 0.5, 0.5).is_empty());
    }

    #[test]
    fn test_length_mismatch() {
        let err = taylor_diagram(&[0.8, 1.0], &[0.9], &["A", "B"], 1.0, &TaylorOptions::default())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "The lengths of 'std_devs', 'correlations', and 'names' must be equal."
        );
        let options = TaylorOptions {
            images: Some(vec![Some("a.png".to_string())]),
            ..Default::default()
        };
        let err = taylor_diagram(&[0.8, 1.0], &[0.9, 0.8], &["A", "B"], 1.0, &options).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The lengths of 'std_devs', 'correlations', 'names', and 'images' must be equal."
        );
    }

    #[test]
    fn test_reference_point_and_ranges() {
        let layout = taylor_diagram(
            &[0.8, 1.0, 1.2],
            &[0.9, 0.85, 0.7],
            &["Model A", "Model B", "Model C"],
            1.0,
            &TaylorOptions::default(),
        )
        .unwrap();
        assert!(!layout.is_composite());
        let figure = layout.figure().unwrap();
        assert_eq!(figure.width, figure.height);
        let max_range = 1.2 * 1.1 + 0.2;
        assert_eq!(figure.x_range, Range::Numeric([-0.2, max_range]));
        assert_eq!(figure.y_range, figure.x_range);
        let source = figure
            .glyphs
            .iter()
            .find_map(|g| match g {
                Glyph::Scatter { source, .. } => Some(source),
                _ => None,
            })
            .unwrap();
        assert_eq!(source.len(), 4);
        assert_eq!(source.texts("names").unwrap()[3], "Reference");
        assert_eq!(source.numbers("rmse").unwrap()[3], 0.0);
        let legend = figure.legend.as_ref().unwrap();
        assert_eq!(legend.location, "top_right");
        assert_eq!(legend.entries.len(), 4);
    }

    #[test]
    fn test_normalize() {
        let layout = taylor_diagram(
            &[2.0, 4.0],
            &[0.9, 0.5],
            &["A", "B"],
            2.0,
            &TaylorOptions {
                normalize: true,
                show_reference: false,
                ..Default::default()
            },
        )
        .unwrap();
        let figure = layout.figure().unwrap();
        match figure.glyphs.last().unwrap() {
            Glyph::Scatter {
                source, interaction, ..
            } => {
                assert_eq!(source.numbers("std_devs").unwrap(), &vec![1.0, 2.0]);
                match interaction.hover.as_ref().unwrap() {
                    Tooltip::Fields(pairs) => assert_eq!(pairs[1].0, "Normalized St. Dv."),
                    _ => panic!("expected field tooltip"),
                }
            }
            _ => panic!("expected scatter"),
        }
    }

    #[test]
    fn test_reference_arcs() {
        let mut figure = Figure::default();
        add_reference_arcs(&mut figure, 1.0, 0.5, 1.0);
        let arcs = arcs(&figure);
        // three std arcs, three rmse arcs and the reference arc
        assert_eq!(arcs.len(), 7);
        let std_arcs: Vec<_> = arcs.iter().filter(|a| a.0 == 0.0).collect();
        assert_eq!(std_arcs[2].2, 1.5);
        assert_eq!(std_arcs[2].5.color, "black");
        assert_eq!(std_arcs[2].5.width, 3.0);
        assert_eq!(std_arcs[0].5.color, "gray");
        let reference = arcs.last().unwrap();
        assert_eq!((reference.2, reference.5.width), (1.0, 2.0));
        // rmse arc of radius 0.5 never reaches the outer arc or the y-axis
        let small = arcs.iter().find(|a| a.0 == 1.0 && a.2 == 0.5).unwrap();
        assert_eq!((small.3, small.4), (0.0, PI));
        assert_eq!(small.5.dash, Dash::Dashed);
        // rmse arc of radius 1.5 reaches the y-axis at (0, sqrt(1.25))
        let large = arcs.iter().find(|a| a.0 == 1.0 && a.2 == 1.5).unwrap();
        let expected_end = angle_with_x_axis(1.0, 0.0, 0.0, 1.25_f64.sqrt()).to_radians();
        assert!(close(large.4, expected_end));
        assert!(large.3 > FRAC_PI_2);
        let labels: Vec<&str> = figure.labels.iter().map(|l| l.text.as_str()).collect();
        assert!(labels.contains(&"1.5"));
        assert!(labels.contains(&"0.50"));
    }

    #[test]
    fn test_reference_lines() {
        let mut figure = Figure::default();
        add_reference_lines(&mut figure, 1.0);
        assert_eq!(figure.glyphs.len(), 13);
        let texts: Vec<&str> = figure.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts[0], "1.0");
        assert_eq!(texts[1], "0.99");
        assert_eq!(texts[12], "0.0");
        let emphasized = figure
            .glyphs
            .iter()
            .filter(|g| matches!(g, Glyph::Line { line, .. } if line.width == 3.0))
            .count();
        assert_eq!(emphasized, 2);
    }

    #[test]
    fn test_images_make_composite() {
        let options = TaylorOptions {
            images: Some(vec![Some("a.png".to_string()), None]),
            colormap: ColormapSpec::Colors(vec!["red".to_string(), "blue".to_string()]),
            ..Default::default()
        };
        let layout = taylor_diagram(&[0.8, 1.0], &[0.9, 0.8], &["A", "B"], 1.0, &options).unwrap();
        assert!(layout.is_composite());
        assert_eq!(layout.children().len(), 2);
        assert_eq!(layout.children()[1].children().len(), 3);
        assert_eq!(layout.size().0, 1200.0);
        let figure = layout.figure().unwrap();
        let navigation = figure.navigation.as_ref().unwrap();
        assert_eq!(navigation.entries.len(), 3);
        assert_eq!(navigation.names[2], "Reference");
        match figure.glyphs.last().unwrap() {
            Glyph::Scatter { fill, .. } => {
                assert_eq!(
                    fill,
                    &Fill::PerRow(vec!["red".to_string(), "blue".to_string(), "black".to_string()])
                );
            }
            _ => panic!("expected scatter"),
        }
    }

    #[test]
    fn test_short_color_list() {
        let options = TaylorOptions {
            colormap: ColormapSpec::Colors(vec!["red".to_string()]),
            ..Default::default()
        };
        let result = taylor_diagram(&[0.8, 1.0], &[0.9, 0.8], &["A", "B"], 1.0, &options);
        assert!(matches!(result, Err(error::Error::InsufficientColors { .. })));
    }
}
