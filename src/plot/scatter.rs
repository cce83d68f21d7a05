//!
//! Interactive scatter plots with an optional image navigation panel.

use serde::{Deserialize, Serialize};

use crate::error;
use crate::utils::{format_float, nan_max, nan_min};

use super::scene::{
    Column, DataSource, Figure, Fill, Glyph, Interaction, Layout, Range, Toolbar, Tooltip,
};
use super::widget::{navigation_buttons, ImageDisplay, Navigation, PanelEntry, Select};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScatterOptions {
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub size: f64,
    pub color: String,
    pub images: Option<Vec<Option<String>>>,
    pub show_plot: bool,
    pub logo: bool,
}

impl Default for ScatterOptions {
    fn default() -> ScatterOptions {
        ScatterOptions {
            title: "Interactive Scatter Plot".to_string(),
            width: 600.0,
            height: 400.0,
            size: 10.0,
            color: "#1f77b4".to_string(),
            images: None,
            show_plot: false,
            logo: true,
        }
    }
}

const IMAGE_TOOLTIP: &str = "<div><img src=\"@images\" alt=\"\" style=\"width:100px;height:auto;\"/>\
<div><strong>Name:</strong> @names</div>\
<div><strong>X:</strong> @x</div>\
<div><strong>Y:</strong> @y</div></div>";

/// Data range padded by a tenth of its span on both ends.
fn padded_range(values: &[f64]) -> Range {
    match (nan_min(values), nan_max(values)) {
        (Some(low), Some(high)) if high > low => {
            let pad = (high - low) * 0.1;
            Range::Numeric([low - pad, high + pad])
        }
        (Some(value), Some(_)) => Range::Numeric([value - 0.5, value + 0.5]),
        _ => Range::Numeric([0.0, 1.0]),
    }
}

/// Build a scatter plot of named points.
///
/// With `options.images` the plot is laid out next to a dropdown, an image
/// panel and previous/next buttons that step through the points.
pub fn scatter_plot<S: AsRef<str>>(
    x: &[f64],
    y: &[f64],
    names: &[S],
    options: &ScatterOptions,
) -> Result<Layout, error::Error> {
    if x.len() != y.len() || x.len() != names.len() {
        return Err(error::Error::Validation(
            "The lengths of 'x', 'y', and 'names' must be equal.".to_string(),
        ));
    }
    if let Some(images) = &options.images {
        if images.len() != x.len() {
            return Err(error::Error::Validation(
                "The lengths of 'x', 'y', 'names', and 'images' must be equal.".to_string(),
            ));
        }
    }
    let names: Vec<String> = names.iter().map(|s| s.as_ref().to_string()).collect();

    let mut source = DataSource::new()
        .with("x", Column::Numbers(x.to_vec()))
        .with("y", Column::Numbers(y.to_vec()))
        .with("names", Column::Texts(names.clone()));
    let hover = match &options.images {
        Some(images) => {
            source.insert("images", Column::OptionalTexts(images.clone()));
            Tooltip::Html(IMAGE_TOOLTIP.to_string())
        }
        None => Tooltip::fields(&[("Name", "@names"), ("X", "@x"), ("Y", "@y")]),
    };
    log::debug!("scatter plot with {} points", source.len());

    let mut figure = Figure {
        title: Some(options.title.clone()),
        width: options.width,
        height: options.height,
        x_range: padded_range(x),
        y_range: padded_range(y),
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
    figure.add_glyph(Glyph::Scatter {
        source,
        x: "x".to_string(),
        y: "y".to_string(),
        size: options.size,
        fill: Fill::Solid(options.color.clone()),
        legend_field: None,
        interaction: Interaction {
            hover: Some(hover),
            open_url: None,
        },
    });

    let layout = match &options.images {
        None => Layout::from(figure),
        Some(images) => {
            let display = ImageDisplay::with_size(300.0, 300.0, 200.0);
            let entries = images
                .iter()
                .enumerate()
                .map(|(i, image)| PanelEntry {
                    image: image.clone(),
                    fields: vec![
                        ("X".to_string(), format_float(x[i], None)),
                        ("Y".to_string(), format_float(y[i], None)),
                    ],
                })
                .collect();
            figure.navigation = Some(Navigation {
                names: names.clone(),
                entries,
                max_height: display.max_height,
            });
            let (previous, next) = navigation_buttons();
            Layout::Row(vec![
                Layout::from(figure),
                Layout::Column(vec![
                    Layout::Select(Select::new(&names)),
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
    use crate::plot::widget::Selection;

    #[test]
    fn test_basic_scatter() {
        let layout = scatter_plot(
            &[1.0, 2.0, 3.0],
            &[4.0, 5.0, 6.0],
            &["A", "B", "C"],
            &ScatterOptions::default(),
        )
        .unwrap();
        assert!(!layout.is_composite());
        let figure = layout.figure().unwrap();
        assert_eq!(figure.title.as_deref(), Some("Interactive Scatter Plot"));
        assert_eq!((figure.width, figure.height), (600.0, 400.0));
        match &figure.glyphs[0] {
            Glyph::Scatter {
                source, interaction, ..
            } => {
                let text = interaction.hover.as_ref().unwrap().to_text(source, 1);
                assert_eq!(text, "Name: B\nX: 2\nY: 5");
            }
            _ => panic!("expected scatter"),
        }
        match &figure.x_range {
            Range::Numeric([low, high]) => {
                assert!((low - 0.8).abs() < 1e-12);
                assert!((high - 3.2).abs() < 1e-12);
            }
            _ => panic!("expected numeric range"),
        }
    }

    #[test]
    fn test_length_mismatch() {
        let err = scatter_plot(&[1.0, 2.0], &[1.0], &["A", "B"], &ScatterOptions::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "The lengths of 'x', 'y', and 'names' must be equal.");
        let options = ScatterOptions {
            images: Some(vec![None]),
            ..Default::default()
        };
        let err = scatter_plot(&[1.0, 2.0], &[1.0, 2.0], &["A", "B"], &options).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The lengths of 'x', 'y', 'names', and 'images' must be equal."
        );
    }

    #[test]
    fn test_image_navigation() {
        let options = ScatterOptions {
            images: Some(vec![
                Some("a.png".to_string()),
                Some("b.png".to_string()),
                None,
            ]),
            ..Default::default()
        };
        let layout = scatter_plot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &["A", "B", "C"], &options)
            .unwrap();
        assert!(layout.is_composite());
        assert_eq!(layout.size(), (900.0, 400.0));
        let controls = &layout.children()[1];
        match &controls.children()[0] {
            Layout::Select(select) => assert_eq!(select.options.len(), 4),
            _ => panic!("expected dropdown"),
        }
        let navigation = layout.figure().unwrap().navigation.as_ref().unwrap();
        let nav = navigation.navigator().click(2).next();
        assert_eq!(nav.selection, Selection::Point(0));
        assert!(navigation.panel_html(&nav).contains("a.png"));
        let last = nav.previous();
        assert_eq!(
            navigation.panel_html(&last),
            "<div>No image available</div><div><strong>X:</strong> 3</div><div><strong>Y:</strong> 6</div>"
        );
    }

    #[test]
    fn test_single_point_range() {
        let layout = scatter_plot(&[2.0], &[3.0], &["A"], &ScatterOptions::default()).unwrap();
        let figure = layout.figure().unwrap();
        assert_eq!(figure.x_range, Range::Numeric([1.5, 2.5]));
        assert_eq!(figure.y_range, Range::Numeric([2.5, 3.5]));
    }
}
