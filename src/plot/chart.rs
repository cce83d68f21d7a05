use std::f64::consts::PI;

use indexmap::IndexMap;
use svg::node::element::path::Data;
use svg::node::element::{Circle, ClipPath, Definitions, Group, Link, Rectangle, Title};

use crate::cli::{ColorbarPlace, FontStyle};
use crate::utils::{escape_html, linear_scale_float};

use super::{
    axis::{frame_axis, numeric_ticks},
    component::{arc_path, chart_axis, color_bar, legend, legend_size, path_gridline, LegendShape},
    scene::{DataSource, Figure, Glyph, Interaction, Label, Range},
    style::{path_filled, path_open, polyline, text_node, text_styled},
};

const TITLE_SPACE: f64 = 30.0;
const COLORBAR_SPACE_SIDE: f64 = 90.0;
const COLORBAR_SPACE_EDGE: f64 = 60.0;
const COLORBAR_THICKNESS: f64 = 15.0;
const ARC_RESOLUTION: usize = 90;

#[derive(Clone, Debug, PartialEq)]
pub struct Dimensions {
    pub height: f64,
    pub width: f64,
    /// Top, right, bottom, left.
    pub margin: [f64; 4],
}

impl Default for Dimensions {
    fn default() -> Dimensions {
        Dimensions {
            height: 600.0,
            width: 600.0,
            margin: [50.0, 50.0, 50.0, 50.0],
        }
    }
}

impl Dimensions {
    /// Outer size and margins of a figure, reserving space for its title
    /// and colorbar.
    pub fn for_figure(figure: &Figure) -> Dimensions {
        let border = figure.min_border;
        let mut margin = [border; 4];
        if figure.title.is_some() {
            margin[0] += TITLE_SPACE;
        }
        if let Some(bar) = &figure.color_bar {
            match bar.place {
                ColorbarPlace::Above => margin[0] += COLORBAR_SPACE_EDGE,
                ColorbarPlace::Right => margin[1] += COLORBAR_SPACE_SIDE,
                ColorbarPlace::Below => margin[2] += COLORBAR_SPACE_EDGE,
                ColorbarPlace::Left => margin[3] += COLORBAR_SPACE_SIDE,
                ColorbarPlace::Center => (),
            }
        }
        Dimensions {
            height: figure.height,
            width: figure.width,
            margin,
        }
    }

    pub fn frame_width(&self) -> f64 {
        (self.width - self.margin[1] - self.margin[3]).max(10.0)
    }

    pub fn frame_height(&self) -> f64 {
        (self.height - self.margin[0] - self.margin[2]).max(10.0)
    }
}

/// Tooltip markup collected while drawing interactive charts.
#[derive(Clone, Debug, Default)]
pub struct Interactivity {
    pub enabled: bool,
    /// Tooltip HTML keyed by the `data-tip` attribute of each shape.
    pub tips: IndexMap<String, String>,
}

/// A figure laid out in pixel space.
#[derive(Clone, Debug)]
pub struct Chart<'a> {
    pub id: String,
    pub figure: &'a Figure,
    pub dimensions: Dimensions,
}

impl<'a> Chart<'a> {
    pub fn new(id: &str, figure: &'a Figure) -> Chart<'a> {
        Chart {
            id: id.to_string(),
            figure,
            dimensions: Dimensions::for_figure(figure),
        }
    }

    /// Pixel position of a data coordinate within the frame.
    pub fn to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        (
            linear_scale_float(
                x,
                &self.figure.x_range.domain(),
                &[0.0, self.dimensions.frame_width()],
            ),
            linear_scale_float(
                y,
                &self.figure.y_range.domain(),
                &[self.dimensions.frame_height(), 0.0],
            ),
        )
    }

    fn glyphs(&self, state: &mut Interactivity) -> Group {
        let mut group = Group::new();
        for (g, glyph) in self.figure.glyphs.iter().enumerate() {
            group = match glyph {
                Glyph::Patches {
                    source,
                    xs,
                    ys,
                    fill,
                    line,
                    interaction,
                } => {
                    let mut patches = Group::new();
                    let (xs, ys) = match (source.polygons(xs), source.polygons(ys)) {
                        (Some(xs), Some(ys)) => (xs, ys),
                        _ => continue,
                    };
                    for (row, (px, py)) in xs.iter().zip(ys.iter()).enumerate() {
                        let points: Vec<(f64, f64)> = px
                            .iter()
                            .zip(py.iter())
                            .map(|(x, y)| self.to_pixel(*x, *y))
                            .collect();
                        let path = path_filled(polyline(&points, true), &fill.color(source, row), line);
                        let shape = self.decorate(path, g, row, source, interaction, state);
                        patches = patches.add(shape);
                    }
                    group.add(patches)
                }
                Glyph::Scatter {
                    source,
                    x,
                    y,
                    size,
                    fill,
                    interaction,
                    ..
                } => {
                    let mut points = Group::new();
                    let (xs, ys) = match (source.numbers(x), source.numbers(y)) {
                        (Some(xs), Some(ys)) => (xs, ys),
                        _ => continue,
                    };
                    let navigable = self.figure.navigation.is_some();
                    for (row, (x, y)) in xs.iter().zip(ys.iter()).enumerate() {
                        let (cx, cy) = self.to_pixel(*x, *y);
                        let mut circle = Circle::new()
                            .set("cx", cx)
                            .set("cy", cy)
                            .set("r", size / 2.0)
                            .set("fill", fill.color(source, row))
                            .set("stroke", "none");
                        if navigable && state.enabled {
                            circle = circle
                                .set("data-point", row)
                                .set("class", "esm-point")
                                .set("cursor", "pointer");
                        }
                        points = points.add(self.decorate(circle, g, row, source, interaction, state));
                    }
                    group.add(points)
                }
                Glyph::Arc {
                    x,
                    y,
                    radius,
                    start,
                    end,
                    line,
                } => {
                    let sweep = (end - start).rem_euclid(2.0 * PI);
                    let points: Vec<(f64, f64)> =
                        arc_path(*radius, *start, start + sweep, ARC_RESOLUTION)
                            .iter()
                            .map(|(px, py)| self.to_pixel(px + x, py + y))
                            .collect();
                    group.add(path_open(polyline(&points, false), line))
                }
                Glyph::Line { xs, ys, line } => {
                    let points: Vec<(f64, f64)> = xs
                        .iter()
                        .zip(ys.iter())
                        .map(|(x, y)| self.to_pixel(*x, *y))
                        .collect();
                    group.add(path_open(polyline(&points, false), line))
                }
            };
        }
        group
    }

    /// Attach hover text and a click-through link to one shape.
    fn decorate<T>(
        &self,
        element: T,
        glyph: usize,
        row: usize,
        source: &DataSource,
        interaction: &Interaction,
        state: &mut Interactivity,
    ) -> Group
    where
        T: Into<Box<dyn svg::Node>>,
    {
        let mut shape = Group::new();
        if let Some(tooltip) = &interaction.hover {
            if state.enabled {
                let key = format!("{}-{}-{}", self.id, glyph, row);
                shape = shape.set("data-tip", key.as_str());
                state.tips.insert(key, tooltip.to_html(source, row));
            } else {
                shape = shape.add(Title::new().add(text_node(&tooltip.to_text(source, row))));
            }
        }
        let shape = shape.add(element);
        match &interaction.open_url {
            Some(template) => {
                let url = source.resolve(template, row);
                if url.is_empty() {
                    shape
                } else {
                    Group::new().add(
                        Link::new()
                            .set("href", escape_html(&url))
                            .set("target", "_blank")
                            .add(shape),
                    )
                }
            }
            None => shape,
        }
    }

    fn label(&self, label: &Label) -> Group {
        let (x, y) = self.to_pixel(label.x, label.y);
        let text = text_styled(&label.text, &label.font_size, label.font_style, label.align.anchor())
            .set("fill-opacity", label.alpha)
            .set(
                "transform",
                format!(
                    "translate({:?}, {:?}) rotate({:?})",
                    x + label.x_offset,
                    y - label.y_offset,
                    -label.angle.to_degrees()
                ),
            );
        Group::new().add(text)
    }

    fn gridlines(&self) -> Group {
        let width = self.dimensions.frame_width();
        let height = self.dimensions.frame_height();
        let mut group = Group::new();
        if let Range::Numeric(domain) = &self.figure.x_range {
            for tick in numeric_ticks(domain, &[0.0, width], 6) {
                group = group.add(path_gridline(
                    Data::new().move_to((tick.position, 0.0)).line_to((tick.position, height)),
                ));
            }
        }
        if let Range::Numeric(domain) = &self.figure.y_range {
            for tick in numeric_ticks(domain, &[height, 0.0], 6) {
                group = group.add(path_gridline(
                    Data::new().move_to((0.0, tick.position)).line_to((width, tick.position)),
                ));
            }
        }
        group
    }

    pub fn svg(&self, state: &mut Interactivity) -> Group {
        let figure = self.figure;
        let dims = &self.dimensions;
        let width = dims.frame_width();
        let height = dims.frame_height();
        let clip_id = format!("{}-clip", self.id);

        let mut frame = Group::new().set(
            "transform",
            format!("translate({}, {})", dims.margin[3], dims.margin[0]),
        );
        if figure.show_grid {
            frame = frame.add(self.gridlines());
        }
        frame = frame.add(
            self.glyphs(state)
                .set("clip-path", format!("url(#{})", clip_id)),
        );
        for label in figure.labels.iter() {
            frame = frame.add(self.label(label));
        }
        if figure.show_axes {
            for spec in figure.x_axes.iter() {
                frame = frame.add(chart_axis(&frame_axis(spec, &figure.x_range, width, height)));
            }
            for spec in figure.y_axes.iter() {
                frame = frame.add(chart_axis(&frame_axis(spec, &figure.y_range, width, height)));
            }
        }
        if let Some(entries) = figure.legend.as_ref().map(|l| &l.entries) {
            let (legend_width, _) = legend_size(None, entries);
            frame = frame.add(legend(None, entries, LegendShape::Circle).set(
                "transform",
                format!("translate({}, {})", width - legend_width - 10.0, 10.0),
            ));
        }

        let mut group = Group::new()
            .add(
                Definitions::new().add(
                    ClipPath::new().set("id", clip_id.as_str()).add(
                        Rectangle::new()
                            .set("x", 0)
                            .set("y", 0)
                            .set("width", width)
                            .set("height", height),
                    ),
                ),
            )
            .add(
                Rectangle::new()
                    .set("fill", "#ffffff")
                    .set("stroke", "none")
                    .set("width", dims.width)
                    .set("height", dims.height),
            );

        if let Some(title) = &figure.title {
            let (x, anchor) = if figure.title_centered {
                (dims.width / 2.0, "middle")
            } else {
                (dims.margin[3], "start")
            };
            group = group.add(
                text_styled(title, "16px", FontStyle::Bold, anchor)
                    .set("x", x)
                    .set("y", figure.min_border / 2.0 + 12.0),
            );
        }

        group = group.add(frame);

        if let Some(bar) = &figure.color_bar {
            let (x, y, length) = match bar.place {
                ColorbarPlace::Right => (dims.margin[3] + width + 20.0, dims.margin[0], height),
                ColorbarPlace::Left => (10.0, dims.margin[0], height),
                ColorbarPlace::Above => (
                    dims.margin[3],
                    dims.margin[0] - COLORBAR_SPACE_EDGE + 5.0,
                    width,
                ),
                ColorbarPlace::Below => (
                    dims.margin[3],
                    dims.height - COLORBAR_SPACE_EDGE,
                    width,
                ),
                ColorbarPlace::Center => (
                    dims.margin[3] + (width - COLORBAR_THICKNESS) / 2.0,
                    dims.margin[0],
                    height,
                ),
            };
            group = group.add(
                color_bar(bar, length, COLORBAR_THICKNESS)
                    .set("transform", format!("translate({}, {})", x, y)),
            );
        }
        group
    }
}
