use coord_transforms::d2::polar2cartesian;
use coord_transforms::prelude::*;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Group, Line, Path, Rectangle, Text};

use crate::cli::{ColorbarPlace, FontStyle};
use crate::utils::{format_float, linear_scale_float};

use super::axis::{AxisOptions, Position, Tick};
use super::scene::ColorBar;
use super::style::{text_node, text_styled, FONT_FAMILY};

#[derive(Clone, Copy, Debug)]
pub enum LegendShape {
    Rect,
    Circle,
}

const LEGEND_CELL: f64 = 12.0;
const LEGEND_GAP: f64 = 6.0;

/// Pixel width and height of a legend box.
pub fn legend_size(title: Option<&str>, entries: &[(String, String)]) -> (f64, f64) {
    let longest = entries
        .iter()
        .map(|e| e.0.chars().count())
        .chain(title.map(|t| t.chars().count()))
        .max()
        .unwrap_or(0);
    let width = LEGEND_CELL + LEGEND_GAP * 3.0 + longest as f64 * LEGEND_CELL * 0.6;
    let title_height = match title {
        Some(text) if !text.is_empty() => LEGEND_CELL + LEGEND_GAP,
        _ => 0.0,
    };
    let height = LEGEND_GAP + title_height + entries.len() as f64 * (LEGEND_CELL + LEGEND_GAP);
    (width, height)
}

/// Legend box listing `(label, color)` entries in a single column.
pub fn legend(title: Option<&str>, entries: &[(String, String)], shape: LegendShape) -> Group {
    let cell = LEGEND_CELL;
    let gap = LEGEND_GAP;
    let (box_width, box_height) = legend_size(title, entries);
    let mut offset_y = gap;
    let mut group = Group::new();
    if let Some(text) = title.filter(|t| !t.is_empty()) {
        group = group.add(
            text_styled(text, "12px", FontStyle::Bold, "start")
                .set("x", gap)
                .set("y", gap + cell)
                .set("dominant-baseline", "auto"),
        );
        offset_y += cell + gap;
    }
    group = Group::new()
        .add(
            Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", box_width)
                .set("height", box_height)
                .set("fill", "#ffffff")
                .set("fill-opacity", 0.8)
                .set("stroke", "#e5e5e5")
                .set("stroke-width", 1),
        )
        .add(group);
    for (label, color) in entries {
        let marker = match shape {
            LegendShape::Rect => Group::new().add(
                Rectangle::new()
                    .set("stroke", "black")
                    .set("stroke-width", 0.5)
                    .set("fill", color.as_str())
                    .set("x", gap)
                    .set("y", offset_y)
                    .set("height", cell)
                    .set("width", cell),
            ),
            LegendShape::Circle => Group::new().add(
                Circle::new()
                    .set("stroke", "none")
                    .set("fill", color.as_str())
                    .set("cx", gap + cell / 2.0)
                    .set("cy", offset_y + cell / 2.0)
                    .set("r", cell / 2.0),
            ),
        };
        let entry_text = Text::new()
            .set("font-family", FONT_FAMILY)
            .set("font-size", "12px")
            .set("text-anchor", "start")
            .set("dominant-baseline", "middle")
            .set("stroke", "none")
            .set("fill", "black")
            .set("x", cell + gap * 2.0)
            .set("y", offset_y + cell / 2.0)
            .add(text_node(label));
        group = group.add(marker).add(entry_text);
        offset_y += cell + gap;
    }
    group
}

pub fn path_axis(path_data: Data, color: &str, weight: f64) -> Path {
    Path::new()
        .set("stroke", color)
        .set("fill", "none")
        .set("stroke-width", weight)
        .set("d", path_data)
}

pub fn path_gridline(path_data: Data) -> Path {
    Path::new()
        .set("stroke", "#e5e5e5")
        .set("fill", "none")
        .set("stroke-width", 1)
        .set("d", path_data)
}

/// Tick mark and rotated label for one side of the frame.
pub fn create_tick(tick: &Tick, axis: &AxisOptions) -> Group {
    let options = &axis.tick_options;
    let length = options.length;
    let p = tick.position;
    let o = axis.offset;
    let (x1, y1, x2, y2) = match axis.position {
        Position::TOP => (p, o, p, o - length),
        Position::BOTTOM => (p, o, p, o + length),
        Position::LEFT => (o, p, o - length, p),
        Position::RIGHT => (o, p, o + length, p),
    };
    let rotated = options.rotation != 0.0;
    let (label_x, label_y, anchor, baseline) = match axis.position {
        Position::TOP => (
            x2,
            y2 - 3.0,
            if rotated { "start" } else { "middle" },
            if rotated { "middle" } else { "auto" },
        ),
        Position::BOTTOM => (
            x2,
            y2 + 3.0,
            if rotated { "end" } else { "middle" },
            if rotated { "middle" } else { "hanging" },
        ),
        Position::LEFT => (x2 - 3.0, y2, "end", "middle"),
        Position::RIGHT => (x2 + 3.0, y2, "start", "middle"),
    };
    let label = text_styled(&tick.label, &options.font_size, options.font_style, anchor)
        .set("fill", options.font_color.as_str())
        .set("dominant-baseline", baseline)
        .set(
            "transform",
            format!(
                "translate({:?}, {:?}) rotate({:?})",
                label_x, label_y, -options.rotation
            ),
        );
    Group::new()
        .add(path_axis(
            Data::new().move_to((x1, y1)).line_to((x2, y2)),
            axis.color.as_str(),
            options.weight,
        ))
        .add(label)
}

pub fn chart_axis(plot_axis: &AxisOptions) -> Group {
    let mut tick_group = Group::new();
    for tick in plot_axis.ticks.iter() {
        tick_group = tick_group.add(create_tick(tick, plot_axis));
    }

    let middle = (plot_axis.range[0] + plot_axis.range[1]) / 2.0;
    let (x1, y1, x2, y2, label_x, label_y, label_rotate) = match plot_axis.position {
        Position::TOP => (
            plot_axis.range[0],
            plot_axis.offset,
            plot_axis.range[1],
            plot_axis.offset,
            middle,
            plot_axis.offset - plot_axis.label_offset,
            0.0,
        ),
        Position::RIGHT => (
            plot_axis.offset,
            plot_axis.range[0],
            plot_axis.offset,
            plot_axis.range[1],
            plot_axis.offset + plot_axis.label_offset,
            middle,
            90.0,
        ),
        Position::BOTTOM => (
            plot_axis.range[0],
            plot_axis.offset,
            plot_axis.range[1],
            plot_axis.offset,
            middle,
            plot_axis.offset + plot_axis.label_offset,
            0.0,
        ),
        Position::LEFT => (
            plot_axis.offset,
            plot_axis.range[0],
            plot_axis.offset,
            plot_axis.range[1],
            plot_axis.offset - plot_axis.label_offset,
            middle,
            -90.0,
        ),
    };

    let axis = Line::new()
        .set("fill", "none")
        .set("stroke", plot_axis.color.as_str())
        .set("stroke-width", plot_axis.weight)
        .set("x1", x1)
        .set("y1", y1)
        .set("x2", x2)
        .set("y2", y2);

    let mut group = Group::new().add(tick_group).add(axis);
    if let Some(text) = &plot_axis.label {
        let label = text_styled(text, &plot_axis.font_size, FontStyle::Italic, "middle")
            .set("dominant-baseline", "middle")
            .set(
                "transform",
                format!(
                    "translate({:?}, {:?}) rotate({:?})",
                    label_x, label_y, label_rotate
                ),
            );
        group = group.add(label);
    }
    group
}

/// Points along a circular arc about the origin, swept counter-clockwise
/// from `min_radians` to `max_radians`.
pub fn arc_path(radius: f64, min_radians: f64, max_radians: f64, resolution: usize) -> Vec<(f64, f64)> {
    let resolution = resolution.max(1);
    let step = (max_radians - min_radians) / resolution as f64;
    let mut angle = min_radians;
    let mut points = Vec::with_capacity(resolution + 1);
    for _ in 0..(resolution + 1) {
        let polar_coord = Vector2::new(radius, angle);
        let cartesian_coord = polar2cartesian(&polar_coord);
        points.push((cartesian_coord[0], cartesian_coord[1]));
        angle += step;
    }
    points
}

/// Colorbar of `length` x `thickness` pixels with ticks on the outer side.
pub fn color_bar(bar: &ColorBar, length: f64, thickness: f64) -> Group {
    let vertical = matches!(
        bar.place,
        ColorbarPlace::Left | ColorbarPlace::Right | ColorbarPlace::Center
    );
    let palette = &bar.mapper.palette;
    let count = palette.len().max(1) as f64;
    let band = length / count;
    let mut swatches = Group::new();
    for (i, color) in palette.iter().enumerate() {
        let offset = i as f64 * band;
        // low values sit at the bottom of a vertical bar
        let (x, y, w, h) = if vertical {
            (0.0, length - offset - band, thickness, band)
        } else {
            (offset, 0.0, band, thickness)
        };
        swatches = swatches.add(
            Rectangle::new()
                .set("x", x)
                .set("y", y)
                .set("width", w)
                // overlap neighbours by half a pixel
                .set("height", if vertical { h + 0.5 } else { h })
                .set("fill", color.as_str())
                .set("stroke", "none"),
        );
    }

    let domain = [bar.mapper.low, bar.mapper.high];
    let mut ticks = Group::new();
    for value in bar.ticks.iter() {
        if *value < domain[0] || *value > domain[1] {
            continue;
        }
        let label = format_float(*value, None);
        let tick = if vertical {
            let y = linear_scale_float(*value, &domain, &[length, 0.0]);
            Group::new()
                .add(path_axis(
                    Data::new().move_to((thickness, y)).line_to((thickness + 4.0, y)),
                    "black",
                    1.0,
                ))
                .add(
                    text_styled(&label, &bar.tick_font_size, FontStyle::Normal, "start")
                        .set("x", thickness + bar.label_standoff)
                        .set("y", y)
                        .set("dominant-baseline", "middle"),
                )
        } else {
            let x = linear_scale_float(*value, &domain, &[0.0, length]);
            Group::new()
                .add(path_axis(
                    Data::new().move_to((x, thickness)).line_to((x, thickness + 4.0)),
                    "black",
                    1.0,
                ))
                .add(
                    text_styled(&label, &bar.tick_font_size, FontStyle::Normal, "middle")
                        .set("x", x)
                        .set("y", thickness + bar.label_standoff)
                        .set("dominant-baseline", "hanging"),
                )
        };
        ticks = ticks.add(tick);
    }
    let (w, h) = if vertical {
        (thickness, length)
    } else {
        (length, thickness)
    };
    Group::new()
        .add(swatches)
        .add(
            Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", w)
                .set("height", h)
                .set("fill", "none")
                .set("stroke", "#444444")
                .set("stroke-width", 0.5),
        )
        .add(ticks)
}
