use std::str::FromStr;

use crate::cli::FontStyle;
use crate::error;
use crate::utils::{format_float, linear_scale_float, nice_ticks};

use super::scene::{AxisSpec, Range, Side};

#[derive(Clone, Debug)]
pub struct TickOptions {
    pub font_size: String,
    pub font_style: FontStyle,
    pub font_color: String,
    pub weight: f64,
    pub length: f64,
    /// Label rotation in degrees, counter-clockwise.
    pub rotation: f64,
}

impl Default for TickOptions {
    fn default() -> TickOptions {
        TickOptions {
            font_size: "11px".to_string(),
            font_style: FontStyle::Normal,
            font_color: "#444444".to_string(),
            weight: 1.0,
            length: 6.0,
            rotation: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    TOP,
    RIGHT,
    BOTTOM,
    LEFT,
}

impl FromStr for Position {
    type Err = error::Error;
    fn from_str(input: &str) -> Result<Position, Self::Err> {
        match input {
            "top" | "above" => Ok(Position::TOP),
            "right" => Ok(Position::RIGHT),
            "bottom" | "below" => Ok(Position::BOTTOM),
            "left" => Ok(Position::LEFT),
            _ => Err(error::Error::InvalidAxisLocation(input.to_string())),
        }
    }
}

impl From<Side> for Position {
    fn from(side: Side) -> Position {
        match side {
            Side::Above => Position::TOP,
            Side::Right => Position::RIGHT,
            Side::Below => Position::BOTTOM,
            Side::Left => Position::LEFT,
        }
    }
}

/// A tick at a pixel offset along its axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

#[derive(Clone, Debug)]
pub struct AxisOptions {
    pub label: Option<String>,
    pub label_offset: f64,
    pub position: Position,
    /// Pixel offset of the axis line from the frame origin.
    pub offset: f64,
    pub font_size: String,
    pub weight: f64,
    pub color: String,
    /// Pixel extent along the axis.
    pub range: [f64; 2],
    pub ticks: Vec<Tick>,
    pub tick_options: TickOptions,
}

impl Default for AxisOptions {
    fn default() -> AxisOptions {
        AxisOptions {
            label: None,
            label_offset: 40.0,
            position: Position::LEFT,
            offset: 0.0,
            font_size: "13px".to_string(),
            weight: 1.0,
            color: "black".to_string(),
            range: [0.0, 100.0],
            ticks: vec![],
            tick_options: TickOptions::default(),
        }
    }
}

/// One tick per factor, centred in its unit band.
pub fn factor_ticks(factors: &[String], range: &[f64; 2]) -> Vec<Tick> {
    let domain = [0.0, factors.len() as f64];
    factors
        .iter()
        .enumerate()
        .map(|(i, factor)| Tick {
            position: linear_scale_float(i as f64 + 0.5, &domain, range),
            label: factor.clone(),
        })
        .collect()
}

/// Round-valued ticks across a numeric domain.
pub fn numeric_ticks(domain: &[f64; 2], range: &[f64; 2], count: usize) -> Vec<Tick> {
    nice_ticks(domain[0], domain[1], count)
        .into_iter()
        .map(|value| Tick {
            position: linear_scale_float(value, domain, range),
            label: format_float(value, None),
        })
        .collect()
}

/// Axis options for one side of a plot frame of `width` x `height` pixels.
pub fn frame_axis(spec: &AxisSpec, data_range: &Range, width: f64, height: f64) -> AxisOptions {
    let position = Position::from(spec.side);
    let (range, offset) = match position {
        Position::TOP => ([0.0, width], 0.0),
        Position::BOTTOM => ([0.0, width], height),
        Position::LEFT => ([height, 0.0], 0.0),
        Position::RIGHT => ([height, 0.0], width),
    };
    let ticks = match data_range {
        Range::Categorical(factors) => factor_ticks(factors, &range),
        Range::Numeric(domain) => numeric_ticks(domain, &range, 6),
    };
    let defaults = TickOptions::default();
    AxisOptions {
        label: spec.label.clone(),
        position,
        offset,
        range,
        ticks,
        tick_options: TickOptions {
            font_size: spec.font_size.clone().unwrap_or(defaults.font_size.clone()),
            font_style: spec.font_style,
            rotation: spec.rotation,
            ..defaults
        },
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_ticks_centred() {
        let factors = vec!["a".to_string(), "b".to_string()];
        let ticks = factor_ticks(&factors, &[0.0, 200.0]);
        assert_eq!(ticks[0], Tick { position: 50.0, label: "a".to_string() });
        assert_eq!(ticks[1].position, 150.0);
    }

    #[test]
    fn test_numeric_ticks_inverted_range() {
        let ticks = numeric_ticks(&[0.0, 1.0], &[100.0, 0.0], 5);
        assert_eq!(ticks.first().unwrap().position, 100.0);
        assert_eq!(ticks.last().unwrap().position, 0.0);
        assert_eq!(ticks[1].label, "0.2");
    }

    #[test]
    fn test_position_from_str() {
        assert_eq!(Position::from_str("above").unwrap(), Position::TOP);
        assert!(Position::from_str("middle").is_err());
    }

    #[test]
    fn test_frame_axis_side() {
        let spec = AxisSpec {
            rotation: 45.0,
            font_size: Some("9pt".to_string()),
            ..AxisSpec::new(Side::Below)
        };
        let range = Range::Categorical(vec!["x".to_string()]);
        let axis = frame_axis(&spec, &range, 300.0, 200.0);
        assert_eq!(axis.position, Position::BOTTOM);
        assert_eq!(axis.offset, 200.0);
        assert_eq!(axis.ticks[0].position, 150.0);
        assert_eq!(axis.tick_options.font_size, "9pt");
        assert_eq!(axis.tick_options.rotation, 45.0);
    }
}
