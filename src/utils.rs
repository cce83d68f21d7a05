use rust_decimal::prelude::*;

/// Round a float to a fixed number of decimal places.
///
/// Non-finite values are returned unchanged.
/// # Examples
///
/// ```
/// # use esmbenchviz::utils::round_dp;
/// assert_eq!(round_dp(0.78867513, 2), 0.79);
/// assert!(round_dp(f64::NAN, 2).is_nan());
/// ```
pub fn round_dp(value: f64, digits: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    match Decimal::from_f64_retain(value) {
        Some(d) => d
            .round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or(value),
        None => value,
    }
}

/// Format a float with a fixed number of decimals, or with trailing zeros
/// trimmed when `digits` is `None`.
pub fn format_float(value: f64, digits: Option<u32>) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if !value.is_finite() {
        return format!("{}", value);
    }
    match digits {
        Some(d) => format!("{:.*}", d as usize, value),
        None => match Decimal::from_f64_retain(value) {
            Some(d) => d.round_dp(6).normalize().to_string(),
            None => format!("{}", value),
        },
    }
}

pub fn nan_min<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<f64> {
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<f64>, v| match acc {
            Some(m) => Some(m.min(*v)),
            None => Some(*v),
        })
}

pub fn nan_max<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<f64> {
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<f64>, v| match acc {
            Some(m) => Some(m.max(*v)),
            None => Some(*v),
        })
}

pub fn linear_scale_float(value: f64, domain: &[f64; 2], range: &[f64; 2]) -> f64 {
    if domain[1] == domain[0] {
        return range[0];
    }
    let proportion = (value - domain[0]) / (domain[1] - domain[0]);
    (range[1] - range[0]) * proportion + range[0]
}

fn nice_step(span: f64, target: usize) -> f64 {
    let raw = span / target.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 2.5 {
        2.5
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Evenly spaced "round" tick values covering `[low, high]`.
pub fn nice_ticks(low: f64, high: f64, target: usize) -> Vec<f64> {
    if !low.is_finite() || !high.is_finite() {
        return vec![];
    }
    if high <= low {
        return vec![low];
    }
    let step = nice_step(high - low, target);
    let mut value = (low / step).ceil() * step;
    let mut ticks = vec![];
    while value <= high + step * 1e-9 {
        ticks.push(round_dp(value, 10));
        value += step;
    }
    ticks
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}

/// Escape text for HTML and XML content or quoted attribute values.
/// # Examples
///
/// ```
/// # use esmbenchviz::utils::escape_html;
/// assert_eq!(escape_html("R&D <1000m>"), "R&amp;D &lt;1000m&gt;");
/// ```
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
