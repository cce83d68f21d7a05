use svg::node::element::path::Data;
use svg::node::element::{Path, Text};
use svg::node::Text as nodeText;

use crate::cli::FontStyle;
use crate::utils::escape_html;

use super::scene::Stroke;

pub const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";

pub fn path_filled(path_data: Data, color: &str, line: &Stroke) -> Path {
    let path = Path::new()
        .set("stroke", line.color.as_str())
        .set("stroke-width", line.width)
        .set("stroke-opacity", line.alpha)
        .set("fill", color)
        .set("d", path_data);
    match line.dash.dasharray() {
        Some(dash) => path.set("stroke-dasharray", dash),
        None => path,
    }
}

pub fn path_open(path_data: Data, line: &Stroke) -> Path {
    let path = Path::new()
        .set("stroke", line.color.as_str())
        .set("fill", "none")
        .set("stroke-width", line.width)
        .set("stroke-opacity", line.alpha)
        .set("d", path_data);
    match line.dash.dasharray() {
        Some(dash) => path.set("stroke-dasharray", dash),
        None => path,
    }
}

/// Path data through a list of pixel coordinates.
pub fn polyline(points: &[(f64, f64)], closed: bool) -> Data {
    let mut path_data = Data::new();
    for (i, point) in points.iter().enumerate() {
        path_data = if i == 0 {
            path_data.move_to(*point)
        } else {
            path_data.line_to(*point)
        };
    }
    if closed && !points.is_empty() {
        path_data = path_data.close();
    }
    path_data
}

/// Text content with markup characters escaped.
pub fn text_node(content: &str) -> nodeText {
    nodeText::new(escape_html(content))
}

pub fn text_styled(content: &str, font_size: &str, font_style: FontStyle, anchor: &str) -> Text {
    Text::new()
        .set("font-family", FONT_FAMILY)
        .set("font-size", font_size)
        .set("font-style", if font_style.is_italic() { "italic" } else { "normal" })
        .set("font-weight", if font_style.is_bold() { "bold" } else { "normal" })
        .set("text-anchor", anchor)
        .set("stroke", "none")
        .set("fill", "black")
        .add(text_node(content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::scene::Dash;

    #[test]
    fn test_dashed_path() {
        let line = Stroke {
            dash: Dash::Dotted,
            ..Default::default()
        };
        let path = path_open(polyline(&[(0.0, 0.0), (1.0, 1.0)], false), &line);
        let markup = path.to_string();
        assert!(markup.contains("stroke-dasharray=\"2, 4\""));
        assert!(markup.contains("fill=\"none\""));
    }

    #[test]
    fn test_italic_text() {
        let text = text_styled("Correlation", "10pt", FontStyle::Italic, "middle").to_string();
        assert!(text.contains("font-style=\"italic\""));
        assert!(text.contains("Correlation"));
    }

    #[test]
    fn test_text_is_escaped() {
        let text = text_styled("R&D <1000m>", "10pt", FontStyle::Normal, "start").to_string();
        assert!(text.contains("R&amp;D &lt;1000m&gt;"));
        assert!(!text.contains("R&D"));
    }
}
