//!
//! Declarative scene graph handed to a renderer.

use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::{Captures, Regex};

use crate::cli::{ColorbarPlace, FontStyle};
use crate::colormap::ColorMapper;
use crate::utils::{escape_html, format_float};

use super::widget::{Button, ImageDisplay, Navigation, Select};

/// A named column of per-glyph values.
#[derive(Clone, Debug, PartialEq)]
pub enum Column {
    Numbers(Vec<f64>),
    Texts(Vec<String>),
    OptionalTexts(Vec<Option<String>>),
    Polygons(Vec<Vec<f64>>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Numbers(values) => values.len(),
            Column::Texts(values) => values.len(),
            Column::OptionalTexts(values) => values.len(),
            Column::Polygons(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text for a single row, with numbers rounded to `digits` if given.
    pub fn cell_text(&self, row: usize, digits: Option<u32>) -> String {
        match self {
            Column::Numbers(values) => values
                .get(row)
                .map(|v| format_float(*v, digits))
                .unwrap_or_default(),
            Column::Texts(values) => values.get(row).cloned().unwrap_or_default(),
            Column::OptionalTexts(values) => values.get(row).cloned().flatten().unwrap_or_default(),
            Column::Polygons(values) => values
                .get(row)
                .map(|vertices| {
                    vertices
                        .iter()
                        .map(|v| format_float(*v, digits))
                        .collect::<Vec<String>>()
                        .join(", ")
                })
                .unwrap_or_default(),
        }
    }
}

/// Column store shared by a glyph, its tooltips and its labels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataSource {
    pub columns: IndexMap<String, Column>,
}

impl DataSource {
    pub fn new() -> DataSource {
        DataSource::default()
    }

    pub fn with(mut self, name: &str, column: Column) -> DataSource {
        self.columns.insert(name.to_string(), column);
        self
    }

    pub fn insert(&mut self, name: &str, column: Column) {
        self.columns.insert(name.to_string(), column);
    }

    /// Number of rows, taken from the first column.
    pub fn len(&self) -> usize {
        self.columns.values().next().map(Column::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn numbers(&self, name: &str) -> Option<&Vec<f64>> {
        match self.columns.get(name) {
            Some(Column::Numbers(values)) => Some(values),
            _ => None,
        }
    }

    pub fn texts(&self, name: &str) -> Option<&Vec<String>> {
        match self.columns.get(name) {
            Some(Column::Texts(values)) => Some(values),
            _ => None,
        }
    }

    pub fn polygons(&self, name: &str) -> Option<&Vec<Vec<f64>>> {
        match self.columns.get(name) {
            Some(Column::Polygons(values)) => Some(values),
            _ => None,
        }
    }

    /// Replace every `@field` or `@field{0.000}` reference in a template
    /// with the value of that field in `row`.
    pub fn resolve(&self, template: &str, row: usize) -> String {
        self.substitute(template, row, false)
    }

    /// As `resolve`, escaping each substituted value for HTML. The template
    /// itself is kept as written.
    pub fn resolve_html(&self, template: &str, row: usize) -> String {
        self.substitute(template, row, true)
    }

    fn substitute(&self, template: &str, row: usize, escape: bool) -> String {
        field_pattern()
            .replace_all(template, |caps: &Captures| {
                let name = &caps[1];
                let digits = caps.get(2).and_then(|m| format_digits(m.as_str()));
                let value = match self.columns.get(name) {
                    Some(column) => column.cell_text(row, digits),
                    None => "???".to_string(),
                };
                if escape {
                    escape_html(&value)
                } else {
                    value
                }
            })
            .to_string()
    }
}

fn field_pattern() -> &'static Regex {
    static FIELD: OnceLock<Regex> = OnceLock::new();
    FIELD.get_or_init(|| Regex::new(r"@(\w+)(\{[^}]*\})?").expect("valid field pattern"))
}

/// Decimal places requested by a `{0.000}` style format.
fn format_digits(spec: &str) -> Option<u32> {
    let inner = spec.trim_start_matches('{').trim_end_matches('}');
    let (_, decimals) = inner.split_once('.')?;
    Some(decimals.chars().take_while(|c| *c == '0').count() as u32)
}

/// An axis range, either a list of factors or a numeric interval.
#[derive(Clone, Debug, PartialEq)]
pub enum Range {
    Categorical(Vec<String>),
    Numeric([f64; 2]),
}

impl Range {
    /// Data-space interval; factor `i` spans `[i, i + 1]`.
    pub fn domain(&self) -> [f64; 2] {
        match self {
            Range::Categorical(factors) => [0.0, factors.len() as f64],
            Range::Numeric(interval) => *interval,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Above,
    Below,
    Left,
    Right,
}

/// Axis placement and tick label styling.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisSpec {
    pub side: Side,
    pub label: Option<String>,
    /// Tick label rotation in degrees, counter-clockwise.
    pub rotation: f64,
    pub font_size: Option<String>,
    pub font_style: FontStyle,
}

impl AxisSpec {
    pub fn new(side: Side) -> AxisSpec {
        AxisSpec {
            side,
            label: None,
            rotation: 0.0,
            font_size: None,
            font_style: FontStyle::Normal,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dash {
    Solid,
    Dashed,
    Dotted,
}

impl Dash {
    pub fn dasharray(&self) -> Option<&'static str> {
        match self {
            Dash::Solid => None,
            Dash::Dashed => Some("6, 4"),
            Dash::Dotted => Some("2, 4"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    pub fn anchor(&self) -> &'static str {
        match self {
            Align::Left => "start",
            Align::Center => "middle",
            Align::Right => "end",
        }
    }
}

/// How polygons and markers get their fill.
#[derive(Clone, Debug, PartialEq)]
pub enum Fill {
    Solid(String),
    /// Linear mapping of a numeric field onto a palette.
    Mapped { field: String, mapper: ColorMapper },
    /// One color per row.
    PerRow(Vec<String>),
}

impl Fill {
    pub fn color(&self, source: &DataSource, row: usize) -> String {
        match self {
            Fill::Solid(color) => color.clone(),
            Fill::Mapped { field, mapper } => {
                let value = source
                    .numbers(field)
                    .and_then(|values| values.get(row).copied())
                    .unwrap_or(f64::NAN);
                mapper.map(value)
            }
            Fill::PerRow(colors) => colors.get(row).cloned().unwrap_or_else(|| "gray".to_string()),
        }
    }
}

/// Hover content, either field rows or an HTML template.
#[derive(Clone, Debug, PartialEq)]
pub enum Tooltip {
    Fields(Vec<(String, String)>),
    Html(String),
}

impl Tooltip {
    pub fn fields(pairs: &[(&str, &str)]) -> Tooltip {
        Tooltip::Fields(
            pairs
                .iter()
                .map(|(label, value)| (label.to_string(), value.to_string()))
                .collect(),
        )
    }

    /// Tooltip HTML for one row of a source.
    pub fn to_html(&self, source: &DataSource, row: usize) -> String {
        match self {
            Tooltip::Fields(pairs) => pairs
                .iter()
                .map(|(label, value)| {
                    format!(
                        "<div><span class=\"tt-label\">{}:</span> {}</div>",
                        escape_html(label),
                        source.resolve_html(value, row)
                    )
                })
                .collect::<Vec<String>>()
                .join(""),
            Tooltip::Html(template) => source.resolve_html(template, row),
        }
    }

    /// Plain text variant used where markup is not available.
    pub fn to_text(&self, source: &DataSource, row: usize) -> String {
        match self {
            Tooltip::Fields(pairs) => pairs
                .iter()
                .map(|(label, value)| format!("{}: {}", label, source.resolve(value, row)))
                .collect::<Vec<String>>()
                .join("\n"),
            Tooltip::Html(template) => source.resolve(&strip_tags(template), row),
        }
    }
}

fn strip_tags(html: &str) -> String {
    static TAGS: OnceLock<Regex> = OnceLock::new();
    let tags = TAGS.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));
    let text = tags.replace_all(html, " ");
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Hover and click behaviour attached to a glyph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Interaction {
    pub hover: Option<Tooltip>,
    /// URL template opened on click, e.g. `@url`.
    pub open_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
    pub dash: Dash,
    pub alpha: f64,
}

impl Default for Stroke {
    fn default() -> Stroke {
        Stroke {
            color: "black".to_string(),
            width: 1.0,
            dash: Dash::Solid,
            alpha: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Glyph {
    /// Filled polygons with vertex lists in `xs`/`ys` polygon columns.
    Patches {
        source: DataSource,
        xs: String,
        ys: String,
        fill: Fill,
        line: Stroke,
        interaction: Interaction,
    },
    /// Circular markers at `x`/`y` numeric columns.
    Scatter {
        source: DataSource,
        x: String,
        y: String,
        size: f64,
        fill: Fill,
        legend_field: Option<String>,
        interaction: Interaction,
    },
    /// Circular arc swept counter-clockwise from `start` to `end` radians.
    Arc {
        x: f64,
        y: f64,
        radius: f64,
        start: f64,
        end: f64,
        line: Stroke,
    },
    Line {
        xs: Vec<f64>,
        ys: Vec<f64>,
        line: Stroke,
    },
}

impl Glyph {
    pub fn source(&self) -> Option<&DataSource> {
        match self {
            Glyph::Patches { source, .. } | Glyph::Scatter { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Text placed in data coordinates with a pixel offset.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub font_size: String,
    pub font_style: FontStyle,
    pub align: Align,
    pub alpha: f64,
    /// Rotation in radians, counter-clockwise.
    pub angle: f64,
    pub x_offset: f64,
    pub y_offset: f64,
}

impl Label {
    pub fn new(x: f64, y: f64, text: &str) -> Label {
        Label {
            x,
            y,
            text: text.to_string(),
            font_size: "10pt".to_string(),
            font_style: FontStyle::Normal,
            align: Align::Left,
            alpha: 1.0,
            angle: 0.0,
            x_offset: 0.0,
            y_offset: 0.0,
        }
    }
}

/// A colorbar attached to a color mapper.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorBar {
    pub mapper: ColorMapper,
    pub place: ColorbarPlace,
    pub tick_font_size: String,
    pub ticks: Vec<f64>,
    pub label_standoff: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Legend {
    pub location: String,
    pub entries: Vec<(String, String)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toolbar {
    pub tools: Vec<String>,
    pub visible: bool,
    pub logo: bool,
}

impl Default for Toolbar {
    fn default() -> Toolbar {
        Toolbar {
            tools: vec!["hover".to_string(), "save".to_string()],
            visible: true,
            logo: true,
        }
    }
}

/// A single plot: ranges, glyphs, annotations and decorations.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub title: Option<String>,
    pub title_centered: bool,
    pub width: f64,
    pub height: f64,
    pub min_border: f64,
    pub aspect_scale: f64,
    pub x_range: Range,
    pub y_range: Range,
    pub x_axes: Vec<AxisSpec>,
    pub y_axes: Vec<AxisSpec>,
    pub show_axes: bool,
    pub show_grid: bool,
    pub glyphs: Vec<Glyph>,
    pub labels: Vec<Label>,
    pub color_bar: Option<ColorBar>,
    pub legend: Option<Legend>,
    pub toolbar: Toolbar,
    pub navigation: Option<Navigation>,
}

impl Default for Figure {
    fn default() -> Figure {
        Figure {
            title: None,
            title_centered: false,
            width: 600.0,
            height: 600.0,
            min_border: 50.0,
            aspect_scale: 1.0,
            x_range: Range::Numeric([0.0, 1.0]),
            y_range: Range::Numeric([0.0, 1.0]),
            x_axes: vec![AxisSpec::new(Side::Below)],
            y_axes: vec![AxisSpec::new(Side::Left)],
            show_axes: true,
            show_grid: true,
            glyphs: vec![],
            labels: vec![],
            color_bar: None,
            legend: None,
            toolbar: Toolbar::default(),
            navigation: None,
        }
    }
}

impl Figure {
    pub fn add_glyph(&mut self, glyph: Glyph) {
        self.glyphs.push(glyph);
    }

    pub fn add_label(&mut self, label: Label) {
        self.labels.push(label);
    }

    pub fn patches(&self) -> impl Iterator<Item = &Glyph> {
        self.glyphs.iter().filter(|g| matches!(g, Glyph::Patches { .. }))
    }

    /// Total number of polygons across all patch glyphs.
    pub fn patch_count(&self) -> usize {
        self.patches().filter_map(Glyph::source).map(DataSource::len).sum()
    }
}

/// A renderable tree of figures and widgets.
#[derive(Clone, Debug, PartialEq)]
pub enum Layout {
    Figure(Box<Figure>),
    Row(Vec<Layout>),
    Column(Vec<Layout>),
    Select(Select),
    Display(ImageDisplay),
    Button(Button),
}

impl From<Figure> for Layout {
    fn from(figure: Figure) -> Layout {
        Layout::Figure(Box::new(figure))
    }
}

impl Layout {
    pub fn children(&self) -> &[Layout] {
        match self {
            Layout::Row(children) | Layout::Column(children) => children,
            _ => &[],
        }
    }

    /// First figure in depth-first order.
    pub fn figure(&self) -> Option<&Figure> {
        match self {
            Layout::Figure(figure) => Some(figure),
            Layout::Row(children) | Layout::Column(children) => {
                children.iter().find_map(Layout::figure)
            }
            _ => None,
        }
    }

    pub fn is_composite(&self) -> bool {
        !matches!(self, Layout::Figure(_))
    }

    /// Pixel size of the laid-out node.
    pub fn size(&self) -> (f64, f64) {
        match self {
            Layout::Figure(figure) => (figure.width, figure.height),
            Layout::Row(children) => children.iter().map(Layout::size).fold((0.0, 0.0), |acc, s| {
                (acc.0 + s.0, acc.1.max(s.1))
            }),
            Layout::Column(children) => children
                .iter()
                .map(Layout::size)
                .fold((0.0, 0.0), |acc, s| (acc.0.max(s.0), acc.1 + s.1)),
            Layout::Select(select) => (select.width, Select::HEIGHT),
            Layout::Display(display) => (display.width, display.height),
            Layout::Button(button) => (button.width, Button::HEIGHT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> DataSource {
        DataSource::new()
            .with("names", Column::Texts(vec!["A".to_string(), "B".to_string()]))
            .with("rmse", Column::Numbers(vec![0.123456, f64::NAN]))
    }

    #[test]
    fn test_resolve_template() {
        let src = source();
        assert_eq!(src.resolve("@names: @rmse{0.000}", 0), "A: 0.123");
        assert_eq!(src.resolve("@names: @rmse", 1), "B: NaN");
        assert_eq!(src.resolve("@missing", 0), "???");
    }

    #[test]
    fn test_field_pattern_compiled_once() {
        assert!(std::ptr::eq(field_pattern(), field_pattern()));
    }

    #[test]
    fn test_format_digits() {
        assert_eq!(format_digits("{0.000}"), Some(3));
        assert_eq!(format_digits("{0.0}"), Some(1));
        assert_eq!(format_digits("{%F}"), None);
    }

    #[test]
    fn test_tooltip_text() {
        let src = source();
        let tooltip = Tooltip::fields(&[("Model", "@names"), ("RMSE", "@rmse{0.00}")]);
        assert_eq!(tooltip.to_text(&src, 0), "Model: A\nRMSE: 0.12");
        let html = Tooltip::Html("<div><strong>Model:</strong> @names</div>".to_string());
        assert_eq!(html.to_text(&src, 1), "Model: B");
    }

    #[test]
    fn test_markup_in_values_is_escaped() {
        let src = DataSource::new().with(
            "names",
            Column::Texts(vec!["<b>x</b>".to_string(), "R&D".to_string()]),
        );
        let fields = Tooltip::fields(&[("Model", "@names")]);
        let html = fields.to_html(&src, 0);
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
        assert!(!html.contains("<b>x</b>"));
        let template = Tooltip::Html("<div><strong>Model:</strong> @names</div>".to_string());
        assert_eq!(
            template.to_html(&src, 1),
            "<div><strong>Model:</strong> R&amp;D</div>"
        );
        assert_eq!(template.to_text(&src, 0), "Model: <b>x</b>");
        assert_eq!(src.resolve("@names", 1), "R&D");
    }

    #[test]
    fn test_layout_size() {
        let figure = Figure {
            width: 600.0,
            height: 400.0,
            ..Default::default()
        };
        let layout = Layout::Row(vec![
            Layout::from(figure),
            Layout::Column(vec![
                Layout::Button(Button::new("Next Image")),
                Layout::Button(Button::new("Previous Image")),
            ]),
        ]);
        assert_eq!(layout.size(), (750.0, 400.0));
        assert!(layout.is_composite());
        assert!(layout.figure().is_some());
    }

    #[test]
    fn test_categorical_domain() {
        let range = Range::Categorical(vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(range.domain(), [0.0, 3.0]);
    }
}
