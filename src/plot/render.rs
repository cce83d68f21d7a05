//!
//! Renderers turning a layout into SVG or a standalone HTML page.

use svg::node::element::{Group, Rectangle};
use svg::Document;

use crate::cli::FontStyle;
use crate::error;
use crate::utils::escape_html;

use super::chart::{Chart, Interactivity};
use super::scene::{Figure, Layout};
use super::style::text_styled;
use super::widget::{Button, ImageDisplay, Navigation, Select, NEXT, NO_MATCH, PREVIOUS, PROMPT};

/// Draws a layout into some output representation.
pub trait Renderer {
    type Output;

    fn render(&self, layout: &Layout) -> Result<Self::Output, error::Error>;
}

fn check_size(layout: &Layout) -> Result<(f64, f64), error::Error> {
    let (width, height) = layout.size();
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Err(error::Error::RenderError(format!(
            "invalid layout size {} x {}",
            width, height
        )));
    }
    Ok((width, height))
}

/// Static SVG; widgets are drawn as inert boxes and tooltips become
/// `<title>` elements.
#[derive(Clone, Copy, Debug, Default)]
pub struct SvgRenderer;

impl Renderer for SvgRenderer {
    type Output = Document;

    fn render(&self, layout: &Layout) -> Result<Document, error::Error> {
        let (width, height) = check_size(layout)?;
        let mut state = Interactivity::default();
        let mut count = 0;
        let group = place(layout, &mut state, &mut count);
        Ok(Document::new()
            .set("viewBox", (0, 0, width, height))
            .set("width", width)
            .set("height", height)
            .add(
                Rectangle::new()
                    .set("fill", "#ffffff")
                    .set("stroke", "none")
                    .set("width", width)
                    .set("height", height),
            )
            .add(group))
    }
}

fn widget_box(width: f64, height: f64) -> Rectangle {
    Rectangle::new()
        .set("width", width)
        .set("height", height)
        .set("rx", 4)
        .set("fill", "#ffffff")
        .set("stroke", "#cccccc")
}

fn static_select(select: &Select) -> Group {
    Group::new()
        .add(text_styled(&select.title, "12px", FontStyle::Normal, "start").set("x", 4).set("y", 14))
        .add(widget_box(select.width - 8.0, Select::HEIGHT - 24.0).set("x", 4).set("y", 20))
        .add(
            text_styled(&select.value, "12px", FontStyle::Normal, "start")
                .set("x", 10)
                .set("y", 20.0 + (Select::HEIGHT - 24.0) / 2.0)
                .set("dominant-baseline", "middle"),
        )
}

fn static_display(display: &ImageDisplay) -> Group {
    Group::new()
        .add(widget_box(display.width - 8.0, display.height - 8.0).set("x", 4).set("y", 4))
        .add(
            text_styled(&display.text, "12px", FontStyle::Normal, "middle")
                .set("x", display.width / 2.0)
                .set("y", display.height / 2.0),
        )
}

fn static_button(button: &Button) -> Group {
    Group::new()
        .add(
            widget_box(button.width - 8.0, Button::HEIGHT - 4.0)
                .set("x", 4)
                .set("y", 2)
                .set("fill", "#f5f5f5"),
        )
        .add(
            text_styled(&button.label, "12px", FontStyle::Normal, "middle")
                .set("x", button.width / 2.0)
                .set("y", Button::HEIGHT / 2.0)
                .set("dominant-baseline", "middle"),
        )
}

fn figure_group(figure: &Figure, state: &mut Interactivity, count: &mut usize) -> Group {
    let id = format!("f{}", count);
    *count += 1;
    Chart::new(&id, figure).svg(state)
}

/// Position each node of a layout, rows left to right and columns top to
/// bottom.
fn place(layout: &Layout, state: &mut Interactivity, count: &mut usize) -> Group {
    match layout {
        Layout::Figure(figure) => figure_group(figure, state, count),
        Layout::Row(children) => {
            let mut group = Group::new();
            let mut offset = 0.0;
            for child in children {
                group = group.add(
                    place(child, state, count).set("transform", format!("translate({}, 0)", offset)),
                );
                offset += child.size().0;
            }
            group
        }
        Layout::Column(children) => {
            let mut group = Group::new();
            let mut offset = 0.0;
            for child in children {
                group = group.add(
                    place(child, state, count).set("transform", format!("translate(0, {})", offset)),
                );
                offset += child.size().1;
            }
            group
        }
        Layout::Select(select) => static_select(select),
        Layout::Display(display) => static_display(display),
        Layout::Button(button) => static_button(button),
    }
}

/// Standalone HTML page with hover tooltips, click-through links and a
/// working image navigation panel.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlRenderer;

struct Page<'a> {
    state: Interactivity,
    count: usize,
    navigation: Option<&'a Navigation>,
}

impl<'a> Page<'a> {
    fn node(&mut self, layout: &'a Layout) -> String {
        match layout {
            Layout::Figure(figure) => {
                if self.navigation.is_none() {
                    self.navigation = figure.navigation.as_ref();
                }
                let group = figure_group(figure, &mut self.state, &mut self.count);
                let document = Document::new()
                    .set("viewBox", (0, 0, figure.width, figure.height))
                    .set("width", figure.width)
                    .set("height", figure.height)
                    .add(group);
                let toolbar = if figure.toolbar.visible {
                    let mut items = vec![];
                    if figure.toolbar.tools.iter().any(|t| t == "save") {
                        items.push("<a class=\"esm-save\" href=\"#\">Save</a>".to_string());
                    }
                    if figure.toolbar.logo {
                        items.push("<span class=\"esm-logo\">esmbenchviz</span>".to_string());
                    }
                    format!("<div class=\"esm-toolbar\">{}</div>", items.join(""))
                } else {
                    String::new()
                };
                format!("<div class=\"esm-figure\">{}{}</div>", document, toolbar)
            }
            Layout::Row(children) => format!(
                "<div class=\"esm-row\">{}</div>",
                children.iter().map(|c| self.node(c)).collect::<String>()
            ),
            Layout::Column(children) => format!(
                "<div class=\"esm-column\">{}</div>",
                children.iter().map(|c| self.node(c)).collect::<String>()
            ),
            Layout::Select(select) => {
                let options: String = select
                    .options
                    .iter()
                    .map(|o| {
                        let value = escape_html(o);
                        format!("<option value=\"{}\">{}</option>", value, value)
                    })
                    .collect();
                format!(
                    "<div class=\"esm-widget\" style=\"width:{}px\"><label for=\"esm-select\">{}</label>\
                     <select id=\"esm-select\">{}</select></div>",
                    select.width,
                    escape_html(&select.title),
                    options
                )
            }
            Layout::Display(display) => format!(
                "<div id=\"esm-display\" class=\"esm-widget\" style=\"width:{}px;height:{}px\">{}</div>",
                display.width,
                display.height,
                escape_html(&display.text)
            ),
            Layout::Button(button) => {
                let id = match button.label.as_str() {
                    PREVIOUS => "esm-previous",
                    NEXT => "esm-next",
                    _ => "esm-button",
                };
                format!(
                    "<button id=\"{}\" class=\"esm-widget\" style=\"width:{}px\">{}</button>",
                    id,
                    button.width,
                    escape_html(&button.label)
                )
            }
        }
    }
}

/// JSON literal safe to inline in a script element.
fn script_json(value: &serde_json::Value) -> Result<String, error::Error> {
    Ok(serde_json::to_string(value)?
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

const STYLE: &str = "body{font-family:Helvetica,Arial,sans-serif;margin:10px}\
.esm-row{display:flex;flex-direction:row;align-items:flex-start}\
.esm-column{display:flex;flex-direction:column}\
.esm-widget{box-sizing:border-box;margin:4px}\
#esm-display{overflow:auto;border:1px solid #ccc;padding:4px}\
.esm-toolbar{font-size:11px;color:#666;text-align:right}\
.esm-toolbar a{margin-right:8px}\
.esm-point.esm-selected{stroke:black;stroke-width:2}\
#esm-tooltip{position:absolute;display:none;background:#fff;border:1px solid #ccc;\
padding:6px;font-size:12px;pointer-events:none;box-shadow:2px 2px 4px rgba(0,0,0,.2)}";

const SCRIPT: &str = r#"(function () {
  var tip = document.getElementById('esm-tooltip');
  document.querySelectorAll('[data-tip]').forEach(function (el) {
    el.addEventListener('mousemove', function (ev) {
      tip.innerHTML = TIPS[el.getAttribute('data-tip')] || '';
      tip.style.display = 'block';
      tip.style.left = (ev.pageX + 12) + 'px';
      tip.style.top = (ev.pageY + 12) + 'px';
    });
    el.addEventListener('mouseleave', function () { tip.style.display = 'none'; });
  });
  document.querySelectorAll('.esm-save').forEach(function (link) {
    link.addEventListener('click', function (ev) {
      var svg = link.parentNode.parentNode.querySelector('svg');
      link.href = 'data:image/svg+xml;charset=utf-8,' + encodeURIComponent(svg.outerHTML);
      link.download = 'plot.svg';
    });
  });
  if (!NAV) { return; }
  var select = document.getElementById('esm-select');
  var panel = document.getElementById('esm-display');
  var points = document.querySelectorAll('.esm-point');
  var current = null;
  function show(index) {
    current = index;
    points.forEach(function (p) {
      p.classList.toggle('esm-selected', index !== null && p.getAttribute('data-point') == index);
    });
    if (index === null) { return; }
    if (select) { select.value = NAV.names[index]; }
    if (panel) { panel.innerHTML = NAV.panels[index]; }
  }
  function step(delta) {
    if (current === null) { return; }
    var n = NAV.names.length;
    var base = NAV.names.indexOf(NAV.names[current]);
    show((base + delta + n) % n);
  }
  if (select) {
    select.addEventListener('change', function () {
      var index = NAV.names.indexOf(select.value);
      if (index < 0) {
        show(null);
        if (panel) { panel.innerHTML = NAV.no_match; }
      } else {
        show(index);
      }
    });
  }
  points.forEach(function (p) {
    p.addEventListener('click', function () { show(parseInt(p.getAttribute('data-point'), 10)); });
  });
  var previous = document.getElementById('esm-previous');
  var next = document.getElementById('esm-next');
  if (previous) { previous.addEventListener('click', function () { step(-1); }); }
  if (next) { next.addEventListener('click', function () { step(1); }); }
})();"#;

impl Renderer for HtmlRenderer {
    type Output = String;

    fn render(&self, layout: &Layout) -> Result<String, error::Error> {
        check_size(layout)?;
        let mut page = Page {
            state: Interactivity {
                enabled: true,
                ..Default::default()
            },
            count: 0,
            navigation: None,
        };
        let body = page.node(layout);
        let tips = serde_json::to_value(&page.state.tips)?;
        let navigation = match page.navigation {
            Some(navigation) => serde_json::json!({
                "names": navigation.names,
                "panels": navigation
                    .entries
                    .iter()
                    .map(|entry| entry.to_html(navigation.max_height))
                    .collect::<Vec<String>>(),
                "prompt": PROMPT,
                "no_match": NO_MATCH,
            }),
            None => serde_json::Value::Null,
        };
        let title = layout
            .figure()
            .and_then(|f| f.title.clone())
            .unwrap_or_else(|| "esmbenchviz".to_string());
        Ok(format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n\
             <style>{}</style>\n</head>\n<body>\n{}\n<div id=\"esm-tooltip\"></div>\n\
             <script>\nvar TIPS = {};\nvar NAV = {};\n{}\n</script>\n</body>\n</html>\n",
            escape_html(&title),
            STYLE,
            body,
            script_json(&tips)?,
            script_json(&navigation)?,
            SCRIPT
        ))
    }
}
