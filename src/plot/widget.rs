//!
//! Dropdown, image panel and button widgets plus the navigation state they
//! share with the selectable points of a figure.

use crate::utils::escape_html;

pub const PLACEHOLDER: &str = "Select Data";
pub const PROMPT: &str = "Click on a point to display the image here.";
pub const NO_MATCH: &str = "No matching point found.";
pub const NO_IMAGE: &str = "No image available";
pub const PREVIOUS: &str = "Previous Image";
pub const NEXT: &str = "Next Image";

/// Dropdown listing every point name after a placeholder.
#[derive(Clone, Debug, PartialEq)]
pub struct Select {
    pub title: String,
    pub value: String,
    pub options: Vec<String>,
    pub width: f64,
}

impl Select {
    pub const HEIGHT: f64 = 50.0;

    pub fn new(names: &[String]) -> Select {
        let mut options = vec![PLACEHOLDER.to_string()];
        options.extend(names.iter().cloned());
        Select {
            title: "Select Data Point".to_string(),
            value: PLACEHOLDER.to_string(),
            options,
            width: 300.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Button {
    pub label: String,
    pub width: f64,
}

impl Button {
    pub const HEIGHT: f64 = 32.0;

    pub fn new(label: &str) -> Button {
        Button {
            label: label.to_string(),
            width: 150.0,
        }
    }
}

/// The "Previous Image" and "Next Image" pair.
pub fn navigation_buttons() -> (Button, Button) {
    (Button::new(PREVIOUS), Button::new(NEXT))
}

/// Panel showing the image and values of the selected point.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageDisplay {
    pub text: String,
    pub width: f64,
    pub height: f64,
    pub max_height: f64,
}

impl ImageDisplay {
    /// Panel sized for a figure of `width` x `height` pixels.
    pub fn new(width: f64, height: f64) -> ImageDisplay {
        ImageDisplay {
            text: PROMPT.to_string(),
            width: width.trunc(),
            height: (height * 0.8).trunc(),
            max_height: (height * 0.7).trunc(),
        }
    }

    pub fn with_size(width: f64, height: f64, max_height: f64) -> ImageDisplay {
        ImageDisplay {
            text: PROMPT.to_string(),
            width,
            height,
            max_height,
        }
    }
}

/// Image link and labelled values shown for one point.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelEntry {
    pub image: Option<String>,
    pub fields: Vec<(String, String)>,
}

impl PanelEntry {
    pub fn to_html(&self, max_height: f64) -> String {
        let fields: String = self
            .fields
            .iter()
            .map(|(label, value)| {
                format!(
                    "<div><strong>{}:</strong> {}</div>",
                    escape_html(label),
                    escape_html(value)
                )
            })
            .collect();
        match &self.image {
            Some(url) if !url.is_empty() => format!(
                "<a href=\"{url}\" target=\"_blank\"><img src=\"{url}\" style=\"width:100%;max-height:{}px;height:auto;\"></a>{}",
                max_height,
                fields,
                url = escape_html(url)
            ),
            _ => format!("<div>{}</div>{}", NO_IMAGE, fields),
        }
    }
}

/// Per-point panel content wired to the selectable glyph of a figure.
#[derive(Clone, Debug, PartialEq)]
pub struct Navigation {
    pub names: Vec<String>,
    pub entries: Vec<PanelEntry>,
    pub max_height: f64,
}

impl Navigation {
    pub fn navigator(&self) -> Navigator {
        Navigator::new(&self.names)
    }

    /// Panel markup for a navigator state.
    pub fn panel_html(&self, navigator: &Navigator) -> String {
        match navigator.selection {
            Selection::Point(index) => match self.entries.get(index) {
                Some(entry) => entry.to_html(self.max_height),
                None => NO_MATCH.to_string(),
            },
            Selection::NoMatch => NO_MATCH.to_string(),
            Selection::Idle => PROMPT.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Idle,
    Point(usize),
    NoMatch,
}

/// Selection state shared by the dropdown, panel and plot.
///
/// Transitions return a new state. Names may repeat; a selection always
/// resolves to the first point carrying the selected name before stepping.
#[derive(Clone, Debug, PartialEq)]
pub struct Navigator {
    names: Vec<String>,
    pub selection: Selection,
}

impl Navigator {
    pub fn new(names: &[String]) -> Navigator {
        Navigator {
            names: names.to_vec(),
            selection: Selection::Idle,
        }
    }

    pub fn current(&self) -> Option<usize> {
        match self.selection {
            Selection::Point(index) => Some(index),
            _ => None,
        }
    }

    fn first_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Dropdown change: select the first point with that name.
    pub fn select(&self, name: &str) -> Navigator {
        let selection = match self.first_index(name) {
            Some(index) => Selection::Point(index),
            None => Selection::NoMatch,
        };
        Navigator {
            names: self.names.clone(),
            selection,
        }
    }

    /// Plot click on a point.
    pub fn click(&self, index: usize) -> Navigator {
        if index >= self.names.len() {
            return self.clone();
        }
        Navigator {
            names: self.names.clone(),
            selection: Selection::Point(index),
        }
    }

    fn step(&self, forward: bool) -> Navigator {
        let count = self.names.len();
        let selection = match self.current() {
            Some(index) if count > 0 => {
                let base = self.first_index(&self.names[index]).unwrap_or(index);
                let target = if forward {
                    (base + 1) % count
                } else {
                    (base + count - 1) % count
                };
                Selection::Point(target)
            }
            _ => self.selection,
        };
        Navigator {
            names: self.names.clone(),
            selection,
        }
    }

    pub fn next(&self) -> Navigator {
        self.step(true)
    }

    pub fn previous(&self) -> Navigator {
        self.step(false)
    }

    /// Value the dropdown shows for this state.
    pub fn dropdown_value(&self) -> String {
        match self.current() {
            Some(index) => self.names[index].clone(),
            None => PLACEHOLDER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_next_previous_wrap() {
        let nav = Navigator::new(&names(&["A", "B", "C"])).click(2);
        assert_eq!(nav.next().current(), Some(0));
        assert_eq!(nav.click(0).previous().current(), Some(2));
        assert_eq!(nav.click(1).next().dropdown_value(), "C");
    }

    #[test]
    fn test_navigation_requires_selection() {
        let nav = Navigator::new(&names(&["A", "B"]));
        assert_eq!(nav.next().current(), None);
        assert_eq!(nav.previous().selection, Selection::Idle);
        assert_eq!(nav.dropdown_value(), PLACEHOLDER);
    }

    #[test]
    fn test_duplicate_names_step_from_first() {
        let nav = Navigator::new(&names(&["A", "B", "A"])).click(2);
        assert_eq!(nav.next().current(), Some(1));
    }

    #[test]
    fn test_select_by_name() {
        let nav = Navigator::new(&names(&["A", "B"]));
        assert_eq!(nav.select("B").current(), Some(1));
        let missing = nav.select("Z");
        assert_eq!(missing.selection, Selection::NoMatch);
        assert_eq!(missing.current(), None);
    }

    #[test]
    fn test_panel_html() {
        let navigation = Navigation {
            names: names(&["A", "B"]),
            entries: vec![
                PanelEntry {
                    image: Some("a.png".to_string()),
                    fields: vec![("X".to_string(), "1".to_string())],
                },
                PanelEntry {
                    image: None,
                    fields: vec![("X".to_string(), "2".to_string())],
                },
            ],
            max_height: 200.0,
        };
        let nav = navigation.navigator();
        assert_eq!(navigation.panel_html(&nav), PROMPT);
        let first = navigation.panel_html(&nav.click(0));
        assert!(first.starts_with("<a href=\"a.png\""));
        assert!(first.contains("max-height:200px"));
        assert!(first.ends_with("<div><strong>X:</strong> 1</div>"));
        assert_eq!(
            navigation.panel_html(&nav.click(1)),
            "<div>No image available</div><div><strong>X:</strong> 2</div>"
        );
        assert_eq!(navigation.panel_html(&nav.select("Z")), NO_MATCH);
    }

    #[test]
    fn test_panel_html_escapes_values() {
        let entry = PanelEntry {
            image: Some("a.png\" onerror=\"alert(1)".to_string()),
            fields: vec![("<b>x</b>".to_string(), "1 & 2".to_string())],
        };
        let html = entry.to_html(100.0);
        assert!(html.starts_with("<a href=\"a.png&quot; onerror=&quot;alert(1)\""));
        assert!(!html.contains("\" onerror"));
        assert!(html.ends_with("<div><strong>&lt;b&gt;x&lt;/b&gt;:</strong> 1 &amp; 2</div>"));
    }

    #[test]
    fn test_widgets() {
        let select = Select::new(&names(&["A", "B"]));
        assert_eq!(select.options, names(&["Select Data", "A", "B"]));
        assert_eq!(select.title, "Select Data Point");
        let display = ImageDisplay::new(600.0, 600.0);
        assert_eq!((display.width, display.height, display.max_height), (600.0, 480.0, 420.0));
        let (prev, next) = navigation_buttons();
        assert_eq!((prev.label.as_str(), next.label.as_str()), ("Previous Image", "Next Image"));
        assert_eq!(prev.width, 150.0);
    }
}
