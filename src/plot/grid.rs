use log;

use crate::error;
use crate::geometry::partition;

use super::scene::{Column, DataSource};

/// Image shown for cells whose annotation value is missing.
pub const NO_DATA_IMAGE: &str =
    "https://pcmdi.llnl.gov/pmp-preliminary-results/interactive_plot/mean_climate/no-data-whitebg.png";

/// A stack of equally shaped 2-D layers, one per division.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    pub divisions: usize,
    pub rows: usize,
    pub cols: usize,
    values: Vec<f64>,
}

impl Grid {
    /// Build a single-division grid from rows of values.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Grid, error::Error> {
        Grid::from_stack(vec![rows])
    }

    /// Build a grid from a list of 2-D layers (or a 3-D array).
    pub fn from_stack(layers: Vec<Vec<Vec<f64>>>) -> Result<Grid, error::Error> {
        if layers.is_empty() {
            return Err(error::Error::InvalidDivisionCount(0));
        }
        let rows = layers[0].len();
        let cols = layers[0].first().map(Vec::len).unwrap_or(0);
        let mut values = Vec::with_capacity(layers.len() * rows * cols);
        for (d, layer) in layers.iter().enumerate() {
            if layer.len() != rows {
                return Err(error::Error::ShapeMismatch(format!(
                    "layer {} has {} rows, expected {}",
                    d,
                    layer.len(),
                    rows
                )));
            }
            for (r, row) in layer.iter().enumerate() {
                if row.len() != cols {
                    return Err(error::Error::ShapeMismatch(format!(
                        "row {} of layer {} has {} columns, expected {}",
                        r,
                        d,
                        row.len(),
                        cols
                    )));
                }
                values.extend(row.iter().copied());
            }
        }
        Ok(Grid {
            divisions: layers.len(),
            rows,
            cols,
            values,
        })
    }

    pub fn get(&self, division: usize, row: usize, col: usize) -> f64 {
        self.values[(division * self.rows + row) * self.cols + col]
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        (self.divisions, self.rows, self.cols)
    }

    pub fn cell_count(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Check non-empty label lists against the trailing two axes.
    pub fn check_labels(&self, x_labels: &[String], y_labels: &[String]) -> Result<(), error::Error> {
        if !x_labels.is_empty() && x_labels.len() != self.cols {
            return Err(error::Error::ShapeMismatch(format!(
                "{} x-axis labels for {} columns",
                x_labels.len(),
                self.cols
            )));
        }
        if !y_labels.is_empty() && y_labels.len() != self.rows {
            return Err(error::Error::ShapeMismatch(format!(
                "{} y-axis labels for {} rows",
                y_labels.len(),
                self.rows
            )));
        }
        Ok(())
    }
}

/// Labels for an axis, falling back to indices when none were given.
pub fn axis_labels(labels: &[String], count: usize) -> Vec<String> {
    if labels.is_empty() {
        (0..count).map(|i| i.to_string()).collect()
    } else {
        labels.to_vec()
    }
}

/// One polygon of one cell of one division.
#[derive(Clone, Debug, PartialEq)]
pub struct CellRecord {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub value: f64,
    pub annotation: Option<f64>,
    pub row_label: String,
    pub column_label: String,
    pub position: String,
    pub division: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
    pub layer: usize,
    pub row: usize,
    pub column: usize,
}

#[derive(Clone, Debug, Default)]
pub struct ShapeOptions<'a> {
    pub invert_yaxis: bool,
    pub legend_labels: Option<&'a [String]>,
    pub img_url: Option<&'a [String]>,
    pub url_open: Option<&'a [String]>,
}

fn check_cell_list(name: &str, list: Option<&[String]>, count: usize) -> Result<(), error::Error> {
    match list {
        Some(items) if items.len() != count => Err(error::Error::ShapeMismatch(format!(
            "{} has {} entries for {} cells",
            name,
            items.len(),
            count
        ))),
        _ => Ok(()),
    }
}

/// Flatten a grid into per-polygon records ordered by division, displayed
/// row, then column.
///
/// With `invert_yaxis` the first data row is drawn on top, so displayed row
/// `p` holds data row `rows - 1 - p`. Every record keeps the label of its
/// own data row.
pub fn shape_cells(
    data: &Grid,
    annotation: Option<&Grid>,
    x_labels: &[String],
    y_labels: &[String],
    options: &ShapeOptions,
) -> Result<Vec<CellRecord>, error::Error> {
    data.check_labels(x_labels, y_labels)?;
    if let Some(annotate) = annotation {
        if annotate.shape() != data.shape() {
            return Err(error::Error::ShapeMismatch(format!(
                "annotate_data has shape {:?}, data has shape {:?}",
                annotate.shape(),
                data.shape()
            )));
        }
    }
    let cell_count = data.cell_count();
    check_cell_list("img_url", options.img_url, cell_count)?;
    check_cell_list("url_open", options.url_open, cell_count)?;
    if let Some(labels) = options.legend_labels {
        if labels.len() < data.divisions {
            return Err(error::Error::ShapeMismatch(format!(
                "{} legend labels for {} divisions",
                labels.len(),
                data.divisions
            )));
        }
    }

    let sectors = partition(data.divisions)?;
    let x_names = axis_labels(x_labels, data.cols);
    let y_names = axis_labels(y_labels, data.rows);
    let url_open = options.url_open.or(options.img_url);

    let mut records = Vec::with_capacity(cell_count);
    for layer in 0..data.divisions {
        let (xpts, ypts) = sectors.polygon(layer);
        for p in 0..data.rows {
            let row = if options.invert_yaxis {
                data.rows - 1 - p
            } else {
                p
            };
            for col in 0..data.cols {
                let index = records.len();
                let annotation_value = annotation.map(|a| a.get(layer, row, col));
                let mut image = options.img_url.map(|urls| urls[index].clone());
                if image.is_some() && annotation_value.map_or(false, f64::is_nan) {
                    image = Some(NO_DATA_IMAGE.to_string());
                }
                records.push(CellRecord {
                    xs: xpts.iter().map(|x| x + col as f64).collect(),
                    ys: ypts.iter().map(|y| y + p as f64).collect(),
                    value: data.get(layer, row, col),
                    annotation: annotation_value,
                    row_label: y_names[row].clone(),
                    column_label: x_names[col].clone(),
                    position: sectors.positions[layer].clone(),
                    division: options.legend_labels.map(|labels| labels[layer].clone()),
                    image,
                    url: url_open.map(|urls| urls[index].clone()),
                    layer,
                    row,
                    column: col,
                });
            }
        }
    }
    log::debug!(
        "shaped {} records from {} division(s) of {}x{}",
        records.len(),
        data.divisions,
        data.rows,
        data.cols
    );
    Ok(records)
}

/// Column source for patch glyphs.
///
/// Columns: `xs`, `ys`, `field`, `position`, `xname`, `yname`, and when
/// present `field2`, `img`, `url`, `position_description`.
pub fn to_source(records: &[CellRecord]) -> DataSource {
    let mut source = DataSource::new()
        .with(
            "xs",
            Column::Polygons(records.iter().map(|r| r.xs.clone()).collect()),
        )
        .with(
            "ys",
            Column::Polygons(records.iter().map(|r| r.ys.clone()).collect()),
        )
        .with(
            "field",
            Column::Numbers(records.iter().map(|r| r.value).collect()),
        )
        .with(
            "position",
            Column::Texts(records.iter().map(|r| r.position.clone()).collect()),
        )
        .with(
            "xname",
            Column::Texts(records.iter().map(|r| r.column_label.clone()).collect()),
        )
        .with(
            "yname",
            Column::Texts(records.iter().map(|r| r.row_label.clone()).collect()),
        );
    if records.iter().any(|r| r.annotation.is_some()) {
        source.insert(
            "field2",
            Column::Numbers(
                records
                    .iter()
                    .map(|r| r.annotation.unwrap_or(f64::NAN))
                    .collect(),
            ),
        );
    }
    if records.iter().any(|r| r.image.is_some()) {
        source.insert(
            "img",
            Column::OptionalTexts(records.iter().map(|r| r.image.clone()).collect()),
        );
    }
    if records.iter().any(|r| r.url.is_some()) {
        source.insert(
            "url",
            Column::OptionalTexts(records.iter().map(|r| r.url.clone()).collect()),
        );
    }
    if records.iter().any(|r| r.division.is_some()) {
        source.insert(
            "position_description",
            Column::Texts(
                records
                    .iter()
                    .map(|r| r.division.clone().unwrap_or_default())
                    .collect(),
            ),
        );
    }
    source
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn two_by_two() -> Grid {
        Grid::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap()
    }

    #[test]
    fn test_two_by_two_records() {
        let records = shape_cells(
            &two_by_two(),
            None,
            &labels(&["A", "B"]),
            &labels(&["C", "D"]),
            &ShapeOptions::default(),
        )
        .unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[1].value, 2.0);
        assert_eq!(records[1].column_label, "B");
        assert_eq!(records[1].row_label, "C");
        assert_eq!(records[1].xs, vec![1.0, 1.0, 2.0, 2.0]);
        assert!(records.iter().all(|r| r.position == "box"));
    }

    #[test]
    fn test_inverted_rows_keep_labels() {
        let records = shape_cells(
            &two_by_two(),
            None,
            &labels(&["A", "B"]),
            &labels(&["C", "D"]),
            &ShapeOptions {
                invert_yaxis: true,
                ..Default::default()
            },
        )
        .unwrap();
        // displayed row 0 sits at the bottom and holds the last data row
        assert_eq!(records[0].value, 3.0);
        assert_eq!(records[0].row_label, "D");
        assert_eq!(records[0].ys, vec![0.0, 1.0, 1.0, 0.0]);
        assert_eq!(records[2].value, 1.0);
        assert_eq!(records[2].row_label, "C");
        assert_eq!(records[2].ys, vec![1.0, 2.0, 2.0, 1.0]);
    }

    #[test]
    fn test_label_mismatch() {
        let result = shape_cells(
            &two_by_two(),
            None,
            &labels(&["A", "B", "C"]),
            &labels(&["C", "D"]),
            &ShapeOptions::default(),
        );
        assert!(matches!(result, Err(error::Error::ShapeMismatch(_))));
    }

    #[test]
    fn test_empty_labels_skip_check() {
        let records = shape_cells(&two_by_two(), None, &[], &[], &ShapeOptions::default()).unwrap();
        assert_eq!(records[3].column_label, "1");
        assert_eq!(records[3].row_label, "1");
    }

    #[test]
    fn test_stacked_divisions() {
        let layer = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        let grid = Grid::from_stack(vec![layer.clone(), layer]).unwrap();
        let legend = labels(&["Obs 1", "Obs 2"]);
        let records = shape_cells(
            &grid,
            None,
            &[],
            &[],
            &ShapeOptions {
                legend_labels: Some(&legend),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(records.len(), 8);
        assert_eq!(records[0].position, "upper");
        assert_eq!(records[4].position, "lower");
        assert_eq!(records[4].division.as_deref(), Some("Obs 2"));
        let source = to_source(&records);
        assert!(source.contains("position_description"));
        assert!(!source.contains("field2"));
    }

    #[test]
    fn test_ragged_rows() {
        assert!(Grid::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).is_err());
        assert!(Grid::from_stack(vec![]).is_err());
    }

    #[test]
    fn test_annotation_mismatch() {
        let other = Grid::from_rows(vec![vec![1.0, 2.0, 3.0], vec![3.0, 4.0, 5.0]]).unwrap();
        let result = shape_cells(&two_by_two(), Some(&other), &[], &[], &ShapeOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_annotation_image() {
        let annotate = Grid::from_rows(vec![vec![1.0, f64::NAN], vec![3.0, 4.0]]).unwrap();
        let images = labels(&["a.png", "b.png", "c.png", "d.png"]);
        let records = shape_cells(
            &two_by_two(),
            Some(&annotate),
            &[],
            &[],
            &ShapeOptions {
                img_url: Some(&images),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(records[0].image.as_deref(), Some("a.png"));
        assert_eq!(records[1].image.as_deref(), Some(NO_DATA_IMAGE));
        // url_open falls back to the image links
        assert_eq!(records[1].url.as_deref(), Some("b.png"));
        let short = labels(&["a.png"]);
        let result = shape_cells(
            &two_by_two(),
            None,
            &[],
            &[],
            &ShapeOptions {
                img_url: Some(&short),
                ..Default::default()
            },
        );
        assert!(result.is_err());
    }
}
