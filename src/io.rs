use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error;
use crate::plot::grid::Grid;

/// Numeric arrays as written in JSON/YAML; `null` marks a missing value.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum GridValues {
    Flat(Vec<Vec<Option<f64>>>),
    Stacked(Vec<Vec<Vec<Option<f64>>>>),
}

fn fill_missing(rows: &[Vec<Option<f64>>]) -> Vec<Vec<f64>> {
    rows.iter()
        .map(|row| row.iter().map(|v| v.unwrap_or(f64::NAN)).collect())
        .collect()
}

impl GridValues {
    pub fn to_grid(&self) -> Result<Grid, error::Error> {
        match self {
            GridValues::Flat(rows) => Grid::from_rows(fill_missing(rows)),
            GridValues::Stacked(layers) => {
                Grid::from_stack(layers.iter().map(|layer| fill_missing(layer)).collect())
            }
        }
    }
}

/// Portrait plot input document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PortraitInput {
    pub data: GridValues,
    #[serde(default, alias = "xaxis_labels")]
    pub x_labels: Vec<String>,
    #[serde(default, alias = "yaxis_labels")]
    pub y_labels: Vec<String>,
    #[serde(default)]
    pub annotate_data: Option<GridValues>,
}

/// Taylor diagram input document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TaylorInput {
    pub std_devs: Vec<f64>,
    pub correlations: Vec<f64>,
    pub names: Vec<String>,
    pub refstd: f64,
    #[serde(default)]
    pub images: Option<Vec<Option<String>>>,
}

/// Scatter plot input document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScatterInput {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub names: Vec<String>,
    #[serde(default)]
    pub images: Option<Vec<Option<String>>>,
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn open(path: &Path) -> Result<BufReader<File>, error::Error> {
    let file = File::open(path)
        .map_err(|e| error::Error::FileNotFound(format!("{}: {}", path.display(), e)))?;
    Ok(BufReader::new(file))
}

/// Deserialize a JSON or YAML file, chosen by extension.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, error::Error> {
    let reader = open(path)?;
    let value = match extension(path).as_str() {
        "json" => serde_json::from_reader(reader)?,
        "yaml" | "yml" => serde_yaml::from_reader(reader)?,
        other => {
            return Err(error::Error::ReaderError(format!(
                "unsupported input format: {}",
                other
            )))
        }
    };
    Ok(value)
}

/// Read plot options from an optional config file, or use the defaults.
pub fn read_config<T: DeserializeOwned + Default>(path: &Option<impl AsRef<Path>>) -> Result<T, error::Error> {
    match path {
        Some(p) => read_document(p.as_ref()),
        None => Ok(T::default()),
    }
}

/// Read a CSV grid: the header holds column labels after a leading corner
/// cell and each row starts with its row label. Empty or `NaN` cells are
/// missing values.
pub fn read_csv_grid<R: std::io::Read>(reader: R) -> Result<PortraitInput, error::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let x_labels: Vec<String> = headers.iter().skip(1).map(|h| h.to_string()).collect();
    let mut y_labels = vec![];
    let mut rows = vec![];
    for result in csv_reader.records() {
        let record = result?;
        let mut fields = record.iter();
        y_labels.push(fields.next().unwrap_or("").to_string());
        let mut row = vec![];
        for field in fields {
            if field.is_empty() || field.eq_ignore_ascii_case("nan") {
                row.push(None);
            } else {
                let value = field.parse::<f64>().map_err(|e| {
                    error::Error::ReaderError(format!("invalid value {:?}: {}", field, e))
                })?;
                row.push(Some(value));
            }
        }
        rows.push(row);
    }
    Ok(PortraitInput {
        data: GridValues::Flat(rows),
        x_labels,
        y_labels,
        annotate_data: None,
    })
}

/// Read portrait input from JSON, YAML or CSV.
pub fn read_portrait_input(path: &Path) -> Result<PortraitInput, error::Error> {
    match extension(path).as_str() {
        "csv" => read_csv_grid(open(path)?),
        _ => read_document(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_values_json() {
        let flat: GridValues = serde_json::from_str("[[1.0, null], [3, 4]]").unwrap();
        let grid = flat.to_grid().unwrap();
        assert_eq!(grid.shape(), (1, 2, 2));
        assert!(grid.get(0, 0, 1).is_nan());
        let stacked: GridValues = serde_json::from_str("[[[1, 2]], [[3, 4]]]").unwrap();
        assert_eq!(stacked.to_grid().unwrap().shape(), (2, 1, 2));
    }

    #[test]
    fn test_portrait_input_yaml() {
        let doc = "data:\n  - [1, 2]\n  - [3, 4]\nxaxis_labels: [A, B]\nyaxis_labels: [C, D]\n";
        let input: PortraitInput = serde_yaml::from_str(doc).unwrap();
        assert_eq!(input.x_labels, vec!["A", "B"]);
        assert_eq!(input.y_labels, vec!["C", "D"]);
        assert!(input.annotate_data.is_none());
    }

    #[test]
    fn test_csv_grid() {
        let text = "model,tas,pr\nA,0.5,\nB,NaN,-1.25\n";
        let input = read_csv_grid(text.as_bytes()).unwrap();
        assert_eq!(input.x_labels, vec!["tas", "pr"]);
        assert_eq!(input.y_labels, vec!["A", "B"]);
        let grid = input.data.to_grid().unwrap();
        assert_eq!(grid.get(0, 0, 0), 0.5);
        assert!(grid.get(0, 0, 1).is_nan());
        assert!(grid.get(0, 1, 0).is_nan());
        assert_eq!(grid.get(0, 1, 1), -1.25);
    }

    #[test]
    fn test_csv_invalid_value() {
        let text = "model,tas\nA,high\n";
        assert!(read_csv_grid(text.as_bytes()).is_err());
    }

    #[test]
    fn test_missing_file() {
        let result: Result<TaylorInput, error::Error> = read_document(Path::new("no/such/file.json"));
        assert!(matches!(result, Err(error::Error::FileNotFound(_))));
    }
}
