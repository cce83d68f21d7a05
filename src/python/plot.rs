use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use pyo3::prelude::*;

use crate::cli::{AxisLocation, ColorbarPlace, FontStyle, PlotSize};
use crate::colormap::ColormapSpec;
use crate::io::GridValues;
use crate::plot::portrait::{self, AxisFont, PortraitOptions};
use crate::plot::scatter::{self, ScatterOptions};
use crate::plot::taylor::{self, TaylorOptions};
use crate::plot::{save_by_suffix, Layout};
use crate::python::utils::{
    extract_to_bool, extract_to_default_string, extract_to_option_f64, extract_to_option_images,
    extract_to_option_string, extract_to_option_u32, extract_to_option_vec_f64,
    extract_to_option_vec_string, to_py_err,
};

fn extract_grid(py: Python<'_>, value: &PyObject) -> PyResult<GridValues> {
    match value.extract::<Vec<Vec<Option<f64>>>>(py) {
        Ok(rows) => Ok(GridValues::Flat(rows)),
        Err(_) => Ok(GridValues::Stacked(value.extract::<Vec<Vec<Vec<Option<f64>>>>>(py)?)),
    }
}

fn extract_size(py: Python<'_>, map: &HashMap<String, PyObject>, key: &str) -> PyResult<Option<PlotSize>> {
    match map.get(key) {
        Some(value) if !value.is_none(py) => match value.extract::<f64>(py) {
            Ok(pixels) => Ok(Some(PlotSize::Fixed(pixels))),
            Err(_) => {
                let text: String = value.extract(py)?;
                Ok(Some(PlotSize::from_str(&text).map_err(to_py_err)?))
            }
        },
        _ => Ok(None),
    }
}

fn extract_font(
    py: Python<'_>,
    map: &HashMap<String, PyObject>,
    size_key: &str,
    style_key: &str,
) -> PyResult<AxisFont> {
    let style = match extract_to_option_string(py, map, style_key)? {
        Some(text) => Some(FontStyle::from_str(&text).map_err(to_py_err)?),
        None => None,
    };
    Ok(AxisFont {
        size: extract_to_option_u32(py, map, size_key)?,
        style,
    })
}

fn save(layout: &Layout, output: &str) -> PyResult<String> {
    save_by_suffix(layout, &PathBuf::from(output)).map_err(to_py_err)?;
    Ok(output.to_string())
}

fn convert_hashmap_to_portrait_options(
    py: Python<'_>,
    map: &HashMap<String, PyObject>,
) -> PyResult<PortraitOptions> {
    let defaults = PortraitOptions::default();
    let vrange = match extract_to_option_vec_f64(py, map, "vrange")? {
        Some(values) if values.len() == 2 => Some((values[0], values[1])),
        Some(_) => {
            return Err(pyo3::exceptions::PyValueError::new_err(
                "vrange must hold two values",
            ))
        }
        None => None,
    };
    let xaxis_location = match extract_to_option_string(py, map, "xaxis_location")? {
        Some(text) => AxisLocation::from_str(&text).map_err(to_py_err)?,
        None => defaults.xaxis_location,
    };
    let cbar_place = match extract_to_option_string(py, map, "cbar_place")? {
        Some(text) => ColorbarPlace::from_str(&text).map_err(to_py_err)?,
        None => defaults.cbar_place,
    };
    Ok(PortraitOptions {
        width: extract_size(py, map, "width")?.unwrap_or(defaults.width),
        height: extract_size(py, map, "height")?.unwrap_or(defaults.height),
        annotate: extract_to_bool(py, map, "annotate", defaults.annotate)?,
        vrange,
        xaxis_font: extract_font(py, map, "xaxis_fontsize", "xaxis_fontstyle")?,
        yaxis_font: extract_font(py, map, "yaxis_fontsize", "yaxis_fontstyle")?,
        xaxis_location,
        xaxis_rotation: extract_to_option_f64(py, map, "xaxis_rotation")?
            .unwrap_or(defaults.xaxis_rotation),
        title: extract_to_option_string(py, map, "title")?,
        cmap: extract_to_default_string(py, map, "cmap", &defaults.cmap)?,
        cmap_bounds: extract_to_option_vec_f64(py, map, "cmap_bounds")?,
        cbar_place,
        cbar_tick_fontsize: extract_to_option_u32(py, map, "cbar_tick_fontsize")?,
        invert_yaxis: extract_to_bool(py, map, "invert_yaxis", defaults.invert_yaxis)?,
        clickable: extract_to_bool(py, map, "clickable", defaults.clickable)?,
        legend_name: extract_to_default_string(py, map, "legend_name", &defaults.legend_name)?,
        legend_labels: extract_to_option_vec_string(py, map, "legend_labels")?,
        img_url: extract_to_option_vec_string(py, map, "img_url")?,
        tooltips: match extract_to_option_string(py, map, "tooltips")? {
            Some(template) => Some(portrait::TooltipSpec::Html(template)),
            None => None,
        },
        url_open: extract_to_option_vec_string(py, map, "url_open")?,
        missing_color: extract_to_default_string(
            py,
            map,
            "missing_color",
            &defaults.missing_color,
        )?,
        aspect_scale: extract_to_option_f64(py, map, "aspect_scale")?
            .unwrap_or(defaults.aspect_scale),
        show_plot: extract_to_bool(py, map, "show_plot", defaults.show_plot)?,
        toolbar: extract_to_bool(py, map, "toolbar", defaults.toolbar)?,
        logo: extract_to_bool(py, map, "logo", defaults.logo)?,
        debug: extract_to_bool(py, map, "debug", defaults.debug)?,
    })
}

/// Draw a portrait plot and write it to `output`.
#[pyfunction]
#[pyo3(signature = (data, xaxis_labels, yaxis_labels, **kwargs))]
pub fn portrait_plot(
    py: Python<'_>,
    data: PyObject,
    xaxis_labels: Vec<String>,
    yaxis_labels: Vec<String>,
    kwargs: Option<HashMap<String, PyObject>>,
) -> PyResult<String> {
    let map = kwargs.unwrap_or_default();
    let grid = extract_grid(py, &data)?.to_grid().map_err(to_py_err)?;
    let annotation = match map.get("annotate_data") {
        Some(value) if !value.is_none(py) => {
            Some(extract_grid(py, value)?.to_grid().map_err(to_py_err)?)
        }
        _ => None,
    };
    let options = convert_hashmap_to_portrait_options(py, &map)?;
    let output = extract_to_default_string(py, &map, "output", "output.svg")?;
    let figure = portrait::portrait_plot(
        &grid,
        &xaxis_labels,
        &yaxis_labels,
        annotation.as_ref(),
        &options,
    )
    .map_err(to_py_err)?;
    save(&Layout::from(figure), &output)
}

/// Draw a Taylor diagram and write it to `output`.
#[pyfunction]
#[pyo3(signature = (std_devs, correlations, names, refstd, **kwargs))]
pub fn taylor_diagram(
    py: Python<'_>,
    std_devs: Vec<f64>,
    correlations: Vec<f64>,
    names: Vec<String>,
    refstd: f64,
    kwargs: Option<HashMap<String, PyObject>>,
) -> PyResult<String> {
    let map = kwargs.unwrap_or_default();
    let defaults = TaylorOptions::default();
    let colormap = match map.get("colormap") {
        Some(value) if !value.is_none(py) => match value.extract::<String>(py) {
            Ok(name) => ColormapSpec::Name(name),
            Err(_) => ColormapSpec::Colors(value.extract::<Vec<String>>(py)?),
        },
        _ => defaults.colormap.clone(),
    };
    let options = TaylorOptions {
        title: extract_to_default_string(py, &map, "title", &defaults.title)?,
        normalize: extract_to_bool(py, &map, "normalize", defaults.normalize)?,
        step: extract_to_option_f64(py, &map, "step")?.unwrap_or(defaults.step),
        show_reference: extract_to_bool(py, &map, "show_reference", defaults.show_reference)?,
        reference_name: extract_to_default_string(
            py,
            &map,
            "reference_name",
            &defaults.reference_name,
        )?,
        reference_image: extract_to_option_string(py, &map, "reference_image")?,
        colormap,
        width: extract_to_option_f64(py, &map, "width")?.unwrap_or(defaults.width),
        show_plot: extract_to_bool(py, &map, "show_plot", defaults.show_plot)?,
        images: extract_to_option_images(py, &map, "images")?,
        logo: extract_to_bool(py, &map, "logo", defaults.logo)?,
        debug: extract_to_bool(py, &map, "debug", defaults.debug)?,
    };
    let output = extract_to_default_string(py, &map, "output", "output.svg")?;
    let layout = taylor::taylor_diagram(&std_devs, &correlations, &names, refstd, &options)
        .map_err(to_py_err)?;
    save(&layout, &output)
}

/// Draw a scatter plot and write it to `output`.
#[pyfunction]
#[pyo3(signature = (x, y, names, **kwargs))]
pub fn scatter_plot(
    py: Python<'_>,
    x: Vec<f64>,
    y: Vec<f64>,
    names: Vec<String>,
    kwargs: Option<HashMap<String, PyObject>>,
) -> PyResult<String> {
    let map = kwargs.unwrap_or_default();
    let defaults = ScatterOptions::default();
    let options = ScatterOptions {
        title: extract_to_default_string(py, &map, "title", &defaults.title)?,
        width: extract_to_option_f64(py, &map, "width")?.unwrap_or(defaults.width),
        height: extract_to_option_f64(py, &map, "height")?.unwrap_or(defaults.height),
        size: extract_to_option_f64(py, &map, "size")?.unwrap_or(defaults.size),
        color: extract_to_default_string(py, &map, "color", &defaults.color)?,
        images: extract_to_option_images(py, &map, "images")?,
        show_plot: extract_to_bool(py, &map, "show_plot", defaults.show_plot)?,
        logo: extract_to_bool(py, &map, "logo", defaults.logo)?,
    };
    let output = extract_to_default_string(py, &map, "output", "output.svg")?;
    let layout = scatter::scatter_plot(&x, &y, &names, &options).map_err(to_py_err)?;
    save(&layout, &output)
}
