use std::collections::HashMap;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::error;

pub fn to_py_err(err: error::Error) -> PyErr {
    PyValueError::new_err(err.to_string())
}

pub fn extract_to_option_string(
    py: Python<'_>,
    map: &HashMap<String, PyObject>,
    key: &str,
) -> PyResult<Option<String>> {
    match map.get(key) {
        Some(value) if !value.is_none(py) => Ok(Some(value.extract::<String>(py)?)),
        _ => Ok(None),
    }
}

pub fn extract_to_default_string(
    py: Python<'_>,
    map: &HashMap<String, PyObject>,
    key: &str,
    default: &str,
) -> PyResult<String> {
    Ok(extract_to_option_string(py, map, key)?.unwrap_or_else(|| String::from(default)))
}

pub fn extract_to_option_f64(
    py: Python<'_>,
    map: &HashMap<String, PyObject>,
    key: &str,
) -> PyResult<Option<f64>> {
    match map.get(key) {
        Some(value) if !value.is_none(py) => Ok(Some(value.extract::<f64>(py)?)),
        _ => Ok(None),
    }
}

pub fn extract_to_option_u32(
    py: Python<'_>,
    map: &HashMap<String, PyObject>,
    key: &str,
) -> PyResult<Option<u32>> {
    match map.get(key) {
        Some(value) if !value.is_none(py) => Ok(Some(value.extract::<u32>(py)?)),
        _ => Ok(None),
    }
}

pub fn extract_to_bool(
    py: Python<'_>,
    map: &HashMap<String, PyObject>,
    key: &str,
    default: bool,
) -> PyResult<bool> {
    match map.get(key) {
        Some(value) if !value.is_none(py) => value.extract::<bool>(py),
        _ => Ok(default),
    }
}

pub fn extract_to_option_vec_string(
    py: Python<'_>,
    map: &HashMap<String, PyObject>,
    key: &str,
) -> PyResult<Option<Vec<String>>> {
    match map.get(key) {
        Some(value) if !value.is_none(py) => Ok(Some(value.extract::<Vec<String>>(py)?)),
        _ => Ok(None),
    }
}

pub fn extract_to_option_vec_f64(
    py: Python<'_>,
    map: &HashMap<String, PyObject>,
    key: &str,
) -> PyResult<Option<Vec<f64>>> {
    match map.get(key) {
        Some(value) if !value.is_none(py) => Ok(Some(value.extract::<Vec<f64>>(py)?)),
        _ => Ok(None),
    }
}

/// Image links where `None` marks a point without an image.
pub fn extract_to_option_images(
    py: Python<'_>,
    map: &HashMap<String, PyObject>,
    key: &str,
) -> PyResult<Option<Vec<Option<String>>>> {
    match map.get(key) {
        Some(value) if !value.is_none(py) => Ok(Some(value.extract::<Vec<Option<String>>>(py)?)),
        _ => Ok(None),
    }
}
