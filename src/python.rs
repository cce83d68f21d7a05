use pyo3::prelude::*;

mod plot;
mod utils;

#[pymodule]
fn esmbenchviz(py: Python<'_>, m: &PyModule) -> PyResult<()> {
    let plot = PyModule::new(py, "plot")?;
    plot.add_function(wrap_pyfunction!(plot::portrait_plot, m)?)?;
    plot.add_function(wrap_pyfunction!(plot::taylor_diagram, m)?)?;
    plot.add_function(wrap_pyfunction!(plot::scatter_plot, m)?)?;
    m.add_submodule(plot)?;

    Ok(())
}
