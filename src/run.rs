use std::path::Path;

use anyhow::Context;

use crate::cli;
use crate::colormap::ColormapSpec;
use crate::io;
use crate::plot;
use crate::plot::portrait::{portrait_plot, PortraitOptions};
use crate::plot::scatter::{scatter_plot, ScatterOptions};
use crate::plot::taylor::{taylor_diagram, TaylorOptions};
use crate::plot::Layout;

/// Apply command line overrides on top of config file options.
pub fn portrait_options(args: &cli::PortraitArgs) -> Result<PortraitOptions, anyhow::Error> {
    let mut options: PortraitOptions = io::read_config(&args.config_file)
        .with_context(|| "unable to read portrait options")?;
    if let Some(title) = &args.title {
        options.title = Some(title.clone());
    }
    if let Some(cmap) = &args.cmap {
        options.cmap = cmap.clone();
    }
    if args.cmap_bounds.is_some() {
        options.cmap_bounds = args.cmap_bounds.clone();
    }
    if let Some(vrange) = &args.vrange {
        if let [low, high] = vrange.as_slice() {
            options.vrange = Some((*low, *high));
        }
    }
    if let Some(width) = args.width {
        options.width = width;
    }
    if let Some(height) = args.height {
        options.height = height;
    }
    if let Some(location) = args.xaxis_location {
        options.xaxis_location = location;
    }
    if let Some(rotation) = args.xaxis_rotation {
        options.xaxis_rotation = rotation;
    }
    if let Some(place) = args.cbar_place {
        options.cbar_place = place;
    }
    if args.cbar_tick_fontsize.is_some() {
        options.cbar_tick_fontsize = args.cbar_tick_fontsize;
    }
    if args.legend_labels.is_some() {
        options.legend_labels = args.legend_labels.clone();
    }
    options.annotate |= args.annotate;
    options.clickable |= args.clickable;
    if args.no_invert {
        options.invert_yaxis = false;
    }
    options.show_plot |= args.show;
    Ok(options)
}

pub fn portrait(args: &cli::PortraitArgs) -> Result<(), anyhow::Error> {
    let input = io::read_portrait_input(&args.input)
        .with_context(|| format!("unable to read {}", args.input.display()))?;
    let options = portrait_options(args)?;
    let data = input.data.to_grid()?;
    let annotation = match &input.annotate_data {
        Some(values) => Some(values.to_grid()?),
        None => None,
    };
    log::debug!("portrait grid {:?}", data.shape());
    let figure = portrait_plot(
        &data,
        &input.x_labels,
        &input.y_labels,
        annotation.as_ref(),
        &options,
    )?;
    plot::save_by_suffix(&Layout::from(figure), Path::new(&args.output))?;
    Ok(())
}

pub fn taylor_options(args: &cli::TaylorArgs) -> Result<TaylorOptions, anyhow::Error> {
    let mut options: TaylorOptions = io::read_config(&args.config_file)
        .with_context(|| "unable to read Taylor diagram options")?;
    if let Some(title) = &args.title {
        options.title = title.clone();
    }
    if let Some(colormap) = &args.colormap {
        options.colormap = ColormapSpec::Name(colormap.clone());
    }
    if let Some(step) = args.step {
        options.step = step;
    }
    if let Some(width) = args.width {
        options.width = width as f64;
    }
    options.normalize |= args.normalize;
    if args.no_reference {
        options.show_reference = false;
    }
    options.show_plot |= args.show;
    Ok(options)
}

pub fn taylor(args: &cli::TaylorArgs) -> Result<(), anyhow::Error> {
    let input: io::TaylorInput = io::read_document(&args.input)
        .with_context(|| format!("unable to read {}", args.input.display()))?;
    let mut options = taylor_options(args)?;
    if input.images.is_some() {
        options.images = input.images.clone();
    }
    let layout = taylor_diagram(
        &input.std_devs,
        &input.correlations,
        &input.names,
        input.refstd,
        &options,
    )?;
    plot::save_by_suffix(&layout, Path::new(&args.output))?;
    Ok(())
}

pub fn scatter_options(args: &cli::ScatterArgs) -> Result<ScatterOptions, anyhow::Error> {
    let mut options: ScatterOptions = io::read_config(&args.config_file)
        .with_context(|| "unable to read scatter plot options")?;
    if let Some(title) = &args.title {
        options.title = title.clone();
    }
    if let Some(width) = args.width {
        options.width = width as f64;
    }
    if let Some(height) = args.height {
        options.height = height as f64;
    }
    options.show_plot |= args.show;
    Ok(options)
}

pub fn scatter(args: &cli::ScatterArgs) -> Result<(), anyhow::Error> {
    let input: io::ScatterInput = io::read_document(&args.input)
        .with_context(|| format!("unable to read {}", args.input.display()))?;
    let mut options = scatter_options(args)?;
    if input.images.is_some() {
        options.images = input.images.clone();
    }
    let layout = scatter_plot(&input.x, &input.y, &input.names, &options)?;
    plot::save_by_suffix(&layout, Path::new(&args.output))?;
    Ok(())
}

pub fn cmd(args: cli::Arguments) -> Result<(), anyhow::Error> {
    match args.cmd {
        cli::SubCommand::Portrait(options) => portrait(&options),
        cli::SubCommand::Taylor(options) => taylor(&options),
        cli::SubCommand::Scatter(options) => scatter(&options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{AxisLocation, PlotSize};

    #[test]
    fn test_portrait_overrides() {
        let args = cli::PortraitArgs {
            title: Some("Bias".to_string()),
            vrange: Some(vec![-1.0, 1.0]),
            width: Some(PlotSize::Auto),
            xaxis_location: Some(AxisLocation::Both),
            no_invert: true,
            annotate: true,
            ..Default::default()
        };
        let options = portrait_options(&args).unwrap();
        assert_eq!(options.title.as_deref(), Some("Bias"));
        assert_eq!(options.vrange, Some((-1.0, 1.0)));
        assert_eq!(options.width, PlotSize::Auto);
        assert_eq!(options.xaxis_location, AxisLocation::Both);
        assert!(!options.invert_yaxis);
        assert!(options.annotate);
        assert_eq!(options.cmap, "RdBu_r");
    }

    #[test]
    fn test_taylor_overrides() {
        let args = cli::TaylorArgs {
            colormap: Some("viridis".to_string()),
            width: Some(800),
            no_reference: true,
            ..Default::default()
        };
        let options = taylor_options(&args).unwrap();
        assert_eq!(options.colormap, ColormapSpec::Name("viridis".to_string()));
        assert_eq!(options.width, 800.0);
        assert!(!options.show_reference);
        assert_eq!(options.step, 0.2);
    }

    #[test]
    fn test_scatter_defaults() {
        let options = scatter_options(&cli::ScatterArgs::default()).unwrap();
        assert_eq!(options, ScatterOptions::default());
    }
}
