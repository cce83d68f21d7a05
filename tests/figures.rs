use std::fs;

use esmbenchviz::error::Error;
use esmbenchviz::geometry::{partition, polygon_area};
use esmbenchviz::plot::grid::Grid;
use esmbenchviz::plot::portrait::{portrait_plot, PortraitOptions};
use esmbenchviz::plot::scatter::{scatter_plot, ScatterOptions};
use esmbenchviz::plot::taylor::{taylor_diagram, TaylorOptions};
use esmbenchviz::plot::widget::{Navigator, Selection};
use esmbenchviz::plot::{save_by_suffix, HtmlRenderer, Layout, Renderer, SvgRenderer};

fn labels(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn partitions_cover_the_unit_square() {
    for count in 1..=8 {
        let cells = partition(count).unwrap();
        assert_eq!(cells.len(), count);
        let total: f64 = (0..count)
            .map(|i| {
                let (xs, ys) = cells.polygon(i);
                polygon_area(xs, ys).abs()
            })
            .sum();
        assert!((total - 1.0).abs() < 1e-9, "count {} covers {}", count, total);
    }
    assert!(matches!(partition(0), Err(Error::InvalidDivisionCount(0))));
}

#[test]
fn portrait_plot_to_html_and_svg() {
    let grid = Grid::from_rows(vec![vec![1.0, 2.0], vec![3.0, f64::NAN]]).unwrap();
    let figure = portrait_plot(
        &grid,
        &labels(&["tas", "pr"]),
        &labels(&["model-a", "model-b"]),
        None,
        &PortraitOptions::default(),
    )
    .unwrap();
    assert_eq!(figure.patch_count(), 4);
    let layout = Layout::from(figure);

    let document = SvgRenderer.render(&layout).unwrap().to_string();
    assert!(document.contains("<svg"));
    assert!(document.contains("model-a"));

    let page = HtmlRenderer.render(&layout).unwrap();
    assert!(page.contains("var TIPS = "));
    assert!(page.contains("var NAV = null;"));
}

#[test]
fn portrait_plot_with_markup_labels_exports() {
    let grid = Grid::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    let options = PortraitOptions {
        title: Some("Bias <1000m>".to_string()),
        ..Default::default()
    };
    let figure = portrait_plot(
        &grid,
        &labels(&["R&D", "B"]),
        &labels(&["<1000m", "D"]),
        None,
        &options,
    )
    .unwrap();
    let layout = Layout::from(figure);

    let document = SvgRenderer.render(&layout).unwrap().to_string();
    assert!(document.contains("R&amp;D"));
    assert!(document.contains("&lt;1000m"));
    assert!(!document.contains("R&D"));

    let dir = std::env::temp_dir().join(format!("esmbenchviz-markup-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    save_by_suffix(&layout, &dir.join("portrait.svg")).unwrap();
    save_by_suffix(&layout, &dir.join("portrait.png")).unwrap();
    assert!(fs::metadata(dir.join("portrait.png")).unwrap().len() > 0);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn portrait_plot_rejects_label_mismatch() {
    let grid = Grid::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    let result = portrait_plot(
        &grid,
        &labels(&["tas"]),
        &labels(&["model-a", "model-b"]),
        None,
        &PortraitOptions::default(),
    );
    assert!(result.is_err());
}

#[test]
fn taylor_diagram_with_images_navigates() {
    let names = labels(&["m1", "m2", "m1"]);
    let options = TaylorOptions {
        images: Some(vec![
            Some("a.png".to_string()),
            None,
            Some("c.png".to_string()),
        ]),
        ..Default::default()
    };
    let layout = taylor_diagram(&[0.8, 1.1, 0.9], &[0.9, 0.7, 0.95], &names, 1.0, &options).unwrap();
    assert!(layout.is_composite());

    let page = HtmlRenderer.render(&layout).unwrap();
    assert!(page.contains("<select id=\"esm-select\">"));
    assert!(page.contains("id=\"esm-next\""));

    let mut with_reference = names.clone();
    with_reference.push("Reference".to_string());
    let navigator = Navigator::new(&with_reference).select("m1").next();
    assert_eq!(navigator.selection, Selection::Point(1));
    let navigator = navigator.select("missing");
    assert_eq!(navigator.selection, Selection::NoMatch);
}

#[test]
fn taylor_diagram_rejects_bad_input() {
    let names = labels(&["m1", "m2"]);
    let options = TaylorOptions::default();
    assert!(taylor_diagram(&[1.0], &[0.5, 0.6], &names, 1.0, &options).is_err());
    let options = TaylorOptions {
        step: 0.0,
        ..Default::default()
    };
    assert!(taylor_diagram(&[1.0, 1.2], &[0.5, 0.6], &names, 1.0, &options).is_err());
}

#[test]
fn scatter_plot_saves_by_suffix() {
    let layout = scatter_plot(
        &[1.0, 2.0, 3.0],
        &[4.0, 5.0, 6.0],
        &labels(&["A", "B", "C"]),
        &ScatterOptions::default(),
    )
    .unwrap();
    assert!(!layout.is_composite());

    let dir = std::env::temp_dir().join(format!("esmbenchviz-test-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let svg_path = dir.join("scatter.svg");
    let html_path = dir.join("scatter.html");
    save_by_suffix(&layout, &svg_path).unwrap();
    save_by_suffix(&layout, &html_path).unwrap();
    assert!(fs::read_to_string(&svg_path).unwrap().contains("<svg"));
    assert!(fs::read_to_string(&html_path).unwrap().contains("<!DOCTYPE html>"));
    assert!(matches!(
        save_by_suffix(&layout, &dir.join("scatter.gif")),
        Err(Error::InvalidImageSuffix(_))
    ));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn scatter_plot_rejects_mismatched_images() {
    let options = ScatterOptions {
        images: Some(vec![Some("a.png".to_string())]),
        ..Default::default()
    };
    let result = scatter_plot(&[1.0, 2.0], &[3.0, 4.0], &labels(&["A", "B"]), &options);
    assert!(matches!(result, Err(Error::Validation(_))));
}
