//! One bar chart per query comparing the mean duration of every database.

use crate::{
    config::{Palette, PlotConfig, Rgb},
    format::duration,
    ReportError,
};
use itertools::Itertools;
use plotters::{
    coord::{
        ranged1d::{AsRangedCoord, Ranged, ValueFormatter},
        Shift,
    },
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};
use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};
use tracing::info;
use tsbench_analysis::QueryStatsMap;

// half of a bar's width in axis units, bars sit on integer positions
const BAR_HALF_WIDTH: f64 = 0.35;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub database: String,
    pub value: f64,
    pub label: String,
    pub color: Rgb,
}

/// Layout of a single chart, computed before anything is drawn
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlot {
    pub query_id: i64,
    pub title: String,
    pub bars: Vec<Bar>,
    pub log_scale: bool,
    pub file_name: String,
}

/// Lay out one chart per query id, queries without any successful database are skipped.
pub fn layout_plots(
    queries: &QueryStatsMap,
    palette: &Palette,
    log_threshold_ms: f64,
) -> Vec<QueryPlot> {
    let databases = queries
        .values()
        .flat_map(|stats| stats.databases.keys())
        .collect::<BTreeSet<_>>();

    queries
        .iter()
        .filter_map(|(query_id, stats)| {
            let bars = databases
                .iter()
                .filter_map(|db_type| {
                    let value = stats.databases.get(*db_type)?.mean()?;

                    Some(Bar {
                        database: db_type.to_string(),
                        value,
                        label: duration(value),
                        color: palette.color(db_type),
                    })
                })
                .collect_vec();

            if bars.is_empty() {
                info!("Skipping Query {query_id}: No valid data");
                return None;
            }

            Some(QueryPlot {
                query_id: *query_id,
                title: format!("Query {query_id}: {} (Averaged Results)", stats.description),
                log_scale: bars.iter().any(|bar| bar.value > log_threshold_ms),
                file_name: format!("query_{query_id:02}_comparison.svg"),
                bars,
            })
        })
        .collect()
}

/// Draw every chart into `output_dir`, creating it if necessary.
pub fn render_plots(
    queries: &QueryStatsMap,
    output_dir: &Path,
    palette: &Palette,
    config: &PlotConfig,
) -> Result<Vec<PathBuf>, ReportError> {
    fs::create_dir_all(output_dir).map_err(|source| ReportError::Write {
        path: output_dir.to_path_buf(),
        source,
    })?;

    layout_plots(queries, palette, config.log_threshold_ms)
        .iter()
        .map(|plot| {
            let path = output_dir.join(&plot.file_name);
            draw_plot(plot, &path, config)?;
            info!("Created plot for Query {}: {}", plot.query_id, path.display());

            Ok(path)
        })
        .collect()
}

pub fn draw_plot(plot: &QueryPlot, path: &Path, config: &PlotConfig) -> Result<(), ReportError> {
    let plot_error = |message: String| ReportError::Plot {
        path: path.to_path_buf(),
        message,
    };

    let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|error| plot_error(error.to_string()))?;

    let max = plot.bars.iter().map(|bar| bar.value).fold(0.0, f64::max);

    if plot.log_scale {
        // log axes cannot start at 0, the smallest positive bar decides the floor
        let floor = plot
            .bars
            .iter()
            .map(|bar| bar.value)
            .filter(|value| *value > 0.0)
            .fold(f64::INFINITY, f64::min)
            / 2.0;
        draw_chart(&root, plot, (floor..max * 2.0).log_scale(), floor)
    } else {
        let top = if max > 0.0 { max * 1.15 } else { 1.0 };
        draw_chart(&root, plot, 0.0..top, 0.0)
    }
    .map_err(plot_error)?;

    root.present().map_err(|error| plot_error(error.to_string()))
}

fn draw_chart<Y>(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    plot: &QueryPlot,
    y_range: Y,
    floor: f64,
) -> Result<(), String>
where
    Y: AsRangedCoord<Value = f64>,
    Y::CoordDescType: Ranged<ValueType = f64> + ValueFormatter<f64>,
{
    let names = plot.bars.iter().map(|bar| bar.database.as_str()).collect_vec();
    let positions = plot.bars.len() as f64;

    let mut chart = ChartBuilder::on(root)
        .caption(&plot.title, ("sans-serif", 22).into_font().style(FontStyle::Bold))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(-0.5..positions - 0.5, y_range)
        .map_err(|error| error.to_string())?;

    let database_label = |x: &f64| {
        let index = x.round();
        if (x - index).abs() < 1e-6 && index >= 0.0 {
            names
                .get(index as usize)
                .map(|name| name.to_string())
                .unwrap_or_default()
        } else {
            String::new()
        }
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(plot.bars.len())
        .x_label_formatter(&database_label)
        .bold_line_style(BLACK.mix(0.3))
        .light_line_style(WHITE.mix(0.0))
        .x_desc("Database")
        .y_desc("Average Execution Time (ms)")
        .axis_desc_style(("sans-serif", 16).into_font().style(FontStyle::Bold))
        .draw()
        .map_err(|error| error.to_string())?;

    let bar_corners = |index: usize, bar: &Bar| {
        let center = index as f64;
        [
            (center - BAR_HALF_WIDTH, floor),
            (center + BAR_HALF_WIDTH, bar.value.max(floor)),
        ]
    };

    chart
        .draw_series(plot.bars.iter().enumerate().map(|(index, bar)| {
            let Rgb(red, green, blue) = bar.color;
            Rectangle::new(
                bar_corners(index, bar),
                RGBColor(red, green, blue).mix(0.8).filled(),
            )
        }))
        .map_err(|error| error.to_string())?;

    chart
        .draw_series(
            plot.bars
                .iter()
                .enumerate()
                .map(|(index, bar)| Rectangle::new(bar_corners(index, bar), BLACK.stroke_width(1))),
        )
        .map_err(|error| error.to_string())?;

    let label_style = TextStyle::from(("sans-serif", 14).into_font().style(FontStyle::Bold))
        .pos(Pos::new(HPos::Center, VPos::Bottom));

    chart
        .draw_series(plot.bars.iter().enumerate().map(|(index, bar)| {
            Text::new(
                bar.label.clone(),
                (index as f64, bar.value.max(floor)),
                label_style.clone(),
            )
        }))
        .map_err(|error| error.to_string())?;

    Ok(())
}
