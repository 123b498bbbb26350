use std::collections::HashMap;
use std::fmt::Display;
use std::path::Path;

use plotters::prelude::*;
use tracing::info;

use crate::error::{BenchError, Result};
use crate::perf::{BenchmarkSample, Columns, Measurement};

const FONT: &str = "sans-serif";
const PLOT_WIDTH: u32 = 800;
const PLOT_HEIGHT: u32 = 400;

pub const X_DESC: &str = "thread_count";
pub const Y_DESC: &str = "ms";

/// One line of the figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(u64, u64)>,
}

impl Series {
    /// The three sample table columns against thread count, TTAS first.
    pub fn from_samples(samples: &[BenchmarkSample]) -> Vec<Series> {
        let columns = Columns::extract(samples);
        columns
            .labelled_series()
            .iter()
            .map(|(label, ys)| Series {
                label: label.to_string(),
                points: columns
                    .thread_count
                    .iter()
                    .copied()
                    .zip(ys.iter().copied())
                    .collect(),
            })
            .collect()
    }

    /// One series per lock name, in the order the names first appear.
    pub fn from_measurements(records: &[Measurement]) -> Vec<Series> {
        let mut groups: Vec<Series> = Vec::new();
        for record in records {
            let point = (record.thread_count, record.elapsed_ms);
            match groups.iter_mut().find(|s| s.label == record.name) {
                Some(series) => series.points.push(point),
                None => groups.push(Series {
                    label: record.name.to_string(),
                    points: vec![point],
                }),
            }
        }
        groups
    }
}

fn color_for(label: &str, index: usize) -> RGBColor {
    let mut color_map = HashMap::new();
    color_map.insert("TTAS", BLUE);
    color_map.insert("mutex", RGBColor(255, 127, 14));
    color_map.insert("best spin", GREEN);
    color_map.insert("TAS", RED);
    color_map.insert("TTAS short backoff", CYAN);
    color_map.insert("TTAS long exp backoff", MAGENTA);

    color_map.get(label).copied().unwrap_or_else(|| {
        let c = Palette99::pick(index).to_rgba();
        RGBColor(c.0, c.1, c.2)
    })
}

fn plot_error(path: &Path, e: impl Display) -> BenchError {
    BenchError::Plot {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

fn axis_range(values: impl Iterator<Item = u64> + Clone) -> (u64, u64) {
    let min = values.clone().min();
    let max = values.max();
    match (min, max) {
        (Some(min), Some(max)) if max > min => (min, max),
        (Some(min), Some(_)) => (min.saturating_sub(1), min.saturating_add(1)),
        _ => (0, 1),
    }
}

/// Draws every series as a line over a shared thread count axis and writes
/// the figure as SVG. Series without points are left out of the legend; with
/// nothing to draw the axes are still rendered.
pub fn write_plot(series: &[Series], caption: &str, path: &Path) -> Result<()> {
    let points = series.iter().flat_map(|s| s.points.iter());
    let (x_min, x_max) = axis_range(points.clone().map(|p| p.0));
    let (y_min, y_max) = axis_range(points.map(|p| p.1));
    let y_padding = ((y_max - y_min) / 10).min(y_min);
    let y_range = y_min - y_padding..y_max.saturating_add(y_padding);

    {
        let root = SVGBackend::new(path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| plot_error(path, e))?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(caption, (FONT, 20))
            .set_label_area_size(LabelAreaPosition::Left, 70)
            .set_label_area_size(LabelAreaPosition::Right, 30)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(x_min..x_max, y_range)
            .map_err(|e| plot_error(path, e))?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_label_formatter(&|v| format!("{}", v))
            .y_label_formatter(&|v| format!("{}", v))
            .x_labels(20)
            .y_labels(10)
            .x_desc(X_DESC)
            .y_desc(Y_DESC)
            .draw()
            .map_err(|e| plot_error(path, e))?;

        let mut drawn = 0;
        for (index, s) in series.iter().enumerate() {
            if s.points.is_empty() {
                continue;
            }
            drawn += 1;
            let color = color_for(&s.label, index);
            chart
                .draw_series(LineSeries::new(s.points.iter().copied(), &color))
                .map_err(|e| plot_error(path, e))?
                .label(s.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        if drawn > 0 {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .label_font((FONT, 13))
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(|e| plot_error(path, e))?;
        }

        root.present().map_err(|e| plot_error(path, e))?;
    }

    info!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perf_lock_data::PERF_DATA_LOCKS;

    /// The content of every `<text>` element, in document order.
    fn svg_texts(svg: &str) -> Vec<String> {
        svg.split("<text")
            .skip(1)
            .filter_map(|chunk| {
                let start = chunk.find('>')? + 1;
                let end = chunk.find("</text>")?;
                Some(chunk[start..end].trim().to_string())
            })
            .collect()
    }

    fn render(series: &[Series]) -> String {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.svg");
        write_plot(series, "locks", &path).unwrap();
        std::fs::read_to_string(&path).unwrap()
    }

    #[test]
    fn samples_become_three_series_in_legend_order() {
        let series = Series::from_samples(PERF_DATA_LOCKS);
        let labels: Vec<_> = series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["TTAS", "mutex", "best spin"]);

        for s in &series {
            assert_eq!(s.points.len(), 21);
        }
        assert_eq!(series[0].points[1], (10, 3240));
        assert_eq!(series[1].points[1], (10, 1731));
        assert_eq!(series[2].points[1], (10, 1328));
    }

    #[test]
    fn measurements_group_by_first_appearance() {
        let m = |name, thread_count, elapsed_ms| Measurement {
            name,
            thread_count,
            elapsed_ms,
        };
        let series = Series::from_measurements(&[
            m("TTAS", 1, 5),
            m("mutex", 1, 4),
            m("TTAS", 10, 50),
            m("mutex", 10, 40),
        ]);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "TTAS");
        assert_eq!(series[0].points, vec![(1, 5), (10, 50)]);
        assert_eq!(series[1].points, vec![(1, 4), (10, 40)]);
    }

    #[test]
    fn svg_has_axis_and_legend_labels() {
        let texts = svg_texts(&render(&Series::from_samples(PERF_DATA_LOCKS)));
        let position = |label: &str| texts.iter().position(|t| t == label);

        assert!(position(X_DESC).is_some());
        assert!(position(Y_DESC).is_some());

        let ttas = position("TTAS").unwrap();
        let mutex = position("mutex").unwrap();
        let best_spin = position("best spin").unwrap();
        assert!(ttas < mutex && mutex < best_spin);
    }

    #[test]
    fn rendering_is_repeatable() {
        let series = Series::from_samples(PERF_DATA_LOCKS);
        assert_eq!(render(&series), render(&series));
    }

    #[test]
    fn empty_dataset_still_renders_axes() {
        let texts = svg_texts(&render(&Series::from_samples(&[])));
        assert!(texts.iter().any(|t| t == X_DESC));
        assert!(texts.iter().any(|t| t == Y_DESC));
        assert!(!texts.iter().any(|t| t == "TTAS" || t == "mutex" || t == "best spin"));

        let texts = svg_texts(&render(&[]));
        assert!(texts.iter().any(|t| t == X_DESC));
    }

    #[test]
    fn single_point_renders() {
        let texts = svg_texts(&render(&Series::from_samples(&PERF_DATA_LOCKS[..1])));
        assert!(texts.iter().any(|t| t == "best spin"));
    }

    #[test]
    fn values_near_the_top_of_the_range_render() {
        let samples = [BenchmarkSample {
            thread_count: 1,
            mutex_ms: 10_000_000_000_000_000_000,
            ttas_ms: 18_400_000_000_000_000_000,
            best_spin_ms: 10_000_000_000_000_000_000,
        }];
        let texts = svg_texts(&render(&Series::from_samples(&samples)));
        assert!(texts.iter().any(|t| t == "TTAS"));

        let flat = [Series {
            label: "mutex".to_string(),
            points: vec![(1, u64::MAX), (2, u64::MAX)],
        }];
        let texts = svg_texts(&render(&flat));
        assert!(texts.iter().any(|t| t == "mutex"));
    }

    #[test]
    fn unwritable_target_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("plot.svg");
        match write_plot(&[], "locks", &path) {
            Err(BenchError::Plot { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected plot error, got {other:?}"),
        }
    }
}
