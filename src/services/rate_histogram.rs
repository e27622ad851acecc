use plotters::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RateHistogramError {
    #[error("failed to render histogram: {0}")]
    Render(String),
}

/// Renders a rate histogram PNG. Bin count follows the square-root rule;
/// an empty input renders nothing and succeeds.
pub fn write_rate_histogram_png(
    output_path: &str,
    rates: &[f64],
    caption: &str,
) -> Result<(), RateHistogramError> {
    if rates.is_empty() {
        return Ok(());
    }

    let min_value = rates.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_value = rates.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let range = max_value - min_value;
    let square_root_of_n = (rates.len() as f64).sqrt();
    let bin_width = if range > f64::EPSILON {
        range / square_root_of_n
    } else {
        // All rates identical; one bin of nominal width.
        0.1
    };

    let mut counts: std::collections::BTreeMap<i64, usize> = std::collections::BTreeMap::new();
    for value in rates {
        let bucket = (*value / bin_width).round() as i64;
        *counts.entry(bucket).or_insert(0usize) += 1;
    }
    let max_count = *counts.values().max().unwrap_or(&1);

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| RateHistogramError::Render(e.to_string()))?;

    let min_bucket = (*counts.keys().next().unwrap_or(&0)) - 1;
    let max_bucket = (*counts.keys().next_back().unwrap_or(&0)) + 1;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(caption, ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(65)
        .build_cartesian_2d(min_bucket..max_bucket, 0..(max_count + 1))
        .map_err(|e| RateHistogramError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Award rate (%)")
        .y_desc("Frequency")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_label_formatter(&|value| format!("{:.2}", *value as f64 * bin_width))
        .draw()
        .map_err(|e| RateHistogramError::Render(e.to_string()))?;

    let bar_color = RGBColor(30, 122, 204);
    let bar_style = ShapeStyle::from(&bar_color).filled();
    chart
        .draw_series(
            counts
                .iter()
                .map(|(value, count)| Rectangle::new([(*value, 0), (*value + 1, *count)], bar_style)),
        )
        .map_err(|e| RateHistogramError::Render(e.to_string()))?;

    root.present()
        .map_err(|e| RateHistogramError::Render(e.to_string()))?;
    Ok(())
}
