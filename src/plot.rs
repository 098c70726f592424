use crate::errors::SpillError;
use crate::series::Series;
use crate::utils;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;

fn draw_panel(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    time: &[f64],
    lines: &[(String, &[f64])],
    y_desc: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let values: Vec<f64> = lines.iter().flat_map(|(_, y)| y.iter().cloned()).collect();
    let (ymin, ymax) = utils::extent(&values);
    let (xmin, xmax) = utils::extent(time);

    let mut chart = ChartBuilder::on(area)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(xmin..xmax, ymin..ymax)?;

    chart
        .configure_mesh()
        .x_labels(5)
        .y_labels(5)
        .y_label_formatter(&|x| format!("{:.3}", x))
        .x_label_formatter(&|x| format!("{:.1}", x))
        .x_desc("Time (hours)")
        .y_desc(y_desc)
        .draw()?;

    for (i, (label, y)) in lines.iter().enumerate() {
        let color = Palette99::pick(i).mix(1.0);
        chart
            .draw_series(LineSeries::new(
                time.iter().cloned().zip(y.iter().cloned()),
                &color,
            ))?
            .label(label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.filled())
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}

fn draw_levels(series: &Series, title: &str) -> Result<(), Box<dyn std::error::Error>> {
    let time: Vec<f64> = series.time.iter().map(|t| utils::hours(*t)).collect();
    let mut lines: Vec<(String, &[f64])> = Vec::new();
    for (i, level) in series.levels.iter().enumerate() {
        lines.push((format!("lake {} level", i + 1), level.as_slice()));
    }
    for (j, sill) in series.threshold.iter().enumerate() {
        lines.push((format!("sill {} elevation", j + 1), sill.as_slice()));
    }

    let root = BitMapBackend::new(title, (1000, 500)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.margin(10, 10, 10, 10);
    draw_panel(&root, &time, &lines, "Water level (m)")?;
    root.present()?;
    Ok(())
}

fn draw_flows(series: &Series, title: &str) -> Result<(), Box<dyn std::error::Error>> {
    let time: Vec<f64> = series.time.iter().map(|t| utils::hours(*t)).collect();
    let root = BitMapBackend::new(title, (1000, 1200)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.margin(10, 10, 10, 10);
    let panels = root.split_evenly((3, 1));

    let columns: [(&Vec<Vec<f64>>, &str, &str); 3] = [
        (&series.discharge, "discharge", "Discharge (m³/s)"),
        (&series.erosion_rate, "erosion rate", "Erosion rate (m/s)"),
        (&series.velocity, "velocity", "Flow velocity (m/s)"),
    ];
    for (panel, (column, name, y_desc)) in panels.iter().zip(columns.iter()) {
        let lines: Vec<(String, &[f64])> = column
            .iter()
            .enumerate()
            .map(|(j, y)| (format!("sill {} {}", j + 1, name), y.as_slice()))
            .collect();
        draw_panel(panel, &time, &lines, y_desc)?;
    }
    root.present()?;
    Ok(())
}

/// Draw lake levels and sill elevations against time to the png at `title`.
pub fn levels(series: &Series, title: &str) -> Result<(), SpillError> {
    draw_levels(series, title).map_err(|e| SpillError::PlotError(e.to_string()))
}

/// Draw discharge, erosion rate and velocity for every connection, one panel each, to the png
/// at `title`.
pub fn flows(series: &Series, title: &str) -> Result<(), SpillError> {
    draw_flows(series, title).map_err(|e| SpillError::PlotError(e.to_string()))
}
