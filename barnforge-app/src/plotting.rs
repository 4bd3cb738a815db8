//! This module is responsible for generating all visualizations from climate log data.

use anyhow::Result;
use barnforge_core::{constants::TargetBand, logger::LogEntry};
use plotters::prelude::*;

/// The fields of a log record that the charts need.
#[derive(Clone, Debug)]
struct PlottingData {
    reading: u64,
    outside_temp: f64,
    inside_temp: f64,
    outside_humidity: f64,
    inside_humidity: f64,
}

/// The main function to generate and save all plots for a forecast run.
pub fn generate_all_plots(output_dir: &str, log_path: &str, band: &TargetBand) -> Result<()> {
    println!("[Plotting] Generating graphs from simulation data...");

    let data = parse_log_file(log_path)?;

    if data.is_empty() {
        println!("[Plotting] Warning: No data to plot.");
        return Ok(());
    }

    plot_temperature(output_dir, &data, band)?;
    plot_humidity(output_dir, &data, band)?;

    println!("[Plotting] Graphs have been saved to '{}'.", output_dir);
    Ok(())
}

fn parse_log_file(log_path: &str) -> Result<Vec<PlottingData>> {
    let mut reader = csv::Reader::from_path(log_path)?;
    let mut data = Vec::new();

    for result in reader.deserialize() {
        let record: LogEntry = result?;
        data.push(PlottingData {
            reading: record.reading,
            outside_temp: record.outside_temp,
            inside_temp: record.inside_temp,
            outside_humidity: record.outside_humidity,
            inside_humidity: record.inside_humidity,
        });
    }

    Ok(data)
}

/// Inside vs outside temperature, with the target band drawn as dashed limits.
fn plot_temperature(output_dir: &str, data: &[PlottingData], band: &TargetBand) -> Result<()> {
    let path = format!("{}/1_temperature.png", output_dir);
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let first = data.first().map_or(0, |d| d.reading);
    let last = data.last().map_or(1, |d| d.reading).max(first + 1);
    let temps = data.iter().flat_map(|d| [d.inside_temp, d.outside_temp]);
    let min_temp = temps.clone().fold(band.temp_min, f64::min) - 2.0;
    let max_temp = temps.fold(band.temp_max, f64::max) + 2.0;

    let mut chart = ChartBuilder::on(&root)
        .caption("Inside vs Outside Temperature", ("sans-serif", 50).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(first..last, min_temp..max_temp)?;

    chart
        .configure_mesh()
        .x_desc("Reading")
        .y_desc("Temperature (°C)")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            data.iter().map(|d| (d.reading, d.inside_temp)),
            RED.stroke_width(3),
        ))?
        .label("Inside")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.filled()));

    chart
        .draw_series(LineSeries::new(
            data.iter().map(|d| (d.reading, d.outside_temp)),
            BLUE.stroke_width(2),
        ))?
        .label("Outside")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.filled()));

    for (limit, label) in [(band.temp_min, "Target min"), (band.temp_max, "Target max")] {
        chart
            .draw_series(DashedLineSeries::new(
                vec![(first, limit), (last, limit)],
                5,
                5,
                (&GREEN).into(),
            ))?
            .label(label)
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

fn plot_humidity(output_dir: &str, data: &[PlottingData], band: &TargetBand) -> Result<()> {
    let path = format!("{}/2_humidity.png", output_dir);
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let first = data.first().map_or(0, |d| d.reading);
    let last = data.last().map_or(1, |d| d.reading).max(first + 1);

    let mut chart = ChartBuilder::on(&root)
        .caption("Inside vs Outside Humidity", ("sans-serif", 50).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(first..last, 0f64..100f64)?;

    chart
        .configure_mesh()
        .x_desc("Reading")
        .y_desc("Relative humidity (%)")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            data.iter().map(|d| (d.reading, d.inside_humidity)),
            RED.stroke_width(3),
        ))?
        .label("Inside")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.filled()));

    chart
        .draw_series(LineSeries::new(
            data.iter().map(|d| (d.reading, d.outside_humidity)),
            BLUE.stroke_width(2),
        ))?
        .label("Outside")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.filled()));

    chart
        .draw_series(DashedLineSeries::new(
            vec![(first, band.humidity), (last, band.humidity)],
            5,
            5,
            (&GREEN).into(),
        ))?
        .label("Target")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN.filled()));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}
