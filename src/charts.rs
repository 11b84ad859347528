// PNG chart rendering - the sink for percent and time-series data
use anyhow::Result;
use plotters::element::Pie;
use plotters::prelude::*;
use std::path::Path;

const WIDTH: u32 = 1024;
const HEIGHT: u32 = 600;
const TITLE_FONT_SIZE: u32 = 28;
const LABEL_FONT_SIZE: u32 = 16;

const PALETTE: [RGBColor; 8] = [
    RGBColor(80, 160, 220),
    RGBColor(50, 200, 100),
    RGBColor(220, 180, 50),
    RGBColor(220, 80, 80),
    RGBColor(150, 100, 220),
    RGBColor(90, 200, 200),
    RGBColor(230, 140, 60),
    RGBColor(160, 160, 160),
];

/// Render a labeled bar chart. Values are whatever unit the caller already
/// prepared (percent or absolute); `value_label` names the axis.
pub fn bar_chart_png(
    data: &[(String, f64)],
    path: &Path,
    title: &str,
    value_label: &str,
    horizontal: bool,
) -> Result<()> {
    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let (title_area, chart_area) = root.split_vertically(70);
    title_area.draw_text(
        title,
        &TextStyle::from(("sans-serif", TITLE_FONT_SIZE).into_font()).color(&RGBColor(40, 40, 80)),
        ((WIDTH / 2) as i32 - title.len() as i32 * 6, 30),
    )?;
    title_area.draw_text(
        value_label,
        &TextStyle::from(("sans-serif", LABEL_FONT_SIZE).into_font())
            .color(&RGBColor(100, 100, 100)),
        (20, 50),
    )?;

    if data.is_empty() {
        root.present()?;
        return Ok(());
    }

    let max_value = data.iter().map(|(_, v)| *v).fold(f64::MIN, f64::max).max(1e-9);
    if horizontal {
        draw_horizontal_bars(&chart_area, data, max_value)?;
    } else {
        draw_vertical_bars(&chart_area, data, max_value)?;
    }

    root.present()?;
    Ok(())
}

fn draw_horizontal_bars(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    data: &[(String, f64)],
    max_value: f64,
) -> Result<()> {
    let (width, height) = area.dim_in_pixel();
    let label_width = 320i32;
    let margin = 20i32;
    let row_height = (height as i32 - margin * 2) / data.len() as i32;
    let bar_height = (row_height - 6).clamp(4, 40);
    let usable = width as i32 - label_width - margin * 2 - 80;

    for (idx, (label, value)) in data.iter().enumerate() {
        let y = margin + idx as i32 * row_height;
        let bar_len = ((value / max_value) * usable as f64) as i32;
        let color = PALETTE[idx % PALETTE.len()];

        area.draw_text(
            label,
            &TextStyle::from(("sans-serif", LABEL_FONT_SIZE).into_font())
                .color(&RGBColor(60, 60, 60)),
            (margin, y + bar_height / 2),
        )?;
        area.draw(&Rectangle::new(
            [(label_width, y), (label_width + bar_len.max(1), y + bar_height)],
            ShapeStyle::from(color).filled(),
        ))?;
        area.draw_text(
            &format!("{value:.1}%"),
            &TextStyle::from(("sans-serif", LABEL_FONT_SIZE).into_font())
                .color(&RGBColor(60, 60, 60)),
            (label_width + bar_len + 8, y + bar_height / 2),
        )?;
    }
    Ok(())
}

fn draw_vertical_bars(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    data: &[(String, f64)],
    max_value: f64,
) -> Result<()> {
    let (width, height) = area.dim_in_pixel();
    let margin = 30i32;
    let label_band = 60i32;
    let col_width = (width as i32 - margin * 2) / data.len() as i32;
    let bar_width = (col_width - 10).clamp(4, 120);
    let usable = height as i32 - margin * 2 - label_band;

    for (idx, (label, value)) in data.iter().enumerate() {
        let x = margin + idx as i32 * col_width;
        let bar_len = ((value / max_value) * usable as f64) as i32;
        let y_top = margin + (usable - bar_len);
        let color = PALETTE[idx % PALETTE.len()];

        area.draw(&Rectangle::new(
            [(x, y_top), (x + bar_width, margin + usable)],
            ShapeStyle::from(color).filled(),
        ))?;
        area.draw_text(
            &format!("{value:.1}%"),
            &TextStyle::from(("sans-serif", LABEL_FONT_SIZE).into_font())
                .color(&RGBColor(60, 60, 60)),
            (x, y_top - 18),
        )?;
        area.draw_text(
            label,
            &TextStyle::from(("sans-serif", LABEL_FONT_SIZE).into_font())
                .color(&RGBColor(60, 60, 60)),
            (x, margin + usable + 10),
        )?;
    }
    Ok(())
}

/// Render a pie chart from `(label, value)` slices.
pub fn pie_chart_png(data: &[(String, f64)], path: &Path, title: &str) -> Result<()> {
    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    root.draw_text(
        title,
        &TextStyle::from(("sans-serif", TITLE_FONT_SIZE).into_font()).color(&RGBColor(40, 40, 80)),
        ((WIDTH / 2) as i32 - title.len() as i32 * 6, 20),
    )?;

    if data.is_empty() {
        root.present()?;
        return Ok(());
    }

    let sizes: Vec<f64> = data.iter().map(|(_, v)| *v).collect();
    let labels: Vec<String> = data.iter().map(|(l, _)| l.clone()).collect();
    let colors: Vec<RGBColor> = (0..data.len()).map(|i| PALETTE[i % PALETTE.len()]).collect();

    let center = ((WIDTH / 2) as i32, (HEIGHT / 2 + 20) as i32);
    let radius = (HEIGHT as f64 / 2.0) - 80.0;
    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.label_style(TextStyle::from(("sans-serif", 18).into_font()).color(&RGBColor(60, 60, 60)));
    root.draw(&pie)?;

    root.present()?;
    Ok(())
}

/// Render an absolute-valued time series (Gateway growth counters) as a
/// vertical bar chart with sparse month labels.
pub fn time_series_png(
    data: &[(String, u64)],
    path: &Path,
    title: &str,
    value_label: &str,
) -> Result<()> {
    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let (title_area, chart_area) = root.split_vertically(70);
    title_area.draw_text(
        title,
        &TextStyle::from(("sans-serif", TITLE_FONT_SIZE).into_font()).color(&RGBColor(40, 40, 80)),
        ((WIDTH / 2) as i32 - title.len() as i32 * 6, 30),
    )?;
    title_area.draw_text(
        value_label,
        &TextStyle::from(("sans-serif", LABEL_FONT_SIZE).into_font())
            .color(&RGBColor(100, 100, 100)),
        (20, 50),
    )?;

    if data.is_empty() {
        root.present()?;
        return Ok(());
    }

    let (width, height) = chart_area.dim_in_pixel();
    let margin = 30i32;
    let label_band = 40i32;
    let max_value = data.iter().map(|(_, v)| *v).max().unwrap_or(1).max(1) as f64;
    let col_width = ((width as i32 - margin * 2) as f64 / data.len() as f64).max(1.0);
    let usable = height as i32 - margin * 2 - label_band;

    for (idx, (month, value)) in data.iter().enumerate() {
        let x = margin + (idx as f64 * col_width) as i32;
        let bar_len = ((*value as f64 / max_value) * usable as f64) as i32;
        let y_top = margin + (usable - bar_len);

        chart_area.draw(&Rectangle::new(
            [(x, y_top), (x + (col_width as i32 - 1).max(1), margin + usable)],
            ShapeStyle::from(PALETTE[0]).filled(),
        ))?;

        // Label every sixth month to keep the axis readable.
        if idx % 6 == 0 {
            chart_area.draw_text(
                month,
                &TextStyle::from(("sans-serif", 12).into_font()).color(&RGBColor(100, 100, 100)),
                (x, margin + usable + 8),
            )?;
        }
    }

    root.present()?;
    Ok(())
}
