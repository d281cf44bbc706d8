//! Inline SVG images for the dashboard page.
//!
//! - [`line_chart`]: articles per month, with markers, grid and rotated labels
//! - [`bar_chart`]: article count of the top domains
//! - [`word_cloud`]: a laid-out [`WordCloud`]
//!
//! The two charts are drawn with `plotters` into an in-memory SVG string.
//! Category labels under the x axis are added afterwards at the pixel
//! positions plotters reports, because its font transforms only rotate in
//! quarter turns. All text we write ourselves is XML-escaped.

use crate::error::DashboardError;
use crate::models::{DomainCount, MonthCount};
use crate::utils::escape_html;
use crate::wordcloud::WordCloud;
use plotters::prelude::*;
use std::fmt::{self, Write};

const CHART_WIDTH: u32 = 720;
const CHART_HEIGHT: u32 = 400;
const FONT: &str = "sans-serif";
const X_LABEL_AREA: u32 = 96;
const Y_LABEL_AREA: u32 = 56;
const SERIES_COLOR: RGBColor = RGBColor(0x1f, 0x77, 0xb4);

/// Top of the count axis, leaving a little headroom above the largest value.
fn axis_top(max: usize) -> usize {
    max + max / 10 + 1
}

/// Rotated category labels anchored at pixel positions on the x axis.
fn write_x_labels(svg: &mut String, labels: &[((i32, i32), &str)]) -> fmt::Result {
    let mut out = String::new();
    for &((x, y), label) in labels {
        writeln!(
            out,
            r#"<text transform="translate({x} {}) rotate(-45)" text-anchor="end" font-family="{FONT}" font-size="12">{}</text>"#,
            y + 14,
            escape_html(label)
        )?;
    }
    match svg.rfind("</svg>") {
        Some(end) => svg.insert_str(end, &out),
        None => svg.push_str(&out),
    }
    Ok(())
}

/// Line chart of article counts per month.
pub fn line_chart(series: &[MonthCount]) -> Result<String, DashboardError> {
    let mut svg = String::new();
    let mut labels = Vec::with_capacity(series.len());
    {
        let root = SVGBackend::with_string(&mut svg, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let max = series.iter().map(|m| m.count).max().unwrap_or(0);
        let mut chart = ChartBuilder::on(&root)
            .caption("Jumlah Artikel per Bulan", (FONT, 18))
            .margin(16)
            .x_label_area_size(X_LABEL_AREA)
            .y_label_area_size(Y_LABEL_AREA)
            .build_cartesian_2d((0..series.len().max(1)).into_segmented(), 0..axis_top(max))?;
        chart
            .configure_mesh()
            .x_desc("Bulan")
            .y_desc("Jumlah Artikel")
            .x_label_formatter(&|_| String::new())
            .light_line_style(&WHITE)
            .label_style((FONT, 12))
            .draw()?;

        let points = || {
            series
                .iter()
                .enumerate()
                .map(|(i, m)| (SegmentValue::CenterOf(i), m.count))
        };
        chart.draw_series(LineSeries::new(points(), SERIES_COLOR.stroke_width(2)))?;
        chart.draw_series(points().map(|point| Circle::new(point, 4, SERIES_COLOR.filled())))?;

        for (i, month) in series.iter().enumerate() {
            let anchor = chart.backend_coord(&(SegmentValue::CenterOf(i), 0));
            labels.push((anchor, month.month.as_str()));
        }
        root.present()?;
    }
    write_x_labels(&mut svg, &labels)?;
    Ok(svg)
}

/// Bar chart of article counts per domain, in the order given.
pub fn bar_chart(domains: &[DomainCount]) -> Result<String, DashboardError> {
    let mut svg = String::new();
    let mut labels = Vec::with_capacity(domains.len());
    {
        let root = SVGBackend::with_string(&mut svg, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let max = domains.iter().map(|d| d.count).max().unwrap_or(0);
        let mut chart = ChartBuilder::on(&root)
            .caption("Artikel per Domain", (FONT, 18))
            .margin(16)
            .x_label_area_size(X_LABEL_AREA)
            .y_label_area_size(Y_LABEL_AREA)
            .build_cartesian_2d((0..domains.len().max(1)).into_segmented(), 0..axis_top(max))?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Domain")
            .y_desc("Jumlah Artikel")
            .x_label_formatter(&|_| String::new())
            .light_line_style(&WHITE)
            .label_style((FONT, 12))
            .draw()?;

        chart.draw_series(
            Histogram::vertical(&chart)
                .style(SERIES_COLOR.filled())
                .margin(16)
                .data(domains.iter().enumerate().map(|(i, d)| (i, d.count))),
        )?;

        for (i, domain) in domains.iter().enumerate() {
            let anchor = chart.backend_coord(&(SegmentValue::CenterOf(i), 0));
            labels.push((anchor, domain.domain.as_str()));
        }
        root.present()?;
    }
    write_x_labels(&mut svg, &labels)?;
    Ok(svg)
}

/// Word cloud image.
pub fn word_cloud(cloud: &WordCloud) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let (width, height) = (f64::from(cloud.width), f64::from(cloud.height));

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width:.0} {height:.0}" role="img" aria-label="Word Cloud Judul Artikel">"#
    )?;
    writeln!(
        out,
        r#"<rect x="0" y="0" width="{width:.0}" height="{height:.0}" fill="{}"/>"#,
        cloud.background
    )?;

    for word in &cloud.words {
        // Baseline sits at roughly 80% of the line box.
        let (tx, ty, rotation) = if word.vertical {
            (word.x + word.width * 0.8, word.y + word.height, " rotate(-90)")
        } else {
            (word.x, word.y + word.height * 0.8, "")
        };
        writeln!(
            out,
            r#"<text transform="translate({tx:.1} {ty:.1}){rotation}" font-size="{:.0}" font-family="DejaVu Sans, Arial, sans-serif" fill="{}">{}</text>"#,
            word.font_size,
            word.color,
            escape_html(&word.word)
        )?;
    }

    out.push_str("</svg>\n");
    Ok(out)
}
