//! Inline SVG line chart for period-indexed sector series.

use crate::domain::timeseries::TimeSeries;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 360.0;
const PADDING_LEFT: f64 = 70.0;
const PADDING_RIGHT: f64 = 180.0;
const PADDING_Y: f64 = 30.0;

const PALETTE: [&str; 10] = [
    "#2563eb", "#dc2626", "#16a34a", "#d97706", "#7c3aed", "#0891b2", "#db2777", "#65a30d",
    "#ea580c", "#475569",
];

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn series_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Render one polyline per series; gaps in a series split its line.
///
/// Returns an empty string when there is nothing to plot.
pub fn generate_line_chart_svg(ts: &TimeSeries) -> String {
    let Some((min_v, max_v)) = ts.value_bounds() else {
        return String::new();
    };

    let plot_w = WIDTH - PADDING_LEFT - PADDING_RIGHT;
    let plot_h = HEIGHT - 2.0 * PADDING_Y;
    let range = max_v - min_v;
    let scale_y = if range > 0.0 { plot_h / range } else { 1.0 };
    let step_x = if ts.index.len() > 1 {
        plot_w / (ts.index.len() - 1) as f64
    } else {
        0.0
    };
    let x_at = |i: usize| PADDING_LEFT + i as f64 * step_x;
    let y_at = |v: f64| {
        if range > 0.0 {
            HEIGHT - PADDING_Y - (v - min_v) * scale_y
        } else {
            HEIGHT / 2.0
        }
    };

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
        w = WIDTH,
        h = HEIGHT
    );
    svg.push_str(&format!(
        r##"<rect width="{}" height="{}" fill="#ffffff"/>"##,
        WIDTH, HEIGHT
    ));

    // Axes
    svg.push_str(&format!(
        r##"<line x1="{x}" y1="{top}" x2="{x}" y2="{bottom}" stroke="#9ca3af"/>"##,
        x = PADDING_LEFT,
        top = PADDING_Y,
        bottom = HEIGHT - PADDING_Y
    ));
    svg.push_str(&format!(
        r##"<line x1="{left}" y1="{y}" x2="{right}" y2="{y}" stroke="#9ca3af"/>"##,
        left = PADDING_LEFT,
        right = PADDING_LEFT + plot_w,
        y = HEIGHT - PADDING_Y
    ));
    svg.push_str(&format!(
        r##"<text x="{x}" y="{y}" font-size="11" text-anchor="end" fill="#374151">{v:.1}</text>"##,
        x = PADDING_LEFT - 6.0,
        y = PADDING_Y + 4.0,
        v = max_v
    ));
    svg.push_str(&format!(
        r##"<text x="{x}" y="{y}" font-size="11" text-anchor="end" fill="#374151">{v:.1}</text>"##,
        x = PADDING_LEFT - 6.0,
        y = HEIGHT - PADDING_Y,
        v = min_v
    ));
    if let (Some(first), Some(last)) = (ts.index.first(), ts.index.last()) {
        svg.push_str(&format!(
            r##"<text x="{x}" y="{y}" font-size="11" fill="#374151">{label}</text>"##,
            x = PADDING_LEFT,
            y = HEIGHT - PADDING_Y + 16.0,
            label = escape_xml(first)
        ));
        if ts.index.len() > 1 {
            svg.push_str(&format!(
                r##"<text x="{x}" y="{y}" font-size="11" text-anchor="end" fill="#374151">{label}</text>"##,
                x = PADDING_LEFT + plot_w,
                y = HEIGHT - PADDING_Y + 16.0,
                label = escape_xml(last)
            ));
        }
    }

    for (si, series) in ts.series.iter().enumerate() {
        let color = series_color(si);

        let mut segment: Vec<String> = Vec::new();
        let mut segments: Vec<Vec<String>> = Vec::new();
        for (i, value) in series.values.iter().enumerate() {
            match value {
                Some(v) => segment.push(format!("{:.1},{:.1}", x_at(i), y_at(*v))),
                None if !segment.is_empty() => segments.push(std::mem::take(&mut segment)),
                None => {}
            }
        }
        if !segment.is_empty() {
            segments.push(segment);
        }

        for points in &segments {
            if points.len() == 1 {
                let (cx, cy) = points[0].split_once(',').unwrap_or(("0", "0"));
                svg.push_str(&format!(
                    r#"<circle cx="{}" cy="{}" r="3" fill="{}"/>"#,
                    cx, cy, color
                ));
            } else {
                svg.push_str(&format!(
                    r#"<polyline fill="none" stroke="{}" stroke-width="2" points="{}"/>"#,
                    color,
                    points.join(" ")
                ));
            }
        }

        // Legend
        let ly = PADDING_Y + 16.0 * si as f64;
        let lx = WIDTH - PADDING_RIGHT + 16.0;
        svg.push_str(&format!(
            r#"<rect x="{}" y="{}" width="10" height="10" fill="{}"/>"#,
            lx,
            ly - 9.0,
            color
        ));
        svg.push_str(&format!(
            r##"<text x="{}" y="{}" font-size="11" fill="#111827">{}</text>"##,
            lx + 14.0,
            ly,
            escape_xml(&series.sector)
        ));
    }

    svg.push_str("</svg>");
    svg
}
