//! Inline SVG chart rendering.
//!
//! Charts are emitted as standalone `<svg>` strings so the HTML page
//! needs no scripts or external assets.

const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 48.0;
const MARGIN_BOTTOM: f64 = 48.0;
const GRID_LINES: usize = 5;
const MAX_X_LABELS: usize = 8;

/// A single bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: String,
}

/// A named line over a shared x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub name: String,
    pub color: String,
    pub values: Vec<f64>,
}

/// Escape text for inclusion in HTML or SVG.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Plot area derived from the outer chart size.
struct Frame {
    width: f64,
    height: f64,
}

impl Frame {
    fn new(width: u32, height: u32) -> Self {
        // keep a usable plot area even for tiny configured sizes
        Self {
            width: f64::from(width).max(MARGIN_LEFT + MARGIN_RIGHT + 40.0),
            height: f64::from(height).max(MARGIN_TOP + MARGIN_BOTTOM + 40.0),
        }
    }

    fn plot_width(&self) -> f64 {
        self.width - MARGIN_LEFT - MARGIN_RIGHT
    }

    fn plot_height(&self) -> f64 {
        self.height - MARGIN_TOP - MARGIN_BOTTOM
    }

    fn baseline(&self) -> f64 {
        MARGIN_TOP + self.plot_height()
    }

    fn y_for(&self, value: f64, max: f64) -> f64 {
        self.baseline() - value / max * self.plot_height()
    }

    fn open(&self, svg: &mut String, title: &str) {
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img" aria-label="{t}">"#,
            w = self.width,
            h = self.height,
            t = escape(title),
        ));
        svg.push_str(&format!(
            r#"<text x="{}" y="28" text-anchor="middle" font-size="15" font-weight="bold">{}</text>"#,
            self.width / 2.0,
            escape(title),
        ));
    }

    fn grid(&self, svg: &mut String, max: f64) {
        for i in 0..=GRID_LINES {
            let value = max * i as f64 / GRID_LINES as f64;
            let y = self.y_for(value, max);
            svg.push_str(&format!(
                r##"<line x1="{x1}" y1="{y:.1}" x2="{x2}" y2="{y:.1}" stroke="#E5E5E5"/><text x="{tx}" y="{ty:.1}" text-anchor="end" font-size="11">{label}</text>"##,
                x1 = MARGIN_LEFT,
                x2 = self.width - MARGIN_RIGHT,
                tx = MARGIN_LEFT - 6.0,
                ty = y + 4.0,
                label = tick_label(value),
            ));
        }
    }
}

/// Axis tick text; whole numbers print without decimals.
fn tick_label(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Largest value across `values`, never below 1 so scaling stays finite.
fn scale_max(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(1.0_f64, f64::max)
}

fn empty_chart(frame: &Frame, title: &str) -> String {
    let mut svg = String::new();
    frame.open(&mut svg, title);
    svg.push_str(&format!(
        r##"<text x="{}" y="{}" text-anchor="middle" font-size="13" fill="#888888">No data</text></svg>"##,
        frame.width / 2.0,
        frame.height / 2.0,
    ));
    svg
}

/// Render a vertical bar chart. Bars are drawn in the given order.
pub fn render_bar_chart(title: &str, bars: &[Bar], width: u32, height: u32) -> String {
    let frame = Frame::new(width, height);

    if bars.is_empty() {
        return empty_chart(&frame, title);
    }

    let max = scale_max(bars.iter().map(|b| b.value));
    let slot = frame.plot_width() / bars.len() as f64;
    let bar_width = slot * 0.8;

    let mut svg = String::new();
    frame.open(&mut svg, title);
    frame.grid(&mut svg, max);

    for (i, bar) in bars.iter().enumerate() {
        let x = MARGIN_LEFT + i as f64 * slot + slot * 0.1;
        let y = frame.y_for(bar.value, max);
        svg.push_str(&format!(
            r#"<rect x="{x:.1}" y="{y:.1}" width="{bw:.1}" height="{bh:.1}" fill="{fill}"><title>{label}: {value}</title></rect>"#,
            bw = bar_width,
            bh = frame.baseline() - y,
            fill = escape(&bar.color),
            label = escape(&bar.label),
            value = tick_label(bar.value),
        ));
        svg.push_str(&format!(
            r#"<text x="{cx:.1}" y="{ly:.1}" text-anchor="middle" font-size="12">{label}</text>"#,
            cx = x + bar_width / 2.0,
            ly = frame.baseline() + 18.0,
            label = escape(&bar.label),
        ));
    }

    svg.push_str("</svg>");
    svg
}

/// Render a multi-series line chart over shared x labels.
///
/// Series shorter than `x_labels` simply stop early.
pub fn render_line_chart(
    title: &str,
    x_labels: &[String],
    series: &[LineSeries],
    width: u32,
    height: u32,
) -> String {
    let frame = Frame::new(width, height);

    if x_labels.is_empty() || series.iter().all(|s| s.values.is_empty()) {
        return empty_chart(&frame, title);
    }

    let max = scale_max(series.iter().flat_map(|s| s.values.iter().copied()));
    let step = frame.plot_width() / (x_labels.len().saturating_sub(1)).max(1) as f64;

    let mut svg = String::new();
    frame.open(&mut svg, title);
    frame.grid(&mut svg, max);

    let label_every = x_labels.len().div_ceil(MAX_X_LABELS).max(1);
    for (i, label) in x_labels.iter().enumerate().step_by(label_every) {
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="11">{}</text>"#,
            MARGIN_LEFT + i as f64 * step,
            frame.baseline() + 18.0,
            escape(label),
        ));
    }

    for (idx, line) in series.iter().enumerate() {
        let points: Vec<String> = line
            .values
            .iter()
            .take(x_labels.len())
            .enumerate()
            .map(|(i, v)| {
                format!(
                    "{:.1},{:.1}",
                    MARGIN_LEFT + i as f64 * step,
                    frame.y_for(*v, max)
                )
            })
            .collect();
        svg.push_str(&format!(
            r#"<polyline fill="none" stroke="{}" stroke-width="1.5" points="{}"/>"#,
            escape(&line.color),
            points.join(" "),
        ));

        // legend, top-right
        let ly = MARGIN_TOP - 14.0 + idx as f64 * 16.0;
        let lx = frame.width - MARGIN_RIGHT - 110.0;
        svg.push_str(&format!(
            r#"<rect x="{lx}" y="{:.1}" width="12" height="3" fill="{}"/><text x="{:.1}" y="{:.1}" font-size="12">{}</text>"#,
            ly - 4.0,
            escape(&line.color),
            lx + 18.0,
            ly,
            escape(&line.name),
        ));
    }

    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(label: &str, value: f64, color: &str) -> Bar {
        Bar {
            label: label.to_string(),
            value,
            color: color.to_string(),
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_bar_chart_draws_one_rect_per_bar() {
        let bars = vec![bar("1", 10.0, "#FF0000"), bar("2", 5.0, "#00FF00")];

        let svg = render_bar_chart("Seasons", &bars, 400, 300);

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<rect").count(), 2);
        assert!(svg.contains(r##"fill="#FF0000""##));
        assert!(svg.contains(r##"fill="#00FF00""##));
        assert!(svg.contains(">Seasons</text>"));
    }

    #[test]
    fn test_bar_chart_tallest_bar_fills_plot() {
        let bars = vec![bar("a", 100.0, "red"), bar("b", 50.0, "blue")];

        let svg = render_bar_chart("t", &bars, 400, 300);

        // plot height = 300 - 48 - 48
        assert!(svg.contains(r#"height="204.0" fill="red""#));
        assert!(svg.contains(r#"height="102.0" fill="blue""#));
    }

    #[test]
    fn test_bar_chart_grid_lines_and_ticks() {
        let bars = vec![bar("a", 50.0, "red")];

        let svg = render_bar_chart("t", &bars, 400, 300);

        assert_eq!(svg.matches("<line").count(), GRID_LINES + 1);
        assert!(svg.contains(">0</text>"));
        assert!(svg.contains(">50</text>"));
        assert!(svg.contains(">10</text>"));
    }

    #[test]
    fn test_empty_bar_chart() {
        let svg = render_bar_chart("Nothing", &[], 400, 300);
        assert!(svg.contains("No data"));
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn test_line_chart() {
        let labels: Vec<String> = (1..=20).map(|d| format!("2011-01-{:02}", d)).collect();
        let series = vec![
            LineSeries {
                name: "Casual".to_string(),
                color: "#1F77B4".to_string(),
                values: (0..20).map(|v| v as f64).collect(),
            },
            LineSeries {
                name: "Registered".to_string(),
                color: "#FF7F0E".to_string(),
                values: (0..20).map(|v| (v * 2) as f64).collect(),
            },
        ];

        let svg = render_line_chart("Pattern", &labels, &series, 600, 300);

        assert_eq!(svg.matches("<polyline").count(), 2);
        assert!(svg.contains(">Casual</text>"));
        assert!(svg.contains(">Registered</text>"));
        assert!(svg.contains(">2011-01-01</text>"));
        // 20 labels thinned to every third
        assert!(!svg.contains(">2011-01-02</text>"));
    }

    #[test]
    fn test_line_chart_without_points() {
        let svg = render_line_chart("Pattern", &[], &[], 600, 300);
        assert!(svg.contains("No data"));
    }
}
