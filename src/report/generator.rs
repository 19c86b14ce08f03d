//! Dashboard rendering.
//!
//! This module turns a [`Dashboard`] into a standalone HTML page, a
//! Markdown document, or JSON.

use super::charts::{escape, render_bar_chart, render_line_chart, Bar, LineSeries};
use crate::config::{ColorBy, RenderConfig};
use crate::models::{Dashboard, HourSummary, RentalTotals, Season, SeasonSummary, Weather};
use anyhow::Result;

const BACKGROUND: &str = "Bike-sharing systems are a new generation of traditional bike rentals \
where the whole process, from membership to rental and return, has become automatic. \
Through these systems a user can easily rent a bike from one position and return it at another. \
There are currently over 500 bike-sharing programs around the world, composed of over \
500 thousand bicycles, and great interest in them due to their role in traffic, environmental \
and health issues.\n\n\
Apart from their real-world applications, the data these systems generate makes them attractive \
for research. Unlike other transport services such as bus or subway, the duration of travel, \
departure and arrival position are explicitly recorded. This turns a bike-sharing system into \
a virtual sensor network that can be used to sense mobility in the city, so most important \
events in the city are expected to be detectable by monitoring this data.";

const PAGE_STYLE: &str = "body{font-family:sans-serif;margin:0;display:flex;color:#262730}\
aside{width:300px;background:#F0F2F6;padding:24px;box-sizing:border-box;min-height:100vh}\
main{flex:1;padding:24px 48px}\
.metrics{display:flex;gap:48px}\
.metric .label{font-size:14px}\
.metric .value{font-size:36px}\
table{border-collapse:collapse}\
td,th{border:1px solid #DDDDDD;padding:4px 12px;text-align:right}\
svg{max-width:100%;height:auto}";

/// Bar colour per season row, in row order.
pub fn season_colors(rows: &[SeasonSummary], render: &RenderConfig) -> Vec<String> {
    let palette = &render.season_palette;

    rows.iter()
        .enumerate()
        .map(|(rank, row)| {
            let index = match render.color_by {
                ColorBy::Season => usize::from(row.season).checked_sub(1),
                ColorBy::Rank => Some(rank),
            };
            index
                .filter(|_| !palette.is_empty())
                .map(|i| palette[i % palette.len()].clone())
                .unwrap_or_else(|| render.base_color.clone())
        })
        .collect()
}

/// Bar colour per hour row, in row order. Exactly one bar is highlighted
/// when the highlighted hour (or rank) is present.
pub fn hour_colors(rows: &[HourSummary], render: &RenderConfig) -> Vec<String> {
    rows.iter()
        .enumerate()
        .map(|(rank, row)| {
            let highlighted = match render.color_by {
                ColorBy::Season => row.hr == render.highlight_hour,
                ColorBy::Rank => rank == render.highlight_rank,
            };
            if highlighted {
                render.highlight_color.clone()
            } else {
                render.base_color.clone()
            }
        })
        .collect()
}

/// Format a count with thousands separators.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

/// Season code legend lines, codes 1-4.
fn season_legend() -> Vec<String> {
    (1..=4u8)
        .map(|code| format!("{}: {}", code, Season::from(code)))
        .collect()
}

fn season_chart(dashboard: &Dashboard, render: &RenderConfig) -> String {
    let colors = season_colors(&dashboard.by_season, render);
    let bars: Vec<Bar> = dashboard
        .by_season
        .iter()
        .zip(colors)
        .map(|(row, color)| Bar {
            label: row.season.to_string(),
            value: row.customer_count as f64,
            color,
        })
        .collect();

    render_bar_chart(
        "Customers by Season",
        &bars,
        render.chart_width,
        render.chart_height,
    )
}

fn hour_chart(dashboard: &Dashboard, render: &RenderConfig) -> String {
    let colors = hour_colors(&dashboard.by_hour, render);
    let bars: Vec<Bar> = dashboard
        .by_hour
        .iter()
        .zip(colors)
        .map(|(row, color)| Bar {
            label: row.hr.to_string(),
            value: row.customer_count as f64,
            color,
        })
        .collect();

    render_bar_chart(
        "Customers by Hour",
        &bars,
        render.chart_width,
        render.chart_height,
    )
}

fn rental_pattern_chart(dashboard: &Dashboard, render: &RenderConfig) -> String {
    let labels: Vec<String> = dashboard
        .daily_series
        .iter()
        .map(|p| p.dteday.format("%Y-%m-%d").to_string())
        .collect();
    let series = vec![
        LineSeries {
            name: "Casual".to_string(),
            color: render.casual_color.clone(),
            values: dashboard.daily_series.iter().map(|p| p.casual as f64).collect(),
        },
        LineSeries {
            name: "Registered".to_string(),
            color: render.registered_color.clone(),
            values: dashboard
                .daily_series
                .iter()
                .map(|p| p.registered as f64)
                .collect(),
        },
    ];

    render_line_chart(
        "Casual and Registered Rental Pattern",
        &labels,
        &series,
        render.chart_width,
        render.chart_height,
    )
}

/// Generate the full HTML page.
pub fn generate_html_report(dashboard: &Dashboard, render: &RenderConfig) -> String {
    let mut page = String::new();

    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str(&format!("<title>{}</title>\n", escape(&render.title)));
    page.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", PAGE_STYLE));

    // Sidebar
    page.push_str("<aside>\n<h3>Background</h3>\n");
    for paragraph in BACKGROUND.split("\n\n") {
        page.push_str(&format!("<p>{}</p>\n", escape(paragraph)));
    }
    page.push_str("</aside>\n<main>\n");

    // Header
    page.push_str(&format!("<h1>{} &#x1F6B4;</h1>\n", escape(&render.title)));
    page.push_str("<h2>Statistics</h2>\n");
    page.push_str(&generate_metrics_html(&dashboard.totals));

    // Season chart and legend
    page.push_str("<h2>Customers' Favourite Season</h2>\n");
    page.push_str(&season_chart(dashboard, render));
    page.push_str("\n<h3>Description</h3>\n<p>");
    page.push_str(&season_legend().join("<br>\n"));
    page.push_str("</p>\n");

    // Hour chart
    page.push_str("<h2>Favourite and Least Favourite Hours</h2>\n");
    page.push_str(&hour_chart(dashboard, render));
    page.push('\n');

    // Weather table
    page.push_str("<h2>Rentals by Weather</h2>\n");
    page.push_str(&generate_weather_html(dashboard));

    // Line chart
    page.push_str("<h2>Casual and Registered Rental Pattern</h2>\n");
    page.push_str(&rental_pattern_chart(dashboard, render));
    page.push('\n');

    page.push_str(&format!(
        "<footer><p><small>Generated {} from {} ({} rows) and {} ({} rows)</small></p></footer>\n",
        dashboard.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        escape(&dashboard.metadata.day_source),
        dashboard.metadata.daily_rows,
        escape(&dashboard.metadata.hour_source),
        dashboard.metadata.hourly_rows,
    ));
    page.push_str("</main>\n</body>\n</html>\n");

    page
}

fn generate_metrics_html(totals: &RentalTotals) -> String {
    let mut section = String::from("<div class=\"metrics\">\n");

    for (label, value) in [
        ("Total Rentals", totals.total),
        ("Member Rentals", totals.registered),
        ("Non-member Rentals", totals.casual),
    ] {
        section.push_str(&format!(
            "<div class=\"metric\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>\n",
            label,
            format_count(value)
        ));
    }

    section.push_str("</div>\n");
    section
}

fn generate_weather_html(dashboard: &Dashboard) -> String {
    if dashboard.by_weather.is_empty() {
        return "<p>No data</p>\n".to_string();
    }

    let mut table = String::from(
        "<table>\n<tr><th>Weather</th><th>Days</th><th>Rentals</th></tr>\n",
    );
    for row in &dashboard.by_weather {
        table.push_str(&format!(
            "<tr><td>{} ({})</td><td>{}</td><td>{}</td></tr>\n",
            row.weathersit,
            escape(&Weather::from(row.weathersit).to_string()),
            row.distinct_day_count,
            format_count(row.rental_sum)
        ));
    }
    table.push_str("</table>\n");

    table
}

/// Generate a Markdown rendering of the dashboard.
pub fn generate_markdown_report(dashboard: &Dashboard, render: &RenderConfig) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", render.title));
    output.push_str(&format!(
        "*Generated {} from `{}` and `{}`*\n\n",
        dashboard.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        dashboard.metadata.day_source,
        dashboard.metadata.hour_source
    ));

    output.push_str("## Background\n\n");
    for paragraph in BACKGROUND.split("\n\n") {
        output.push_str(paragraph);
        output.push_str("\n\n");
    }

    output.push_str("## Statistics\n\n");
    output.push_str("| Total Rentals | Member Rentals | Non-member Rentals |\n");
    output.push_str("|:---:|:---:|:---:|\n");
    output.push_str(&format!(
        "| {} | {} | {} |\n\n",
        format_count(dashboard.totals.total),
        format_count(dashboard.totals.registered),
        format_count(dashboard.totals.casual)
    ));

    output.push_str("## Customers' Favourite Season\n\n");
    output.push_str("| Season | Customers |\n|:---|---:|\n");
    for row in &dashboard.by_season {
        output.push_str(&format!(
            "| {} ({}) | {} |\n",
            row.season,
            Season::from(row.season),
            row.customer_count
        ));
    }
    output.push('\n');
    for line in season_legend() {
        output.push_str(&format!("- {}\n", line));
    }
    output.push('\n');

    output.push_str("## Favourite and Least Favourite Hours\n\n");
    output.push_str("| Hour | Customers |\n|:---|---:|\n");
    for row in &dashboard.by_hour {
        output.push_str(&format!("| {} | {} |\n", row.hr, row.customer_count));
    }
    output.push('\n');

    output.push_str("## Rentals by Weather\n\n");
    output.push_str("| Weather | Days | Rentals |\n|:---|---:|---:|\n");
    for row in &dashboard.by_weather {
        output.push_str(&format!(
            "| {} ({}) | {} | {} |\n",
            row.weathersit,
            Weather::from(row.weathersit),
            row.distinct_day_count,
            format_count(row.rental_sum)
        ));
    }
    output.push('\n');

    output.push_str("## Casual and Registered Rental Pattern\n\n");
    output.push_str("| Date | Casual | Registered |\n|:---|---:|---:|\n");
    for point in &dashboard.daily_series {
        output.push_str(&format!(
            "| {} | {} | {} |\n",
            point.dteday.format("%Y-%m-%d"),
            format_count(point.casual),
            format_count(point.registered)
        ));
    }
    output.push('\n');

    output
}

/// Generate a JSON rendering of the dashboard.
pub fn generate_json_report(dashboard: &Dashboard) -> Result<String> {
    serde_json::to_string_pretty(dashboard).map_err(Into::into)
}
