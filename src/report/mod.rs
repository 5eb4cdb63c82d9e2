//! JSON, text and HTML report generation.

use crate::graph::{LineGraph, SampledCurve};
use crate::stats::{BreakdownRow, ShooterPane, TurretPane, WeaponPane};
use crate::util::format_metric;
use serde::Serialize;
use std::fs;
use std::path::Path;

const SVG_WIDTH: f64 = 720.0;
const SVG_HEIGHT: f64 = 360.0;
const SVG_MARGIN: f64 = 40.0;

pub fn write_json_report<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    fs::write(path, json).map_err(|e| e.to_string())?;
    Ok(())
}

/// Serialized form of a sampled graph.
#[derive(Debug, Serialize)]
pub struct GraphReport<'a> {
    pub domain: (f64, f64),
    pub range: (f64, f64),
    pub series: &'a [SampledCurve],
}

impl<'a> GraphReport<'a> {
    pub fn new(graph: &'a LineGraph) -> Self {
        Self {
            domain: graph.domain(),
            range: graph.range(),
            series: graph.curves(),
        }
    }
}

/// Write `graph.json` and `graph.html` into `out_dir`.
pub fn write_graph_report(graph: &LineGraph, out_dir: &Path) -> Result<(), String> {
    fs::create_dir_all(out_dir).map_err(|e| e.to_string())?;
    write_json_report(&GraphReport::new(graph), &out_dir.join("graph.json"))?;
    fs::write(out_dir.join("graph.html"), render_graph_page(graph)).map_err(|e| e.to_string())?;
    Ok(())
}

fn render_graph_page(graph: &LineGraph) -> String {
    let legend: String = graph
        .curves()
        .iter()
        .map(|c| {
            format!(
                r#"<li><span class="swatch" style="background:{}"></span>{}</li>"#,
                c.color.to_hex(),
                html_escape(&c.label)
            )
        })
        .collect();
    let body = if graph.is_empty() {
        "<p>No series.</p>".to_string()
    } else {
        format!("<ul class=\"legend\">{}</ul>", legend)
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Ranged DPS – Graph</title>
<style>body{{font-family:system-ui,sans-serif;margin:1rem;}} .legend{{list-style:none;padding:0;}} .swatch{{display:inline-block;width:12px;height:12px;margin-right:6px;}} svg{{border:1px solid #ccc;}}</style>
</head>
<body>
<h1>DPS by range</h1>
{}
{}
</body>
</html>"#,
        render_svg(graph),
        body
    )
}

/// Inline SVG line chart of every series, scaled to the graph's extents.
pub fn render_svg(graph: &LineGraph) -> String {
    let (_, domain_max) = graph.domain();
    let (_, range_max) = graph.range();
    let plot_w = SVG_WIDTH - 2.0 * SVG_MARGIN;
    let plot_h = SVG_HEIGHT - 2.0 * SVG_MARGIN;
    let to_px = |x: f64, y: f64| {
        let px = SVG_MARGIN + (x.max(0.0).min(domain_max) / domain_max) * plot_w;
        let py = if range_max > 0.0 {
            SVG_HEIGHT - SVG_MARGIN - (y.clamp(0.0, range_max) / range_max) * plot_h
        } else {
            SVG_HEIGHT - SVG_MARGIN
        };
        (px, py)
    };

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = SVG_WIDTH,
        h = SVG_HEIGHT
    );
    let (x0, y0) = to_px(0.0, 0.0);
    let (x1, y1) = to_px(domain_max, range_max);
    svg.push_str(&format!(
        r##"<line x1="{x0:.1}" y1="{y0:.1}" x2="{x1:.1}" y2="{y0:.1}" stroke="#888"/><line x1="{x0:.1}" y1="{y0:.1}" x2="{x0:.1}" y2="{y1:.1}" stroke="#888"/>"##
    ));
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" font-size="11">{}</text><text x="{:.1}" y="{:.1}" font-size="11">{}</text>"#,
        x1 - 20.0,
        y0 + 16.0,
        format_metric(domain_max, 1),
        4.0,
        y1 + 4.0,
        format_metric(range_max, 1)
    ));
    for curve in graph.curves() {
        let points: Vec<String> = curve
            .points
            .iter()
            .filter(|p| p.y.is_finite())
            .map(|p| {
                let (px, py) = to_px(p.x, p.y);
                format!("{:.1},{:.1}", px, py)
            })
            .collect();
        svg.push_str(&format!(
            r#"<polyline fill="none" stroke="{}" stroke-width="1.5" points="{}"><title>{}</title></polyline>"#,
            curve.color.to_hex(),
            points.join(" "),
            html_escape(&curve.label)
        ));
    }
    svg.push_str("</svg>");
    svg
}

pub fn render_breakdown(title: &str, rows: &[BreakdownRow]) -> String {
    let mut out = format!("{}\n", title);
    for row in rows {
        out.push_str(&format!("  {}\n", row));
    }
    out
}

pub fn render_weapon_pane(pane: &WeaponPane) -> String {
    let mut out = format!("{}\n", pane.label);
    out.push_str(&format!("  Max DPS:    {}\n", format_metric(pane.max_dps, 2)));
    out.push_str(&format!(
        "  Weapon DPS: {} (optimal range {})\n",
        format_metric(pane.weapon_dps, 2),
        pane.optimal_band_distance
    ));
    out.push_str(&render_breakdown("DPS (accuracy) by distance:", &pane.breakdown));
    out
}

pub fn render_shooter_pane(pane: &ShooterPane) -> String {
    let mut out = format!("{} with {}\n", pane.shooter, pane.weapon);
    out.push_str(&format!(
        "  Shooter DPS: {} (optimal range {})\n",
        format_metric(pane.shooter_dps, 2),
        pane.optimal_range.round()
    ));
    out.push_str(&render_breakdown("DPS (accuracy) by distance:", &pane.breakdown));
    out
}

pub fn render_turret_pane(pane: &TurretPane) -> String {
    let mut out = format!("{} ({})\n", pane.label, pane.gun);
    out.push_str(&format!("  Max DPS:     {}\n", format_metric(pane.max_dps, 2)));
    out.push_str(&format!(
        "  Weapon DPS:  {} (optimal range {})\n",
        format_metric(pane.weapon_dps, 2),
        pane.optimal_band_distance
    ));
    out.push_str(&format!(
        "  Shooter DPS: {} (optimal range {})\n",
        format_metric(pane.shooter_dps, 2),
        pane.optimal_range.round()
    ));
    out.push_str(&render_breakdown("DPS (accuracy) by distance:", &pane.breakdown));
    if let Some(fuel) = &pane.fuel {
        out.push_str(&format!(
            "  Damage per resource:     {} (optimal range {})\n",
            format_metric(fuel.damage_per_resource, 2),
            pane.optimal_range.round()
        ));
        out.push_str(&format!(
            "  Max damage per resource: {}\n",
            format_metric(fuel.max_damage_per_resource, 2)
        ));
        out.push_str(&render_breakdown(
            "Damage per resource (accuracy) by distance:",
            &fuel.breakdown,
        ));
    }
    out
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
