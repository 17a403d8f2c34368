//! SVG rendering of a computed layout.

use std::fmt::Write;

use crate::domain::Layout;

const NODE_RADIUS: f64 = 22.0;

/// Renders `layout` as a standalone SVG document.
pub fn render_svg(layout: &Layout) -> String {
    let mut svg = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = layout.width,
        h = layout.height
    );
    svg.push_str("  <g stroke=\"#555\" stroke-width=\"2\">\n");
    for e in &layout.edges {
        let _ = writeln!(
            svg,
            r#"    <line x1="{}" y1="{}" x2="{}" y2="{}"/>"#,
            e.x1, e.y1, e.x2, e.y2
        );
    }
    svg.push_str("  </g>\n");
    for n in &layout.nodes {
        let _ = writeln!(
            svg,
            r##"  <g id="node-{id}"><circle cx="{x}" cy="{y}" r="{r}" fill="#e8f0fe" stroke="#1a73e8" stroke-width="2"/><text x="{x}" y="{y}" text-anchor="middle" dominant-baseline="central" font-family="sans-serif" font-size="14">{label}</text></g>"##,
            id = n.id,
            x = n.x,
            y = n.y,
            r = NODE_RADIUS,
            label = escape_xml(&n.label)
        );
    }
    svg.push_str("</svg>\n");
    svg
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
