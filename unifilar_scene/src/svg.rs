// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG export of a [`DrawingGroup`].
//!
//! The document has a fixed `viewBox` equal to the canvas; the group is
//! emitted as `<g id="…" transform="matrix(…)">` carrying the viewport
//! transform, so panning and zooming never touch element coordinates.

use alloc::format;
use alloc::string::String;
use core::fmt::Write as _;

use kurbo::Affine;
use peniko::Color;
use unifilar_projection::Canvas;

use crate::element::{ClickTarget, Element, Shape, Style};
use crate::group::DrawingGroup;

/// Serializes `group` as a standalone SVG document.
#[must_use]
pub fn to_svg(group: &DrawingGroup, canvas: Canvas, viewport: Affine) -> String {
    let mut svg = String::new();
    let w = fmt_num(canvas.width);
    let h = fmt_num(canvas.height);
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
    );
    let _ = write!(
        svg,
        "<g id=\"{}\" transform=\"{}\">",
        escape(group.id()),
        affine_to_svg_matrix(viewport)
    );
    for el in group.elements() {
        write_element(&mut svg, el);
    }
    svg.push_str("</g></svg>");
    svg
}

fn write_element(out: &mut String, el: &Element) {
    let attrs = style_attrs(&el.style, el.target.as_ref());
    match &el.shape {
        Shape::Rect(r) => {
            let _ = write!(
                out,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{attrs}/>",
                fmt_num(r.x0),
                fmt_num(r.y0),
                fmt_num(r.width()),
                fmt_num(r.height()),
            );
        }
        Shape::Segment(line) => {
            let _ = write!(
                out,
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"{attrs}/>",
                fmt_num(line.p0.x),
                fmt_num(line.p0.y),
                fmt_num(line.p1.x),
                fmt_num(line.p1.y),
            );
        }
        Shape::Triangle(points) => {
            out.push_str("<polygon points=\"");
            for (i, p) in points.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                let _ = write!(out, "{},{}", fmt_num(p.x), fmt_num(p.y));
            }
            let _ = write!(out, "\"{attrs}/>");
        }
        Shape::Text { anchor, text } => {
            let _ = write!(
                out,
                "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\"{attrs}>{}</text>",
                fmt_num(anchor.x),
                fmt_num(anchor.y),
                escape(text),
            );
        }
    }
}

fn style_attrs(style: &Style, target: Option<&ClickTarget>) -> String {
    let mut attrs = String::new();
    if let Some(class) = style.class {
        let _ = write!(attrs, " class=\"{class}\"");
    }
    match style.fill {
        Some(fill) => write_paint(&mut attrs, "fill", fill),
        None => attrs.push_str(" fill=\"none\""),
    }
    if let Some(stroke) = style.stroke {
        write_paint(&mut attrs, "stroke", stroke.color);
        let _ = write!(attrs, " stroke-width=\"{}\"", fmt_num(stroke.width));
        if let Some([dash, gap]) = stroke.dash {
            let _ = write!(
                attrs,
                " stroke-dasharray=\"{} {}\"",
                fmt_num(dash),
                fmt_num(gap)
            );
        }
    }
    if let Some(ClickTarget::SelectLine(name)) = target {
        let _ = write!(attrs, " data-line=\"{}\"", escape(name));
    }
    attrs
}

fn write_paint(attrs: &mut String, name: &str, color: Color) {
    let (hex, alpha) = color_to_svg(color);
    let _ = write!(attrs, " {name}=\"{hex}\"");
    if alpha < 1.0 {
        let _ = write!(attrs, " {name}-opacity=\"{}\"", fmt_num(f64::from(alpha)));
    }
}

fn color_to_svg(color: Color) -> (String, f32) {
    let rgba = color.to_rgba8();
    let a = f32::from(rgba.a) / 255.0;
    (format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b), a)
}

fn affine_to_svg_matrix(xf: Affine) -> String {
    // [a, b, c, d, e, f] maps to
    // [ a c e ]
    // [ b d f ]
    let c = xf.as_coeffs();
    format!(
        "matrix({} {} {} {} {} {})",
        fmt_num(c[0]),
        fmt_num(c[1]),
        fmt_num(c[2]),
        fmt_num(c[3]),
        fmt_num(c[4]),
        fmt_num(c[5]),
    )
}

fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "integers within canvas range print without a fraction"
    )]
    let i = v as i64;
    let diff = (i as f64) - v;
    if diff > -1e-9 && diff < 1e-9 {
        return format!("{i}");
    }

    let mut s = format!("{v:.3}");
    while s.contains('.') && s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" {
        s.remove(0);
    }
    s
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
