use std::fs;
use std::io;
use std::path::Path;
use std::sync::OnceLock;
use regex::Regex;
use log::{debug, warn};
use roxmltree::{Document, Node, ParsingOptions};
use crate::models::svg::{Color, FillRule, LineCap, LineJoin, Matrix, Rect, Shape, Stroke, SvgDrawing};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

// 只用於遞迴的容器元素
const CONTAINER_TAGS: [&str; 4] = ["g", "a", "svg", "switch"];

// 不產生繪圖內容的元素，直接略過
const NON_RENDERING_TAGS: [&str; 13] = [
    "defs", "clipPath", "mask", "symbol", "linearGradient", "radialGradient", "pattern",
    "style", "title", "desc", "metadata", "marker", "filter",
];

fn number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?").expect("number pattern is valid")
    })
}

fn transform_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"([A-Za-z]+)\s*\(([^)]*)\)").expect("transform pattern is valid")
    })
}

/// 讀取並解析 SVG 檔案
pub fn load_svg(path: &Path) -> io::Result<SvgDrawing> {
    let text = fs::read_to_string(path)?;
    parse_svg(&text).map_err(|e| {
        io::Error::new(e.kind(), format!("無法解析 SVG 檔案 {}：{}", path.display(), e))
    })
}

/// 將 SVG 文字解析為可轉換的圖形清單
pub fn parse_svg(text: &str) -> io::Result<SvgDrawing> {
    let options = ParsingOptions { allow_dtd: true, ..ParsingOptions::default() };
    let doc = Document::parse_with_options(text, options)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("根元素必須是 <svg>，實際為 <{}>", root.tag_name().name()),
        ));
    }

    let view_box = parse_view_box(root);
    let mut shapes = Vec::new();
    let root_transform = root.attribute("transform").map(parse_transform).unwrap_or_default();
    collect_shapes(root, root_transform, own_opacity(root), &mut shapes);
    debug!("解析 SVG 完成，共 {} 個圖形", shapes.len());

    Ok(SvgDrawing { view_box, shapes })
}

fn parse_view_box(root: Node) -> Option<Rect> {
    if let Some(value) = root.attribute("viewBox") {
        let numbers = parse_numbers(value);
        if numbers.len() == 4 && numbers[2] > 0.0 && numbers[3] > 0.0 {
            return Some(Rect { x: numbers[0], y: numbers[1], width: numbers[2], height: numbers[3] });
        }
        warn!("無效的 viewBox：{}", value);
    }

    let width = root.attribute("width").and_then(parse_length)?;
    let height = root.attribute("height").and_then(parse_length)?;
    if width > 0.0 && height > 0.0 {
        Some(Rect { x: 0.0, y: 0.0, width, height })
    } else {
        None
    }
}

fn is_svg_element(node: &Node) -> bool {
    node.is_element() && matches!(node.tag_name().namespace(), None | Some(SVG_NS))
}

fn collect_shapes(parent: Node, transform: Matrix, opacity: f64, shapes: &mut Vec<Shape>) {
    for child in parent.children().filter(is_svg_element) {
        if style_value(child, "display") == Some("none") {
            continue;
        }

        let tag = child.tag_name().name();
        let child_transform = match child.attribute("transform") {
            Some(value) => transform.then(&parse_transform(value)),
            None => transform,
        };
        let child_opacity = opacity * own_opacity(child);

        if CONTAINER_TAGS.contains(&tag) {
            collect_shapes(child, child_transform, child_opacity, shapes);
        } else if NON_RENDERING_TAGS.contains(&tag) {
            continue;
        } else if let Some(geometry) = shape_geometry(child) {
            shapes.push(build_shape(child, geometry, child_transform, child_opacity));
        } else {
            debug!("略過不支援或無幾何內容的元素 <{}>", tag);
        }
    }
}

fn build_shape(node: Node, geometry: String, transform: Matrix, opacity: f64) -> Shape {
    let fill_opacity = inherited_value(node, "fill-opacity").and_then(parse_opacity).unwrap_or(1.0);
    let fill = parse_paint(node, inherited_value(node, "fill").unwrap_or("black"))
        .map(|c| c.with_opacity(fill_opacity * opacity));

    let fill_rule = match inherited_value(node, "fill-rule") {
        Some("evenodd") => FillRule::EvenOdd,
        _ => FillRule::NonZero,
    };

    let stroke = inherited_value(node, "stroke")
        .and_then(|value| parse_paint(node, value))
        .and_then(|color| {
            let width = inherited_value(node, "stroke-width").and_then(parse_length).unwrap_or(1.0);
            if width <= 0.0 {
                return None;
            }
            let stroke_opacity = inherited_value(node, "stroke-opacity").and_then(parse_opacity).unwrap_or(1.0);
            Some(Stroke {
                color: color.with_opacity(stroke_opacity * opacity),
                width,
                line_cap: match inherited_value(node, "stroke-linecap") {
                    Some("round") => LineCap::Round,
                    Some("square") => LineCap::Square,
                    _ => LineCap::Flat,
                },
                line_join: match inherited_value(node, "stroke-linejoin") {
                    Some("round") => LineJoin::Round,
                    Some("bevel") => LineJoin::Bevel,
                    _ => LineJoin::Miter,
                },
            })
        });

    Shape { geometry, fill_rule, fill, stroke, transform }
}

fn shape_geometry(node: Node) -> Option<String> {
    let num = |name: &str| node.attribute(name).and_then(parse_length);
    match node.tag_name().name() {
        "path" => {
            let data = node.attribute("d")?.split_whitespace().collect::<Vec<_>>().join(" ");
            if data.is_empty() { None } else { Some(data) }
        }
        "rect" => rect_geometry(
            num("x").unwrap_or(0.0),
            num("y").unwrap_or(0.0),
            num("width")?,
            num("height")?,
            num("rx"),
            num("ry"),
        ),
        "circle" => {
            let r = num("r")?;
            ellipse_geometry(num("cx").unwrap_or(0.0), num("cy").unwrap_or(0.0), r, r)
        }
        "ellipse" => ellipse_geometry(
            num("cx").unwrap_or(0.0),
            num("cy").unwrap_or(0.0),
            num("rx")?,
            num("ry")?,
        ),
        "line" => Some(format!(
            "M{},{} L{},{}",
            fmt_num(num("x1").unwrap_or(0.0)),
            fmt_num(num("y1").unwrap_or(0.0)),
            fmt_num(num("x2").unwrap_or(0.0)),
            fmt_num(num("y2").unwrap_or(0.0)),
        )),
        "polyline" => points_geometry(node.attribute("points")?, false),
        "polygon" => points_geometry(node.attribute("points")?, true),
        _ => None,
    }
}

pub fn rect_geometry(x: f64, y: f64, w: f64, h: f64, rx: Option<f64>, ry: Option<f64>) -> Option<String> {
    if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
        return None;
    }
    let (rx, ry) = match (rx, ry) {
        (Some(rx), Some(ry)) => (rx, ry),
        (Some(r), None) | (None, Some(r)) => (r, r),
        (None, None) => (0.0, 0.0),
    };
    let rx = rx.clamp(0.0, w / 2.0);
    let ry = ry.clamp(0.0, h / 2.0);

    if rx == 0.0 || ry == 0.0 {
        return Some(format!(
            "M{},{} H{} V{} H{} Z",
            fmt_num(x), fmt_num(y), fmt_num(x + w), fmt_num(y + h), fmt_num(x)
        ));
    }

    let arc = format!("A{},{} 0 0 1", fmt_num(rx), fmt_num(ry));
    Some(format!(
        "M{},{} H{} {arc} {},{} V{} {arc} {},{} H{} {arc} {},{} V{} {arc} {},{} Z",
        fmt_num(x + rx), fmt_num(y),
        fmt_num(x + w - rx),
        fmt_num(x + w), fmt_num(y + ry),
        fmt_num(y + h - ry),
        fmt_num(x + w - rx), fmt_num(y + h),
        fmt_num(x + rx),
        fmt_num(x), fmt_num(y + h - ry),
        fmt_num(y + ry),
        fmt_num(x + rx), fmt_num(y),
        arc = arc,
    ))
}

pub fn ellipse_geometry(cx: f64, cy: f64, rx: f64, ry: f64) -> Option<String> {
    if rx <= 0.0 || ry <= 0.0 {
        return None;
    }
    let radii = format!("{},{}", fmt_num(rx), fmt_num(ry));
    Some(format!(
        "M{},{} A{radii} 0 1 0 {},{} A{radii} 0 1 0 {},{} Z",
        fmt_num(cx - rx), fmt_num(cy),
        fmt_num(cx + rx), fmt_num(cy),
        fmt_num(cx - rx), fmt_num(cy),
        radii = radii,
    ))
}

fn points_geometry(points: &str, close: bool) -> Option<String> {
    let numbers = parse_numbers(points);
    if numbers.len() < 4 {
        return None;
    }
    let mut pairs = numbers.chunks_exact(2).map(|p| format!("{},{}", fmt_num(p[0]), fmt_num(p[1])));
    let first = pairs.next()?;
    let rest: Vec<String> = pairs.collect();
    let mut data = format!("M{} L{}", first, rest.join(" "));
    if close {
        data.push_str(" Z");
    }
    Some(data)
}

/// 依序查詢 style 屬性與展示屬性
fn style_value<'a>(node: Node<'a, 'a>, name: &str) -> Option<&'a str> {
    if let Some(style) = node.attribute("style") {
        for declaration in style.split(';') {
            if let Some((key, value)) = declaration.split_once(':') {
                if key.trim() == name {
                    return Some(value.trim());
                }
            }
        }
    }
    node.attribute(name).map(str::trim)
}

/// 由自身往上查找可繼承屬性，略過 inherit
fn inherited_value<'a>(node: Node<'a, 'a>, name: &str) -> Option<&'a str> {
    node.ancestors()
        .filter(|n| n.is_element())
        .filter_map(|n| style_value(n, name))
        .find(|v| *v != "inherit")
}

fn own_opacity(node: Node) -> f64 {
    style_value(node, "opacity").and_then(parse_opacity).unwrap_or(1.0)
}

fn parse_opacity(value: &str) -> Option<f64> {
    let value = value.trim();
    let opacity = match value.strip_suffix('%') {
        Some(percent) => parse_number(percent)? / 100.0,
        None => parse_number(value)?,
    };
    Some(opacity.clamp(0.0, 1.0))
}

fn parse_paint(node: Node, value: &str) -> Option<Color> {
    let value = value.trim();
    match value {
        "none" | "transparent" => None,
        "currentColor" => Some(
            inherited_value(node, "color").and_then(parse_color).unwrap_or(Color::BLACK),
        ),
        _ if value.starts_with("url(") => {
            let fallback = value.find(')').map(|i| value[i + 1..].trim()).unwrap_or("");
            if fallback == "none" {
                return None;
            }
            if let Some(color) = parse_color(fallback) {
                return Some(color);
            }
            warn!("不支援的繪製來源 {}，改用黑色", value);
            Some(Color::BLACK)
        }
        _ => match parse_color(value) {
            Some(color) => Some(color),
            None => {
                warn!("無法解析的顏色 {}，改用黑色", value);
                Some(Color::BLACK)
            }
        },
    }
}

pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        let digits: Vec<u8> = hex.chars().map(|c| c.to_digit(16).map(|d| d as u8)).collect::<Option<_>>()?;
        return match digits.as_slice() {
            [r, g, b] => Some(Color::rgb(r * 17, g * 17, b * 17)),
            [r1, r2, g1, g2, b1, b2] => Some(Color::rgb(r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2)),
            _ => None,
        };
    }

    let lower = value.to_ascii_lowercase();
    if let Some(args) = lower.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')')) {
        let channels: Vec<u8> = args
            .split(',')
            .map(|part| {
                let part = part.trim();
                let v = match part.strip_suffix('%') {
                    Some(p) => parse_number(p)? * 2.55,
                    None => parse_number(part)?,
                };
                Some(v.round().clamp(0.0, 255.0) as u8)
            })
            .collect::<Option<_>>()?;
        return match channels.as_slice() {
            [r, g, b] => Some(Color::rgb(*r, *g, *b)),
            _ => None,
        };
    }

    named_color(&lower)
}

fn named_color(name: &str) -> Option<Color> {
    let (r, g, b) = match name {
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "red" => (255, 0, 0),
        "lime" => (0, 255, 0),
        "green" => (0, 128, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "cyan" | "aqua" => (0, 255, 255),
        "magenta" | "fuchsia" => (255, 0, 255),
        "gray" | "grey" => (128, 128, 128),
        "silver" => (192, 192, 192),
        "maroon" => (128, 0, 0),
        "olive" => (128, 128, 0),
        "navy" => (0, 0, 128),
        "purple" => (128, 0, 128),
        "teal" => (0, 128, 128),
        "orange" => (255, 165, 0),
        "darkgray" | "darkgrey" => (169, 169, 169),
        "lightgray" | "lightgrey" => (211, 211, 211),
        _ => return None,
    };
    Some(Color::rgb(r, g, b))
}

/// 解析長度，支援 px/pt/mm/cm/in，百分比無法換算時回傳 None
pub fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.ends_with('%') {
        return None;
    }
    let units: [(&str, f64); 6] = [
        ("px", 1.0),
        ("pt", 4.0 / 3.0),
        ("pc", 16.0),
        ("mm", 96.0 / 25.4),
        ("cm", 96.0 / 2.54),
        ("in", 96.0),
    ];
    for (unit, factor) in units {
        if let Some(number) = value.strip_suffix(unit) {
            return parse_number(number).map(|v| v * factor);
        }
    }
    parse_number(value)
}

/// 解析有限數值；NaN 與 inf 視為無效
fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn parse_numbers(text: &str) -> Vec<f64> {
    number_regex()
        .find_iter(text)
        .filter_map(|m| parse_number(m.as_str()))
        .collect()
}

/// 解析 transform 屬性，依出現順序組合
pub fn parse_transform(value: &str) -> Matrix {
    let mut result = Matrix::IDENTITY;
    for caps in transform_regex().captures_iter(value) {
        let args = parse_numbers(&caps[2]);
        let step = match (&caps[1], args.as_slice()) {
            ("matrix", [a, b, c, d, e, f]) => Matrix::new(*a, *b, *c, *d, *e, *f),
            ("translate", [tx]) => Matrix::translate(*tx, 0.0),
            ("translate", [tx, ty]) => Matrix::translate(*tx, *ty),
            ("scale", [s]) => Matrix::scale(*s, *s),
            ("scale", [sx, sy]) => Matrix::scale(*sx, *sy),
            ("rotate", [angle]) => Matrix::rotate(*angle),
            ("rotate", [angle, cx, cy]) => Matrix::translate(*cx, *cy)
                .then(&Matrix::rotate(*angle))
                .then(&Matrix::translate(-cx, -cy)),
            ("skewX", [angle]) => Matrix::skew_x(*angle),
            ("skewY", [angle]) => Matrix::skew_y(*angle),
            (name, _) => {
                warn!("無法解析的 transform：{}({})", name, &caps[2]);
                continue;
            }
        };
        result = result.then(&step);
    }
    result
}

/// 以最多四位小數輸出數字
pub fn fmt_num(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    // 避免輸出 -0
    format!("{}", rounded + 0.0)
}
