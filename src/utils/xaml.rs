use std::path::Path;
use std::sync::OnceLock;
use regex::Regex;
use xmlwriter::{Options, XmlWriter};
use crate::models::conversion::ResourceKeyInfo;
use crate::models::svg::{FillRule, LineCap, LineJoin, Matrix, Rect, Shape, SvgDrawing};
use crate::utils::svg::fmt_num;

pub const XAML_EXTENSION: &str = "xaml";
const PRESENTATION_NS: &str = "http://schemas.microsoft.com/winfx/2006/xaml/presentation";
const XAML_NS: &str = "http://schemas.microsoft.com/winfx/2006/xaml";

fn invalid_name_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_]").expect("name pattern is valid"))
}

fn pixels_per_dip_attribute() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"\s+PixelsPerDip="[^"]*""#).expect("PixelsPerDip pattern is valid"))
}

/// 將任意字串轉為合法的 XAML 名稱
pub fn sanitize_name(raw: &str) -> String {
    let name = invalid_name_chars().replace_all(raw, "_").into_owned();
    match name.chars().next() {
        Some(c) if !c.is_ascii_digit() => name,
        _ => format!("_{}", name),
    }
}

/// 以檔名（不含副檔名）產生項目名稱
pub fn element_name_from_file(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    sanitize_name(&stem)
}

pub fn build_element_name(name: &str, prefix: Option<&str>) -> String {
    match prefix.filter(|p| !p.is_empty()) {
        Some(prefix) => format!("{}_{}", sanitize_name(prefix), name),
        None => name.to_string(),
    }
}

pub fn drawing_image_key(element_name: &str, postfix: Option<&str>) -> String {
    format!("{}DrawingImage{}", element_name, postfix.unwrap_or(""))
}

/// 產生 x:Key 的實際內容，必要時包成 ComponentResourceKey
pub fn resource_key(key: &str, key_info: &ResourceKeyInfo) -> String {
    if !key_info.use_component_res_keys {
        return key.to_string();
    }
    let type_name = match key_info.name_space_name.as_deref().filter(|n| !n.is_empty()) {
        Some(ns_name) => format!("{}:{}", ns_name, key_info.xaml_name),
        None => key_info.xaml_name.clone(),
    };
    format!(
        "{{ComponentResourceKey TypeInTargetAssembly={{x:Type {}}}, ResourceId={}}}",
        type_name, key
    )
}

/// 移除 PixelsPerDip 屬性（.NET 4.6.2 以前不支援）；只有文字繪圖會帶此屬性
pub fn filter_pixels_per_dip(xaml: &str) -> String {
    pixels_per_dip_attribute().replace_all(xaml, "").into_owned()
}

/// xmlwriter 僅跳脫屬性中的引號，& 與 < 需先處理
pub fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('<', "&lt;")
}

/// xmlwriter 僅跳脫文字中的 <，& 需先處理
pub fn escape_text(value: &str) -> String {
    value.replace('&', "&amp;")
}

pub fn new_writer() -> XmlWriter {
    XmlWriter::new(Options::default())
}

fn start_resource_dictionary(xml: &mut XmlWriter, key_info: Option<&ResourceKeyInfo>) {
    xml.start_element("ResourceDictionary");
    xml.write_attribute("xmlns", PRESENTATION_NS);
    xml.write_attribute("xmlns:x", XAML_NS);
    if let Some(info) = key_info.filter(|i| i.use_component_res_keys) {
        if let (Some(ns), Some(ns_name)) = (info.name_space.as_deref(), info.name_space_name.as_deref()) {
            xml.write_attribute_fmt(&format!("xmlns:{}", ns_name), format_args!("clr-namespace:{}", escape_attribute(ns)));
        }
    }
}

/// 產生包含多個 DrawingImage 的 ResourceDictionary；images 為（已格式化的鍵, 圖形）
pub fn write_resource_dictionary(images: &[(String, SvgDrawing)], key_info: &ResourceKeyInfo) -> String {
    let mut xml = new_writer();
    start_resource_dictionary(&mut xml, Some(key_info));
    for (key, drawing) in images {
        write_drawing_image(&mut xml, key, drawing);
    }
    xml.end_element();
    xml.end_document()
}

/// 產生參照所有項目檔案的包裝字典
pub fn write_wrapper_dictionary<'a>(entry_names: impl IntoIterator<Item = &'a str>, folder: &str) -> String {
    let folder = folder.replace('\\', "/");
    let mut xml = new_writer();
    start_resource_dictionary(&mut xml, None);
    xml.start_element("ResourceDictionary.MergedDictionaries");
    for name in entry_names {
        xml.start_element("ResourceDictionary");
        xml.write_attribute_fmt("Source", format_args!("{}/{}.{}", escape_attribute(&folder), name, XAML_EXTENSION));
        xml.end_element();
    }
    xml.end_element();
    xml.end_element();
    xml.end_document()
}

pub fn write_drawing_image(xml: &mut XmlWriter, key: &str, drawing: &SvgDrawing) {
    xml.start_element("DrawingImage");
    xml.write_attribute("x:Key", &escape_attribute(key));
    xml.start_element("DrawingImage.Drawing");
    xml.start_element("DrawingGroup");
    if let Some(view_box) = drawing.view_box {
        xml.write_attribute("ClipGeometry", &clip_geometry(&view_box));
    }
    for shape in &drawing.shapes {
        write_shape(xml, shape);
    }
    xml.end_element();
    xml.end_element();
    xml.end_element();
}

fn clip_geometry(rect: &Rect) -> String {
    format!(
        "M{},{} V{} H{} V{} H{} Z",
        fmt_num(rect.x),
        fmt_num(rect.y),
        fmt_num(rect.y + rect.height),
        fmt_num(rect.x + rect.width),
        fmt_num(rect.y),
        fmt_num(rect.x),
    )
}

fn write_shape(xml: &mut XmlWriter, shape: &Shape) {
    if shape.fill.is_none() && shape.stroke.is_none() {
        return;
    }

    let transformed = !shape.transform.is_identity();
    if transformed {
        xml.start_element("DrawingGroup");
        xml.write_attribute("Transform", &matrix_to_xaml(&shape.transform));
    }

    xml.start_element("GeometryDrawing");
    if let Some(fill) = shape.fill {
        xml.write_attribute("Brush", &fill.to_xaml());
    }
    let rule = match shape.fill_rule {
        FillRule::EvenOdd => "F0",
        FillRule::NonZero => "F1",
    };
    xml.write_attribute_fmt("Geometry", format_args!("{} {}", rule, shape.geometry));

    if let Some(stroke) = &shape.stroke {
        let cap = match stroke.line_cap {
            LineCap::Flat => "Flat",
            LineCap::Round => "Round",
            LineCap::Square => "Square",
        };
        xml.start_element("GeometryDrawing.Pen");
        xml.start_element("Pen");
        xml.write_attribute("Brush", &stroke.color.to_xaml());
        xml.write_attribute("Thickness", &fmt_num(stroke.width));
        xml.write_attribute("StartLineCap", cap);
        xml.write_attribute("EndLineCap", cap);
        xml.write_attribute(
            "LineJoin",
            match stroke.line_join {
                LineJoin::Miter => "Miter",
                LineJoin::Round => "Round",
                LineJoin::Bevel => "Bevel",
            },
        );
        xml.end_element();
        xml.end_element();
    }
    xml.end_element();

    if transformed {
        xml.end_element();
    }
}

fn matrix_to_xaml(m: &Matrix) -> String {
    [m.a, m.b, m.c, m.d, m.e, m.f]
        .iter()
        .map(|v| fmt_num(*v))
        .collect::<Vec<_>>()
        .join(",")
}
