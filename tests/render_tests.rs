//! Rendering tests — harps to SVG, with and without theme resources.

use pretty_assertions::assert_eq;
use skygrid::{
    harp_to_json, render_harp_json_to_svg, render_harp_to_svg, render_harps_to_svg, Harp,
    Platform, Position, ResourceConfig, ResourceSet, Theme,
};
use std::ffi::CString;
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/resources")
}

fn output_dir() -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_output");
    std::fs::create_dir_all(&dir).ok();
    dir
}

/// (id, class) of every key group in document order.
fn keys(svg: &str) -> Vec<(String, String)> {
    let doc = roxmltree::Document::parse(svg).expect("SVG should be well-formed");
    doc.descendants()
        .filter(|n| n.tag_name().name() == "g")
        .filter(|n| n.attribute("class").is_some_and(|c| c.split(' ').any(|w| w == "key")))
        .map(|n| {
            (
                n.attribute("id").unwrap_or_default().to_string(),
                n.attribute("class").unwrap_or_default().to_string(),
            )
        })
        .collect()
}

#[test]
fn render_default_harp() {
    let harp = Harp::default();
    harp.highlight(Position::new(0, 2), [0]).unwrap();
    harp.highlight(Position::new(2, 4), [1, 2]).unwrap();

    let svg = render_harp_to_svg(&harp, None).expect("Failed to render harp");
    assert!(svg.starts_with("<svg"), "Output should be SVG");
    assert!(svg.contains("</svg>"), "SVG should be closed");
    assert!(!svg.contains("<style>"), "No stylesheet without resources");

    let keys = keys(&svg);
    assert_eq!(keys.len(), 15, "One group per key");
    let ids: Vec<_> = keys.iter().map(|(id, _)| id.clone()).collect();
    let expected: Vec<_> = (0..15).map(|i| format!("harp-0-key-{i}")).collect();
    assert_eq!(ids, expected);

    assert_eq!(keys[0].1, "key root");
    assert_eq!(keys[2].1, "key highlighted frame-0");
    assert_eq!(keys[7].1, "key root");
    assert_eq!(keys[14].1, "key root highlighted frame-1 frame-2");
    assert!(svg.contains(r#"data-label="C5""#));

    let out = output_dir().join("default-harp.svg");
    std::fs::write(&out, &svg).expect("Failed to write SVG");
    println!("✓ Rendered default-harp.svg ({} bytes)", svg.len());
}

#[test]
fn silent_and_broken_harps() {
    let silent = Harp::default();
    silent.highlight(Position::new(1, 1), [0]).unwrap();
    silent.set_silent(true);
    let broken = Harp::default();
    broken.set_broken(true);

    let svg = render_harps_to_svg(&[silent, broken], None).unwrap();
    assert!(svg.contains(r#"id="harp-0" class="harp silent""#));
    assert!(svg.contains(r#"id="harp-1" class="harp broken""#));
    assert!(keys(&svg).iter().all(|(_, class)| !class.contains("highlighted")));
    assert_eq!(svg.matches("<line").count(), 2, "Broken harp is crossed out");
}

#[test]
fn render_with_dark_theme_resources() {
    let config = ResourceConfig::new(Theme::Dark, Platform::Mobile, "ja");
    let res = ResourceSet::from_dir(fixtures_dir(), &config).unwrap();
    let harp = Harp::default();

    let svg = render_harp_to_svg(&harp, Some(&res)).unwrap();
    assert!(svg.contains("<style>"), "Theme stylesheet should be embedded");
    assert!(svg.contains("NotoSansCJKjp-Bold"), "Font family from the theme font");
    assert!(svg.contains(r##"fill="#282828""##), "Dark harp color");
}

#[test]
fn render_from_json() {
    let harp = Harp::new(2, 4).unwrap();
    harp.highlight(Position::new(1, 3), [5]).unwrap();
    let json = harp_to_json(&harp).unwrap();

    let svg = render_harp_json_to_svg(&json, None).unwrap();
    let keys = keys(&svg);
    assert_eq!(keys.len(), 8);
    assert_eq!(keys[7], ("harp-0-key-7".to_string(), "key root highlighted frame-5".to_string()));

    let list = format!("[{json}, {json}]");
    assert_eq!(self::keys(&render_harp_json_to_svg(&list, None).unwrap()).len(), 16);

    assert!(render_harp_json_to_svg(r#"{"rows": 0, "columns": 5}"#, None).is_err());
    assert!(render_harp_json_to_svg("not json", None).is_err());
}

#[test]
fn oversized_harp_json_is_rejected() {
    let huge = r#"{"rows": 4294967296, "columns": 4294967295}"#;
    let err = skygrid::harp_from_json(huge).unwrap_err();
    assert!(err.to_string().contains("more than 1024 keys"), "unexpected error: {err}");
    assert!(render_harp_json_to_svg(huge, None).is_err());

    let json = CString::new(huge).unwrap();
    assert!(unsafe { skygrid::skygrid_render_harp(json.as_ptr()) }.is_null());

    let many = format!("[{}]", vec![r#"{"rows": 1, "columns": 1}"#; 10_001].join(","));
    assert!(render_harp_json_to_svg(&many, None).is_err());
}

#[test]
fn render_through_c_abi() {
    use std::ffi::CStr;

    let json = CString::new(r#"{"rows": 3, "columns": 5}"#).unwrap();
    let svg = unsafe { skygrid::skygrid_render_harp(json.as_ptr()) };
    assert!(!svg.is_null());
    let text = unsafe { CStr::from_ptr(svg) }.to_str().unwrap().to_string();
    unsafe { skygrid::skygrid_free_string(svg) };
    assert_eq!(keys(&text).len(), 15);

    let bad = CString::new("{").unwrap();
    assert!(unsafe { skygrid::skygrid_render_harp(bad.as_ptr()) }.is_null());
    assert!(unsafe { skygrid::skygrid_render_harp(std::ptr::null()) }.is_null());
}
