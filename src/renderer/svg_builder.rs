//! SVG builder — accumulates SVG elements and produces the final string.

pub(super) struct SvgBuilder {
    elements: Vec<String>,
    width: f64,
    height: f64,
    font_family: String,
    depth: usize,
}

pub(super) fn escape(content: &str) -> String {
    content
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl SvgBuilder {
    pub(super) fn new(width: f64, height: f64, font_family: &str) -> Self {
        Self {
            elements: Vec::new(),
            width,
            height,
            font_family: font_family.to_string(),
            depth: 0,
        }
    }

    pub(super) fn build(self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {:.1} {:.1}" width="{:.1}" height="{:.1}" style="font-family: '{}', sans-serif;">"#,
            self.width,
            self.height,
            self.width,
            self.height,
            escape(&self.font_family)
        );
        svg.push('\n');
        for el in &self.elements {
            svg.push_str(el);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }

    fn push(&mut self, element: String) {
        let indent = "  ".repeat(self.depth + 1);
        self.elements.push(format!("{indent}{element}"));
    }

    pub(super) fn style(&mut self, css: &str) {
        // Raw text inside CDATA; a literal "]]>" is split across two sections
        self.push(format!(
            "<style><![CDATA[{}]]></style>",
            css.replace("]]>", "]]]]><![CDATA[>")
        ));
    }

    pub(super) fn open_group(&mut self, id: &str, class: &str, attrs: &[(&str, String)]) {
        let mut element = format!(r#"<g id="{}" class="{}""#, escape(id), escape(class));
        for (name, value) in attrs {
            element.push_str(&format!(r#" {}="{}""#, name, escape(value)));
        }
        element.push('>');
        self.push(element);
        self.depth += 1;
    }

    pub(super) fn close_group(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.push("</g>".to_string());
    }

    pub(super) fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str, width: f64) {
        self.push(format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{:.1}" stroke-linecap="round"/>"#,
            x1, y1, x2, y2, color, width
        ));
    }

    #[allow(clippy::too_many_arguments)]
    pub(super) fn rect(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        corner: f64,
        fill: &str,
        stroke: &str,
        stroke_width: f64,
    ) {
        if stroke_width > 0.0 {
            self.push(format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" rx="{:.1}" fill="{}" stroke="{}" stroke-width="{:.1}"/>"#,
                x, y, w, h, corner, fill, stroke, stroke_width
            ));
        } else {
            self.push(format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" rx="{:.1}" fill="{}"/>"#,
                x, y, w, h, corner, fill
            ));
        }
    }

    pub(super) fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str, stroke: &str, stroke_width: f64) {
        self.push(format!(
            r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" stroke="{}" stroke-width="{:.1}"/>"#,
            cx, cy, r, fill, stroke, stroke_width
        ));
    }

    pub(super) fn text(&mut self, x: f64, y: f64, content: &str, size: f64, fill: &str) {
        self.push(format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="{:.0}" fill="{}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
            x,
            y,
            size,
            fill,
            escape(content)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_nest_and_close() {
        let mut svg = SvgBuilder::new(10.0, 20.0, "Noto");
        svg.open_group("k", "key", &[("data-index", "3".to_string())]);
        svg.circle(1.0, 2.0, 3.0, "red", "none", 0.0);
        svg.close_group();
        let out = svg.build();
        assert!(out.starts_with("<svg"));
        assert!(out.contains(r#"<g id="k" class="key" data-index="3">"#));
        assert!(out.contains("    <circle"));
        assert!(out.ends_with("</svg>\n"));
        assert!(roxmltree::Document::parse(&out).is_ok());
    }

    #[test]
    fn stylesheet_is_kept_verbatim() {
        let css = r#".key[data-label="A1"] > circle { fill: #000; } /* ]]> */"#;
        let mut svg = SvgBuilder::new(10.0, 10.0, "sans-serif");
        svg.style(css);
        let out = svg.build();
        assert!(out.contains(r#"<![CDATA[.key[data-label="A1"] > circle"#));

        let doc = roxmltree::Document::parse(&out).unwrap();
        let style = doc.descendants().find(|n| n.has_tag_name("style")).unwrap();
        let text: String = style.children().filter_map(|n| n.text()).collect();
        assert_eq!(text, css);
    }

    #[test]
    fn escapes_text() {
        assert_eq!(escape(r#"a<b>&"c""#), "a&lt;b&gt;&amp;&quot;c&quot;");
    }
}
