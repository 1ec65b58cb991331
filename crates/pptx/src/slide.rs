//! Slide parts: one text box per filled layout zone.

use crate::package::{shape_tree_header, ThemePalette, NS_A, NS_P, NS_R, SLIDE_HEIGHT, SLIDE_WIDTH};
use crate::xml::XmlWriter;
use deck_core::export::placements;
use deck_core::{LayoutKind, Placement, Result, Slide};

/// Font sizes in hundredths of a point.
const TITLE_SLIDE_TITLE_SIZE: &str = "4400";
const TITLE_SIZE: &str = "3200";
const BODY_SIZE: &str = "2000";

/// Convert fractional bounds to EMU offsets and extents.
fn to_emu((x, y, w, h): (f64, f64, f64, f64)) -> [i64; 4] {
    let sx = |v: f64| (v * SLIDE_WIDTH as f64).round() as i64;
    let sy = |v: f64| (v * SLIDE_HEIGHT as f64).round() as i64;
    [sx(x), sy(y), sx(w), sy(h)]
}

fn font_size(slide: &Slide, placement: &Placement) -> &'static str {
    match placement.zone {
        "title" if slide.layout == Some(LayoutKind::TitleSlide) => TITLE_SLIDE_TITLE_SIZE,
        "title" => TITLE_SIZE,
        "subtitle" => "2400",
        _ => BODY_SIZE,
    }
}

fn write_shape(
    xml: &mut XmlWriter,
    shape_id: usize,
    slide: &Slide,
    placement: &Placement,
    palette: &ThemePalette,
) -> Result<()> {
    let id = shape_id.to_string();
    let name = format!("{} {}", placement.zone, shape_id);
    let [x, y, cx, cy] = to_emu(placement.bounds).map(|v| v.to_string());
    let is_title = placement.zone == "title";
    let size = font_size(slide, placement);

    xml.start("p:sp", &[])?;
    xml.start("p:nvSpPr", &[])?;
    xml.empty("p:cNvPr", &[("id", id.as_str()), ("name", name.as_str())])?;
    xml.empty("p:cNvSpPr", &[("txBox", "1")])?;
    xml.empty("p:nvPr", &[])?;
    xml.end("p:nvSpPr")?;

    xml.start("p:spPr", &[])?;
    xml.start("a:xfrm", &[])?;
    xml.empty("a:off", &[("x", x.as_str()), ("y", y.as_str())])?;
    xml.empty("a:ext", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
    xml.end("a:xfrm")?;
    xml.start("a:prstGeom", &[("prst", "rect")])?;
    xml.empty("a:avLst", &[])?;
    xml.end("a:prstGeom")?;
    xml.end("p:spPr")?;

    xml.start("p:txBody", &[])?;
    let anchor = if is_title { "b" } else { "t" };
    xml.start("a:bodyPr", &[("wrap", "square"), ("anchor", anchor)])?;
    xml.empty("a:normAutofit", &[])?;
    xml.end("a:bodyPr")?;
    xml.empty("a:lstStyle", &[])?;

    for line in &placement.lines {
        xml.start("a:p", &[])?;
        if placement.bulleted {
            xml.start("a:pPr", &[("marL", "342900"), ("indent", "-342900")])?;
            xml.empty("a:buChar", &[("char", "\u{2022}")])?;
            xml.end("a:pPr")?;
        } else if slide.layout == Some(LayoutKind::TitleSlide) {
            xml.empty("a:pPr", &[("algn", "ctr")])?;
        }
        xml.start("a:r", &[])?;
        if is_title {
            xml.start("a:rPr", &[("lang", "en-US"), ("sz", size), ("b", "1")])?;
            xml.start("a:solidFill", &[])?;
            xml.empty("a:srgbClr", &[("val", palette.title_color())])?;
            xml.end("a:solidFill")?;
            xml.end("a:rPr")?;
        } else {
            xml.empty("a:rPr", &[("lang", "en-US"), ("sz", size)])?;
        }
        xml.text_element("a:t", &[], line)?;
        xml.end("a:r")?;
        xml.end("a:p")?;
    }

    xml.end("p:txBody")?;
    xml.end("p:sp")
}

/// Slide part XML for one slide.
pub(crate) fn slide_part(slide: &Slide, palette: &ThemePalette) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start(
        "p:sld",
        &[("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)],
    )?;
    xml.start("p:cSld", &[])?;
    xml.start("p:spTree", &[])?;
    shape_tree_header(&mut xml)?;

    // id 1 is the group shape
    for (i, placement) in placements(slide).iter().enumerate() {
        write_shape(&mut xml, i + 2, slide, placement, palette)?;
    }

    xml.end("p:spTree")?;
    xml.end("p:cSld")?;
    xml.start("p:clrMapOvr", &[])?;
    xml.empty("a:masterClrMapping", &[])?;
    xml.end("p:clrMapOvr")?;
    xml.end("p:sld")?;
    Ok(xml.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{SlideContent, SlideType};

    fn render(slide: &Slide) -> String {
        let palette = ThemePalette::for_theme("default");
        String::from_utf8(slide_part(slide, &palette).unwrap()).unwrap()
    }

    #[test]
    fn test_to_emu() {
        assert_eq!(to_emu((0.0, 0.0, 1.0, 1.0)), [0, 0, SLIDE_WIDTH, SLIDE_HEIGHT]);
        assert_eq!(to_emu((0.5, 0.5, 0.25, 0.25))[0], 4_572_000);
    }

    #[test]
    fn test_title_slide_shapes() {
        let slide = Slide::new(
            0,
            "Q1 Review",
            SlideType::Title,
            SlideContent::title("Q1 Review", "Auto-generated Presentation"),
        );
        let xml = render(&slide);
        assert!(xml.contains("<a:t>Q1 Review</a:t>"));
        assert!(xml.contains("<a:t>Auto-generated Presentation</a:t>"));
        assert!(xml.contains(r#"sz="4400""#));
        assert!(xml.contains(r#"<p:cNvPr id="3" name="subtitle 3"/>"#));
    }

    #[test]
    fn test_bullet_slide_uses_bullets() {
        let slide = Slide::new(
            1,
            "Wins",
            SlideType::Content,
            SlideContent::bullets("Wins", vec!["Shipped <v2>".into()]),
        );
        let xml = render(&slide);
        assert!(xml.contains("<a:buChar"));
        assert!(xml.contains("<a:t>Shipped &lt;v2&gt;</a:t>"));
    }

    #[test]
    fn test_blank_slide_has_only_group_shape() {
        let mut slide = Slide::new(2, "Empty", SlideType::Content, SlideContent::default());
        slide.layout = Some(LayoutKind::Blank);
        let xml = render(&slide);
        assert!(!xml.contains("<p:sp>"));
        assert!(xml.contains("<p:spTree>"));
    }
}
