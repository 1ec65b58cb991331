//! Fixed package parts: content types, relationships, presentation, master,
//! layout, theme and document properties.

use crate::xml::XmlWriter;
use deck_core::Result;

pub(crate) const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub(crate) const NS_R: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub(crate) const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const NS_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_CORE: &str =
    "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";
const NS_EXTENDED: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_EXTENDED: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const REL_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";

const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
const CT_SLIDE_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
const CT_SLIDE_LAYOUT: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
const CT_CORE: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_EXTENDED: &str =
    "application/vnd.openxmlformats-officedocument.extended-properties+xml";

/// Slide size in EMU (10in x 7.5in).
pub(crate) const SLIDE_WIDTH: i64 = 9_144_000;
pub(crate) const SLIDE_HEIGHT: i64 = 6_858_000;

const FIRST_SLIDE_ID: usize = 256;

/// Relationship id of slide `n` (1-based) in the presentation part. The
/// master and theme take rId1 and rId2.
fn slide_rel_id(n: usize) -> String {
    format!("rId{}", n + 2)
}

fn relationships(rels: &[(&str, &str, &str)]) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start("Relationships", &[("xmlns", NS_RELS)])?;
    for &(id, rel_type, target) in rels {
        xml.empty(
            "Relationship",
            &[("Id", id), ("Type", rel_type), ("Target", target)],
        )?;
    }
    xml.end("Relationships")?;
    Ok(xml.finish())
}

pub(crate) fn content_types(slide_count: usize) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start("Types", &[("xmlns", NS_CONTENT_TYPES)])?;
    xml.empty(
        "Default",
        &[
            ("Extension", "rels"),
            ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
        ],
    )?;
    xml.empty(
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    )?;

    let fixed = [
        ("/ppt/presentation.xml", CT_PRESENTATION),
        ("/ppt/slideMasters/slideMaster1.xml", CT_SLIDE_MASTER),
        ("/ppt/slideLayouts/slideLayout1.xml", CT_SLIDE_LAYOUT),
        ("/ppt/theme/theme1.xml", CT_THEME),
        ("/docProps/core.xml", CT_CORE),
        ("/docProps/app.xml", CT_EXTENDED),
    ];
    for (part, content_type) in fixed {
        xml.empty("Override", &[("PartName", part), ("ContentType", content_type)])?;
    }
    for n in 1..=slide_count {
        let part = format!("/ppt/slides/slide{}.xml", n);
        xml.empty("Override", &[("PartName", part.as_str()), ("ContentType", CT_SLIDE)])?;
    }

    xml.end("Types")?;
    Ok(xml.finish())
}

pub(crate) fn package_rels() -> Result<Vec<u8>> {
    relationships(&[
        ("rId1", REL_OFFICE_DOCUMENT, "ppt/presentation.xml"),
        ("rId2", REL_CORE, "docProps/core.xml"),
        ("rId3", REL_EXTENDED, "docProps/app.xml"),
    ])
}

pub(crate) fn core_properties(title: &str, author: Option<&str>) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start(
        "cp:coreProperties",
        &[
            ("xmlns:cp", NS_CORE),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    xml.text_element("dc:title", &[], title)?;
    if let Some(author) = author {
        xml.text_element("dc:creator", &[], author)?;
    }
    xml.end("cp:coreProperties")?;
    Ok(xml.finish())
}

pub(crate) fn app_properties(slide_count: usize) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start("Properties", &[("xmlns", NS_EXTENDED)])?;
    xml.text_element("Application", &[], "deck-build")?;
    xml.text_element("Slides", &[], &slide_count.to_string())?;
    xml.end("Properties")?;
    Ok(xml.finish())
}

pub(crate) fn presentation(slide_count: usize) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start(
        "p:presentation",
        &[("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)],
    )?;

    xml.start("p:sldMasterIdLst", &[])?;
    xml.empty("p:sldMasterId", &[("id", "2147483648"), ("r:id", "rId1")])?;
    xml.end("p:sldMasterIdLst")?;

    if slide_count > 0 {
        xml.start("p:sldIdLst", &[])?;
        for n in 1..=slide_count {
            let id = (FIRST_SLIDE_ID + n - 1).to_string();
            let rel = slide_rel_id(n);
            xml.empty("p:sldId", &[("id", id.as_str()), ("r:id", rel.as_str())])?;
        }
        xml.end("p:sldIdLst")?;
    }

    let (cx, cy) = (SLIDE_WIDTH.to_string(), SLIDE_HEIGHT.to_string());
    xml.empty("p:sldSz", &[("cx", cx.as_str()), ("cy", cy.as_str()), ("type", "screen4x3")])?;
    xml.empty("p:notesSz", &[("cx", cy.as_str()), ("cy", cx.as_str())])?;
    xml.end("p:presentation")?;
    Ok(xml.finish())
}

pub(crate) fn presentation_rels(slide_count: usize) -> Result<Vec<u8>> {
    let targets: Vec<(String, String)> = (1..=slide_count)
        .map(|n| (slide_rel_id(n), format!("slides/slide{}.xml", n)))
        .collect();

    let mut rels = vec![
        ("rId1", REL_SLIDE_MASTER, "slideMasters/slideMaster1.xml"),
        ("rId2", REL_THEME, "theme/theme1.xml"),
    ];
    rels.extend(
        targets
            .iter()
            .map(|(id, target)| (id.as_str(), REL_SLIDE, target.as_str())),
    );
    relationships(&rels)
}

/// Empty group-shape header shared by every shape tree.
pub(crate) fn shape_tree_header(xml: &mut XmlWriter) -> Result<()> {
    xml.start("p:nvGrpSpPr", &[])?;
    xml.empty("p:cNvPr", &[("id", "1"), ("name", "")])?;
    xml.empty("p:cNvGrpSpPr", &[])?;
    xml.empty("p:nvPr", &[])?;
    xml.end("p:nvGrpSpPr")?;
    xml.empty("p:grpSpPr", &[])
}

fn empty_shape_tree(xml: &mut XmlWriter, name: Option<&str>) -> Result<()> {
    match name {
        Some(name) => xml.start("p:cSld", &[("name", name)])?,
        None => xml.start("p:cSld", &[])?,
    }
    xml.start("p:spTree", &[])?;
    shape_tree_header(xml)?;
    xml.end("p:spTree")?;
    xml.end("p:cSld")
}

pub(crate) fn slide_master() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start(
        "p:sldMaster",
        &[("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)],
    )?;
    empty_shape_tree(&mut xml, None)?;
    xml.empty(
        "p:clrMap",
        &[
            ("bg1", "lt1"),
            ("tx1", "dk1"),
            ("bg2", "lt2"),
            ("tx2", "dk2"),
            ("accent1", "accent1"),
            ("accent2", "accent2"),
            ("accent3", "accent3"),
            ("accent4", "accent4"),
            ("accent5", "accent5"),
            ("accent6", "accent6"),
            ("hlink", "hlink"),
            ("folHlink", "folHlink"),
        ],
    )?;
    xml.start("p:sldLayoutIdLst", &[])?;
    xml.empty("p:sldLayoutId", &[("id", "2147483649"), ("r:id", "rId1")])?;
    xml.end("p:sldLayoutIdLst")?;
    xml.end("p:sldMaster")?;
    Ok(xml.finish())
}

pub(crate) fn slide_master_rels() -> Result<Vec<u8>> {
    relationships(&[
        ("rId1", REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"),
        ("rId2", REL_THEME, "../theme/theme1.xml"),
    ])
}

pub(crate) fn slide_layout() -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start(
        "p:sldLayout",
        &[
            ("xmlns:a", NS_A),
            ("xmlns:r", NS_R),
            ("xmlns:p", NS_P),
            ("type", "blank"),
            ("preserve", "1"),
        ],
    )?;
    empty_shape_tree(&mut xml, Some("Blank"))?;
    xml.start("p:clrMapOvr", &[])?;
    xml.empty("a:masterClrMapping", &[])?;
    xml.end("p:clrMapOvr")?;
    xml.end("p:sldLayout")?;
    Ok(xml.finish())
}

pub(crate) fn slide_layout_rels() -> Result<Vec<u8>> {
    relationships(&[("rId1", REL_SLIDE_MASTER, "../slideMasters/slideMaster1.xml")])
}

pub(crate) fn slide_rels() -> Result<Vec<u8>> {
    relationships(&[("rId1", REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml")])
}

/// Theme colours and font for the theme part.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ThemePalette {
    pub name: String,
    /// Six accent colours as `RRGGBB`.
    pub accents: Vec<String>,
    pub font: String,
}

impl ThemePalette {
    /// Palette for a deck theme: chart style colours as accents, layout
    /// override font.
    pub fn for_theme(theme: &str) -> Self {
        let style = deck_core::chart::style_for(theme);
        let mut accents: Vec<String> = style
            .colors
            .iter()
            .map(|color| color.trim_start_matches('#').to_uppercase())
            .collect();
        // chart styles carry five colours; the scheme needs six
        while accents.len() < 6 {
            accents.push(
                accents
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "4472C4".to_string()),
            );
        }
        accents.truncate(6);

        let font = deck_core::layout::theme_overrides(theme)
            .map(|overrides| overrides.font)
            .unwrap_or("Calibri");

        Self {
            name: theme.to_string(),
            accents,
            font: font.to_string(),
        }
    }

    /// First accent, used for slide titles.
    pub fn title_color(&self) -> &str {
        &self.accents[0]
    }
}

fn srgb(xml: &mut XmlWriter, slot: &str, color: &str) -> Result<()> {
    xml.start(slot, &[])?;
    xml.empty("a:srgbClr", &[("val", color)])?;
    xml.end(slot)
}

fn scheme_fill(xml: &mut XmlWriter) -> Result<()> {
    xml.start("a:solidFill", &[])?;
    xml.empty("a:schemeClr", &[("val", "phClr")])?;
    xml.end("a:solidFill")
}

pub(crate) fn theme(palette: &ThemePalette) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start("a:theme", &[("xmlns:a", NS_A), ("name", palette.name.as_str())])?;
    xml.start("a:themeElements", &[])?;

    xml.start("a:clrScheme", &[("name", palette.name.as_str())])?;
    xml.start("a:dk1", &[])?;
    xml.empty("a:sysClr", &[("val", "windowText"), ("lastClr", "000000")])?;
    xml.end("a:dk1")?;
    xml.start("a:lt1", &[])?;
    xml.empty("a:sysClr", &[("val", "window"), ("lastClr", "FFFFFF")])?;
    xml.end("a:lt1")?;
    srgb(&mut xml, "a:dk2", "44546A")?;
    srgb(&mut xml, "a:lt2", "E7E6E6")?;
    for (i, color) in palette.accents.iter().enumerate() {
        srgb(&mut xml, &format!("a:accent{}", i + 1), color)?;
    }
    srgb(&mut xml, "a:hlink", "0563C1")?;
    srgb(&mut xml, "a:folHlink", "954F72")?;
    xml.end("a:clrScheme")?;

    xml.start("a:fontScheme", &[("name", palette.name.as_str())])?;
    for slot in ["a:majorFont", "a:minorFont"] {
        xml.start(slot, &[])?;
        xml.empty("a:latin", &[("typeface", palette.font.as_str())])?;
        xml.empty("a:ea", &[("typeface", "")])?;
        xml.empty("a:cs", &[("typeface", "")])?;
        xml.end(slot)?;
    }
    xml.end("a:fontScheme")?;

    // Format scheme lists must hold at least three entries each.
    xml.start("a:fmtScheme", &[("name", palette.name.as_str())])?;
    xml.start("a:fillStyleLst", &[])?;
    for _ in 0..3 {
        scheme_fill(&mut xml)?;
    }
    xml.end("a:fillStyleLst")?;
    xml.start("a:lnStyleLst", &[])?;
    for width in ["6350", "12700", "19050"] {
        xml.start("a:ln", &[("w", width)])?;
        scheme_fill(&mut xml)?;
        xml.end("a:ln")?;
    }
    xml.end("a:lnStyleLst")?;
    xml.start("a:effectStyleLst", &[])?;
    for _ in 0..3 {
        xml.start("a:effectStyle", &[])?;
        xml.empty("a:effectLst", &[])?;
        xml.end("a:effectStyle")?;
    }
    xml.end("a:effectStyleLst")?;
    xml.start("a:bgFillStyleLst", &[])?;
    for _ in 0..3 {
        scheme_fill(&mut xml)?;
    }
    xml.end("a:bgFillStyleLst")?;
    xml.end("a:fmtScheme")?;

    xml.end("a:themeElements")?;
    xml.end("a:theme")?;
    Ok(xml.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_content_types_list_every_slide() {
        let xml = as_text(content_types(2).unwrap());
        assert!(xml.contains(r#"PartName="/ppt/slides/slide1.xml""#));
        assert!(xml.contains(r#"PartName="/ppt/slides/slide2.xml""#));
        assert!(!xml.contains("slide3.xml"));
    }

    #[test]
    fn test_presentation_slide_ids_follow_rels() {
        let xml = as_text(presentation(2).unwrap());
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId3"/>"#));
        assert!(xml.contains(r#"<p:sldId id="257" r:id="rId4"/>"#));

        let rels = as_text(presentation_rels(2).unwrap());
        assert!(rels.contains(r#"Id="rId4""#));
        assert!(rels.contains(r#"Target="slides/slide2.xml""#));
    }

    #[test]
    fn test_empty_presentation_has_no_slide_list() {
        let xml = as_text(presentation(0).unwrap());
        assert!(!xml.contains("sldIdLst"));
    }

    #[test]
    fn test_theme_palette_follows_chart_style() {
        let palette = ThemePalette::for_theme("business");
        assert_eq!(palette.accents.len(), 6);
        assert_eq!(palette.title_color(), "003366");
        assert_eq!(palette.font, "Calibri");

        let xml = as_text(theme(&palette).unwrap());
        assert!(xml.contains(r#"<a:accent1><a:srgbClr val="003366"/></a:accent1>"#));
    }

    #[test]
    fn test_unknown_theme_palette_uses_defaults() {
        let palette = ThemePalette::for_theme("neon");
        assert_eq!(palette.title_color(), "1F77B4");
        assert_eq!(palette.font, "Calibri");
    }

    #[test]
    fn test_core_properties_escape_title() {
        let xml = as_text(core_properties("R&D Review", Some("Dana")).unwrap());
        assert!(xml.contains("<dc:title>R&amp;D Review</dc:title>"));
        assert!(xml.contains("<dc:creator>Dana</dc:creator>"));
    }
}
