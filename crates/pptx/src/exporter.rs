//! PowerPoint exporter writing an OOXML package to disk.

use crate::package::{self, ThemePalette};
use crate::slide::slide_part;
use deck_core::export::{check_extension, ensure_parent_dir};
use deck_core::{Error, ExportFormat, ExportRequest, Exporter, Result};
use std::fs::File;
use std::io::{Seek, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Writes named parts into a ZIP package.
struct PackageWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
}

impl<W: Write + Seek> PackageWriter<W> {
    fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
        }
    }

    fn add_part(&mut self, name: &str, content: &[u8]) -> Result<()> {
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        self.zip
            .start_file(name, options)
            .map_err(|e| Error::ZipError(format!("Failed to add {}: {}", name, e)))?;
        self.zip.write_all(content)?;
        Ok(())
    }

    fn finish(mut self) -> Result<W> {
        self.zip
            .finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish package: {}", e)))
    }
}

/// Exports decks as `.pptx` presentations.
#[derive(Debug, Default, Clone)]
pub struct PowerPointExporter;

impl PowerPointExporter {
    pub fn new() -> Self {
        Self
    }

    /// Write the full package for `request` into `writer`.
    pub fn write_package<W: Write + Seek>(&self, request: &ExportRequest<'_>, writer: W) -> Result<W> {
        let slide_count = request.slides.len();
        let palette = ThemePalette::for_theme(request.theme);
        let title = request.title().unwrap_or("Presentation");

        let mut package = PackageWriter::new(writer);
        package.add_part("[Content_Types].xml", &package::content_types(slide_count)?)?;
        package.add_part("_rels/.rels", &package::package_rels()?)?;
        package.add_part(
            "docProps/core.xml",
            &package::core_properties(title, request.author())?,
        )?;
        package.add_part("docProps/app.xml", &package::app_properties(slide_count)?)?;
        package.add_part("ppt/presentation.xml", &package::presentation(slide_count)?)?;
        package.add_part(
            "ppt/_rels/presentation.xml.rels",
            &package::presentation_rels(slide_count)?,
        )?;
        package.add_part("ppt/slideMasters/slideMaster1.xml", &package::slide_master()?)?;
        package.add_part(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            &package::slide_master_rels()?,
        )?;
        package.add_part("ppt/slideLayouts/slideLayout1.xml", &package::slide_layout()?)?;
        package.add_part(
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            &package::slide_layout_rels()?,
        )?;
        package.add_part("ppt/theme/theme1.xml", &package::theme(&palette)?)?;

        let slide_rels = package::slide_rels()?;
        for (i, slide) in request.slides.iter().enumerate() {
            let n = i + 1;
            package.add_part(
                &format!("ppt/slides/slide{}.xml", n),
                &slide_part(slide, &palette)?,
            )?;
            package.add_part(&format!("ppt/slides/_rels/slide{}.xml.rels", n), &slide_rels)?;
        }

        package.finish()
    }
}

impl Exporter for PowerPointExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::PowerPoint
    }

    fn export(&self, request: &ExportRequest<'_>) -> Result<()> {
        let path = request.output_path;
        check_extension(path, ExportFormat::PowerPoint);
        ensure_parent_dir(path)?;

        let file = File::create(path).map_err(|e| {
            Error::ExportError(format!("Failed to create {}: {}", path.display(), e))
        })?;
        self.write_package(request, file)?;

        log::info!(
            "Exported {} slides to PowerPoint: {}",
            request.slides.len(),
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{ExportOptions, Metadata, Slide, SlideContent, SlideType};
    use serde_json::json;
    use std::io::Read;
    use zip::ZipArchive;

    fn sample_slides() -> Vec<Slide> {
        vec![
            Slide::new(
                0,
                "Q1 Review",
                SlideType::Title,
                SlideContent::title("Q1 Review", "Auto-generated Presentation"),
            ),
            Slide::new(
                1,
                "Highlights",
                SlideType::Content,
                SlideContent::bullets("Highlights", vec!["Revenue up 12%".into()]),
            ),
        ]
    }

    fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> String {
        let mut content = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
    }

    #[test]
    fn test_export_writes_package() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/q1.pptx");
        let slides = sample_slides();
        let mut metadata = Metadata::new();
        metadata.insert("title".to_string(), json!("Q1 Review"));
        let options = ExportOptions::new().with("author", "Dana");

        let request = ExportRequest {
            slides: &slides,
            metadata: &metadata,
            output_path: &path,
            theme: "business",
            options: &options,
        };
        PowerPointExporter::new().export(&request).unwrap();

        let mut archive = ZipArchive::new(File::open(&path).unwrap()).unwrap();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "ppt/presentation.xml",
            "ppt/theme/theme1.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/slide2.xml",
            "ppt/slides/_rels/slide2.xml.rels",
        ] {
            assert!(archive.by_name(part).is_ok(), "missing part {}", part);
        }
        assert!(archive.by_name("ppt/slides/slide3.xml").is_err());

        let core = read_part(&mut archive, "docProps/core.xml");
        assert!(core.contains("<dc:title>Q1 Review</dc:title>"));
        assert!(core.contains("<dc:creator>Dana</dc:creator>"));

        let theme = read_part(&mut archive, "ppt/theme/theme1.xml");
        assert!(theme.contains("003366"));

        let slide = read_part(&mut archive, "ppt/slides/slide2.xml");
        assert!(slide.contains("<a:t>Revenue up 12%</a:t>"));
    }

    #[test]
    fn test_empty_deck_exports() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.pptx");
        let metadata = Metadata::new();
        let options = ExportOptions::new();
        let request = ExportRequest {
            slides: &[],
            metadata: &metadata,
            output_path: &path,
            theme: "default",
            options: &options,
        };
        PowerPointExporter::new().export(&request).unwrap();

        let mut archive = ZipArchive::new(File::open(&path).unwrap()).unwrap();
        let core = read_part(&mut archive, "docProps/core.xml");
        assert!(core.contains("<dc:title>Presentation</dc:title>"));
    }
}
