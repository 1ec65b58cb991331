//! Google Slides export as an offline `batchUpdate` request body.
//!
//! The file holds the requests that recreate the deck in an empty
//! presentation; sending them to the Slides API is left to the caller.

use deck_core::export::{check_extension, ensure_parent_dir, placements};
use deck_core::{Error, ExportFormat, ExportRequest, Exporter, Result, Slide};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Page size in EMU, 10in x 7.5in.
const PAGE_WIDTH_EMU: f64 = 9_144_000.0;
const PAGE_HEIGHT_EMU: f64 = 6_858_000.0;

/// Body written to disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlidesBatch {
    pub title: String,
    pub requests: Vec<Value>,
    /// Speaker notes keyed by slide object id.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub speaker_notes: BTreeMap<String, String>,
}

fn slide_object_id(slide: &Slide) -> String {
    format!("slide_{}", slide.id)
}

fn emu(magnitude: f64) -> Value {
    json!({ "magnitude": magnitude.round(), "unit": "EMU" })
}

fn slide_requests(slide: &Slide, requests: &mut Vec<Value>) {
    let page_id = slide_object_id(slide);
    requests.push(json!({
        "createSlide": {
            "objectId": page_id,
            "slideLayoutReference": { "predefinedLayout": "BLANK" }
        }
    }));

    for placement in placements(slide) {
        let shape_id = format!("{}_{}", page_id, placement.zone);
        let (x, y, w, h) = placement.bounds;
        requests.push(json!({
            "createShape": {
                "objectId": shape_id,
                "shapeType": "TEXT_BOX",
                "elementProperties": {
                    "pageObjectId": page_id,
                    "size": {
                        "width": emu(w * PAGE_WIDTH_EMU),
                        "height": emu(h * PAGE_HEIGHT_EMU)
                    },
                    "transform": {
                        "scaleX": 1,
                        "scaleY": 1,
                        "translateX": (x * PAGE_WIDTH_EMU).round(),
                        "translateY": (y * PAGE_HEIGHT_EMU).round(),
                        "unit": "EMU"
                    }
                }
            }
        }));
        requests.push(json!({
            "insertText": {
                "objectId": shape_id,
                "insertionIndex": 0,
                "text": placement.lines.join("\n")
            }
        }));
        if placement.bulleted {
            requests.push(json!({
                "createParagraphBullets": {
                    "objectId": shape_id,
                    "textRange": { "type": "ALL" },
                    "bulletPreset": "BULLET_DISC_CIRCLE_SQUARE"
                }
            }));
        }
    }
}

/// Exports decks as Slides API batch requests.
#[derive(Debug, Default, Clone)]
pub struct GoogleSlidesExporter;

impl GoogleSlidesExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, request: &ExportRequest<'_>) -> SlidesBatch {
        let mut requests = Vec::new();
        let mut speaker_notes = BTreeMap::new();
        let include_notes = request.options.include_notes();

        for slide in request.slides {
            slide_requests(slide, &mut requests);
            if include_notes {
                if let Some(notes) = &slide.speaker_notes {
                    speaker_notes.insert(slide_object_id(slide), notes.clone());
                }
            }
        }

        SlidesBatch {
            title: request.title().unwrap_or("Presentation").to_string(),
            requests,
            speaker_notes,
        }
    }
}

impl Exporter for GoogleSlidesExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::GoogleSlides
    }

    fn export(&self, request: &ExportRequest<'_>) -> Result<()> {
        let path = request.output_path;
        check_extension(path, ExportFormat::GoogleSlides);
        ensure_parent_dir(path)?;

        let body = serde_json::to_string_pretty(&self.build(request))?;
        std::fs::write(path, body).map_err(|e| {
            Error::ExportError(format!("Failed to write {}: {}", path.display(), e))
        })?;

        log::info!(
            "Exported {} slides as Google Slides requests: {}",
            request.slides.len(),
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{ExportOptions, Metadata, SlideContent, SlideType};
    use std::path::Path;

    fn slides() -> Vec<Slide> {
        let mut body = Slide::new(
            1,
            "Highlights",
            SlideType::Content,
            SlideContent::bullets("Highlights", vec!["Revenue up".into(), "Costs flat".into()]),
        );
        body.speaker_notes = Some("Slide: Highlights".to_string());
        vec![
            Slide::new(
                0,
                "Q1 Review",
                SlideType::Title,
                SlideContent::title("Q1 Review", "Auto-generated Presentation"),
            ),
            body,
        ]
    }

    fn build(options: &ExportOptions) -> SlidesBatch {
        let slides = slides();
        let metadata = Metadata::new();
        let request = ExportRequest {
            slides: &slides,
            metadata: &metadata,
            output_path: Path::new("deck.json"),
            theme: "default",
            options,
        };
        GoogleSlidesExporter::new().build(&request)
    }

    #[test]
    fn test_requests_per_slide() {
        let batch = build(&ExportOptions::new());
        let kinds: Vec<&str> = batch
            .requests
            .iter()
            .filter_map(|r| r.as_object()?.keys().next().map(String::as_str))
            .collect();
        assert_eq!(
            kinds,
            vec![
                "createSlide",
                "createShape",
                "insertText",
                "createShape",
                "insertText",
                "createSlide",
                "createShape",
                "insertText",
                "createShape",
                "insertText",
                "createParagraphBullets",
            ]
        );
        assert_eq!(
            batch.requests[10]["createParagraphBullets"]["objectId"],
            "slide_1_content"
        );
        assert_eq!(
            batch.requests[9]["insertText"]["text"],
            "Revenue up\nCosts flat"
        );
    }

    #[test]
    fn test_notes_follow_option() {
        let batch = build(&ExportOptions::new());
        assert_eq!(batch.speaker_notes["slide_1"], "Slide: Highlights");

        let batch = build(&ExportOptions::new().with("include_notes", false));
        assert!(batch.speaker_notes.is_empty());
        let value = serde_json::to_value(&batch).unwrap();
        assert!(value.get("speakerNotes").is_none());
    }

    #[test]
    fn test_export_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.json");
        let slides = slides();
        let metadata = Metadata::new();
        let options = ExportOptions::new();
        let request = ExportRequest {
            slides: &slides,
            metadata: &metadata,
            output_path: &path,
            theme: "default",
            options: &options,
        };
        GoogleSlidesExporter::new().export(&request).unwrap();

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["title"], "Presentation");
        assert_eq!(written["requests"][0]["createSlide"]["objectId"], "slide_0");
    }
}
