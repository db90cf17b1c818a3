//! CSV / PNG export, clipboard and fullscreen plumbing.
//!
//! Web builds hand files to the browser through an anchor download; desktop
//! builds write into the platform data directory under `exports/`.

use thiserror::Error;

use crate::core::table::{MetricTable, CSV_HEADER};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("export produced invalid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("unable to determine export directory")]
    NoExportDir,
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
    #[error("could not rasterise chart: {0}")]
    Render(String),
    #[error("{0}")]
    Browser(&'static str),
}

/// Progress of the most recent export action, shown under the export buttons.
#[derive(Clone, Debug, PartialEq)]
pub enum ExportStatus {
    Idle,
    Working(&'static str),
    Done(String),
    Error(String),
}

impl ExportStatus {
    pub fn from_outcome(outcome: Result<String, ExportError>) -> Self {
        match outcome {
            Ok(message) => ExportStatus::Done(message),
            Err(err) => {
                tracing::warn!("export failed: {err}");
                ExportStatus::Error(err.to_string())
            }
        }
    }
}

/// The full table in the import layout: header plus one line per row.
pub fn build_csv(table: &MetricTable) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for row in table.rows() {
        writer.write_record([
            row.name.clone(),
            row.ifi.to_string(),
            row.clcr.to_string(),
            row.taes.to_string(),
            row.composite.to_string(),
            row.region.label().to_string(),
            row.risk.label().to_string(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

pub async fn export_csv(csv: String, filename: &str) -> Result<String, ExportError> {
    let delivery = download_bytes(filename, "text/csv", csv.into_bytes()).await?;
    Ok(match delivery {
        Some(path) => format!("CSV saved to {path}"),
        None => "CSV download started".to_string(),
    })
}

pub async fn copy_csv(csv: String) -> Result<String, ExportError> {
    copy_to_clipboard(csv).await?;
    Ok("CSV copied to clipboard".to_string())
}

pub async fn export_chart_png(svg: String, filename: &str) -> Result<String, ExportError> {
    let png = rasterise_svg(&svg).await?;
    let delivery = download_bytes(filename, "image/png", png).await?;
    Ok(match delivery {
        Some(path) => format!("PNG saved to {path}"),
        None => format!("{filename} download started"),
    })
}

async fn copy_to_clipboard(payload: String) -> Result<(), ExportError> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;

        let window = web_sys::window().ok_or(ExportError::Browser("window unavailable"))?;
        let document = window
            .document()
            .ok_or(ExportError::Browser("document unavailable"))?;
        let body = document.body().ok_or(ExportError::Browser("missing body"))?;

        let textarea = document
            .create_element("textarea")
            .map_err(|_| ExportError::Browser("unable to create textarea"))?
            .dyn_into::<web_sys::HtmlTextAreaElement>()
            .map_err(|_| ExportError::Browser("textarea cast failed"))?;
        textarea.set_value(&payload);
        let style = textarea.style();
        style.set_property("position", "fixed").ok();
        style.set_property("top", "0").ok();
        style.set_property("left", "0").ok();
        style.set_property("opacity", "0").ok();

        body.append_child(&textarea).ok();
        textarea.select();
        let copied = document
            .dyn_ref::<web_sys::HtmlDocument>()
            .and_then(|html| html.exec_command("copy").ok())
            .unwrap_or(false);
        textarea.remove();
        if copied {
            Ok(())
        } else {
            Err(ExportError::Clipboard("copy command blocked".into()))
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use arboard::Clipboard;

        let mut clipboard =
            Clipboard::new().map_err(|err| ExportError::Clipboard(err.to_string()))?;
        clipboard
            .set_text(payload)
            .map_err(|err| ExportError::Clipboard(err.to_string()))
    }
}

/// Deliver `bytes` as a file. Returns the written path on desktop, `None` on web.
#[cfg_attr(not(target_arch = "wasm32"), allow(unused_variables))]
async fn download_bytes(
    filename: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<Option<String>, ExportError> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        let array = js_sys::Uint8Array::from(bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let opts = BlobPropertyBag::new();
        opts.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| ExportError::Browser("failed to create blob"))?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| ExportError::Browser("unable to create download"))?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(ExportError::Browser("document unavailable"))?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| ExportError::Browser("unable to create anchor"))?
            .dyn_into()
            .map_err(|_| ExportError::Browser("anchor cast failed"))?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or(ExportError::Browser("missing body"))?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();

        Ok(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let path = write_export(&desktop_export_dir()?, filename, &bytes)?;
        Ok(Some(path.to_string_lossy().to_string()))
    }
}

/// Write `bytes` to `dir/filename`, creating `dir` if needed.
#[cfg(not(target_arch = "wasm32"))]
fn write_export(
    dir: &std::path::Path,
    filename: &str,
    bytes: &[u8],
) -> Result<std::path::PathBuf, ExportError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    std::fs::write(&path, bytes)?;
    tracing::info!(path = %path.display(), "export written");
    Ok(path)
}

#[cfg(not(target_arch = "wasm32"))]
fn desktop_export_dir() -> Result<std::path::PathBuf, ExportError> {
    let dirs = directories::ProjectDirs::from("org", "Pulseboard", "Pulseboard")
        .ok_or(ExportError::NoExportDir)?;
    Ok(dirs.data_dir().join("exports"))
}

/// Scale applied when rasterising, so exported charts stay crisp.
const PNG_SCALE: f32 = 2.0;

async fn rasterise_svg(svg: &str) -> Result<Vec<u8>, ExportError> {
    #[cfg(target_arch = "wasm32")]
    {
        rasterise_web(svg).await
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        rasterise_native(svg)
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn rasterise_native(svg: &str) -> Result<Vec<u8>, ExportError> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &options)
        .map_err(|err| ExportError::Render(err.to_string()))?;

    let size = tree.size().to_int_size();
    let width = (size.width() as f32 * PNG_SCALE).round() as u32;
    let height = (size.height() as f32 * PNG_SCALE).round() as u32;
    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| ExportError::Render(format!("invalid canvas {width}x{height}")))?;
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(PNG_SCALE, PNG_SCALE),
        &mut pixmap.as_mut(),
    );

    // Opaque background, so premultiplied and straight alpha coincide.
    let mut buffer = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buffer, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder
            .write_header()
            .map_err(|err| ExportError::Render(err.to_string()))?
            .write_image_data(pixmap.data())
            .map_err(|err| ExportError::Render(err.to_string()))?;
    }
    Ok(buffer)
}

#[cfg(target_arch = "wasm32")]
async fn rasterise_web(svg: &str) -> Result<Vec<u8>, ExportError> {
    use base64::Engine;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, Url,
    };

    let opts = BlobPropertyBag::new();
    opts.set_type("image/svg+xml");
    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(svg));
    let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)
        .map_err(|_| ExportError::Browser("unable to build SVG blob"))?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|_| ExportError::Browser("unable to create SVG URL"))?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(ExportError::Browser("document unavailable"))?;

    let image = HtmlImageElement::new().map_err(|_| ExportError::Browser("unable to create image"))?;
    image.set_src(&url);
    JsFuture::from(image.decode())
        .await
        .map_err(|_| ExportError::Render("image decode failed".into()))?;

    let width = (image.natural_width() as f64 * PNG_SCALE as f64) as u32;
    let height = (image.natural_height() as f64 * PNG_SCALE as f64) as u32;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| ExportError::Browser("unable to create canvas"))?
        .dyn_into()
        .map_err(|_| ExportError::Browser("canvas cast failed"))?;
    canvas.set_width(width);
    canvas.set_height(height);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|_| ExportError::Browser("canvas context unavailable"))?
        .ok_or(ExportError::Browser("canvas context missing"))?
        .dyn_into()
        .map_err(|_| ExportError::Browser("context cast failed"))?;

    context.set_fill_style_str("#FFFFFF");
    context.fill_rect(0.0, 0.0, width as f64, height as f64);
    context
        .draw_image_with_html_image_element_and_dw_and_dh(
            &image,
            0.0,
            0.0,
            width as f64,
            height as f64,
        )
        .map_err(|_| ExportError::Render("unable to draw image".into()))?;

    let data_url = canvas
        .to_data_url_with_type("image/png")
        .map_err(|_| ExportError::Render("unable to serialise canvas".into()))?;
    Url::revoke_object_url(&url).ok();

    let encoded = data_url
        .split(',')
        .nth(1)
        .ok_or(ExportError::Render("malformed data URL".into()))?;
    base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|err| ExportError::Render(err.to_string()))
}

/// Toggle fullscreen for the card holding `element_id`. Desktop has no
/// fullscreen API for a single card, so this does nothing there.
pub fn toggle_fullscreen(element_id: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if document.fullscreen_element().is_some() {
            document.exit_fullscreen();
            return;
        }
        let card = document
            .get_element_by_id(element_id)
            .and_then(|el| el.closest(".chart-card").ok().flatten());
        match card {
            Some(card) => {
                if card.request_fullscreen().is_err() {
                    tracing::warn!(element_id, "fullscreen request rejected");
                }
            }
            None => tracing::debug!(element_id, "no chart card to expand"),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!(element_id, "fullscreen is not available on desktop");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMBEDDED: &str = include_str!("../../data/state_metrics.csv");

    #[test]
    fn csv_matches_embedded_definition() {
        let csv = build_csv(MetricTable::sample()).unwrap();
        assert_eq!(csv, EMBEDDED);
    }

    #[test]
    fn csv_layout() {
        let csv = build_csv(MetricTable::sample()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("State,IFI,CLCR,TAES,Composite,Region,Risk"));
        assert_eq!(lines.next(), Some("Meghalaya,1.6,0,0,0.84,Northeast,Critical"));
        assert!(csv.ends_with('\n'));
        assert_eq!(csv.lines().count(), 23);
        assert!(csv.contains(",At Risk\n"));
    }

    #[test]
    fn empty_table_exports_header_only() {
        let csv = build_csv(&MetricTable::default()).unwrap();
        assert_eq!(csv, "State,IFI,CLCR,TAES,Composite,Region,Risk\n");
    }

    #[test]
    fn failures_become_error_status() {
        let status = ExportStatus::from_outcome(Err(ExportError::NoExportDir));
        assert_eq!(
            status,
            ExportStatus::Error("unable to determine export directory".into())
        );
        let status = ExportStatus::from_outcome(Ok("CSV saved".into()));
        assert_eq!(status, ExportStatus::Done("CSV saved".into()));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn charts_rasterise_to_png() {
        let svg = crate::charts::volume_chart().to_svg();
        let png = rasterise_native(&svg).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn exports_land_in_a_created_directory() {
        let dir = std::env::temp_dir()
            .join(format!("pulseboard-exports-{}", std::process::id()))
            .join("exports");
        let csv = build_csv(MetricTable::sample()).unwrap();
        let path = write_export(&dir, "uidai_state_metrics.csv", csv.as_bytes()).unwrap();
        assert_eq!(path, dir.join("uidai_state_metrics.csv"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), csv);
        std::fs::remove_dir_all(dir.parent().unwrap()).ok();
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn malformed_svg_is_a_render_error() {
        assert!(matches!(
            rasterise_native("<svg"),
            Err(ExportError::Render(_))
        ));
    }
}
