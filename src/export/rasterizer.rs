use std::io::Cursor;

use base64::Engine as _;
use egui::Color32;
use futures::FutureExt as _;
use futures::future::BoxFuture;
use image::{ImageFormat, Rgb, RgbImage};
use uuid::Uuid;

use crate::canvas::{CELL_BORDER, CanvasStyle, GRID_BORDER};
use crate::error::ExportError;
use crate::grid::{BLANK, CellGrid, GridSize};

pub const PNG_MIME: &str = "image/png";

/// A frozen copy of the grid region, taken when an export is requested.
///
/// Painting that happens while the export is pending does not affect it.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSnapshot {
    pub size: GridSize,
    pub cells: Vec<Color32>,
    pub style: CanvasStyle,
}

impl GridSnapshot {
    pub fn capture(grid: &CellGrid, style: CanvasStyle) -> Self {
        Self {
            size: grid.size(),
            cells: grid.cells().to_vec(),
            style,
        }
    }
}

/// Encoded raster image, usable both for the preview and as a download
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedImage {
    id: Uuid,
    mime: &'static str,
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl std::fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncodedImage")
            .field("id", &self.id)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl EncodedImage {
    pub fn new(mime: &'static str, bytes: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            mime,
            bytes,
            width,
            height,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn mime(&self) -> &'static str {
        self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn to_data_uri(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{}", self.mime, encoded)
    }

    /// Decodes the image back into pixels for display
    pub fn decode(&self) -> Result<egui::ColorImage, ExportError> {
        let rgba = image::load_from_memory(&self.bytes)?.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
    }
}

/// Converts a snapshot of the grid region into an encoded image.
///
/// Rasterization is a single-shot asynchronous operation: it either yields
/// the image or an error, exactly once.
pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, snapshot: GridSnapshot) -> BoxFuture<'static, Result<EncodedImage, ExportError>>;
}

/// Renders the grid the way the canvas shows it and encodes it as PNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct PngRasterizer;

impl PngRasterizer {
    /// Pixel geometry for a snapshot: `(cell_px, padding_px, edge_px)`
    pub fn geometry(snapshot: &GridSnapshot) -> (u32, u32, u32) {
        let side = snapshot.size.get() as u32;
        let padding = snapshot.style.padding_px.max(0.0).round() as u32;
        let inner = (snapshot.style.canvas_px.max(0.0).round() as u32).saturating_sub(2 * padding);
        let cell_px = (inner / side).max(1);
        (cell_px, padding, 2 * padding + side * cell_px)
    }

    pub fn render(snapshot: &GridSnapshot) -> RgbImage {
        let side = snapshot.size.get() as u32;
        let (cell_px, padding, edge) = Self::geometry(snapshot);
        let mut img = RgbImage::from_pixel(edge, edge, to_rgb(BLANK));

        for (index, color) in snapshot.cells.iter().enumerate() {
            let x0 = padding + (index as u32 % side) * cell_px;
            let y0 = padding + (index as u32 / side) * cell_px;
            let fill = to_rgb(*color);
            let border = to_rgb(CELL_BORDER);
            for y in y0..y0 + cell_px {
                for x in x0..x0 + cell_px {
                    let on_edge = x == x0 || y == y0 || x == x0 + cell_px - 1 || y == y0 + cell_px - 1;
                    let px = if snapshot.style.show_cell_borders && on_edge && cell_px > 2 {
                        border
                    } else {
                        fill
                    };
                    img.put_pixel(x, y, px);
                }
            }
        }

        let (lo, hi) = (padding, padding + side * cell_px - 1);
        let border = to_rgb(GRID_BORDER);
        for i in lo..=hi {
            img.put_pixel(i, lo, border);
            img.put_pixel(i, hi, border);
            img.put_pixel(lo, i, border);
            img.put_pixel(hi, i, border);
        }
        img
    }

    pub fn encode(snapshot: &GridSnapshot) -> Result<EncodedImage, ExportError> {
        let img = Self::render(snapshot);
        let (width, height) = img.dimensions();
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        log::debug!("Encoded {}x{} PNG ({} bytes)", width, height, bytes.len());
        Ok(EncodedImage::new(PNG_MIME, bytes, width, height))
    }
}

impl Rasterizer for PngRasterizer {
    fn rasterize(&self, snapshot: GridSnapshot) -> BoxFuture<'static, Result<EncodedImage, ExportError>> {
        async move { Self::encode(&snapshot) }.boxed()
    }
}

fn to_rgb(color: Color32) -> Rgb<u8> {
    Rgb([color.r(), color.g(), color.b()])
}
