// Artwork preview - decodes fetched bytes into a terminal cell grid
//
// Each terminal cell shows two vertically stacked pixels via the upper
// half-block glyph, so a preview of R rows covers 2R pixel rows. On any
// decode failure the UI falls back to a fixed placeholder pattern.

use image::imageops::FilterType;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// One terminal cell: top and bottom pixel, `None` = transparent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    top: Option<(u8, u8, u8)>,
    bottom: Option<(u8, u8, u8)>,
}

/// A decoded, downsampled artwork image ready for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    rows: Vec<Vec<Cell>>,
}

impl Preview {
    /// Preview size in terminal cells (columns, rows)
    pub fn size(&self) -> (u16, u16) {
        let cols = self.rows.first().map(Vec::len).unwrap_or(0);
        (cols as u16, self.rows.len() as u16)
    }

    /// Render to ratatui lines, one line per cell row.
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        self.rows
            .iter()
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .iter()
                    .map(|cell| match (cell.top, cell.bottom) {
                        (None, None) => Span::raw(" "),
                        (Some(t), None) => {
                            Span::styled("▀", Style::default().fg(rgb(t)))
                        }
                        (None, Some(b)) => {
                            Span::styled("▄", Style::default().fg(rgb(b)))
                        }
                        (Some(t), Some(b)) => {
                            Span::styled("▀", Style::default().fg(rgb(t)).bg(rgb(b)))
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

/// Decode image bytes and downsample to fit `max_cols` x `max_rows` cells,
/// preserving aspect ratio. `None` when the bytes are not a decodable image.
pub fn decode_preview(bytes: &[u8], max_cols: u16, max_rows: u16) -> Option<Preview> {
    let rgba = image::load_from_memory(bytes).ok()?.to_rgba8();
    if max_cols == 0 || max_rows == 0 || rgba.width() == 0 || rgba.height() == 0 {
        return None;
    }

    // Target pixel grid: cols x rows*2, scaled to fit
    let (max_w, max_h) = (u32::from(max_cols), u32::from(max_rows) * 2);
    let scale = f64::min(
        max_w as f64 / rgba.width() as f64,
        max_h as f64 / rgba.height() as f64,
    )
    .min(1.0);
    let width = ((rgba.width() as f64 * scale) as u32).max(1);
    let height = (((rgba.height() as f64 * scale) as u32).max(2) / 2) * 2;

    let scaled = image::imageops::resize(&rgba, width, height, FilterType::Triangle);

    let mut rows = Vec::with_capacity((height / 2) as usize);
    for y in 0..height / 2 {
        let mut row = Vec::with_capacity(width as usize);
        for x in 0..width {
            row.push(Cell {
                top: pixel(&scaled, x, y * 2),
                bottom: pixel(&scaled, x, y * 2 + 1),
            });
        }
        rows.push(row);
    }

    Some(Preview { rows })
}

fn pixel(img: &image::RgbaImage, x: u32, y: u32) -> Option<(u8, u8, u8)> {
    let image::Rgba([r, g, b, a]) = *img.get_pixel(x, y);
    // Artwork sprites use transparency heavily; treat mostly-clear pixels
    // as empty terminal background
    if a < 64 {
        None
    } else {
        Some((r, g, b))
    }
}

/// Fixed placeholder shown when artwork is missing or undecodable: a dim
/// checkerboard the size of the preview area.
pub fn placeholder(cols: u16, rows: u16) -> Preview {
    let dark = Some((60, 60, 60));
    let darker = Some((40, 40, 40));

    let rows = (0..rows.max(1))
        .map(|y| {
            (0..cols.max(1))
                .map(|x| {
                    let even = (x / 2 + y) % 2 == 0;
                    Cell {
                        top: if even { dark } else { darker },
                        bottom: if even { darker } else { dark },
                    }
                })
                .collect()
        })
        .collect();

    Preview { rows }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn red_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 0, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_undecodable_bytes_yield_none() {
        assert!(decode_preview(b"definitely not an image", 32, 16).is_none());
        assert!(decode_preview(&[], 32, 16).is_none());
    }

    #[test]
    fn test_decode_fits_preview_area() {
        let preview = decode_preview(&red_png(128, 128), 32, 16).unwrap();
        let (cols, rows) = preview.size();
        assert!(cols >= 1 && cols <= 32);
        assert!(rows >= 1 && rows <= 16);
    }

    #[test]
    fn test_small_image_is_not_upscaled() {
        let preview = decode_preview(&red_png(8, 8), 32, 16).unwrap();
        let (cols, rows) = preview.size();
        assert!(cols <= 8);
        assert!(rows <= 4);
    }

    #[test]
    fn test_to_lines_matches_row_count() {
        let preview = decode_preview(&red_png(64, 64), 20, 10).unwrap();
        let (_, rows) = preview.size();
        assert_eq!(preview.to_lines().len(), rows as usize);
    }

    #[test]
    fn test_placeholder_has_requested_size() {
        let preview = placeholder(24, 12);
        assert_eq!(preview.size(), (24, 12));
    }

    #[test]
    fn test_zero_area_rejected() {
        assert!(decode_preview(&red_png(16, 16), 0, 16).is_none());
    }
}
