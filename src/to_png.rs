//! PNG previews of a rendered matrix, for host-side checks without hardware.
//!
//! Each LED is drawn as a soft-edged disc on black, laid out in logical `(x, y)` order so
//! the image looks like the physical panel regardless of how the chain is wired.
#![cfg(feature = "host")]

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use png::{BitDepth, ColorType, Encoder, ScaledFloat};

use crate::color::ColorWord;
use crate::matrix::Renderer;

const PREVIEW_INVERSE_GAMMA: f32 = 2.2;

/// Logical size of the preview, in LEDs, plus a lookup for each one.
struct Panel<'a, const N: usize> {
    renderer: &'a Renderer<N>,
    columns: u32,
    rows: u32,
}

impl<'a, const N: usize> Panel<'a, N> {
    fn new(renderer: &'a Renderer<N>) -> Self {
        let (columns, rows) = renderer.addressing().extent(renderer.grid());
        // Grid::try_new keeps the LED count within u16.
        Self {
            renderer,
            columns: columns as u32,
            rows: rows as u32,
        }
    }

    fn color_at(&self, column: u32, row: u32) -> ColorWord {
        let origin = self.renderer.addressing().origin();
        self.renderer
            .pixel(column as i32 + origin, row as i32 + origin)
            .unwrap_or(ColorWord::BLACK)
    }
}

/// Render the renderer's current frame into a PNG sized to fit `target_max_dimension`.
///
/// # Errors
///
/// Returns any error from creating the file or encoding the PNG.
pub fn write_renderer_png<const N: usize>(
    renderer: &Renderer<N>,
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
) -> Result<(), Box<dyn Error>> {
    write_renderer_png_with_gamma(renderer, output_path, target_max_dimension, PREVIEW_INVERSE_GAMMA)
}

/// Like [`write_renderer_png`], with a custom preview inverse gamma.
///
/// # Errors
///
/// Returns any error from creating the file or encoding the PNG.
///
/// # Panics
///
/// Panics if `preview_inverse_gamma` is not positive or `target_max_dimension` is zero.
pub fn write_renderer_png_with_gamma<const N: usize>(
    renderer: &Renderer<N>,
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
    preview_inverse_gamma: f32,
) -> Result<(), Box<dyn Error>> {
    assert!(preview_inverse_gamma > 0.0, "preview_inverse_gamma must be positive");
    let output_path = output_path.as_ref();
    let panel = Panel::new(renderer);
    let cell_size = select_cell_size(panel.columns, panel.rows, target_max_dimension);
    let (width, height, pixels) = panel_pixels(&panel, cell_size, preview_inverse_gamma);

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(output_path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Sixteen);
    encoder.set_source_gamma(ScaledFloat::new(1.0));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&pixels)?;
    writer.finish()?;
    Ok(())
}

/// Largest cell size (at least 4) whose image, border included, fits the target.
fn select_cell_size(columns: u32, rows: u32, target_max_dimension: u32) -> u32 {
    assert!(target_max_dimension > 0, "target_max_dimension must be positive");
    let mut cell_size = target_max_dimension;
    while cell_size > 4 {
        let (width, height) = image_size(columns, rows, cell_size);
        if width.max(height) <= target_max_dimension {
            break;
        }
        cell_size -= 1;
    }
    cell_size.max(4)
}

const fn led_radius(cell_size: u32) -> u32 {
    let margin = if cell_size / 8 > 1 { cell_size / 8 } else { 1 };
    (cell_size - margin * 2) / 2
}

const fn image_size(columns: u32, rows: u32, cell_size: u32) -> (u32, u32) {
    let border = led_radius(cell_size);
    (columns * cell_size + border * 2, rows * cell_size + border * 2)
}

fn panel_pixels<const N: usize>(
    panel: &Panel<'_, N>,
    cell_size: u32,
    preview_inverse_gamma: f32,
) -> (u32, u32, Vec<u8>) {
    let led_radius = led_radius(cell_size);
    let border = led_radius;
    let (width, height) = image_size(panel.columns, panel.rows, cell_size);
    let mut bytes = vec![0u8; (width * height * 3 * 2) as usize];

    let center = (cell_size - 1) as i32 / 2;
    let fade_width = (led_radius / 3).max(1);
    let outer = led_radius as f32;
    let inner = led_radius.saturating_sub(fade_width) as f32;
    let radius_sq = (led_radius * led_radius) as i32;

    for row in 0..panel.rows {
        for column in 0..panel.columns {
            let color = panel.color_at(column, row);
            if color.is_black() {
                continue;
            }
            let linear = [color.red(), color.green(), color.blue()]
                .map(|channel| inverse_gamma_to_linear(channel, preview_inverse_gamma));

            for local_y in 0..cell_size {
                let delta_y = local_y as i32 - center;
                for local_x in 0..cell_size {
                    let delta_x = local_x as i32 - center;
                    let distance_sq = delta_x * delta_x + delta_y * delta_y;
                    if distance_sq > radius_sq {
                        continue;
                    }
                    let distance = (distance_sq as f32).sqrt();
                    let intensity = if distance <= inner {
                        1.0
                    } else {
                        (1.0 - (distance - inner) / (outer - inner)).max(0.0)
                    };
                    let x = border + column * cell_size + local_x;
                    let y = border + row * cell_size + local_y;
                    let offset = ((y * width + x) * 3 * 2) as usize;
                    for (channel_index, channel) in linear.iter().enumerate() {
                        let value = linear_to_u16(channel * intensity).to_be_bytes();
                        bytes[offset + channel_index * 2] = value[0];
                        bytes[offset + channel_index * 2 + 1] = value[1];
                    }
                }
            }
        }
    }

    (width, height, bytes)
}

fn inverse_gamma_to_linear(channel: u8, preview_inverse_gamma: f32) -> f32 {
    let normalized = f32::from(channel) / 255.0;
    normalized.powf(preview_inverse_gamma)
}

fn linear_to_u16(value: f32) -> u16 {
    let clamped = value.clamp(0.0, 1.0);
    (clamped * 65535.0).round() as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_size_fits_target() {
        let cell_size = select_cell_size(16, 8, 400);
        let (width, height) = image_size(16, 8, cell_size);
        assert!(width <= 400);
        assert!(height <= 400);
        let (larger_width, _) = image_size(16, 8, cell_size + 1);
        assert!(larger_width > 400);
    }
}
