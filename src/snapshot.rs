//! Still-image export of the rendered frame.
//!
//! Copies the offscreen color target into a mapped buffer (rows padded to
//! the GPU's 256-byte alignment), strips the padding on the CPU, and
//! writes a PNG with a fixed filename. Strictly read-only with respect to
//! the scene.

use std::path::Path;
use std::sync::mpsc;

use crate::error::StrandError;

/// Fixed snapshot output filename.
pub const SNAPSHOT_FILENAME: &str = "protein-snapshot.png";

/// Read back the full contents of an RGBA8 texture.
///
/// Blocks until the GPU copy completes. Returns tightly packed RGBA rows.
pub fn capture_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, StrandError> {
    let padded_bytes_per_row = padded_bytes_per_row(width);
    let buffer_size = u64::from(padded_bytes_per_row) * u64::from(height);

    let staging = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Snapshot Staging Buffer"),
        size: buffer_size,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder =
        device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Snapshot Encoder"),
        });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &staging,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded_bytes_per_row),
                rows_per_image: Some(height),
            },
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
    let _ = queue.submit(std::iter::once(encoder.finish()));

    let slice = staging.slice(..);
    let (tx, rx) = mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    let _ = device.poll(wgpu::PollType::Wait);
    rx.recv()
        .map_err(|_| StrandError::Snapshot("map callback lost".to_owned()))?
        .map_err(|e| StrandError::Snapshot(format!("buffer map: {e:?}")))?;

    let data = slice.get_mapped_range();
    let pixels =
        unpad_rows(&data, width, height, padded_bytes_per_row as usize);
    drop(data);
    staging.unmap();

    Ok(pixels)
}

/// Write tightly packed RGBA pixels as a PNG file.
pub fn write_png(
    path: &Path,
    pixels: &[u8],
    width: u32,
    height: u32,
) -> Result<(), StrandError> {
    image::save_buffer_with_format(
        path,
        pixels,
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| StrandError::Snapshot(e.to_string()))?;
    log::info!("snapshot written to {}", path.display());
    Ok(())
}

/// Row pitch for a texture-to-buffer copy, honoring wgpu's 256-byte
/// alignment requirement.
fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * 4;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// Strip the per-row alignment padding out of mapped copy data.
fn unpad_rows(
    padded: &[u8],
    width: u32,
    height: u32,
    padded_bytes_per_row: usize,
) -> Vec<u8> {
    let row_bytes = width as usize * 4;
    let mut out = Vec::with_capacity(row_bytes * height as usize);
    for row in 0..height as usize {
        let start = row * padded_bytes_per_row;
        out.extend_from_slice(&padded[start..start + row_bytes]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_pitch_is_256_aligned() {
        assert_eq!(padded_bytes_per_row(64), 256);
        assert_eq!(padded_bytes_per_row(100), 512);
        assert_eq!(padded_bytes_per_row(128), 512);
        assert_eq!(padded_bytes_per_row(1), 256);
    }

    #[test]
    fn unpad_strips_alignment_bytes() {
        // Two rows of a 2-pixel-wide image padded to 16-byte rows.
        let mut padded = vec![0u8; 32];
        padded[..8].copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        padded[16..24].copy_from_slice(&[9, 10, 11, 12, 13, 14, 15, 16]);

        let tight = unpad_rows(&padded, 2, 2, 16);
        assert_eq!(tight, (1..=16).collect::<Vec<u8>>());
    }

    #[test]
    fn png_round_trips_through_disk() {
        let path = std::env::temp_dir().join("strandview-snapshot-test.png");
        let pixels: Vec<u8> =
            (0..4 * 4 * 4).map(|i| (i % 251) as u8).collect();
        write_png(&path, &pixels, 4, 4).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (4, 4));
        assert_eq!(img.into_raw(), pixels);
        let _ = std::fs::remove_file(path);
    }
}
