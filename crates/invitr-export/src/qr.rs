use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::Luma;
use qrcode::{EcLevel, QrCode};
use tracing::debug;

const MODULE_PIXELS: u32 = 10;

pub fn qr_file_name(event_id: &str) -> String {
    format!("qr_{event_id}.png")
}

/// Renders `url` as a black-on-white PNG (error correction L, 10px modules,
/// standard 4-module quiet zone) at `{dir}/qr_{event_id}.png`.
pub fn generate_qr_code(url: &str, event_id: &str, dir: &Path) -> Result<PathBuf> {
    let code = QrCode::with_error_correction_level(url.as_bytes(), EcLevel::L)
        .context("URL too long for a QR code")?;
    let image = code
        .render::<Luma<u8>>()
        .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
        .quiet_zone(true)
        .build();

    fs::create_dir_all(dir).with_context(|| format!("Cannot create {}", dir.display()))?;
    let path = dir.join(qr_file_name(event_id));
    image
        .save(&path)
        .with_context(|| format!("Cannot write {}", path.display()))?;

    debug!("QR code for event {} written to {}", event_id, path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_png_named_after_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = generate_qr_code("http://localhost:5000/event/e1", "e1", &dir.path().join("qrcodes")).unwrap();

        assert_eq!(path.file_name().unwrap(), "qr_e1.png");
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
