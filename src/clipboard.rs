use std::borrow::Cow;
use std::path::Path;

/// Decode a PNG file and place it on the system clipboard, replacing
/// whatever was there.
pub fn copy_png_file(path: &Path) -> Result<(), String> {
    let img = image::open(path)
        .map_err(|e| format!("failed to decode {}: {}", path.display(), e))?
        .into_rgba8();
    let (width, height) = img.dimensions();

    let mut clipboard = arboard::Clipboard::new().map_err(|e| e.to_string())?;
    let img_data = arboard::ImageData {
        width: width as usize,
        height: height as usize,
        bytes: Cow::Owned(img.into_raw()),
    };
    clipboard.set_image(img_data).map_err(|e| e.to_string())?;

    eprintln!("Image copied to clipboard ({}x{})", width, height);
    Ok(())
}
