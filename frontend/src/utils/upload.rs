/// A file picked in the browser, read into memory for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn validate_image(file: &SelectedFile) -> Result<(), String> {
    if file.bytes.is_empty() {
        return Err("The selected file is empty".into());
    }
    if file.bytes.len() > MAX_UPLOAD_BYTES {
        return Err("Images must be 10 MB or smaller".into());
    }
    if !file.mime_type.starts_with("image/") {
        return Err(format!("{} is not an image", file.name));
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub async fn read_input_file(ev: &leptos::ev::Event) -> Result<Option<SelectedFile>, String> {
    use wasm_bindgen::JsCast;

    let input = ev
        .target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        .ok_or("Not a file input")?;
    let Some(file) = input.files().and_then(|files| files.get(0)) else {
        return Ok(None);
    };
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| "Failed to read file".to_string())?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let mime_type = match file.type_() {
        t if t.is_empty() => "application/octet-stream".to_string(),
        t => t,
    };
    Ok(Some(SelectedFile {
        name: file.name(),
        mime_type,
        bytes,
    }))
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn read_input_file(_ev: &leptos::ev::Event) -> Result<Option<SelectedFile>, String> {
    Err("File selection is only available in the browser".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(mime: &str, len: usize) -> SelectedFile {
        SelectedFile {
            name: "cover.png".into(),
            mime_type: mime.into(),
            bytes: vec![1; len],
        }
    }

    #[test]
    fn accepts_small_images_only() {
        assert!(validate_image(&file("image/png", 10)).is_ok());
        assert!(validate_image(&file("image/png", 0)).is_err());
        assert!(validate_image(&file("application/pdf", 10)).is_err());
        assert!(validate_image(&file("image/jpeg", MAX_UPLOAD_BYTES + 1)).is_err());
    }
}
