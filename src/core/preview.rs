//! # Logo Previews
//!
//! A logo picked from disk is described through a transient preview, while a
//! logo that came from the server is an encoded `data:` URI and is described
//! from its header. Local previews are [`PreviewHandle`]s handed out by a
//! [`PreviewPool`]; the handle carries only what the form shows, the file
//! bytes stay with the draft. Dropping a handle releases it, so replacing the
//! selected file, resetting the draft, or tearing down the app all free the
//! preview.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::debug;
use uuid::Uuid;

/// Hands out preview handles and counts how many are alive.
#[derive(Debug, Clone, Default)]
pub struct PreviewPool {
    live: Arc<AtomicUsize>,
}

impl PreviewPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a preview of `bytes` as live.
    pub fn allocate(&self, bytes: &[u8]) -> PreviewHandle {
        self.live.fetch_add(1, Ordering::SeqCst);
        let handle = PreviewHandle {
            id: Uuid::new_v4(),
            byte_len: bytes.len(),
            live: Arc::clone(&self.live),
        };
        debug!("Allocated preview {} ({} bytes)", handle.id, handle.byte_len);
        handle
    }

    /// Number of handles that have not been dropped yet.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

/// A locally generated preview. Not `Clone`: exactly one owner releases it.
#[derive(Debug)]
pub struct PreviewHandle {
    id: Uuid,
    byte_len: usize,
    live: Arc<AtomicUsize>,
}

impl PreviewHandle {
    /// Size of the original file.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }
}

impl PartialEq for PreviewHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
        debug!("Released preview {}", self.id);
    }
}

/// What a renderer can say about an encoded logo without drawing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUriInfo {
    pub content_type: String,
    pub byte_len: usize,
}

/// Parses the header of a `data:` URI. Returns `None` for anything else
/// (plain URLs, malformed base64).
pub fn describe_data_uri(uri: &str) -> Option<DataUriInfo> {
    let rest = uri.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let (media, is_base64) = match header.strip_suffix(";base64") {
        Some(media) => (media, true),
        None => (header, false),
    };
    let content_type = media.split(';').next().unwrap_or_default();
    let content_type = if content_type.is_empty() {
        "text/plain".to_string()
    } else {
        content_type.to_string()
    };
    let byte_len = if is_base64 {
        STANDARD.decode(payload.trim()).ok()?.len()
    } else {
        payload.len()
    };
    Some(DataUriInfo {
        content_type,
        byte_len,
    })
}

/// Guesses an image content type from the file extension.
pub fn guess_content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("bmp") => "image/bmp",
        Some("avif") => "image/avif",
        _ => "application/octet-stream",
    }
}

/// Human-friendly byte count: `512 B`, `12.3 KB`, `1.5 MB`.
pub fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{bytes} B")
    } else if b < KB * KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / (KB * KB))
    }
}
