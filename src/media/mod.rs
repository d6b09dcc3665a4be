//! Media classification: what kind of file an upload is, and how a video URL
//! should be embedded.

pub mod video;

pub use video::{VideoEmbed, VideoSource};

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "webm", "m4v", "mkv"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

/// Sniff the image type from its leading bytes.
pub fn image_mime_from_magic(bytes: &[u8]) -> Option<&'static str> {
    if bytes.len() < 4 {
        return None;
    }
    match bytes {
        // JPEG: FF D8 FF
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        // PNG: 89 50 4E 47
        [0x89, 0x50, 0x4E, 0x47, ..] => Some("image/png"),
        // GIF: 47 49 46 38
        [0x47, 0x49, 0x46, 0x38, ..] => Some("image/gif"),
        // WebP: 52 49 46 46 ... 57 45 42 50
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some("image/webp"),
        _ => None,
    }
}

/// Lower-cased extension of a file name, if it has one.
pub fn extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Images are trusted by content only; videos by declared type or extension.
pub fn detect_kind(file_name: &str, content_type: Option<&str>, bytes: &[u8]) -> Option<MediaKind> {
    if image_mime_from_magic(bytes).is_some() {
        return Some(MediaKind::Image);
    }
    let declared_video = content_type.is_some_and(|ct| ct.starts_with("video/"));
    let video_ext = extension(file_name).is_some_and(|ext| VIDEO_EXTENSIONS.contains(&ext.as_str()));
    (declared_video || video_ext).then_some(MediaKind::Video)
}
