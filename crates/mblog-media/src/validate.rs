//! Advisory upload validation.

/// Upload size ceiling: 2 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 2 * 1024 * 1024;

/// Content types accepted for upload.
pub const ALLOWED_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Check an upload's declared size and content type.
///
/// Purely advisory: both values are client-declared, so this is a
/// cheap first gate, not a guarantee the bytes decode. Mislabeled or
/// malformed content is caught by the decode step.
pub fn validate_upload(declared_len: u64, declared_content_type: &str) -> bool {
    declared_len <= MAX_UPLOAD_BYTES
        && ALLOWED_CONTENT_TYPES.contains(&declared_content_type.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_allowed_types_up_to_ceiling() {
        assert!(validate_upload(1024, "image/jpeg"));
        assert!(validate_upload(MAX_UPLOAD_BYTES, "image/png"));
        assert!(validate_upload(0, "image/webp"));
    }

    #[test]
    fn content_type_is_case_insensitive() {
        assert!(validate_upload(1024, "IMAGE/PNG"));
    }

    #[test]
    fn rejects_oversized_uploads() {
        assert!(!validate_upload(MAX_UPLOAD_BYTES + 1, "image/png"));
        assert!(!validate_upload(3 * 1024 * 1024, "image/png"));
    }

    #[test]
    fn rejects_disallowed_types() {
        assert!(!validate_upload(1024, "image/gif"));
        assert!(!validate_upload(1024, "application/pdf"));
        assert!(!validate_upload(1024, ""));
    }
}
