use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Used when sanitization strips every character from an upload's name
pub const DEFAULT_FILENAME: &str = "certificate.pdf";

const WINDOWS_DEVICE_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Reduces a client-supplied filename to a safe, flat ASCII name.
///
/// Returns an empty string when nothing survives.
pub fn sanitize_filename(name: &str) -> String {
    let flattened: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .filter(char::is_ascii)
        .collect();

    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");

    let cleaned: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');

    let stem = trimmed.split('.').next().unwrap_or_default();
    if WINDOWS_DEVICE_NAMES.iter().any(|d| d.eq_ignore_ascii_case(stem)) {
        return format!("_{}", trimmed);
    }

    trimmed.to_string()
}

/// Sanitizes, falling back to [`DEFAULT_FILENAME`]
pub fn sanitize_or_default(name: &str) -> String {
    let sanitized = sanitize_filename(name);
    if sanitized.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}

/// Extension after the last dot, lowercased. `None` for dotfiles and names without one.
pub fn file_extension(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// `{YYYYMMDD_HHMMSS}_{8 hex chars}_{filename}`
pub fn unique_stored_name(filename: &str) -> String {
    unique_stored_name_at(Utc::now(), filename)
}

pub fn unique_stored_name_at(now: DateTime<Utc>, filename: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{}_{}_{}", now.format("%Y%m%d_%H%M%S"), &id[..8], filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("My Certificate.pdf"), "My_Certificate.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_filename("C:\\Users\\me\\doc.pdf"), "C_Users_me_doc.pdf");
        assert_eq!(sanitize_filename("résumé 2024.pdf"), "rsum_2024.pdf");
        assert_eq!(sanitize_filename("a<b>c|d?.pdf"), "abcd.pdf");
        assert_eq!(sanitize_filename("..."), "");
        assert_eq!(sanitize_filename("证书"), "");
        assert_eq!(sanitize_filename("con.pdf"), "_con.pdf");
    }

    #[test]
    fn test_sanitize_or_default() {
        assert_eq!(sanitize_or_default("证书"), DEFAULT_FILENAME);
        assert_eq!(sanitize_or_default("report.pdf"), "report.pdf");
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("report.PDF"), Some("pdf".to_string()));
        assert_eq!(file_extension("archive.tar.gz"), Some("gz".to_string()));
        assert_eq!(file_extension("README"), None);
        assert_eq!(file_extension(".pdf"), None);
        assert_eq!(file_extension("trailing."), None);
    }

    #[test]
    fn test_unique_stored_name() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let a = unique_stored_name_at(now, "doc.pdf");
        let b = unique_stored_name_at(now, "doc.pdf");

        assert!(a.starts_with("20240309_140507_"));
        assert!(a.ends_with("_doc.pdf"));
        assert_eq!(a.len(), "20240309_140507_".len() + 8 + "_doc.pdf".len());
        assert_ne!(a, b);
    }
}
