//! Reading invoice text from files.

use std::fs;
use std::path::Path;

use tracing::debug;

use tally_core::models::config::SourceConfig;

/// Punctuation kept by [`clean_extracted_text`].
const KEPT_PUNCTUATION: &str = ".,/$#@()*+-:_";

/// File extensions the CLI can read text from.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "txt", "text"];

/// Lowercased extension of `path`, or an empty string.
pub fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

pub fn is_supported(path: &Path) -> bool {
    SUPPORTED_EXTENSIONS.contains(&extension(path).as_str())
}

/// Read raw text from a PDF (embedded text layer) or plain text file.
pub fn read_text(path: &Path) -> anyhow::Result<String> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    match extension(path).as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            let text = pdf_extract::extract_text_from_mem(&data)
                .map_err(|e| anyhow::anyhow!("Failed to extract PDF text: {}", e))?;
            debug!("Extracted {} characters from PDF", text.len());
            Ok(text)
        }
        "txt" | "text" => Ok(fs::read_to_string(path)?),
        other => anyhow::bail!("Unsupported file format: {}", other),
    }
}

/// Read and prepare the text of one invoice file.
pub fn load_text(path: &Path, config: &SourceConfig) -> anyhow::Result<String> {
    let raw = read_text(path)?;
    let text = if config.clean_text {
        clean_extracted_text(&raw)
    } else {
        raw
    };

    if text.trim().chars().count() < config.min_text_length.max(1) {
        anyhow::bail!("No text could be extracted from {}", path.display());
    }

    Ok(text)
}

/// Normalize OCR or PDF text: strip characters outside the OCR whitelist,
/// collapse whitespace runs within each line and drop empty lines.
pub fn clean_extracted_text(text: &str) -> String {
    text.lines()
        .map(|line| {
            let kept: String = line
                .chars()
                .filter(|c| c.is_alphanumeric() || c.is_whitespace() || KEPT_PUNCTUATION.contains(*c))
                .collect();
            kept.split_whitespace().collect::<Vec<_>>().join(" ")
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_clean_extracted_text() {
        let raw = "  OFFICE   DEPOT INC.  \n\n\tTOTAL:  $245.67 ™\n   \n";
        assert_eq!(clean_extracted_text(raw), "OFFICE DEPOT INC.\nTOTAL: $245.67");
        assert_eq!(clean_extracted_text(""), "");
    }

    #[test]
    fn test_extension() {
        assert_eq!(extension(&PathBuf::from("a/B.PDF")), "pdf");
        assert!(is_supported(&PathBuf::from("invoice.txt")));
        assert!(!is_supported(&PathBuf::from("invoice.png")));
        assert!(!is_supported(&PathBuf::from("invoice")));
    }

    #[test]
    fn test_load_text_rejects_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "  \n \n").unwrap();
        assert!(load_text(&path, &SourceConfig::default()).is_err());
    }

    #[test]
    fn test_unsupported_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        fs::write(&path, [0u8; 4]).unwrap();
        let err = read_text(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported file format"));
    }
}
