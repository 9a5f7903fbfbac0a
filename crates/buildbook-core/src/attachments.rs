//! Reading user-selected files into storable data URLs.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use std::path::Path;

use buildbook_records::{Document, DocumentCategory, Receipt, ReceiptCategory};

use crate::error::AttachmentError;

/// A file read into memory and encoded as a `data:` URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: String,
    pub size: u64,
    /// `data:<mime>;base64,<payload>`
    pub data_url: String,
}

impl Attachment {
    pub fn into_document(
        self,
        name: impl Into<String>,
        category: DocumentCategory,
        uploaded_by: impl Into<String>,
    ) -> Document {
        let mut document = Document::new(name, self.file_name, category, uploaded_by);
        document.file_type = self.mime_type;
        document.file_size = self.size;
        document.file_data = Some(self.data_url);
        document
    }

    pub fn into_receipt(
        self,
        vendor: impl Into<String>,
        amount: f64,
        date: DateTime<Utc>,
        category: ReceiptCategory,
        uploaded_by: impl Into<String>,
    ) -> Receipt {
        let mut receipt = Receipt::new(vendor, amount, date, category, uploaded_by);
        receipt.file_name = self.file_name;
        receipt.file_type = self.mime_type;
        receipt.file_size = self.size;
        receipt.file_data = Some(self.data_url);
        receipt
    }
}

/// Reads `path` and encodes it as a data URL.
pub async fn load_attachment(path: impl AsRef<Path>) -> Result<Attachment, AttachmentError> {
    let path = path.as_ref();
    let read_err = |source| AttachmentError::Read {
        path: path.to_path_buf(),
        source,
    };

    let metadata = tokio::fs::metadata(path).await.map_err(read_err)?;
    if !metadata.is_file() {
        return Err(AttachmentError::NotAFile(path.to_path_buf()));
    }

    let bytes = tokio::fs::read(path).await.map_err(read_err)?;
    let mime_type = mime_for(path);
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    tracing::debug!(path = %path.display(), size = bytes.len(), mime = mime_type, "Loaded attachment");

    Ok(Attachment {
        file_name,
        mime_type: mime_type.to_string(),
        size: bytes.len() as u64,
        data_url: format!("data:{};base64,{}", mime_type, BASE64.encode(&bytes)),
    })
}

/// MIME type guessed from the file extension.
pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "json" => "application/json",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}

/// Human-readable size in 1024-based units, at most two decimals.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024 * 1024), "3072 GB");
    }

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for(Path::new("scan.PDF")), "application/pdf");
        assert_eq!(mime_for(Path::new("photo.jpeg")), "image/jpeg");
        assert_eq!(mime_for(Path::new("README")), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_load_attachment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipt.txt");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"hello")
            .unwrap();

        let attachment = load_attachment(&path).await.unwrap();
        assert_eq!(attachment.file_name, "receipt.txt");
        assert_eq!(attachment.mime_type, "text/plain");
        assert_eq!(attachment.size, 5);
        assert_eq!(attachment.data_url, "data:text/plain;base64,aGVsbG8=");

        let receipt = attachment.into_receipt(
            "Timber Yard",
            42.0,
            Utc::now(),
            ReceiptCategory::Materials,
            "emp-1",
        );
        assert_eq!(receipt.file_name, "receipt.txt");
        assert_eq!(receipt.file_size, 5);
        assert!(receipt.file_data.unwrap().starts_with("data:text/plain"));
    }

    #[tokio::test]
    async fn test_load_attachment_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = load_attachment(dir.path().join("nope.pdf")).await;
        assert!(matches!(missing, Err(AttachmentError::Read { .. })));

        let directory = load_attachment(dir.path()).await;
        assert!(matches!(directory, Err(AttachmentError::NotAFile(_))));
    }

    #[tokio::test]
    async fn test_attachment_into_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.pdf");
        std::fs::write(&path, [0x25, 0x50, 0x44, 0x46]).unwrap();

        let document = load_attachment(&path)
            .await
            .unwrap()
            .into_document("Site plan", DocumentCategory::Plan, "emp-1");
        assert_eq!(document.file_name, "plan.pdf");
        assert_eq!(document.file_type, "application/pdf");
        assert_eq!(document.file_size, 4);
    }
}
