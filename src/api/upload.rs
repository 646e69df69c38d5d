/// Image upload endpoint
///
/// POST /api/upload accepts one multipart file under the `image` field, stores it in
/// the upload directory under a generated name and returns its public URL.
/// File content, type and size are not inspected beyond the request body limit.

use crate::api::{auth::AdminSession, error::ApiError, AppState};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::Json,
    routing::post,
    Router,
};
use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncRead, AsyncWriteExt};

/// Multipart field carrying the file
pub const UPLOAD_FIELD: &str = "image";

/// Attempts at finding an unused filename before giving up
const MAX_NAME_ATTEMPTS: usize = 8;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// Create upload routes
pub fn create_upload_routes() -> Router<AppState> {
    Router::new().route("/api/upload", post(upload_image))
}

/// Store an uploaded image
///
/// POST /api/upload (multipart/form-data, field "image")
/// Returns: { "url": "/uploads/<generated name>" }
async fn upload_image(
    _admin: AdminSession,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let Ok(mut multipart) = multipart else {
        return Err(ApiError::NoFile);
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?;

        let upload_dir = PathBuf::from(&state.upload.upload_dir);
        let filename = store_file(&upload_dir, &original_name, &bytes[..]).await?;
        let url = format!("{}/{}", state.upload.public_prefix.trim_end_matches('/'), filename);

        tracing::info!("🖼️ Stored upload '{}' as {} ({} bytes)", original_name, url, bytes.len());

        return Ok(Json(UploadResponse { url }));
    }

    Err(ApiError::NoFile)
}

/// Copy `source` into a file under a fresh generated name, returning that name
///
/// Files are opened with `create_new`, so two uploads never share a name even when
/// the generated candidates collide. A failed copy removes the partial file.
pub async fn store_file<R>(upload_dir: &Path, original_name: &str, mut source: R) -> anyhow::Result<String>
where
    R: AsyncRead + Unpin,
{
    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create upload directory '{}': {}", upload_dir.display(), e))?;

    for _ in 0..MAX_NAME_ATTEMPTS {
        let filename = generate_filename(original_name);
        let path = upload_dir.join(&filename);

        let mut file = match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(anyhow::anyhow!("Failed to create '{}': {}", path.display(), e)),
        };

        let written = async {
            tokio::io::copy(&mut source, &mut file).await?;
            file.flush().await
        }
        .await;

        if let Err(e) = written {
            drop(file);
            if let Err(remove_err) = tokio::fs::remove_file(&path).await {
                tracing::warn!("Failed to remove partial upload '{}': {}", path.display(), remove_err);
            }
            return Err(anyhow::anyhow!("Failed to write '{}': {}", path.display(), e));
        }

        return Ok(filename);
    }

    anyhow::bail!("Could not find a free upload filename for '{}'", original_name)
}

/// `<unix millis>-<9 digit random><.ext>`
pub fn generate_filename(original_name: &str) -> String {
    let suffix: u32 = rand::rng().random_range(0..1_000_000_000);
    format!(
        "{}-{:09}{}",
        Utc::now().timestamp_millis(),
        suffix,
        extension(original_name)
    )
}

/// Lower-cased extension with its dot, or empty when absent or unusual
fn extension(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.len() <= 10 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        io,
        pin::Pin,
        task::{Context, Poll},
    };
    use tokio::io::{AsyncReadExt, ReadBuf};

    /// Reader whose every read fails, like a client dropping mid-upload
    struct BrokenReader;

    impl AsyncRead for BrokenReader {
        fn poll_read(self: Pin<&mut Self>, _cx: &mut Context<'_>, _buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Err(io::Error::new(io::ErrorKind::ConnectionReset, "stream cut")))
        }
    }

    #[tokio::test]
    async fn failed_write_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = (&b"partial bytes"[..]).chain(BrokenReader);

        let err = store_file(dir.path(), "cut.png", source).await.unwrap_err();
        assert!(err.to_string().contains("stream cut"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn extension_is_kept_lowercased() {
        assert_eq!(extension("photo.PNG"), ".png");
        assert_eq!(extension("archive.tar.gz"), ".gz");
        assert_eq!(extension("README"), "");
        assert_eq!(extension("weird.p/ng"), "");
        assert_eq!(extension(""), "");
    }

    #[test]
    fn generated_names_have_timestamp_suffix_and_extension() {
        let name = generate_filename("cat.jpg");
        let (stamp, rest) = name.split_once('-').unwrap();

        assert!(stamp.parse::<i64>().is_ok());
        assert!(rest.ends_with(".jpg"));
        assert_eq!(rest.trim_end_matches(".jpg").len(), 9);
    }

    #[tokio::test]
    async fn same_original_name_yields_distinct_files() {
        let dir = tempfile::tempdir().unwrap();

        let (a, b) = tokio::join!(
            store_file(dir.path(), "logo.png", &b"first"[..]),
            store_file(dir.path(), "logo.png", &b"second"[..]),
        );
        let (a, b) = (a.unwrap(), b.unwrap());

        assert_ne!(a, b);
        assert_eq!(std::fs::read(dir.path().join(&a)).unwrap(), b"first");
        assert_eq!(std::fs::read(dir.path().join(&b)).unwrap(), b"second");
    }

    #[tokio::test]
    async fn creates_missing_upload_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("public").join("uploads");

        let name = store_file(&nested, "a.txt", &b"x"[..]).await.unwrap();
        assert!(nested.join(name).exists());
    }
}
