use crate::handlers::{not_found, serve_file, upload_file, AppState};
use axum::{
    routing::{get, post},
    Router,
};

/// Application routes without middleware
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/upload", post(upload_file))
        .route("/files/:filename", get(serve_file))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{UploadPolicy, UploadService};
    use crate::handlers::upload::LOCAL_STORAGE_WARNING;
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use qrshare_config::QrSettings;
    use qrshare_encoder::LinkEncoder;
    use qrshare_storage::{LocalBackend, StorageBackend, UnavailableBackend};
    use serde_json::Value;
    use std::path::Path;
    use std::sync::Arc;

    const BASE_URL: &str = "http://192.168.1.10:5000";

    fn server(upload_dir: &Path, max_upload_bytes: usize) -> TestServer {
        let remote: Arc<dyn StorageBackend> = Arc::new(UnavailableBackend::new("no credentials"));
        let local: Arc<dyn StorageBackend> =
            Arc::new(LocalBackend::new(BASE_URL.to_string(), upload_dir.to_path_buf()));
        let service = UploadService::new(
            remote,
            local,
            LinkEncoder::new(QrSettings::default()),
            UploadPolicy {
                allowed_extensions: vec!["pdf".to_string()],
                max_upload_bytes,
            },
        );
        let state = AppState::new(Arc::new(service), upload_dir.to_path_buf(), 100);
        TestServer::new(routes(state)).unwrap()
    }

    fn form(filename: &str, content: &[u8]) -> MultipartForm {
        MultipartForm::new().add_part(
            "pdf",
            Part::bytes(content.to_vec())
                .file_name(filename)
                .mime_type("application/pdf"),
        )
    }

    fn stored_name(link: &str) -> String {
        link.strip_prefix(&format!("{}/files/", BASE_URL))
            .expect("local link")
            .to_string()
    }

    fn file_count(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test]
    async fn test_upload_falls_back_to_local_and_is_retrievable() {
        let dir = tempfile::tempdir().unwrap();
        let server = server(dir.path(), 1024);

        let response = server.post("/upload").multipart(form("cert.pdf", b"%PDF-1.4 one")).await;
        response.assert_status(StatusCode::OK);

        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["storage_type"], "local");
        assert_eq!(body["filename"], "cert.pdf");
        assert_eq!(body["warning"], LOCAL_STORAGE_WARNING);
        assert!(!body["qr_image"].as_str().unwrap().is_empty());

        let name = stored_name(body["drive_link"].as_str().unwrap());
        let file = server.get(&format!("/files/{}", name)).await;
        file.assert_status(StatusCode::OK);
        assert_eq!(file.as_bytes().as_ref(), b"%PDF-1.4 one");
    }

    #[tokio::test]
    async fn test_same_name_uploads_get_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let server = server(dir.path(), 1024);

        let first: Value = server.post("/upload").multipart(form("same.pdf", b"first")).await.json();
        let second: Value = server.post("/upload").multipart(form("same.pdf", b"second")).await.json();

        let first_name = stored_name(first["drive_link"].as_str().unwrap());
        let second_name = stored_name(second["drive_link"].as_str().unwrap());
        assert_ne!(first_name, second_name);

        assert_eq!(server.get(&format!("/files/{}", first_name)).await.as_bytes().as_ref(), b"first");
        assert_eq!(server.get(&format!("/files/{}", second_name)).await.as_bytes().as_ref(), b"second");
    }

    #[tokio::test]
    async fn test_name_with_double_dots_is_retrievable() {
        let dir = tempfile::tempdir().unwrap();
        let server = server(dir.path(), 1024);

        let body: Value = server.post("/upload").multipart(form("a..b.pdf", b"dotted")).await.json();
        assert_eq!(body["filename"], "a..b.pdf");

        let name = stored_name(body["drive_link"].as_str().unwrap());
        assert!(name.ends_with("_a..b.pdf"));

        let file = server.get(&format!("/files/{}", name)).await;
        file.assert_status(StatusCode::OK);
        assert_eq!(file.as_bytes().as_ref(), b"dotted");
    }

    #[tokio::test]
    async fn test_validation_errors_store_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let server = server(dir.path(), 16);

        let empty = server.post("/upload").multipart(form("cert.pdf", b"")).await;
        empty.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(empty.json::<Value>()["error"], "Empty file received");

        let no_ext = server.post("/upload").multipart(form("cert", b"data")).await;
        no_ext.assert_status(StatusCode::BAD_REQUEST);

        let wrong_ext = server.post("/upload").multipart(form("cert.exe", b"data")).await;
        wrong_ext.assert_status(StatusCode::BAD_REQUEST);

        let too_large = server.post("/upload").multipart(form("cert.pdf", &[7u8; 32])).await;
        too_large.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(too_large.json::<Value>()["code"], "PAYLOAD_TOO_LARGE");

        assert_eq!(file_count(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_missing_field_and_filename() {
        let dir = tempfile::tempdir().unwrap();
        let server = server(dir.path(), 1024);

        let missing = server
            .post("/upload")
            .multipart(MultipartForm::new().add_text("note", "hello"))
            .await;
        missing.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(missing.json::<Value>()["error"], "No PDF uploaded");

        let unnamed = server
            .post("/upload")
            .multipart(MultipartForm::new().add_part("pdf", Part::bytes(b"data".to_vec())))
            .await;
        unnamed.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(unnamed.json::<Value>()["error"], "No file selected");
    }

    #[tokio::test]
    async fn test_file_not_found_and_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = dir.path().join("uploads");
        std::fs::create_dir(&uploads).unwrap();
        std::fs::write(dir.path().join("secret.txt"), b"top secret").unwrap();
        let server = server(&uploads, 1024);

        let missing = server.get("/files/nonexistent").await;
        missing.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(missing.json::<Value>()["error"], "File not found");

        let encoded = server.get("/files/..%2Fsecret.txt").await;
        encoded.assert_status(StatusCode::NOT_FOUND);
        assert!(!encoded.text().contains("top secret"));

        let dotted = server.get("/files/../secret.txt").await;
        dotted.assert_status(StatusCode::NOT_FOUND);
        assert!(!dotted.text().contains("top secret"));
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let dir = tempfile::tempdir().unwrap();
        let server = server(dir.path(), 1024);

        let response = server.get("/nope").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["error"], "Not found");
    }
}
