mod common;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;
use uuid::Uuid;

fn authed_multipart_request(
    uri: &str,
    field: &str,
    filename: &str,
    mime: &str,
    data: &[u8],
) -> Request<Body> {
    let (content_type, body) = common::multipart_body(field, filename, mime, data);
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {}", common::issue_token(Uuid::new_v4())))
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn image_upload_accepts_webp() {
    let data_dir = common::temp_media_dir();
    let app = common::build_test_app(data_dir.clone());

    let response = app
        .oneshot(authed_multipart_request(
            "/api/upload/image",
            "file",
            "photo.webp",
            "image/webp",
            b"fake webp bytes",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;

    let web_path = body["web_path"].as_str().unwrap();
    assert!(web_path.starts_with("/media/images/ref_"));
    assert!(web_path.ends_with(".webp"));

    // The file landed in the media tree.
    let filename = web_path.rsplit('/').next().unwrap();
    let on_disk = data_dir.join("media").join("images").join(filename);
    assert!(on_disk.exists());

    std::fs::remove_dir_all(&data_dir).ok();
}

#[tokio::test]
async fn image_upload_rejects_disallowed_extension() {
    let app = common::build_test_app(common::temp_media_dir());

    let response = app
        .oneshot(authed_multipart_request(
            "/api/upload/image",
            "file",
            "anim.gif",
            "image/gif",
            b"gif bytes",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["error"].as_str().unwrap().contains("Invalid image type"));
}

#[tokio::test]
async fn video_upload_rejects_disallowed_extension() {
    let app = common::build_test_app(common::temp_media_dir());

    let response = app
        .oneshot(authed_multipart_request(
            "/api/media/upload-video",
            "file",
            "clip.avi",
            "video/x-msvideo",
            b"avi bytes",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn video_upload_accepts_mp4() {
    let data_dir = common::temp_media_dir();
    let app = common::build_test_app(data_dir.clone());

    let response = app
        .oneshot(authed_multipart_request(
            "/api/media/upload-video",
            "file",
            "drive.mp4",
            "video/mp4",
            b"fake mp4 bytes",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert!(body["web_path"]
        .as_str()
        .unwrap()
        .starts_with("/media/videos/upload_"));
    // The local path is returned too, for the motion endpoints.
    assert!(body["file_path"].as_str().unwrap().contains("upload_"));

    std::fs::remove_dir_all(&data_dir).ok();
}

#[tokio::test]
async fn upload_without_file_field_is_400() {
    let app = common::build_test_app(common::temp_media_dir());

    let response = app
        .oneshot(authed_multipart_request(
            "/api/upload/image",
            "not-file",
            "photo.png",
            "image/png",
            b"png bytes",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "No file provided");
}
