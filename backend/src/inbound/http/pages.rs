//! Landing page and static asset handlers.
//!
//! ```text
//! GET /
//! GET /static/{path}
//! ```
//!
//! Files are read through a `cap_std` directory handle rooted at the
//! configured static directory, so `..` segments and absolute paths cannot
//! reach anything outside it.

use std::io;
use std::path::{Path, PathBuf};

use actix_web::http::header;
use actix_web::{HttpResponse, get, web};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use serde_json::json;
use tracing::debug;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

const INDEX_FILE: &str = "index.html";
const NOT_FOUND_MESSAGE: &str = "Файл не найден";

fn content_type_for(path: &str) -> &'static str {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("txt") => "text/plain; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        Some("woff") => "font/woff",
        _ => "application/octet-stream",
    }
}

fn not_found(path: &str) -> Error {
    Error::not_found(NOT_FOUND_MESSAGE).with_details(json!({ "path": path }))
}

fn read_confined(root: &Path, relative: &str) -> io::Result<Vec<u8>> {
    let dir = Dir::open_ambient_dir(root, ambient_authority())?;
    dir.read(relative)
}

async fn serve_file(static_dir: PathBuf, relative: String, cache_control: &'static str) -> ApiResult<HttpResponse> {
    if relative.is_empty() || relative.ends_with('/') {
        return Err(not_found(&relative));
    }

    let lookup = relative.clone();
    let read = web::block(move || read_confined(&static_dir, &lookup))
        .await
        .map_err(|err| Error::internal(format!("static file task failed: {err}")))?;

    match read {
        Ok(bytes) => Ok(HttpResponse::Ok()
            .insert_header((header::CONTENT_TYPE, content_type_for(&relative)))
            .insert_header((header::CACHE_CONTROL, cache_control))
            .body(bytes)),
        Err(err) => match err.kind() {
            io::ErrorKind::NotFound
            | io::ErrorKind::PermissionDenied
            | io::ErrorKind::InvalidInput
            | io::ErrorKind::IsADirectory => {
                debug!(path = %relative, error = %err, "static file unavailable");
                Err(not_found(&relative))
            }
            _ => Err(Error::internal(format!("reading static file {relative} failed: {err}"))),
        },
    }
}

/// Serve the landing page.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Landing page", content_type = "text/html"),
        (status = 404, description = "Landing page missing from the static directory")
    ),
    tags = ["pages"],
    operation_id = "landingPage"
)]
#[get("/")]
pub async fn index(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    serve_file(state.static_dir.clone(), INDEX_FILE.to_owned(), "no-cache").await
}

/// Serve a file from the static directory.
#[utoipa::path(
    get,
    path = "/static/{path}",
    params(("path" = String, Path, description = "File path relative to the static directory")),
    responses(
        (status = 200, description = "File contents"),
        (status = 404, description = "No such file inside the static directory")
    ),
    tags = ["pages"],
    operation_id = "staticAsset"
)]
#[get("/static/{path:.*}")]
pub async fn static_asset(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    serve_file(
        state.static_dir.clone(),
        path.into_inner(),
        "public, max-age=3600",
    )
    .await
}
