use axum::{
    body::Body,
    extract::Extension,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::debug;

use crate::common::{ApiError, AppState};

/// GET|HEAD /* - Serve site assets; every other method is refused
pub async fn serve_static(
    Extension(state): Extension<Arc<AppState>>,
    method: Method,
    uri: Uri,
) -> Result<Response, ApiError> {
    if method != Method::GET && method != Method::HEAD {
        return Err(ApiError::MethodNotAllowed);
    }

    let file = state.site.load(uri.path()).await?;
    debug!(
        path = %file.path.display(),
        content_type = file.content_type,
        bytes = file.bytes.len(),
        "Serving static file"
    );

    let content_length = file.bytes.len().to_string();
    let body = if method == Method::HEAD {
        Body::empty()
    } else {
        Body::from(file.bytes)
    };

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_LENGTH, content_length),
        ],
        body,
    )
        .into_response())
}
