use axum::{
    http::header,
    response::{IntoResponse, Response},
};

/// Offers `text` as a plain-text file named `filename`.
pub fn download(text: String, filename: &str) -> Response {
    let filename = filename.replace(['"', '\\'], "_");

    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        text,
    )
        .into_response()
}
