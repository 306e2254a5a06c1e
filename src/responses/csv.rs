use crate::errors::ResultResp;
use crate::errors::ServerError;
use astra::{Body, ResponseBuilder};

/// Return CSV text as a downloadable attachment.
pub fn csv_response(csv: String, filename: &str) -> ResultResp {
    let resp = ResponseBuilder::new()
        .status(200)
        .header("Content-Type", "text/csv; charset=utf-8")
        .header(
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        )
        .body(Body::from(csv))
        .map_err(|_| ServerError::InternalError)?;

    Ok(resp)
}
