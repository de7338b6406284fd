//! `?format=` negotiation for read endpoints

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::export::ExportFormat;

use super::error::ApiResult;

#[derive(Debug, Default, Deserialize)]
pub struct FormatQuery {
    pub format: Option<String>,
}

impl FormatQuery {
    /// The requested format, JSON when absent
    pub fn resolve(&self) -> ApiResult<ExportFormat> {
        match self.format.as_deref() {
            None | Some("") => Ok(ExportFormat::Json),
            Some(name) => Ok(name.parse::<ExportFormat>()?),
        }
    }
}

/// Render `value` (or `rows` for CSV) with the matching content type
pub fn formatted<T, R>(format: ExportFormat, value: &T, rows: &[R]) -> ApiResult<Response>
where
    T: Serialize,
    R: Serialize,
{
    let body = format.render(value, rows)?;
    Ok(([(header::CONTENT_TYPE, format.content_type())], body).into_response())
}
