use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tinylink_core::ShortCode;

use crate::error::Result;
use crate::model::{CreateLinkRequest, CreateLinkResponse, ResolveLinkResponse};
use crate::state::AppState;

pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<CreateLinkResponse>)> {
    let code = state.shortener().shorten(&request.url).await?;
    let short_url = state.short_url(&code);

    Ok((
        StatusCode::CREATED,
        Json(CreateLinkResponse { code, short_url }),
    ))
}

pub async fn resolve_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ResolveLinkResponse>> {
    let code = ShortCode::parse(&code)?;
    let url = state.shortener().resolve(&code).await?;

    Ok(Json(ResolveLinkResponse { url }))
}
