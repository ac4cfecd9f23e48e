use axum::extract::{Path, State};
use axum::response::Redirect;
use tinylink_core::ShortCode;

use crate::error::Result;
use crate::state::AppState;

/// Redirect form of resolve: this is the endpoint a short link itself
/// points at. 307 keeps clients re-resolving instead of pinning the target.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect> {
    let code = ShortCode::parse(&code)?;
    let url = state.shortener().resolve(&code).await?;

    Ok(Redirect::temporary(&url))
}
