use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use foodgram_auth_types::identity::IdentityHeaders;
use foodgram_domain::shopping_list::SHOPPING_LIST_FILENAME;

use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::shopping_list::DownloadShoppingListUseCase;

// ── GET /api/recipes/download_shopping_cart ──────────────────────────────────

pub async fn download_shopping_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    let uc = DownloadShoppingListUseCase {
        lines: state.shopping_list_repo(),
    };
    let list = uc.execute(identity.user_id).await?;
    let disposition = format!("attachment; filename=\"{SHOPPING_LIST_FILENAME}\"");
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_owned()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        list.render(),
    )
        .into_response())
}
