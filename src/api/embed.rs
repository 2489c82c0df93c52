use salvo::prelude::*;

use crate::utils::{get_app_state, AppError};

/// The embed configuration the front-end widget asks for: an embed token,
/// the report's embed URL details and the token expiry. Errors render as a
/// `{status, error}` payload through `AppError`'s `Writer` impl.
#[handler]
pub async fn get_embed_info(res: &mut Response, depot: &mut Depot) -> Result<(), AppError> {
    let state = get_app_state(depot)?;

    let embed_info = state.embed.get_embed_info().await?;

    res.render(Json(embed_info));
    Ok(())
}
