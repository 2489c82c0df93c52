pub mod embed;

use salvo::prelude::*;

/// API routes consumed by the embedding front-end.
pub fn api_routes() -> Router {
    Router::new().push(Router::with_path("/embed-info").get(embed::get_embed_info))
}
