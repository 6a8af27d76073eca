//! App Router

use salvo::{Router, size_limiter::max_size};

use crate::{
    csrf::{self, KEY_LEN},
    healthcheck, page, products,
};

/// Everything the server answers, below the global hoops.
///
/// Export is a plain navigation from the page, so it sits outside CSRF
/// protection and never rotates the client's token.
pub(crate) fn app_router(max_upload_bytes: u64, csrf_key: [u8; KEY_LEN]) -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("api/products/export").get(products::export::handler))
        .push(
            Router::new()
                .hoop(csrf::protection(csrf_key))
                .hoop(csrf::expose_token)
                .get(page::handler)
                .push(
                    Router::with_path("api/products")
                        .get(products::index::handler)
                        .post(products::create::handler)
                        .push(
                            Router::with_path("import")
                                .hoop(max_size(max_upload_bytes))
                                .post(products::import::handler),
                        )
                        .push(
                            Router::with_path("{product}")
                                .put(products::update::handler)
                                .delete(products::delete::handler),
                        ),
                ),
        )
}
