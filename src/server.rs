use std::{path::Path, sync::Arc};

use axum::{
    Form, Router,
    extract::State,
    response::Html,
    routing::get,
};
use log::{debug, info};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use crate::{
    clients::errors::{Error, Result},
    mashup::Mashup,
    page::{self, PageContext},
};

/// Search form body
#[derive(Deserialize, Debug)]
pub struct SearchForm {
    #[serde(default)]
    pub artista: String,
}

/// Routes: the search page on `/` and the static directory on `/static`
pub fn build_router(mashup: Arc<Mashup>, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index).post(search))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .with_state(mashup)
}

async fn index() -> Html<String> {
    Html(page::render(&PageContext::default()))
}

async fn search(State(mashup): State<Arc<Mashup>>, Form(form): Form<SearchForm>) -> Html<String> {
    debug!("Search form submitted: {form:?}");
    let context = mashup.search(&form.artista).await;
    Html(page::render(&context))
}

pub async fn serve(listener: TcpListener, router: Router) -> Result<()> {
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .await
        .map_err(|e| Error::ServerError(e.to_string()))?;
    Ok(())
}
