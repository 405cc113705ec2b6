//! Local HTTP upstream for client tests

use std::sync::{Arc, Mutex};

use axum::{Json, Router, extract::RawQuery, http::StatusCode, routing::get};
use tokio::net::TcpListener;

/// A one-route server on an ephemeral port that answers with a fixed status and body
pub(crate) struct Upstream {
    pub base_url: String,
    queries: Arc<Mutex<Vec<String>>>,
}

impl Upstream {
    pub async fn start(path: &'static str, status: StatusCode, body: serde_json::Value) -> Self {
        let queries = Arc::new(Mutex::new(Vec::new()));
        let recorded = queries.clone();
        let router = Router::new().route(
            path,
            get(move |RawQuery(query): RawQuery| {
                let recorded = recorded.clone();
                let body = body.clone();
                async move {
                    recorded.lock().unwrap().push(query.unwrap_or_default());
                    (status, Json(body))
                }
            }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Upstream {
            base_url: format!("http://{addr}"),
            queries,
        }
    }

    /// Decoded query pairs of the last request
    pub fn last_query(&self) -> Vec<(String, String)> {
        let raw = self.queries.lock().unwrap().last().cloned().unwrap_or_default();
        reqwest::Url::parse(&format!("http://upstream/?{raw}"))
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    pub fn requests(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}
