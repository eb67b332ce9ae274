//! Funding source Lambda
//!
//! Endpoints:
//! - GET /funding-sources - List funding sources
//! - GET /funding-sources/{identifier} - Get one funding source by its code

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use shared::http::{method_not_allowed, respond, RequestParameters};
use shared::services::funding_sources;
use shared::{Config, CristinClient};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

struct AppState {
    config: Config,
    client: CristinClient,
}

impl AppState {
    fn new() -> Result<Self, Error> {
        let config = Config::from_env()?;
        let client = CristinClient::new(&config)?;
        Ok(Self { config, client })
    }
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    let method = event.method().as_str();
    let origin = state.config.allowed_origin.as_str();

    info!("Funding sources request: {} {}", method, event.uri().path());

    if method != "GET" {
        return method_not_allowed(method, origin);
    }

    let parameters = RequestParameters::from_request(&event);
    if parameters.has_path("identifier") {
        let result = funding_sources::fetch(
            &state.client,
            &state.config,
            parameters.path(),
            parameters.query(),
        )
        .await;
        respond(result, origin)
    } else {
        respond(
            funding_sources::list(&state.client, &state.config, parameters.query()).await,
            origin,
        )
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::new()?);

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}
