use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    auth::IdentityProvider,
    dto::{
        CreateGameRequest, Game, SearchCandidate, UpdateMatchRequest, UpdateStatusRequest, View,
        health::HealthResponse,
    },
};

use super::{
    GamesApi,
    config::ApiConfig,
    error::{ApiError, ApiResult},
};

const API_PREFIX: [&str; 2] = ["api", "v1"];
const GAMES: &str = "games";
const SEARCH: &str = "search";
const HEALTH: &str = "health";

/// How a rejected request is described to the caller.
#[derive(Debug, Clone, Copy)]
enum Failure {
    /// The backend's response body, or the fallback when the body is empty.
    BodyOr(&'static str),
    /// Always the fixed message; the body only goes to the logs.
    Fixed(&'static str),
}

impl Failure {
    fn message(self, body: &str) -> String {
        match self {
            Failure::BodyOr(fallback) if body.is_empty() => fallback.to_string(),
            Failure::BodyOr(_) => body.to_string(),
            Failure::Fixed(message) => message.to_string(),
        }
    }
}

/// [`GamesApi`] implementation talking JSON over HTTP.
///
/// Every call except the health check asks the identity provider for a fresh ID
/// token and sends it as a bearer token.
#[derive(Clone)]
pub struct HttpGamesApi {
    client: Client,
    base_url: Url,
    identity: Arc<dyn IdentityProvider>,
}

impl HttpGamesApi {
    /// Build the HTTP client for the configured backend.
    pub fn new(config: ApiConfig, identity: Arc<dyn IdentityProvider>) -> ApiResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|err| ApiError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: err.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                url: config.base_url,
                reason: "not a hierarchical URL".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|source| ApiError::ClientBuilder { source })?;

        Ok(Self {
            client,
            base_url,
            identity,
        })
    }

    /// Append `/api/v1` and `segments` to the base URL, percent-encoding each segment.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects URLs that cannot carry a path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(API_PREFIX.iter().chain(segments));
        }
        url
    }

    async fn authorized(&self, method: Method, segments: &[&str]) -> ApiResult<RequestBuilder> {
        let token = self.identity.id_token().await?;
        Ok(self
            .client
            .request(method, self.url(segments))
            .bearer_auth(token))
    }

    /// Send the request, turning non-success statuses into [`ApiError::RequestStatus`].
    async fn send(builder: RequestBuilder, path: &str, failure: Failure) -> ApiResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|source| ApiError::RequestSend {
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let body = body.trim();
        debug!(%status, path, body, "backend rejected request");
        Err(ApiError::RequestStatus {
            path: path.to_string(),
            status,
            message: failure.message(body),
        })
    }

    async fn decode<T>(response: Response, path: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::DecodeResponse {
                path: path.to_string(),
                source,
            })
    }
}

impl GamesApi for HttpGamesApi {
    fn list_games(&self, view: Option<View>) -> BoxFuture<'static, ApiResult<Vec<Game>>> {
        let api = self.clone();
        Box::pin(async move {
            let mut builder = api.authorized(Method::GET, &[GAMES]).await?;
            if let Some(view) = view {
                builder = builder.query(&[("view", view.as_query())]);
            }
            let response =
                Self::send(builder, GAMES, Failure::Fixed("Failed to fetch games")).await?;
            // The backend may encode an empty result as `null`.
            let games = Self::decode::<Option<Vec<Game>>>(response, GAMES).await?;
            Ok(games.unwrap_or_default())
        })
    }

    fn create_game(&self, request: CreateGameRequest) -> BoxFuture<'static, ApiResult<Game>> {
        let api = self.clone();
        Box::pin(async move {
            let builder = api
                .authorized(Method::POST, &[GAMES])
                .await?
                .json(&request);
            let response =
                Self::send(builder, GAMES, Failure::BodyOr("Failed to create game")).await?;
            Self::decode(response, GAMES).await
        })
    }

    fn update_status(
        &self,
        id: String,
        request: UpdateStatusRequest,
    ) -> BoxFuture<'static, ApiResult<Game>> {
        let api = self.clone();
        Box::pin(async move {
            let path = format!("{GAMES}/{id}/status");
            let builder = api
                .authorized(Method::POST, &[GAMES, id.as_str(), "status"])
                .await?
                .json(&request);
            let failure = Failure::Fixed("Failed to update game status");
            let response = Self::send(builder, &path, failure).await?;
            Self::decode(response, &path).await
        })
    }

    fn update_match(&self, id: String, igdb_id: i64) -> BoxFuture<'static, ApiResult<Game>> {
        let api = self.clone();
        Box::pin(async move {
            let path = format!("{GAMES}/{id}/match");
            let builder = api
                .authorized(Method::POST, &[GAMES, id.as_str(), "match"])
                .await?
                .json(&UpdateMatchRequest { igdb_id });
            let failure = Failure::BodyOr("Failed to update game match");
            let response = Self::send(builder, &path, failure).await?;
            Self::decode(response, &path).await
        })
    }

    fn delete_game(&self, id: String) -> BoxFuture<'static, ApiResult<()>> {
        let api = self.clone();
        Box::pin(async move {
            let path = format!("{GAMES}/{id}");
            let builder = api.authorized(Method::DELETE, &[GAMES, id.as_str()]).await?;
            Self::send(builder, &path, Failure::Fixed("Failed to delete game")).await?;
            Ok(())
        })
    }

    fn search(&self, query: String) -> BoxFuture<'static, ApiResult<Vec<SearchCandidate>>> {
        let api = self.clone();
        Box::pin(async move {
            let builder = api
                .authorized(Method::GET, &[SEARCH])
                .await?
                .query(&[("q", query.as_str())]);
            let response =
                Self::send(builder, SEARCH, Failure::Fixed("Failed to search games")).await?;
            let results = Self::decode::<Option<Vec<SearchCandidate>>>(response, SEARCH).await?;
            Ok(results.unwrap_or_default())
        })
    }

    fn health_check(&self) -> BoxFuture<'static, ApiResult<HealthResponse>> {
        let api = self.clone();
        Box::pin(async move {
            let builder = api.client.get(api.url(&[HEALTH]));
            let response =
                Self::send(builder, HEALTH, Failure::Fixed("Health check failed")).await?;
            Self::decode(response, HEALTH).await
        })
    }
}
