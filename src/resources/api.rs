//! Request construction and response decoding shared by every resource
//!
//! Friendly and raw resource methods both go through [`ApiCore`]. The raw
//! methods return the [`RawResponse`] it produces; the friendly ones decode
//! it and unwrap the `data` envelope.

use crate::error::{Error, Result};
use crate::http::{HttpClient, RawResponse, RequestConfig};
use crate::pagination::{Page, PageFetcher, PageRequest, PageShape, Paginator};
use crate::types::{JsonValue, Method};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use url::Url;

/// `{"data": ...}` wrapper around single-object responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    /// The wrapped object
    pub data: T,
}

/// Shared request core, borrowed from a client
#[derive(Debug, Clone, Copy)]
pub struct ApiCore<'c> {
    http: &'c HttpClient,
}

impl<'c> ApiCore<'c> {
    /// Wrap a transport
    pub fn new(http: &'c HttpClient) -> Self {
        Self { http }
    }

    /// The underlying transport
    pub fn http(&self) -> &'c HttpClient {
        self.http
    }

    /// Send a request and keep the full response
    pub async fn send<T>(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
    ) -> Result<RawResponse<T>> {
        self.http.request_raw(method.into(), path, config).await
    }

    /// GET a single object, raw
    pub async fn get_raw<T>(&self, path: &str) -> Result<RawResponse<DataEnvelope<T>>> {
        self.send(Method::GET, path, RequestConfig::new()).await
    }

    /// Send a JSON body, raw
    pub async fn send_json_raw<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<RawResponse<DataEnvelope<T>>>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        self.send(method, path, RequestConfig::new().json(body))
            .await
    }

    /// Fetch one page of a listing, raw
    pub async fn list_raw<T, S: PageShape>(
        &self,
        path: &str,
        request: PageRequest,
        shape: S,
    ) -> Result<RawListResponse<T, S>> {
        let config = RequestConfig::new().query_pairs(request.query_params());
        let response = self.send(Method::GET, path, config).await?;
        Ok(RawListResponse {
            response,
            request,
            shape,
        })
    }

    /// Paginator over a listing
    pub fn list<T, S>(
        &self,
        path: impl Into<String>,
        request: PageRequest,
        shape: S,
    ) -> Paginator<T, ListEndpoint<'c, T, S>>
    where
        T: DeserializeOwned + Send + 'static,
        S: PageShape,
    {
        let endpoint = ListEndpoint::new(*self, path, shape);
        Paginator::new(endpoint, request)
    }
}

/// Path of one object in a collection
///
/// `id` is percent-encoded as a single path segment, so `/`, `?` and `#`
/// inside it never change the route or the query.
pub fn item_path(collection: &str, id: &str) -> Result<String> {
    if id.trim().is_empty() || id == "." || id == ".." {
        return Err(Error::invalid_params(format!("'{id}' is not an object id")));
    }

    let mut url = Url::parse("http://localhost/")?;
    url.path_segments_mut()
        .map_err(|()| Error::invalid_params("cannot build an object path"))?
        .pop_if_empty()
        .push(collection)
        .push(id);
    Ok(url.path().trim_start_matches('/').to_string())
}

/// Decode `{"data": T}` from a raw response
pub fn unwrap_data<T: DeserializeOwned>(raw: &RawResponse<DataEnvelope<T>>) -> Result<T> {
    raw.parse().map(|envelope| envelope.data)
}

/// One raw page of a listing, not yet decoded
#[derive(Debug, Clone)]
pub struct RawListResponse<T, S> {
    response: RawResponse<Page<T>>,
    request: PageRequest,
    shape: S,
}

impl<T, S: PageShape> RawListResponse<T, S> {
    /// The HTTP exchange
    pub fn response(&self) -> &RawResponse<Page<T>> {
        &self.response
    }

    /// The page request that was sent
    pub fn request(&self) -> &PageRequest {
        &self.request
    }

    /// HTTP status code
    pub fn status(&self) -> reqwest::StatusCode {
        self.response.status()
    }

    /// Decode the body into a page
    pub fn parse(&self) -> Result<Page<T>>
    where
        T: DeserializeOwned,
    {
        let body: JsonValue = self.response.json()?;
        self.shape.decode(body, &self.request)
    }
}

/// A GET list endpoint acting as a [`PageFetcher`]
pub struct ListEndpoint<'c, T, S> {
    core: ApiCore<'c>,
    path: String,
    shape: S,
    _item: PhantomData<fn() -> T>,
}

impl<'c, T, S> ListEndpoint<'c, T, S> {
    /// Create an endpoint for `path` decoded with `shape`
    pub fn new(core: ApiCore<'c>, path: impl Into<String>, shape: S) -> Self {
        Self {
            core,
            path: path.into(),
            shape,
            _item: PhantomData,
        }
    }

    /// Endpoint path
    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl<'c, T, S> PageFetcher<T> for ListEndpoint<'c, T, S>
where
    T: DeserializeOwned + Send + 'static,
    S: PageShape,
{
    async fn fetch(&self, request: &PageRequest) -> Result<Page<T>> {
        let config = RequestConfig::new().query_pairs(request.query_params());
        let body: JsonValue = self
            .core
            .http()
            .request_json(Method::GET.into(), &self.path, config)
            .await?;
        self.shape.decode(body, request)
    }
}

impl<'c, T, S: std::fmt::Debug> std::fmt::Debug for ListEndpoint<'c, T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListEndpoint")
            .field("path", &self.path)
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}
