//! HTTP catalog client.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode, Url};
use tokio::time::timeout;
use tracing::{debug, warn};
use turbo_catalog::{Product, ProductId};

use crate::config::ClientConfig;
use crate::source::CatalogSource;
use crate::FetchError;

/// Server-side ordering supported by the `sort` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Client for the remote product catalog.
///
/// Every request is bounded by the configured timeout and retried according
/// to the configured [`RetryPolicy`](crate::RetryPolicy).
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: Url,
    config: ClientConfig,
}

impl CatalogClient {
    /// Create a client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(config.base_url.clone()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            config,
        })
    }

    /// Client against the public Fake Store API.
    pub fn fake_store() -> Result<Self, FetchError> {
        Self::new(ClientConfig::default())
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build an endpoint URL from path segments and query pairs.
    ///
    /// Segments are percent-encoded, so category names with spaces or
    /// apostrophes are safe to pass as-is.
    pub fn endpoint(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Fetch every product.
    pub async fn get_all_products(&self) -> Result<Vec<Product>, FetchError> {
        let url = self.endpoint(&["products"], &[])?;
        decode_products(&self.get(url).await?)
    }

    /// Fetch the first `limit` products.
    pub async fn get_limited_products(&self, limit: usize) -> Result<Vec<Product>, FetchError> {
        let url = self.endpoint(&["products"], &[("limit", limit.to_string())])?;
        decode_products(&self.get(url).await?)
    }

    /// Fetch every product in server-side id order.
    pub async fn get_sorted_products(&self, order: SortOrder) -> Result<Vec<Product>, FetchError> {
        let url = self.endpoint(&["products"], &[("sort", order.as_str().to_string())])?;
        decode_products(&self.get(url).await?)
    }

    /// Fetch the products of one category.
    pub async fn get_products_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Product>, FetchError> {
        let url = self.endpoint(&["products", "category", category], &[])?;
        decode_products(&self.get(url).await?)
    }

    /// Fetch the category names.
    pub async fn get_categories(&self) -> Result<Vec<String>, FetchError> {
        let url = self.endpoint(&["products", "categories"], &[])?;
        let body = self.get(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetch a single product.
    pub async fn get_product_by_id(&self, id: ProductId) -> Result<Product, FetchError> {
        let url = self.endpoint(&["products", &id.to_string()], &[])?;
        match self.get(url).await {
            Ok(body) => decode_product(id, &body),
            Err(FetchError::Http { status: 404, .. }) => Err(FetchError::NotFound(id)),
            Err(e) => Err(e),
        }
    }

    /// GET with retries; returns the body of a 2xx response.
    async fn get(&self, url: Url) -> Result<Vec<u8>, FetchError> {
        let policy = &self.config.retry;
        let mut attempt = 0;

        loop {
            let started = Instant::now();
            match self.send_once(&url).await {
                Ok(body) => {
                    debug!(
                        url = %url,
                        attempt,
                        bytes = body.len(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "catalog request succeeded"
                    );
                    return Ok(body);
                }
                Err(err) if policy.should_retry(&err, attempt) => {
                    let delay = policy.backoff.delay_for_attempt(attempt);
                    warn!(
                        url = %url,
                        attempt,
                        error = %err,
                        delay_ms = delay.as_millis() as u64,
                        "catalog request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    warn!(url = %url, attempt, error = %err, "catalog request failed");
                    return Err(err);
                }
            }
        }
    }

    async fn send_once(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let limit = self.config.timeout;
        let (status, body) = match timeout(limit, self.fetch_body(url)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) if e.is_timeout() => return Err(FetchError::Timeout(limit)),
            Ok(Err(e)) if e.is_decode() => return Err(FetchError::Decode(e.to_string())),
            Ok(Err(e)) => return Err(FetchError::Network(e.to_string())),
            Err(_) => return Err(FetchError::Timeout(limit)),
        };

        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(body)
    }

    async fn fetch_body(&self, url: &Url) -> Result<(StatusCode, Vec<u8>), reqwest::Error> {
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        Ok((status, body.to_vec()))
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn get_all_products(&self) -> Result<Vec<Product>, FetchError> {
        CatalogClient::get_all_products(self).await
    }

    async fn get_categories(&self) -> Result<Vec<String>, FetchError> {
        CatalogClient::get_categories(self).await
    }

    async fn get_product_by_id(&self, id: ProductId) -> Result<Product, FetchError> {
        CatalogClient::get_product_by_id(self, id).await
    }

    async fn get_products_by_category(&self, category: &str) -> Result<Vec<Product>, FetchError> {
        CatalogClient::get_products_by_category(self, category).await
    }
}

/// Decode and validate a product list body.
pub(crate) fn decode_products(body: &[u8]) -> Result<Vec<Product>, FetchError> {
    let products: Vec<Product> = serde_json::from_slice(body)?;
    for product in &products {
        product.validate()?;
    }
    Ok(products)
}

/// Decode a single product body.
///
/// The Fake Store API answers an unknown id with `200` and an empty body,
/// so an empty or `null` body means not found.
pub(crate) fn decode_product(id: ProductId, body: &[u8]) -> Result<Product, FetchError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(FetchError::NotFound(id));
    }
    let product: Option<Product> = serde_json::from_slice(body)?;
    let product = product.ok_or(FetchError::NotFound(id))?;
    product.validate()?;
    Ok(product)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::{BackoffStrategy, RetryPolicy};
    use crate::ErrorKind;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    const BACKPACK: &str =
        r#"[{"id":1,"title":"Backpack","price":109.95,"category":"men's clothing"}]"#;

    /// A canned HTTP reply, sent after `delay`.
    struct Reply {
        delay: Duration,
        status: &'static str,
        body: &'static str,
    }

    fn reply(status: &'static str, body: &'static str) -> Reply {
        Reply {
            delay: Duration::ZERO,
            status,
            body,
        }
    }

    async fn read_request(socket: &mut TcpStream) {
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
    }

    /// Serve `replies` in order, one per connection. Returns the base URL and
    /// a counter of accepted requests.
    async fn serve(replies: Vec<Reply>) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        tokio::spawn(async move {
            for reply in replies {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                counter.fetch_add(1, Ordering::SeqCst);
                read_request(&mut socket).await;
                tokio::time::sleep(reply.delay).await;
                let response = format!(
                    "HTTP/1.1 {}\r\ncontent-type: application/json\r\n\
                     content-length: {}\r\nconnection: close\r\n\r\n{}",
                    reply.status,
                    reply.body.len(),
                    reply.body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        (base, hits)
    }

    fn local_client(base: &str, retry: RetryPolicy) -> CatalogClient {
        CatalogClient::new(ClientConfig::new(base).with_retry(retry)).unwrap()
    }

    #[tokio::test]
    async fn test_http_404_is_not_found() {
        let (base, hits) = serve(vec![reply("404 Not Found", "")]).await;
        let client = local_client(&base, RetryPolicy::new(2));

        let err = client.get_product_by_id(ProductId::new(9)).await.unwrap_err();
        assert_eq!(err, FetchError::NotFound(ProductId::new(9)));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_http_empty_body_is_not_found() {
        let (base, _) = serve(vec![reply("200 OK", "")]).await;
        let client = local_client(&base, RetryPolicy::none());

        let err = client.get_product_by_id(ProductId::new(9)).await.unwrap_err();
        assert_eq!(err, FetchError::NotFound(ProductId::new(9)));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_http_slow_response_times_out() {
        let slow = Reply {
            delay: Duration::from_secs(3),
            ..reply("200 OK", "[]")
        };
        let (base, _) = serve(vec![slow]).await;
        let limit = Duration::from_millis(300);
        let config = ClientConfig::new(&base)
            .with_timeout(limit)
            .with_retry(RetryPolicy::none());
        let client = CatalogClient::new(config).unwrap();

        let err = client.get_all_products().await.unwrap_err();
        assert_eq!(err, FetchError::Timeout(limit));
        assert_eq!(err.kind(), ErrorKind::Network);
    }

    #[tokio::test]
    async fn test_http_server_error_is_retried() {
        let (base, hits) = serve(vec![
            reply("503 Service Unavailable", ""),
            reply("200 OK", BACKPACK),
        ])
        .await;
        let retry =
            RetryPolicy::new(2).with_backoff(BackoffStrategy::Fixed(Duration::from_millis(10)));
        let client = local_client(&base, retry);

        let products = client.get_all_products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "Backpack");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_http_retries_are_bounded() {
        let (base, hits) = serve(vec![
            reply("500 Internal Server Error", ""),
            reply("500 Internal Server Error", ""),
        ])
        .await;
        let client = local_client(&base, RetryPolicy::new(1).with_backoff(BackoffStrategy::None));

        let err = client.get_all_products().await.unwrap_err();
        assert!(matches!(err, FetchError::Http { status: 500, .. }));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_http_category_path_is_encoded() {
        let (base, _) = serve(vec![reply("200 OK", BACKPACK)]).await;
        let client = local_client(&base, RetryPolicy::none());

        let products = client.get_products_by_category("men's clothing").await.unwrap();
        assert_eq!(products[0].category, "men's clothing");
    }

    fn client(base: &str) -> CatalogClient {
        CatalogClient::new(ClientConfig::new(base)).unwrap()
    }

    #[test]
    fn test_endpoints() {
        let c = client("https://fakestoreapi.com");
        assert_eq!(
            c.endpoint(&["products"], &[]).unwrap().as_str(),
            "https://fakestoreapi.com/products"
        );
        assert_eq!(
            c.endpoint(&["products", "categories"], &[]).unwrap().as_str(),
            "https://fakestoreapi.com/products/categories"
        );
        assert_eq!(
            c.endpoint(&["products"], &[("limit", "5".to_string())]).unwrap().as_str(),
            "https://fakestoreapi.com/products?limit=5"
        );
    }

    #[test]
    fn test_endpoint_encodes_category() {
        let c = client("https://fakestoreapi.com");
        let url = c.endpoint(&["products", "category", "men's clothing"], &[]).unwrap();
        assert_eq!(url.path(), "/products/category/men's%20clothing");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let c = client("http://localhost:8080/api/");
        assert_eq!(
            c.endpoint(&["products", "3"], &[]).unwrap().as_str(),
            "http://localhost:8080/api/products/3"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = CatalogClient::new(ClientConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
        let err = CatalogClient::new(ClientConfig::new("mailto:shop@example.com")).unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }

    #[test]
    fn test_decode_products() {
        let body = br#"[
            {"id":1,"title":"Backpack","price":109.95,"description":"d","category":"men's clothing","image":"i","rating":{"rate":3.9,"count":120}},
            {"id":2,"title":"Shirt","price":22.3,"description":"d","category":"men's clothing","image":"i","rating":{"rate":4.1,"count":259}}
        ]"#;
        let products = decode_products(body).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].rating.count, 259);
    }

    #[test]
    fn test_decode_products_rejects_bad_shape() {
        assert_eq!(decode_products(b"{\"id\":1}").unwrap_err().kind(), ErrorKind::Decode);
        let invalid = br#"[{"id":1,"title":"","price":1.0,"category":"x"}]"#;
        assert_eq!(decode_products(invalid).unwrap_err().kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_decode_product_empty_body_is_not_found() {
        let id = ProductId::new(999);
        assert_eq!(decode_product(id, b"").unwrap_err(), FetchError::NotFound(id));
        assert_eq!(decode_product(id, b"  \n").unwrap_err(), FetchError::NotFound(id));
        assert_eq!(decode_product(id, b"null").unwrap_err(), FetchError::NotFound(id));
    }

    #[test]
    fn test_decode_product() {
        let body = br#"{"id":3,"title":"Jacket","price":55.99,"description":"d","category":"men's clothing","image":"i","rating":{"rate":4.7,"count":500}}"#;
        let product = decode_product(ProductId::new(3), body).unwrap();
        assert_eq!(product.title, "Jacket");
    }

    #[test]
    fn test_sort_order() {
        assert_eq!(SortOrder::Asc.as_str(), "asc");
        assert_eq!(SortOrder::Desc.as_str(), "desc");
    }
}
