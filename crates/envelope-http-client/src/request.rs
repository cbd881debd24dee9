//! HTTP request descriptors and the per-verb builders

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::{AddressingMode, ClientConfig};
use crate::error::BuildError;
use crate::params::{Parameters, RequestParameters};

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl Method {
    /// Upper-case verb as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully formed request, ready for a [`Transport`](crate::Transport)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,
    /// Resolved URL
    pub url: Url,
    /// Request headers in insertion order
    pub headers: Vec<(String, String)>,
    /// Serialized JSON body
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    fn new(method: Method, url: &str, body: Option<Vec<u8>>) -> Result<Self, BuildError> {
        let url = Url::parse(url).map_err(|source| BuildError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        Ok(Self {
            method,
            url,
            headers,
            body,
        })
    }

    /// Append a header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Attach `Authorization: Bearer <token>`
    pub fn with_bearer_token(self, token: &str) -> Self {
        self.with_header("Authorization", format!("Bearer {token}"))
    }

    /// First header value matching `key`, compared case-insensitively
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// Builds [`HttpRequest`]s, one builder per verb
///
/// The addressing mode for GET and PATCH is fixed when the builder is
/// created and never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestBuilder {
    get_addressing: AddressingMode,
    patch_addressing: AddressingMode,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}

impl RequestBuilder {
    /// Create a builder using the addressing modes of `config`
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            get_addressing: config.get_addressing,
            patch_addressing: config.patch_addressing,
        }
    }

    /// Build a request for `method`
    pub fn build(
        &self,
        method: Method,
        url: &str,
        params: &RequestParameters,
    ) -> Result<HttpRequest, BuildError> {
        match method {
            Method::Get => self.build_get(url, params.query.as_ref(), &params.route),
            Method::Post => self.build_post(url, params.body.as_ref()),
            Method::Put => self.build_put(url, params.query.as_ref(), params.body.as_ref()),
            Method::Patch => self.build_patch(
                url,
                params.query.as_ref(),
                &params.route,
                params.body.as_ref(),
            ),
            Method::Delete => self.build_delete(url),
        }
    }

    /// GET
    pub fn build_get(
        &self,
        url: &str,
        query: Option<&Parameters>,
        route: &[String],
    ) -> Result<HttpRequest, BuildError> {
        let url = address(url, self.get_addressing, query, route)?;
        HttpRequest::new(Method::Get, &url, None)
    }

    /// POST with a required JSON body
    pub fn build_post(
        &self,
        url: &str,
        body: Option<&Parameters>,
    ) -> Result<HttpRequest, BuildError> {
        let body = body.ok_or(BuildError::MissingBody(Method::Post))?;
        HttpRequest::new(Method::Post, url, Some(body.to_json_body()?))
    }

    /// PUT with optional query parameters and a required JSON body
    pub fn build_put(
        &self,
        url: &str,
        query: Option<&Parameters>,
        body: Option<&Parameters>,
    ) -> Result<HttpRequest, BuildError> {
        let mut url = url.to_string();
        if let Some(query) = query {
            url.push_str(&query.to_query_string()?);
        }
        let body = body.ok_or(BuildError::MissingBody(Method::Put))?;
        HttpRequest::new(Method::Put, &url, Some(body.to_json_body()?))
    }

    /// PATCH with an optional JSON body
    pub fn build_patch(
        &self,
        url: &str,
        query: Option<&Parameters>,
        route: &[String],
        body: Option<&Parameters>,
    ) -> Result<HttpRequest, BuildError> {
        let url = address(url, self.patch_addressing, query, route)?;
        let body = body.map(Parameters::to_json_body).transpose()?;
        HttpRequest::new(Method::Patch, &url, body)
    }

    /// DELETE has no builder and always fails
    pub fn build_delete(&self, url: &str) -> Result<HttpRequest, BuildError> {
        tracing::debug!("Refusing to build DELETE request for {}", url);
        Err(BuildError::NotImplemented(Method::Delete))
    }
}

fn address(
    url: &str,
    mode: AddressingMode,
    query: Option<&Parameters>,
    route: &[String],
) -> Result<String, BuildError> {
    match mode {
        AddressingMode::Query => {
            let query = match query {
                Some(query) => query.to_query_string()?,
                None => String::new(),
            };
            Ok(format!("{url}{query}"))
        }
        AddressingMode::Route => Ok(substitute_route(url, route)),
    }
}

/// Append `/` and replace each `{i}` with `route[i]` followed by `/`
///
/// Placeholders without a matching value are left as they are.
pub fn substitute_route(template: &str, route: &[String]) -> String {
    let template = format!("{template}/");
    let mut url = String::with_capacity(template.len());
    let mut rest = template.as_str();

    while let Some(open) = rest.find('{') {
        url.push_str(&rest[..open]);
        let candidate = &rest[open..];

        let value = candidate.find('}').and_then(|close| {
            let digits = &candidate[1..close];
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let index = digits.parse::<usize>().ok()?;
            route.get(index).map(|value| (value, close))
        });

        match value {
            Some((value, close)) => {
                url.push_str(value);
                url.push('/');
                rest = &candidate[close + 1..];
            }
            None => {
                url.push('{');
                rest = &candidate[1..];
            }
        }
    }
    url.push_str(rest);
    url
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    fn route_builder() -> RequestBuilder {
        RequestBuilder::new(
            &ClientConfig::builder()
                .get_addressing(AddressingMode::Route)
                .patch_addressing(AddressingMode::Route)
                .build(),
        )
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Patch.to_string(), "PATCH");
        assert_eq!(
            serde_json::to_string(&Method::Delete).expect("Method should serialize"),
            r#""DELETE""#
        );
    }

    #[test]
    fn test_get_query_mode() {
        let query = Parameters::new().with("page", 1).with("skip", Value::Null);
        let req = RequestBuilder::default()
            .build_get("https://api.example.com/items", Some(&query), &[])
            .expect("GET should build");

        assert_eq!(req.method, Method::Get);
        assert_eq!(req.url.as_str(), "https://api.example.com/items?page=1");
        assert!(req.body.is_none());
        assert_eq!(req.header("accept"), Some("application/json"));
        assert_eq!(req.header("content-type"), None);
    }

    #[test]
    fn test_get_query_mode_ignores_route() {
        let req = RequestBuilder::default()
            .build_get(
                "https://api.example.com/users/{0}",
                None,
                &["42".to_string()],
            )
            .expect("GET should build");

        assert_eq!(req.url.path(), "/users/%7B0%7D");
    }

    #[test]
    fn test_get_route_mode() {
        let req = route_builder()
            .build_get(
                "https://api.example.com/users/{0}/posts/{1}",
                Some(&Parameters::new().with("ignored", 1)),
                &["42".to_string(), "7".to_string()],
            )
            .expect("GET should build");

        assert_eq!(
            req.url.as_str(),
            "https://api.example.com/users/42//posts/7//"
        );
        assert_eq!(req.url.query(), None);
    }

    #[test]
    fn test_route_leaves_extra_placeholders() {
        assert_eq!(
            substitute_route("https://h/{0}/{1}", &["a".to_string()]),
            "https://h/a//{1}/"
        );
        assert_eq!(substitute_route("https://h/items", &[]), "https://h/items/");
    }

    #[test]
    fn test_route_values_are_not_substituted_again() {
        assert_eq!(
            substitute_route("https://h/{0}/{1}", &["{1}".to_string(), "b".to_string()]),
            "https://h/{1}//b//"
        );
        assert_eq!(
            substitute_route("https://h/{x}/{+0}/{0}", &["a".to_string()]),
            "https://h/{x}/{+0}/a//"
        );
    }

    #[test]
    fn test_post_json_body() {
        let body = Parameters::new().with("name", "test").with("gone", Value::Null);
        let req = RequestBuilder::default()
            .build_post("https://api.example.com/items", Some(&body))
            .expect("POST should build");

        assert_eq!(req.method, Method::Post);
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        let sent: Value =
            serde_json::from_slice(req.body.as_deref().expect("Body should be set"))
                .expect("Body should be JSON");
        assert_eq!(sent, json!({"name": "test"}));
    }

    #[test]
    fn test_post_requires_body() {
        let result = RequestBuilder::default().build_post("https://api.example.com/items", None);
        assert!(matches!(result, Err(BuildError::MissingBody(Method::Post))));
    }

    #[test]
    fn test_put_appends_query_before_body() {
        let query = Parameters::new().with("force", true);
        let body = Parameters::new().with("name", "x");
        let req = RequestBuilder::default()
            .build_put("https://api.example.com/items/1", Some(&query), Some(&body))
            .expect("PUT should build");

        assert_eq!(req.url.as_str(), "https://api.example.com/items/1?force=true");
        assert_eq!(req.body.as_deref(), Some(br#"{"name":"x"}"#.as_slice()));
    }

    #[test]
    fn test_put_requires_body() {
        let result = RequestBuilder::default().build_put("https://api.example.com/items", None, None);
        assert!(matches!(result, Err(BuildError::MissingBody(Method::Put))));
    }

    #[test]
    fn test_patch_body_is_optional() {
        let req = RequestBuilder::default()
            .build_patch("https://api.example.com/items", None, &[], None)
            .expect("PATCH should build");
        assert!(req.body.is_none());

        let body = Parameters::new().with("done", true);
        let req = route_builder()
            .build_patch(
                "https://api.example.com/items/{0}",
                None,
                &["5".to_string()],
                Some(&body),
            )
            .expect("PATCH should build");
        assert_eq!(req.url.as_str(), "https://api.example.com/items/5//");
        assert_eq!(req.body.as_deref(), Some(br#"{"done":true}"#.as_slice()));
    }

    #[test]
    fn test_delete_never_builds() {
        let result = RequestBuilder::default().build(
            Method::Delete,
            "https://api.example.com/items/1",
            &RequestParameters::new(),
        );
        assert!(matches!(
            result,
            Err(BuildError::NotImplemented(Method::Delete))
        ));
    }

    #[test]
    fn test_invalid_url() {
        let result = RequestBuilder::default().build(
            Method::Get,
            "not a url",
            &RequestParameters::new(),
        );
        assert!(matches!(result, Err(BuildError::InvalidUrl { .. })));
    }

    #[test]
    fn test_build_is_idempotent() {
        let params = RequestParameters::new()
            .query(Parameters::new().with("a", 1))
            .body(Parameters::new().with("b", "two"));
        let builder = RequestBuilder::default();

        for method in [Method::Get, Method::Post, Method::Put, Method::Patch] {
            let first = builder
                .build(method, "https://api.example.com/x", &params)
                .expect("Request should build");
            let second = builder
                .build(method, "https://api.example.com/x", &params)
                .expect("Request should build");
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_bearer_token_header() {
        let req = RequestBuilder::default()
            .build_get("https://api.example.com", None, &[])
            .expect("GET should build")
            .with_bearer_token("abc");
        assert_eq!(req.header("authorization"), Some("Bearer abc"));
    }
}
