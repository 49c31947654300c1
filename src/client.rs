use crate::config::{Config, Credentials, Endpoints};
use crate::headers;
use crate::{PlaysError, Result};
use http_client::{HttpClient, Request, Response};
use http_types::{Method, Url};

/// Client that fetches set pages and queries provider statistics.
///
/// The HTTP transport is any [`HttpClient`] implementation, which keeps the
/// resolvers testable against scripted responses. Requests are issued one at a
/// time and each is awaited before the next one starts.
///
/// # Examples
///
/// ```rust,no_run
/// use set_plays::{PlayCountClient, PlayCounter};
///
/// # tokio_test::block_on(async {
/// let http_client = http_client::native::NativeClient::new();
/// let client = PlayCountClient::new(Box::new(http_client));
///
/// let page = client.fetch_page("https://example.com/sets/sunrise").await?;
/// println!("fetched {} bytes", page.len());
/// # Ok::<(), set_plays::PlaysError>(())
/// # });
/// ```
pub struct PlayCountClient {
    client: Box<dyn HttpClient>,
    config: Config,
}

impl PlayCountClient {
    /// Create a client that reads credentials from the environment and talks
    /// to the production endpoints.
    pub fn new(client: Box<dyn HttpClient>) -> Self {
        Self::with_config(client, Config::default())
    }

    /// Create a client with explicit credentials and endpoints.
    pub fn with_config(client: Box<dyn HttpClient>, config: Config) -> Self {
        Self { client, config }
    }

    /// Current credentials. Looked up again on every call.
    pub fn credentials(&self) -> Credentials {
        self.config.credentials.current()
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.config.endpoints
    }

    /// Fetch a page and return its body as text.
    ///
    /// Redirects are followed up to [`MAX_REDIRECTS`] hops. Any final status
    /// is accepted; only transport and body errors fail.
    pub async fn fetch_page_text(&self, url: &str) -> Result<String> {
        let mut current = url.to_string();

        for _ in 0..=MAX_REDIRECTS {
            log::debug!("Fetching URL: {current}");
            let mut request = Request::new(Method::Get, parse_url(&current)?);
            headers::add_page_headers(&mut request);

            let mut response = self.send(request).await?;
            if is_redirect(status_code(&response)) {
                let target = redirect_target(&response, &current)?;
                log::debug!("Following redirect from {current} to {target}");
                current = target;
                continue;
            }

            let body = read_body(&mut response).await?;
            log::debug!("Fetched {} bytes from {current}", body.len());
            return Ok(body);
        }

        Err(PlaysError::Http(format!(
            "stopped after {MAX_REDIRECTS} redirects fetching {url}"
        )))
    }

    /// GET a JSON API endpoint, optionally with a SoundCloud OAuth token.
    pub(crate) async fn get(&self, url: &str, oauth_token: Option<&str>) -> Result<Response> {
        let mut request = Request::new(Method::Get, parse_url(url)?);
        headers::add_api_headers(&mut request, oauth_token);
        self.send(request).await
    }

    /// POST an urlencoded form.
    pub(crate) async fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<Response> {
        let mut request = Request::new(Method::Post, parse_url(url)?);
        request.set_body(encode_form(fields));
        headers::add_form_headers(&mut request);
        self.send(request).await
    }

    async fn send(&self, request: Request) -> Result<Response> {
        log::debug!("{} {}", request.method(), request.url());
        let response = self
            .client
            .send(request)
            .await
            .map_err(|e| PlaysError::Http(e.to_string()))?;
        log::debug!("Response status: {}", status_code(&response));
        Ok(response)
    }
}

/// Redirect hops followed by a page fetch before giving up.
pub const MAX_REDIRECTS: usize = 10;

fn is_redirect(status: u16) -> bool {
    matches!(status, 301 | 302 | 303 | 307 | 308)
}

pub(crate) fn parse_url(url: &str) -> Result<Url> {
    url.parse::<Url>()
        .map_err(|e| PlaysError::InvalidUrl(format!("{url}: {e}")))
}

pub(crate) fn status_code(response: &Response) -> u16 {
    response.status().into()
}

/// Fail with [`PlaysError::Status`] unless the response has the given status.
pub(crate) fn expect_status(response: &Response, expected: u16) -> Result<()> {
    match status_code(response) {
        code if code == expected => Ok(()),
        code => Err(PlaysError::Status(code)),
    }
}

/// Target of a redirect response, resolved against the URL that was requested.
pub(crate) fn redirect_target(response: &Response, requested: &str) -> Result<String> {
    let location = response
        .header("location")
        .and_then(|values| values.get(0))
        .map(|value| value.as_str().to_string())
        .filter(|location| !location.is_empty())
        .ok_or_else(|| PlaysError::Parse("redirect without Location header".to_string()))?;

    // Handle relative URLs
    if location.starts_with("http") {
        Ok(location)
    } else {
        let base = parse_url(requested)?;
        base.join(&location)
            .map(|url| url.to_string())
            .map_err(|e| PlaysError::InvalidUrl(format!("{location}: {e}")))
    }
}

pub(crate) async fn read_body(response: &mut Response) -> Result<String> {
    response
        .body_string()
        .await
        .map_err(|e| PlaysError::Http(e.to_string()))
}

/// Read a response body and decode it as JSON.
pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(response: &mut Response) -> Result<T> {
    let body = read_body(response).await?;
    Ok(serde_json::from_str(&body)?)
}

fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_fields_are_urlencoded() {
        let body = encode_form(&[
            ("client_id", "abc"),
            ("client_secret", "s3cr&t=1"),
            ("grant_type", "client_credentials"),
        ]);
        assert_eq!(
            body,
            "client_id=abc&client_secret=s3cr%26t%3D1&grant_type=client_credentials"
        );
    }

    #[test]
    fn only_redirect_statuses_are_followed() {
        assert!(is_redirect(301));
        assert!(is_redirect(308));
        assert!(!is_redirect(200));
        assert!(!is_redirect(304));
    }

    #[test]
    fn relative_urls_are_rejected() {
        assert!(matches!(
            parse_url("/sets/sunrise"),
            Err(PlaysError::InvalidUrl(_))
        ));
    }
}
