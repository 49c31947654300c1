use http_client::Request;

/// User agent sent with every request
const USER_AGENT: &str = concat!("set-plays/", env!("CARGO_PKG_VERSION"));

/// Add headers shared by all requests
pub fn add_common_headers(request: &mut Request) {
    let _ = request.insert_header("User-Agent", USER_AGENT);
    let _ = request.insert_header("Accept-Language", "en-US,en;q=0.9");
}

/// Add headers for plain page fetches
pub fn add_page_headers(request: &mut Request) {
    add_common_headers(request);
    let _ = request.insert_header(
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
    );
}

/// Add headers for JSON API calls, with an optional SoundCloud OAuth token
pub fn add_api_headers(request: &mut Request, oauth_token: Option<&str>) {
    add_common_headers(request);
    let _ = request.insert_header("Accept", "application/json");

    if let Some(token) = oauth_token {
        let _ = request.insert_header("Authorization", format!("OAuth {token}"));
    }
}

/// Add headers for urlencoded form submissions
pub fn add_form_headers(request: &mut Request) {
    add_common_headers(request);
    let _ = request.insert_header("Accept", "application/json");
    let _ = request.insert_header("Content-Type", "application/x-www-form-urlencoded");
}
