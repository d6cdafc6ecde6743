/// Well-known relative path of the published content document.
pub const CONTENT_PATH: &str = "/content/nf-content.json";

/// Origin used when no base URL is configured (local preview server).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// `User-Agent` sent with content requests.
pub const USER_AGENT: &str = concat!("nf-content/", env!("CARGO_PKG_VERSION"));
