use thiserror::Error;

/// Main error type for the catalog engine
#[derive(Error, Debug)]
pub enum CatalogError {
    /// HTTP transport errors
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Terminal non-success status from the provider
    #[error("provider returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// The provider kept deferring or rate-limiting the request
    #[error("request for {url} still throttled after {retries} retries")]
    RetriesExhausted { url: String, retries: u32 },

    /// XML payload could not be deserialized
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// A details payload carried no `<item>` root
    #[error("details response for '{0}' contained no item")]
    MissingItem(String),

    /// Search operation failure, wrapping the underlying cause
    #[error("search failed for query '{query}'")]
    SearchFailed {
        query: String,
        #[source]
        source: Box<CatalogError>,
    },

    /// Details operation failure, wrapping the underlying cause
    #[error("details fetch failed for id '{id}'")]
    DetailsFailed {
        id: String,
        #[source]
        source: Box<CatalogError>,
    },

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl CatalogError {
    /// True when the underlying cause is an exhausted retry budget, so
    /// callers can tell "the provider is busy" apart from a plain failure.
    pub fn is_provider_busy(&self) -> bool {
        match self {
            CatalogError::RetriesExhausted { .. } => true,
            CatalogError::SearchFailed { source, .. } => source.is_provider_busy(),
            CatalogError::DetailsFailed { source, .. } => source.is_provider_busy(),
            _ => false,
        }
    }
}

impl From<quick_xml::DeError> for CatalogError {
    fn from(e: quick_xml::DeError) -> Self {
        CatalogError::XmlParse(e.to_string())
    }
}

impl From<String> for CatalogError {
    fn from(s: String) -> Self {
        CatalogError::Other(s)
    }
}

impl From<&str> for CatalogError {
    fn from(s: &str) -> Self {
        CatalogError::Other(s.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CatalogError>;
