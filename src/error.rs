//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ConfigError: Settings and target file problems (fatal at startup)
//! - FetchError: Documentation page download failures
//! - ParseError: HTML table location failures
//! - SheetError: Spreadsheet backend failures
//! - AuthError: Service-account credential failures (fatal at startup)

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Page download errors
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Table parsing errors
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Spreadsheet backend errors
    #[error(transparent)]
    Sheet(#[from] SheetError),

    /// Credential errors
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Errors related to settings and target files
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File does not exist
    #[error("configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// File exists but could not be read
    #[error("failed to read configuration file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Target list is not valid JSON
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },

    /// Settings file is not valid TOML
    #[error("failed to parse TOML in {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },

    /// A --group filter names a group that is not configured
    #[error("unknown target group '{label}'")]
    UnknownGroup { label: String },
}

/// Errors raised while downloading a documentation page
#[derive(Error, Debug)]
pub enum FetchError {
    /// Request failed before a response arrived
    #[error("failed to fetch {url}: {message}")]
    NetworkError { url: String, message: String },

    /// Server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    /// Request exceeded the configured timeout
    #[error("timeout while fetching {url}")]
    Timeout { url: String },

    /// Body could not be decoded
    #[error("invalid response body from {url}: {message}")]
    InvalidBody { url: String, message: String },
}

/// Errors raised while locating a release table in a page
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The page has no table matching the format's locator
    #[error("no {locator} table found")]
    TableNotFound { locator: String },
}

/// Errors raised by the spreadsheet backend
#[derive(Error, Debug)]
pub enum SheetError {
    /// No spreadsheet with the configured name is visible to the account
    #[error("spreadsheet '{name}' not found")]
    SpreadsheetNotFound { name: String },

    /// Worksheet lookup failed
    #[error("worksheet '{title}' not found")]
    WorksheetNotFound { title: String },

    /// Transport failure talking to the API
    #[error("spreadsheet request failed ({operation}): {message}")]
    RequestFailed { operation: String, message: String },

    /// The API answered with an error status
    #[error("spreadsheet API returned HTTP {status} ({operation}): {message}")]
    ApiError {
        operation: String,
        status: u16,
        message: String,
    },

    /// The API answered with an unexpected payload
    #[error("invalid spreadsheet response ({operation}): {message}")]
    InvalidResponse { operation: String, message: String },
}

/// Errors raised while obtaining an access token
#[derive(Error, Debug)]
pub enum AuthError {
    /// Credential file missing or unreadable
    #[error("failed to read credentials {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Credential file is not a service-account key
    #[error("invalid service account credentials in {path}: {message}")]
    InvalidCredentials { path: PathBuf, message: String },

    /// Assertion could not be signed
    #[error("failed to sign token assertion: {message}")]
    SigningFailed { message: String },

    /// Token endpoint rejected the exchange
    #[error("token exchange failed: {message}")]
    TokenExchange { message: String },
}

impl ConfigError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ConfigError::NotFound { path: path.into() }
    }

    /// Maps an io error, turning `NotFound` into the dedicated variant
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound { path }
        } else {
            ConfigError::ReadError { path, source }
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new TomlParseError
    pub fn toml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::TomlParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl FetchError {
    /// Creates a new NetworkError
    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        FetchError::NetworkError {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(url: impl Into<String>) -> Self {
        FetchError::Timeout { url: url.into() }
    }
}

impl ParseError {
    /// Creates a new TableNotFound error
    pub fn table_not_found(locator: impl Into<String>) -> Self {
        ParseError::TableNotFound {
            locator: locator.into(),
        }
    }
}

impl SheetError {
    /// Creates a new WorksheetNotFound error
    pub fn worksheet_not_found(title: impl Into<String>) -> Self {
        SheetError::WorksheetNotFound {
            title: title.into(),
        }
    }

    /// Creates a new RequestFailed error
    pub fn request_failed(operation: impl Into<String>, message: impl Into<String>) -> Self {
        SheetError::RequestFailed {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(operation: impl Into<String>, message: impl Into<String>) -> Self {
        SheetError::InvalidResponse {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

impl AuthError {
    /// Creates a new InvalidCredentials error
    pub fn invalid_credentials(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        AuthError::InvalidCredentials {
            path: path.into(),
            message: message.into(),
        }
    }
}
