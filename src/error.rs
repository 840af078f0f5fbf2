use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by an [`AuthResponseStore`](crate::domain::ports::AuthResponseStore).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("transaction not found")]
    NotFound,
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for StoreError {
    fn from(e: rocksdb::Error) -> Self {
        StoreError::Backend(e.into_string())
    }
}

/// Failures talking to the remote verification service.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("invalid remote URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("transport error calling {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Error channel of the translation pipeline. Anything here is mapped to a
/// generic failure at the HTTP boundary; expected outcomes travel as
/// [`Outcome`](crate::domain::outcome::Outcome) values instead.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error("could not decode remote reply: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("could not encode authorization request: {0}")]
    Encode(#[source] serde_json::Error),
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// Fatal conditions while bringing the service up.
#[derive(Error, Debug, Diagnostic)]
pub enum StartupError {
    #[error("could not read config file {path}")]
    #[diagnostic(code(authswitch::config::read), help("pass --config <path> to a readable JSON file"))]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}")]
    #[diagnostic(code(authswitch::config::parse))]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not read lookup file {path}")]
    #[diagnostic(code(authswitch::lookup::read))]
    LookupRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("No items in lookup table")]
    #[diagnostic(
        code(authswitch::lookup::empty),
        help("the lookup file needs at least one `msisdn=userid` line")
    )]
    EmptyLookup,
    #[error("could not open transaction store")]
    #[diagnostic(code(authswitch::store::open))]
    Store(#[source] StoreError),
    #[error("persistent storage is not available in this build")]
    #[diagnostic(
        code(authswitch::store::unavailable),
        help("dbPath needs a build with `--features storage-rocksdb`; remove it to run in memory")
    )]
    StorageUnavailable { path: PathBuf },
    #[error(transparent)]
    #[diagnostic(code(authswitch::remote::client))]
    Remote(#[from] RemoteError),
    #[error("could not bind {addr}")]
    #[diagnostic(code(authswitch::listen))]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}
