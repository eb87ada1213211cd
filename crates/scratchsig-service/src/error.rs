//! Startup failures for the scratchsig service

use std::fmt;

use scratch_user_resolver::ResolverError;
use tracing_subscriber::filter::ParseError;

#[derive(Debug)]
pub enum ServiceError {
    /// The Scratch API client could not be built from the configuration
    Resolver(ResolverError),
    /// A built-in log directive failed to parse
    LogFilter(ParseError),
    /// The HTTP listener could not bind or stopped with an error
    Server { port: u16, source: std::io::Error },
}

impl ServiceError {
    pub fn server(port: u16) -> impl FnOnce(std::io::Error) -> Self {
        move |source| ServiceError::Server { port, source }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Resolver(err) => write!(f, "Cannot build Scratch resolver: {}", err),
            ServiceError::LogFilter(err) => write!(f, "Invalid log filter: {}", err),
            ServiceError::Server { port, source } => {
                write!(f, "HTTP server on port {} failed: {}", port, source)
            }
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Resolver(err) => Some(err),
            ServiceError::LogFilter(err) => Some(err),
            ServiceError::Server { source, .. } => Some(source),
        }
    }
}

impl From<ResolverError> for ServiceError {
    fn from(err: ResolverError) -> Self {
        ServiceError::Resolver(err)
    }
}

impl From<ParseError> for ServiceError {
    fn from(err: ParseError) -> Self {
        ServiceError::LogFilter(err)
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
