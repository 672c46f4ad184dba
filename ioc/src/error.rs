//! The error reported when a token cannot be resolved.
//!
//! Each failure is a single [`Error`]; its [`Cause`] is the `source()`, and
//! any error returned by user code is the cause's own `source()`.

use crate::core::Token;
use thiserror::Error;

/// A boxed, thread-safe error produced by user code (factories, fallible constructors).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The single failure kind reported by [`Container::resolve`](crate::Container::resolve).
///
/// However deep in the graph construction failed, the error names the token
/// the caller asked for. The tokens traversed on the way down are kept in
/// [`path`](Error::path), and the original failure in [`cause`](Error::cause).
#[derive(Debug, Error)]
#[error("construction failed for {token}")]
pub struct Error {
  token: Token,
  path: Vec<Token>,
  #[source]
  cause: Cause,
}

/// Why a resolution failed.
#[derive(Debug, Error)]
pub enum Cause {
  #[error("no accessible constructor on {concrete}")]
  NoAccessibleConstructor { concrete: Token },

  #[error("constructor of {concrete} failed")]
  Constructor {
    concrete: Token,
    #[source]
    source: BoxError,
  },

  #[error("factory failed")]
  Factory {
    #[source]
    source: BoxError,
  },

  #[error("circular dependency on {token}")]
  Cycle { token: Token },

  #[error("resolution depth exceeded the limit of {limit}")]
  DepthExceeded { limit: usize },
}

impl Error {
  pub(crate) fn new(token: Token, cause: Cause) -> Self {
    Self {
      token,
      path: vec![token],
      cause,
    }
  }

  /// Re-attributes a failure from a nested resolution to the token one level up.
  pub(crate) fn through(mut self, token: Token) -> Self {
    self.path.insert(0, token);
    self.token = token;
    self
  }

  /// Turns an opaque error returned by user code into a resolution failure
  /// for `token`. Nested resolution failures propagated with `?` are
  /// recognised and flattened.
  pub(crate) fn from_user(token: Token, source: BoxError, wrap: impl FnOnce(BoxError) -> Cause) -> Self {
    match source.downcast::<Error>() {
      Ok(nested) => (*nested).through(token),
      Err(source) => Self::new(token, wrap(source)),
    }
  }

  /// The originally requested token.
  pub fn token(&self) -> Token {
    self.token
  }

  /// Tokens from the requested one down to the one whose construction failed.
  pub fn path(&self) -> &[Token] {
    &self.path
  }

  /// The token whose construction actually failed.
  pub fn origin(&self) -> Token {
    self.path.last().copied().unwrap_or(self.token)
  }

  pub fn cause(&self) -> &Cause {
    &self.cause
  }

  pub fn into_cause(self) -> Cause {
    self.cause
  }
}

/// A specialized `Result` type for container operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
