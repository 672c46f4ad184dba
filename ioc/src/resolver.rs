//! The recursive resolution algorithm.
//!
//! For a requested token the registries are consulted in strict priority
//! order: singleton, then factory, then binding. Without a binding the token
//! itself is the concrete type. A concrete type is built from one of its
//! declared constructors, whose parameters are resolved by this same
//! algorithm, left to right.
//!
//! There is no cycle detection unless the container opts in through
//! [`ContainerOptions`](crate::ContainerOptions). Without it a type that
//! requires itself, directly or transitively, recurses until the thread's
//! stack is exhausted.

use crate::construct::{Constructor, Failure, Injectable};
use crate::container::Container;
use crate::core::{ResolutionGuard, Token};
use crate::error::{Cause, Error, Result};
use crate::options::ConstructorSelection;
use std::sync::Arc;
use tracing::{debug, trace};

pub(crate) fn resolve<T: ?Sized + Injectable>(container: &Container) -> Result<Arc<T>> {
  let token = Token::of::<T>();
  let registries = container.registries();

  // 1. Singletons short-circuit everything, including the guards.
  if let Some(instance) = registries.singleton::<T>(&token) {
    trace!(token = %token, "resolved singleton");
    return Ok(instance);
  }

  let guard = ResolutionGuard::enter(container.id(), token, container.options()).map_err(|err| {
    debug!(token = %token, cause = %err.cause(), "resolution refused");
    err
  })?;

  // 2. Factories run fresh on every call.
  if let Some(factory) = registries.factory::<T>(&token) {
    trace!(token = %token, depth = guard.depth(), "invoking factory");
    return (factory.0)(container).map_err(|source| {
      let err = Error::from_user(token, source, |source| Cause::Factory { source });
      log_origin(&err);
      err
    });
  }

  // 3. A binding names the concrete type; otherwise the token is its own.
  match registries.binding::<T>(&token) {
    Some(binding) => {
      trace!(token = %token, concrete = %binding.concrete, depth = guard.depth(), "following binding");
      (binding.build)(container, token)
    }
    None => {
      trace!(token = %token, depth = guard.depth(), "constructing requested type");
      construct::<T>(container, token)
    }
  }
}

/// Builds the concrete type `C` on behalf of `requested`.
pub(crate) fn construct<C: ?Sized + Injectable>(container: &Container, requested: Token) -> Result<Arc<C>> {
  let concrete = Token::of::<C>();

  // 4-5. Enumerate and pick a constructor.
  let Some(constructor) = select(C::constructors(), container.options().constructor_selection) else {
    let err = Error::new(requested, Cause::NoAccessibleConstructor { concrete });
    log_origin(&err);
    return Err(err);
  };
  trace!(
    concrete = %concrete,
    arity = constructor.arity(),
    public = constructor.is_public(),
    "selected constructor"
  );

  // 6-7. Resolve the parameters and call it.
  constructor.invoke(container).map_err(|failure| match failure {
    Failure::Dependency(nested) => nested.through(requested),
    Failure::Body(source) => {
      let err = Error::from_user(requested, source, |source| Cause::Constructor { concrete, source });
      log_origin(&err);
      err
    }
  })
}

/// Chooses among `constructors` according to `rule`.
///
/// Only public constructors are considered unless there are none, in which
/// case the hidden ones are. Ties go to the constructor declared first.
pub(crate) fn select<T: ?Sized>(
  constructors: Vec<Constructor<T>>,
  rule: ConstructorSelection,
) -> Option<Constructor<T>> {
  let (public, hidden): (Vec<_>, Vec<_>) = constructors.into_iter().partition(Constructor::is_public);
  let candidates = if public.is_empty() { hidden } else { public };

  candidates.into_iter().reduce(|best, next| {
    let better = match rule {
      ConstructorSelection::Fewest => next.arity() < best.arity(),
      ConstructorSelection::Richest => next.arity() > best.arity(),
    };
    if better {
      next
    } else {
      best
    }
  })
}

fn log_origin(err: &Error) {
  let cause = err.cause();
  match std::error::Error::source(cause) {
    Some(source) => debug!(token = %err.origin(), cause = %cause, source = %source, "construction failed"),
    None => debug!(token = %err.origin(), cause = %cause, "construction failed"),
  }
}
