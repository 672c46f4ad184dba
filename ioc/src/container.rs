//! The main `Container` struct and its associated methods.

use crate::construct::Injectable;
use crate::core::Token;
use crate::error::{BoxError, Result};
use crate::options::ContainerOptions;
use crate::registry::{BindingEntry, EntryKind, Registries};
use crate::resolver;
use std::sync::Arc;
use tracing::debug;

/// The Inversion of Control (IoC) container.
///
/// This struct holds the registrations for all services. It is thread-safe
/// and allows registration and resolution from any thread. It is meant to be
/// created once by the composition root and passed to whatever needs it.
///
/// Every registration replaces any earlier registration for the same token,
/// whatever its kind. Registering different kinds for one token from several
/// threads at once may leave more than one entry behind, so wire each token
/// from a single thread before resolving it concurrently.
#[derive(Default)]
pub struct Container {
  registries: Registries,
  options: ContainerOptions,
}

impl Container {
  /// Creates a new, empty `Container` with default options.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_options(options: ContainerOptions) -> Self {
    Self {
      registries: Registries::default(),
      options,
    }
  }

  pub fn options(&self) -> &ContainerOptions {
    &self.options
  }

  pub(crate) fn registries(&self) -> &Registries {
    &self.registries
  }

  /// Identifies this container's frames on the resolution stack. Stable while
  /// the container is borrowed, which covers every resolution it runs.
  pub(crate) fn id(&self) -> usize {
    self as *const Container as usize
  }

  // --- Registration ---

  /// Binds the abstraction `A` to the concrete type `C`.
  ///
  /// When `A` is resolved and has no singleton or factory, `C` is built from
  /// its own constructors and converted with `upcast`, which is usually the
  /// unsizing cast `|c| c as Arc<dyn Trait>`.
  pub fn register<A, C>(&self, upcast: impl Fn(Arc<C>) -> Arc<A> + Send + Sync + 'static)
  where
    A: ?Sized + Injectable,
    C: Injectable,
  {
    let token = Token::of::<A>();
    let concrete = Token::of::<C>();
    let binding: BindingEntry<A> = BindingEntry {
      concrete,
      build: Box::new(move |container: &Container, requested: Token| {
        resolver::construct::<C>(container, requested).map(&upcast)
      }),
    };
    let replaced = self.registries.insert_binding::<A>(token, binding);
    log_registration(token, EntryKind::Binding, &replaced);
  }

  /// Registers a pre-built instance returned unchanged by every `resolve::<T>()`.
  pub fn register_singleton<T>(&self, instance: Arc<T>)
  where
    T: ?Sized + Injectable,
  {
    let token = Token::of::<T>();
    let replaced = self.registries.insert_singleton::<T>(token, instance);
    log_registration(token, EntryKind::Singleton, &replaced);
  }

  /// Registers a factory invoked with this container on every `resolve::<T>()`.
  ///
  /// Errors returned by the factory are reported as construction failures
  /// for `T`. A nested resolution failure propagated with `?` keeps its
  /// original cause.
  pub fn register_factory<T, F>(&self, factory: F)
  where
    T: ?Sized + Injectable,
    F: Fn(&Container) -> Result<Arc<T>, BoxError> + Send + Sync + 'static,
  {
    let token = Token::of::<T>();
    let replaced = self.registries.insert_factory::<T>(token, Box::new(factory));
    log_registration(token, EntryKind::Factory, &replaced);
  }

  // --- Resolution ---

  /// Resolves `T`, building whatever part of its dependency graph is needed.
  ///
  /// Resolution order: a registered singleton, then a factory, then the
  /// concrete type named by a binding, and finally `T` itself. Concrete types
  /// are built from the constructor with the fewest parameters (see
  /// [`ContainerOptions`] to change this), each parameter resolved the same
  /// way first.
  ///
  /// # Errors
  ///
  /// A single [`Error`](crate::Error) naming `T`, with the failing token and
  /// root cause available from it, however deep the failure happened.
  pub fn resolve<T>(&self) -> Result<Arc<T>>
  where
    T: ?Sized + Injectable,
  {
    resolver::resolve::<T>(self)
  }
}

fn log_registration(token: Token, kind: EntryKind, replaced: &[EntryKind]) {
  if replaced.is_empty() {
    debug!(token = %token, kind = %kind, "registered");
  } else {
    debug!(token = %token, kind = %kind, replaced = ?replaced, "registered, replacing earlier entry");
  }
}
