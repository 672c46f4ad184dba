//! The three registries a container resolves against.
//!
//! Each registry maps a [`Token`] to a type-erased entry. Entries are stored
//! behind an `Arc` so they can be cloned out of the map and used without
//! holding a shard lock while user code runs.

use crate::container::Container;
use crate::core::Token;
use crate::error::{BoxError, Result};
use dashmap::DashMap;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

type Erased = Arc<dyn Any + Send + Sync>;

pub(crate) type FactoryFn<T> = dyn Fn(&Container) -> Result<Arc<T>, BoxError> + Send + Sync;
pub(crate) type BuildFn<T> = dyn Fn(&Container, Token) -> Result<Arc<T>> + Send + Sync;

/// A pre-built instance, shared as-is on every resolution.
pub(crate) struct SingletonEntry<T: ?Sized>(pub(crate) Arc<T>);

/// A user callback, invoked on every resolution.
pub(crate) struct FactoryEntry<T: ?Sized>(pub(crate) Box<FactoryFn<T>>);

/// The concrete type to build for an abstraction.
pub(crate) struct BindingEntry<T: ?Sized> {
  pub(crate) concrete: Token,
  pub(crate) build: Box<BuildFn<T>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryKind {
  Singleton,
  Factory,
  Binding,
}

impl fmt::Display for EntryKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      EntryKind::Singleton => "singleton",
      EntryKind::Factory => "factory",
      EntryKind::Binding => "binding",
    })
  }
}

#[derive(Default)]
pub(crate) struct Registries {
  singletons: DashMap<Token, Erased>,
  factories: DashMap<Token, Erased>,
  bindings: DashMap<Token, Erased>,
}

impl Registries {
  fn map(&self, kind: EntryKind) -> &DashMap<Token, Erased> {
    match kind {
      EntryKind::Singleton => &self.singletons,
      EntryKind::Factory => &self.factories,
      EntryKind::Binding => &self.bindings,
    }
  }

  /// Stores `entry` as the only strategy for `token`, dropping whatever any
  /// registry held for it before. Returns the kinds that were replaced.
  fn replace(&self, token: Token, kind: EntryKind, entry: Erased) -> Vec<EntryKind> {
    let mut replaced = Vec::new();
    for other in [EntryKind::Singleton, EntryKind::Factory, EntryKind::Binding] {
      if other != kind && self.map(other).remove(&token).is_some() {
        replaced.push(other);
      }
    }
    if self.map(kind).insert(token, entry).is_some() {
      replaced.push(kind);
    }
    replaced
  }

  fn get<E: Any + Send + Sync>(&self, kind: EntryKind, token: &Token) -> Option<Arc<E>> {
    // Clone the Arc out so the shard lock is released before the entry is used.
    let erased = self.map(kind).get(token).map(|entry| Arc::clone(entry.value()))?;
    erased.downcast::<E>().ok()
  }

  // --- Registration ---

  pub(crate) fn insert_singleton<T: ?Sized + Send + Sync + 'static>(
    &self,
    token: Token,
    instance: Arc<T>,
  ) -> Vec<EntryKind> {
    self.replace(token, EntryKind::Singleton, Arc::new(SingletonEntry(instance)))
  }

  pub(crate) fn insert_factory<T: ?Sized + Send + Sync + 'static>(
    &self,
    token: Token,
    factory: Box<FactoryFn<T>>,
  ) -> Vec<EntryKind> {
    self.replace(token, EntryKind::Factory, Arc::new(FactoryEntry(factory)))
  }

  pub(crate) fn insert_binding<T: ?Sized + Send + Sync + 'static>(
    &self,
    token: Token,
    binding: BindingEntry<T>,
  ) -> Vec<EntryKind> {
    self.replace(token, EntryKind::Binding, Arc::new(binding))
  }

  // --- Lookup ---

  pub(crate) fn singleton<T: ?Sized + Send + Sync + 'static>(&self, token: &Token) -> Option<Arc<T>> {
    self
      .get::<SingletonEntry<T>>(EntryKind::Singleton, token)
      .map(|entry| Arc::clone(&entry.0))
  }

  pub(crate) fn factory<T: ?Sized + Send + Sync + 'static>(
    &self,
    token: &Token,
  ) -> Option<Arc<FactoryEntry<T>>> {
    self.get(EntryKind::Factory, token)
  }

  pub(crate) fn binding<T: ?Sized + Send + Sync + 'static>(
    &self,
    token: &Token,
  ) -> Option<Arc<BindingEntry<T>>> {
    self.get(EntryKind::Binding, token)
  }

  /// The kind of entry currently registered for `token`, in resolution priority order.
  #[cfg(test)]
  pub(crate) fn kind_of(&self, token: &Token) -> Option<EntryKind> {
    [EntryKind::Singleton, EntryKind::Factory, EntryKind::Binding]
      .into_iter()
      .find(|kind| self.map(*kind).contains_key(token))
  }
}
