//! Core data structures shared by the registries and the resolver.

use crate::error::{Cause, Error};
use crate::options::ContainerOptions;
use std::any::{type_name, TypeId};
use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};

thread_local! {
  // Tokens currently being resolved on this thread, outermost first, each
  // tagged with the address of the container resolving it. Nested containers
  // share the stack but only ever inspect their own frames.
  static RESOLVING_STACK: RefCell<Vec<(usize, Token)>> = const { RefCell::new(Vec::new()) };
}

/// The identity of an abstraction a caller resolves against.
///
/// A token is derived from a static type, which may be unsized (`dyn Trait`).
/// Two tokens are equal exactly when their `TypeId`s are equal; the type name
/// is carried for diagnostics only.
#[derive(Clone, Copy)]
pub struct Token {
  type_id: TypeId,
  name: &'static str,
}

impl Token {
  /// Returns the token for `T`.
  pub fn of<T: ?Sized + 'static>() -> Self {
    Self {
      type_id: TypeId::of::<T>(),
      name: type_name::<T>(),
    }
  }

  pub fn type_id(&self) -> TypeId {
    self.type_id
  }

  /// The fully qualified type name, as reported by `std::any::type_name`.
  pub fn name(&self) -> &'static str {
    self.name
  }
}

impl PartialEq for Token {
  fn eq(&self, other: &Self) -> bool {
    self.type_id == other.type_id
  }
}

impl Eq for Token {}

impl Hash for Token {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.type_id.hash(state);
  }
}

impl fmt::Debug for Token {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Token({})", self.name)
  }
}

impl fmt::Display for Token {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name)
  }
}

/// An RAII guard marking a token as "being resolved" on the current thread.
///
/// Entering fails when the owning container enabled cycle detection and the
/// token is already being resolved by that container, or when that container
/// already holds as many frames as its depth limit allows. Frames pushed by
/// other containers on the same thread are ignored. Dropping the guard pops
/// the frame again.
pub(crate) struct ResolutionGuard {
  depth: usize,
}

impl ResolutionGuard {
  pub(crate) fn enter(owner: usize, token: Token, options: &ContainerOptions) -> Result<Self, Error> {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      let mut depth = 0;
      let mut cycle = false;
      for (frame_owner, frame_token) in stack.iter() {
        if *frame_owner == owner {
          depth += 1;
          cycle |= *frame_token == token;
        }
      }

      if options.cycle_detection && cycle {
        return Err(Error::new(token, Cause::Cycle { token }));
      }
      if let Some(limit) = options.max_depth {
        if depth >= limit {
          return Err(Error::new(token, Cause::DepthExceeded { limit }));
        }
      }

      stack.push((owner, token));
      Ok(Self { depth: depth + 1 })
    })
  }

  /// Number of frames the owning container holds, including this one.
  pub(crate) fn depth(&self) -> usize {
    self.depth
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      stack.borrow_mut().pop();
    });
  }
}
