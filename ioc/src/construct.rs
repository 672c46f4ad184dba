//! Declared constructors, the stand-in for runtime reflection.
//!
//! A type takes part in resolution by implementing [`Injectable`]. Abstractions
//! (`dyn Trait`) and plain values implement it with no constructors, which
//! makes them resolvable only through a registration. Concrete types list the
//! functions that can build them; the container reads each function's
//! parameter types to decide which one to call and what to resolve for it.

use crate::container::Container;
use crate::core::Token;
use crate::error::{BoxError, Error};
use std::any::Any;
use std::sync::Arc;

/// A type the container can be asked for.
///
/// # Examples
///
/// ```
/// use brew_ioc::{Constructor, Container, Injectable};
/// use std::sync::Arc;
///
/// trait Grinder: Send + Sync {
///   fn grind(&self) -> &'static str;
/// }
/// impl Injectable for dyn Grinder {}
///
/// struct BurrGrinder;
/// impl Grinder for BurrGrinder {
///   fn grind(&self) -> &'static str { "fine" }
/// }
/// impl Injectable for BurrGrinder {
///   fn constructors() -> Vec<Constructor<Self>> {
///     vec![Constructor::new(|| BurrGrinder)]
///   }
/// }
///
/// struct Barista {
///   grinder: Arc<dyn Grinder>,
/// }
/// impl Injectable for Barista {
///   fn constructors() -> Vec<Constructor<Self>> {
///     vec![Constructor::new(|grinder: Arc<dyn Grinder>| Barista { grinder })]
///   }
/// }
///
/// let container = Container::new();
/// container.register::<dyn Grinder, BurrGrinder>(|g| g as Arc<dyn Grinder>);
///
/// let barista = container.resolve::<Barista>().unwrap();
/// assert_eq!(barista.grinder.grind(), "fine");
/// ```
pub trait Injectable: Any + Send + Sync {
  /// The constructors the container may choose from. Empty by default.
  fn constructors() -> Vec<Constructor<Self>> {
    Vec::new()
  }
}

/// Whether the container prefers a constructor.
///
/// Hidden constructors are only considered when a type declares no public one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
  Public,
  Hidden,
}

pub(crate) enum Failure {
  /// A parameter could not be resolved.
  Dependency(Error),
  /// The constructor body itself returned an error.
  Body(BoxError),
}

type Invoke<T> = Box<dyn Fn(&Container) -> Result<Arc<T>, Failure>>;

/// One way of building a `T`, with its parameter list.
pub struct Constructor<T: ?Sized> {
  params: Vec<Token>,
  visibility: Visibility,
  invoke: Invoke<T>,
}

impl<T: Injectable> Constructor<T> {
  /// A constructor from a function whose parameters are all `Arc<P>` with
  /// `P: Injectable`. Each parameter is resolved from the container, left to
  /// right, before the function is called.
  pub fn new<Args, F>(f: F) -> Self
  where
    F: Inject<Args, Output = T>,
  {
    Self {
      params: <F as Inject<Args>>::params(),
      visibility: Visibility::Public,
      invoke: Box::new(move |container: &Container| {
        f.inject(container)
          .map(Arc::new)
          .map_err(Failure::Dependency)
      }),
    }
  }

  /// Like [`new`](Constructor::new), for bodies that can fail.
  pub fn fallible<Args, F, E>(f: F) -> Self
  where
    F: Inject<Args, Output = Result<T, E>>,
    E: Into<BoxError>,
  {
    Self {
      params: <F as Inject<Args>>::params(),
      visibility: Visibility::Public,
      invoke: Box::new(move |container: &Container| match f.inject(container) {
        Ok(Ok(value)) => Ok(Arc::new(value)),
        Ok(Err(e)) => Err(Failure::Body(e.into())),
        Err(e) => Err(Failure::Dependency(e)),
      }),
    }
  }
}

impl<T: ?Sized> Constructor<T> {
  /// Marks this constructor as non-public.
  pub fn hidden(mut self) -> Self {
    self.visibility = Visibility::Hidden;
    self
  }

  pub fn visibility(&self) -> Visibility {
    self.visibility
  }

  pub fn is_public(&self) -> bool {
    self.visibility == Visibility::Public
  }

  /// Parameter tokens in declaration order.
  pub fn params(&self) -> &[Token] {
    &self.params
  }

  pub fn arity(&self) -> usize {
    self.params.len()
  }

  pub(crate) fn invoke(&self, container: &Container) -> Result<Arc<T>, Failure> {
    (self.invoke)(container)
  }
}

impl<T: ?Sized> std::fmt::Debug for Constructor<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Constructor")
      .field("params", &self.params)
      .field("visibility", &self.visibility)
      .finish()
  }
}

/// A function the container can call after resolving its parameters.
///
/// Implemented for every `Fn(Arc<A1>, ..., Arc<An>) -> R` with up to eight
/// parameters, where each `Ai: ?Sized + Injectable`. `Args` is the tuple of
/// parameter types and only serves to keep the arities apart.
pub trait Inject<Args>: 'static {
  type Output;

  fn params() -> Vec<Token>;

  fn inject(&self, container: &Container) -> Result<Self::Output, Error>;
}

impl_inject!();
impl_inject!(A1);
impl_inject!(A1, A2);
impl_inject!(A1, A2, A3);
impl_inject!(A1, A2, A3, A4);
impl_inject!(A1, A2, A3, A4, A5);
impl_inject!(A1, A2, A3, A4, A5, A6);
impl_inject!(A1, A2, A3, A4, A5, A6, A7);
impl_inject!(A1, A2, A3, A4, A5, A6, A7, A8);

// Values with no constructor of their own; resolvable once registered.
impl_injectable_value!(
  String, bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

impl Injectable for str {}
