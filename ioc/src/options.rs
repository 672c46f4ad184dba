//! Resolution policy knobs for a [`Container`](crate::Container).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which constructor is chosen when a concrete type declares several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConstructorSelection {
  /// The constructor with the fewest parameters. Optional collaborators
  /// offered only by richer constructors are skipped.
  #[default]
  Fewest,
  /// The constructor with the most parameters, as most IoC containers do.
  Richest,
}

/// Options controlling how a container resolves tokens.
///
/// The defaults reproduce the plain algorithm: fewest-parameter constructor
/// selection, no cycle detection and no depth limit. A dependency cycle under
/// the defaults recurses until the thread's stack is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContainerOptions {
  pub constructor_selection: ConstructorSelection,
  /// Fail with [`Cause::Cycle`](crate::Cause::Cycle) when a token re-enters
  /// its own resolution on the same thread.
  pub cycle_detection: bool,
  /// Fail with [`Cause::DepthExceeded`](crate::Cause::DepthExceeded) once the
  /// resolution stack holds this many frames.
  pub max_depth: Option<usize>,
}

impl ContainerOptions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn constructor_selection(mut self, selection: ConstructorSelection) -> Self {
    self.constructor_selection = selection;
    self
  }

  pub fn detect_cycles(mut self, enabled: bool) -> Self {
    self.cycle_detection = enabled;
    self
  }

  pub fn max_depth(mut self, limit: Option<usize>) -> Self {
    self.max_depth = limit;
    self
  }
}
