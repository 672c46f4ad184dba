//! # Brew IoC
//!
//! A small, thread-safe Inversion of Control (IoC) container for Rust that
//! builds object graphs on demand.
//!
//! Callers ask for a type; the container decides how to produce it and
//! resolves that type's own dependencies recursively, so the composition root
//! never wires constructor arguments by hand.
//!
//! ## Core Concepts
//!
//! - **Token**: the type being asked for, often a trait object such as
//!   `dyn OrderRepository`. Tokens are static types, so a mismatch between
//!   registration and resolution is a compile error.
//! - **Registrations**: a pre-built *singleton*, a *factory* run on every
//!   resolution, or a *binding* from an abstraction to a concrete type. The
//!   last registration for a token wins.
//! - **Constructors**: concrete types implement [`Injectable`] and list the
//!   functions that can build them. The container picks the one with the
//!   fewest parameters and resolves each parameter first.
//! - **Failures**: any failure, however deep, surfaces as one [`Error`]
//!   naming the requested token.
//!
//! ## Quick Start
//!
//! ```
//! use brew_ioc::{Constructor, Container, Injectable};
//! use std::sync::Arc;
//!
//! trait Menu: Send + Sync {
//!   fn special(&self) -> String;
//! }
//! impl Injectable for dyn Menu {}
//!
//! struct HouseMenu {
//!   roast: Arc<String>,
//! }
//!
//! impl Menu for HouseMenu {
//!   fn special(&self) -> String {
//!     format!("{} pour-over", self.roast)
//!   }
//! }
//!
//! impl Injectable for HouseMenu {
//!   fn constructors() -> Vec<Constructor<Self>> {
//!     vec![Constructor::new(|roast: Arc<String>| HouseMenu { roast })]
//!   }
//! }
//!
//! let container = Container::new();
//! container.register_singleton(Arc::new(String::from("Ethiopian")));
//! container.register::<dyn Menu, HouseMenu>(|menu| menu as Arc<dyn Menu>);
//!
//! let menu = container.resolve::<dyn Menu>().unwrap();
//! assert_eq!(menu.special(), "Ethiopian pour-over");
//! ```
//!
//! ## Known Hazard: Cycles
//!
//! By default there is no cycle detection. If `A` needs `B` and `B` needs
//! `A`, resolution recurses until the thread's stack overflows. Enable
//! [`ContainerOptions::detect_cycles`] or [`ContainerOptions::max_depth`] to
//! turn such graphs into an [`Error`] instead.

#[macro_use]
mod macros;

mod construct;
mod container;
mod core;
mod error;
mod options;
mod registry;
mod resolver;

pub use construct::{Constructor, Inject, Injectable, Visibility};
pub use container::Container;
pub use crate::core::Token;
pub use error::{BoxError, Cause, Error, Result};
pub use options::{ConstructorSelection, ContainerOptions};
