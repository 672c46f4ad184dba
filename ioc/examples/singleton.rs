use brew_ioc::{Constructor, Container, Injectable};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// A simple service that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}

// A global, thread-safe counter to generate unique IDs.
static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

impl RequestTracker {
  fn new() -> Self {
    println!("Constructing RequestTracker...");
    Self {
      id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
    }
  }
}

impl Injectable for RequestTracker {
  fn constructors() -> Vec<Constructor<Self>> {
    vec![Constructor::new(Self::new)]
  }
}

fn main() -> Result<(), brew_ioc::Error> {
  let container = Container::new();

  // --- Constructed On Demand ---
  // Nothing is registered, so every resolution runs the constructor again.
  println!("--- Resolving without a registration ---");
  let t1 = container.resolve::<RequestTracker>()?;
  let t2 = container.resolve::<RequestTracker>()?;
  println!("Tracker 1 ID: {}, Tracker 2 ID: {}", t1.id, t2.id);
  assert!(!Arc::ptr_eq(&t1, &t2), "Constructed instances should be different");

  // --- Factory Registration ---
  // The factory runs on every resolution; it is free to build however it likes.
  container.register_factory(|_: &Container| {
    println!("Factory producing RequestTracker...");
    Ok(Arc::new(RequestTracker { id: 1_000 }))
  });
  let f1 = container.resolve::<RequestTracker>()?;
  let f2 = container.resolve::<RequestTracker>()?;
  assert_eq!((f1.id, f2.id), (1_000, 1_000));
  assert!(!Arc::ptr_eq(&f1, &f2), "Factory results should not be cached");

  // --- Singleton Registration ---
  // A pre-built instance replaces the factory and is returned unchanged.
  println!("\n--- Resolving a singleton ---");
  container.register_singleton(Arc::new(RequestTracker::new()));
  let s1 = container.resolve::<RequestTracker>()?;
  let s2 = container.resolve::<RequestTracker>()?;
  println!("Singleton 1 ID: {}, Singleton 2 ID: {}", s1.id, s2.id);
  assert!(Arc::ptr_eq(&s1, &s2), "Singleton instances should be identical");
  println!("Singleton instances are the same pointer, as expected.");

  Ok(())
}
