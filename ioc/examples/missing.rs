use brew_ioc::{Constructor, Container, Injectable};
use std::error::Error as _;
use std::sync::Arc;

trait Inventory: Send + Sync {}
impl Injectable for dyn Inventory {}

// Needs an inventory, but nobody registered one.
struct OrderDesk {
  _inventory: Arc<dyn Inventory>,
}

impl Injectable for OrderDesk {
  fn constructors() -> Vec<Constructor<Self>> {
    vec![Constructor::new(|inventory: Arc<dyn Inventory>| OrderDesk {
      _inventory: inventory,
    })]
  }
}

fn main() {
  let container = Container::new();

  println!("Attempting to resolve a service whose dependency was never registered...");
  let err = match container.resolve::<OrderDesk>() {
    Ok(_) => panic!("OrderDesk should not have resolved!"),
    Err(err) => err,
  };

  println!("Error: {err}");
  println!("Requested: {}", err.token());
  println!("Failed at: {}", err.origin());
  let path: Vec<_> = err.path().iter().map(|token| token.name()).collect();
  println!("Path: {}", path.join(" -> "));
  if let Some(cause) = err.source() {
    println!("Cause: {cause}");
  }
}
