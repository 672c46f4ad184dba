//! A composition root for a small coffee shop back office.
//!
//! Run with `RUST_LOG=brew_ioc=trace` to watch the container resolve the graph.

use brew_ioc::{BoxError, Constructor, Container, Injectable};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

// --- Domain ---

#[derive(Debug, Clone)]
struct Coffee {
  name: &'static str,
  price_cents: u32,
}

#[derive(Debug, Clone)]
struct Order {
  customer: String,
  items: Vec<&'static str>,
}

// --- Settings ---

struct ShopSettings {
  name: String,
  loyalty_discount_percent: u32,
}
impl Injectable for ShopSettings {}

// --- Repositories ---

trait CoffeeRepository: Send + Sync {
  fn find(&self, name: &str) -> Option<Coffee>;
}
impl Injectable for dyn CoffeeRepository {}

trait OrderRepository: Send + Sync {
  fn save(&self, order: Order) -> usize;
  fn count(&self) -> usize;
}
impl Injectable for dyn OrderRepository {}

struct InMemoryCoffees {
  menu: HashMap<&'static str, Coffee>,
}

impl InMemoryCoffees {
  fn seeded() -> Self {
    let menu = [("espresso", 250), ("flat white", 380), ("cold brew", 420)]
      .into_iter()
      .map(|(name, price_cents)| (name, Coffee { name, price_cents }))
      .collect();
    Self { menu }
  }
}

impl CoffeeRepository for InMemoryCoffees {
  fn find(&self, name: &str) -> Option<Coffee> {
    self.menu.get(name).cloned()
  }
}

impl Injectable for InMemoryCoffees {
  fn constructors() -> Vec<Constructor<Self>> {
    vec![Constructor::new(Self::seeded)]
  }
}

#[derive(Default)]
struct InMemoryOrders {
  orders: Mutex<Vec<Order>>,
}

impl OrderRepository for InMemoryOrders {
  fn save(&self, order: Order) -> usize {
    let mut orders = self.orders.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    orders.push(order);
    orders.len()
  }

  fn count(&self) -> usize {
    self.orders.lock().map(|orders| orders.len()).unwrap_or_default()
  }
}

// --- Services ---

struct PricingService {
  settings: Arc<ShopSettings>,
  coffees: Arc<dyn CoffeeRepository>,
}

impl PricingService {
  fn new(settings: Arc<ShopSettings>, coffees: Arc<dyn CoffeeRepository>) -> Self {
    Self { settings, coffees }
  }

  fn total_cents(&self, order: &Order, loyal: bool) -> Result<u32, String> {
    let mut total = 0;
    for item in &order.items {
      let coffee = self.coffees.find(item).ok_or_else(|| format!("{item} is not on the menu"))?;
      tracing::debug!(coffee = coffee.name, cents = coffee.price_cents, "priced item");
      total += coffee.price_cents;
    }
    if loyal {
      total -= total * self.settings.loyalty_discount_percent / 100;
    }
    Ok(total)
  }
}

impl Injectable for PricingService {
  fn constructors() -> Vec<Constructor<Self>> {
    vec![Constructor::new(Self::new)]
  }
}

struct CheckoutService {
  pricing: Arc<PricingService>,
  orders: Arc<dyn OrderRepository>,
}

impl CheckoutService {
  fn place(&self, order: Order, loyal: bool) -> Result<(usize, u32), String> {
    tracing::info!(customer = %order.customer, items = order.items.len(), "placing order");
    let total = self.pricing.total_cents(&order, loyal)?;
    let number = self.orders.save(order);
    Ok((number, total))
  }
}

impl Injectable for CheckoutService {
  fn constructors() -> Vec<Constructor<Self>> {
    vec![Constructor::new(
      |pricing: Arc<PricingService>, orders: Arc<dyn OrderRepository>| CheckoutService { pricing, orders },
    )]
  }
}

// --- Composition Root ---

fn wire() -> Container {
  let container = Container::new();

  container.register_singleton(Arc::new(ShopSettings {
    name: "The Daily Grind".to_string(),
    loyalty_discount_percent: 10,
  }));

  // Coffees are read-only: bind the abstraction and let the container build it.
  container.register::<dyn CoffeeRepository, InMemoryCoffees>(|repo| repo as Arc<dyn CoffeeRepository>);

  // Orders must be shared by every service that records them.
  let orders: Arc<dyn OrderRepository> = Arc::new(InMemoryOrders::default());
  container.register_singleton(orders);

  container
}

fn main() -> Result<(), BoxError> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let container = wire();
  let settings = container.resolve::<ShopSettings>()?;
  println!("Welcome to {}", settings.name);

  let checkout = container.resolve::<CheckoutService>()?;
  let (number, total) = checkout.place(
    Order {
      customer: "Ada".to_string(),
      items: vec!["espresso", "flat white"],
    },
    true,
  )?;
  println!("Order #{number} for Ada: {}.{:02}", total / 100, total % 100);

  // A second resolution builds a new CheckoutService but shares the order book.
  let another = container.resolve::<CheckoutService>()?;
  let rejected = another.place(
    Order {
      customer: "Grace".to_string(),
      items: vec!["matcha"],
    },
    false,
  );
  if let Err(reason) = rejected {
    println!("Order for Grace rejected: {reason}");
  }

  let orders = container.resolve::<dyn OrderRepository>()?;
  println!("Orders on the book: {}", orders.count());
  Ok(())
}
