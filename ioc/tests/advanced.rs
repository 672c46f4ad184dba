use brew_ioc::{BoxError, Cause, Constructor, Container, Injectable};
use pretty_assertions::assert_eq;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use std::thread;

// --- Advanced Test Fixtures ---

struct AppConfig {
  database_url: String,
}
impl Injectable for AppConfig {}

// A service that depends on AppConfig.
struct DatabaseConnection {
  url: String,
}

impl DatabaseConnection {
  fn new(config: Arc<AppConfig>) -> Self {
    Self {
      url: config.database_url.clone(),
    }
  }
}

impl Injectable for DatabaseConnection {
  fn constructors() -> Vec<Constructor<Self>> {
    vec![Constructor::new(Self::new)]
  }
}

trait CustomerRepository: Send + Sync {
  fn describe(&self) -> String;
}
impl Injectable for dyn CustomerRepository {}

struct SqlCustomerRepository {
  db: Arc<DatabaseConnection>,
}

impl CustomerRepository for SqlCustomerRepository {
  fn describe(&self) -> String {
    format!("customers at {}", self.db.url)
  }
}

impl Injectable for SqlCustomerRepository {
  fn constructors() -> Vec<Constructor<Self>> {
    vec![Constructor::new(|db: Arc<DatabaseConnection>| SqlCustomerRepository { db })]
  }
}

trait Clock: Send + Sync {
  fn now(&self) -> u64;
}
impl Injectable for dyn Clock {}

struct FixedClock(u64);
impl Clock for FixedClock {
  fn now(&self) -> u64 {
    self.0
  }
}

// Takes two parameters resolved through different strategies.
struct OrderService {
  customers: Arc<dyn CustomerRepository>,
  clock: Arc<dyn Clock>,
}

impl OrderService {
  fn new(customers: Arc<dyn CustomerRepository>, clock: Arc<dyn Clock>) -> Self {
    Self { customers, clock }
  }

  fn summary(&self) -> String {
    format!("{} @ {}", self.customers.describe(), self.clock.now())
  }
}

impl Injectable for OrderService {
  fn constructors() -> Vec<Constructor<Self>> {
    vec![Constructor::new(Self::new)]
  }
}

fn wired_container() -> Container {
  let container = Container::new();
  container.register_singleton(Arc::new(AppConfig {
    database_url: "postgres://shop@localhost/coffee".to_string(),
  }));
  container.register::<dyn CustomerRepository, SqlCustomerRepository>(|repo| {
    repo as Arc<dyn CustomerRepository>
  });
  container.register_factory::<dyn Clock, _>(|_: &Container| Ok(Arc::new(FixedClock(1_700)) as Arc<dyn Clock>));
  container
}

// --- Advanced Tests ---

#[test]
fn test_parameters_resolve_with_full_priority_rules() {
  // OrderService -> dyn CustomerRepository (binding) -> DatabaseConnection (self)
  //              -> AppConfig (singleton)
  //              -> dyn Clock (factory)
  // Arrange
  let container = wired_container();

  // Act
  let service = container.resolve::<OrderService>().unwrap();

  // Assert
  assert_eq!(
    service.summary(),
    "customers at postgres://shop@localhost/coffee @ 1700"
  );
}

#[test]
fn test_parameters_resolve_left_to_right() {
  static ORDER: AtomicUsize = AtomicUsize::new(0);

  struct First(usize);
  impl Injectable for First {}
  struct Second(usize);
  impl Injectable for Second {}

  struct Pair {
    first: Arc<First>,
    second: Arc<Second>,
  }
  impl Injectable for Pair {
    fn constructors() -> Vec<Constructor<Self>> {
      vec![Constructor::new(|first: Arc<First>, second: Arc<Second>| Pair { first, second })]
    }
  }

  // Arrange
  let container = Container::new();
  container.register_factory(|_: &Container| Ok(Arc::new(First(ORDER.fetch_add(1, Ordering::SeqCst)))));
  container.register_factory(|_: &Container| Ok(Arc::new(Second(ORDER.fetch_add(1, Ordering::SeqCst)))));

  // Act
  let pair = container.resolve::<Pair>().unwrap();

  // Assert
  assert_eq!((pair.first.0, pair.second.0), (0, 1));
}

#[test]
fn test_shared_singleton_across_graph() {
  // Arrange
  let container = wired_container();
  container.register_singleton(Arc::new(DatabaseConnection {
    url: "shared".to_string(),
  }));

  // Act
  let a = container.resolve::<SqlCustomerRepository>().unwrap();
  let b = container.resolve::<SqlCustomerRepository>().unwrap();

  // Assert
  assert!(!Arc::ptr_eq(&a, &b));
  assert!(Arc::ptr_eq(&a.db, &b.db));
  assert_eq!(a.describe(), "customers at shared");
}

#[test]
fn test_factory_replaces_singleton() {
  // Arrange
  let container = Container::new();
  let original = Arc::new(AppConfig {
    database_url: "singleton".to_string(),
  });
  container.register_singleton(Arc::clone(&original));
  container.register_factory(|_: &Container| {
    Ok(Arc::new(AppConfig {
      database_url: "factory".to_string(),
    }))
  });

  // Act
  let resolved = container.resolve::<AppConfig>().unwrap();

  // Assert
  assert_eq!(resolved.database_url, "factory");
  assert!(!Arc::ptr_eq(&resolved, &original));
}

#[test]
fn test_singleton_replaces_factory_and_binding() {
  // Arrange
  let container = wired_container();
  let fixed: Arc<dyn Clock> = Arc::new(FixedClock(5));
  container.register_singleton(Arc::clone(&fixed));

  struct NullRepository;
  impl CustomerRepository for NullRepository {
    fn describe(&self) -> String {
      "nobody".to_string()
    }
  }
  let null: Arc<dyn CustomerRepository> = Arc::new(NullRepository);
  container.register_singleton(null);

  // Act
  let service = container.resolve::<OrderService>().unwrap();

  // Assert
  assert_eq!(service.summary(), "nobody @ 5");
  assert!(Arc::ptr_eq(&service.clock, &fixed));
}

#[test]
fn test_binding_replaces_factory() {
  struct SystemClock;
  impl Clock for SystemClock {
    fn now(&self) -> u64 {
      99
    }
  }
  impl Injectable for SystemClock {
    fn constructors() -> Vec<Constructor<Self>> {
      vec![Constructor::new(|| SystemClock)]
    }
  }

  // Arrange
  let container = wired_container();
  container.register::<dyn Clock, SystemClock>(|clock| clock as Arc<dyn Clock>);

  // Act
  let clock = container.resolve::<dyn Clock>().unwrap();

  // Assert
  assert_eq!(clock.now(), 99);
}

#[test]
fn test_rebinding_last_registration_wins() {
  struct LocalRepository;
  impl CustomerRepository for LocalRepository {
    fn describe(&self) -> String {
      "local".to_string()
    }
  }
  impl Injectable for LocalRepository {
    fn constructors() -> Vec<Constructor<Self>> {
      vec![Constructor::new(|| LocalRepository)]
    }
  }

  // Arrange
  let container = wired_container();
  container.register::<dyn CustomerRepository, LocalRepository>(|repo| repo as Arc<dyn CustomerRepository>);

  // Act
  let repo = container.resolve::<dyn CustomerRepository>().unwrap();

  // Assert
  assert_eq!(repo.describe(), "local");
}

#[test]
fn test_binding_builds_concrete_without_consulting_its_registrations() {
  // A singleton registered for the concrete type does not short-circuit a
  // binding that names it; the binding constructs a new instance.
  // Arrange
  let container = wired_container();
  let registered = Arc::new(SqlCustomerRepository {
    db: Arc::new(DatabaseConnection {
      url: "registered".to_string(),
    }),
  });
  container.register_singleton(registered);

  // Act
  let via_binding = container.resolve::<dyn CustomerRepository>().unwrap();

  // Assert
  assert_eq!(via_binding.describe(), "customers at postgres://shop@localhost/coffee");
}

#[test]
fn test_factory_may_register_during_resolution() {
  // Entries are cloned out of the registries before user code runs, so a
  // factory can write to the container without deadlocking.
  // Arrange
  let container = Container::new();
  container.register_factory(|c: &Container| {
    c.register_singleton(Arc::new(String::from("registered late")));
    Ok(Arc::new(AppConfig {
      database_url: c.resolve::<String>()?.to_string(),
    }))
  });

  // Act
  let config = container.resolve::<AppConfig>().unwrap();

  // Assert
  assert_eq!(config.database_url, "registered late");
}

#[test]
fn test_concurrent_registration_and_resolution() {
  // Arrange
  let container = wired_container();
  container.register_singleton(Arc::new(42_i32));

  // Act
  thread::scope(|s| {
    for i in 0..10_usize {
      let container = &container;
      s.spawn(move || {
        container.register_factory::<usize, _>(move |_: &Container| Ok(Arc::new(i)));

        for _ in 0..100 {
          assert_eq!(*container.resolve::<i32>().unwrap(), 42);
          let service = container.resolve::<OrderService>().unwrap();
          assert!(service.summary().ends_with("@ 1700"));
        }

        // Another thread may have replaced the factory with its own.
        let value = *container.resolve::<usize>().unwrap();
        assert!(value < 10);
      });
    }
  });

  // Assert
  assert!(*container.resolve::<usize>().unwrap() < 10);
}

#[test]
fn test_drop_behavior_of_singletons() {
  static DROP_COUNTER: AtomicUsize = AtomicUsize::new(0);

  struct ConnectionPool;
  impl Drop for ConnectionPool {
    fn drop(&mut self) {
      DROP_COUNTER.fetch_add(1, Ordering::SeqCst);
    }
  }
  impl Injectable for ConnectionPool {}

  // Arrange
  let container = Container::new();
  container.register_singleton(Arc::new(ConnectionPool));

  // Act
  let pool = container.resolve::<ConnectionPool>().unwrap();
  drop(pool);
  assert_eq!(DROP_COUNTER.load(Ordering::SeqCst), 0);

  drop(container);

  // Assert
  assert_eq!(DROP_COUNTER.load(Ordering::SeqCst), 1);
}

#[test]
fn test_factory_error_type_is_boxed() {
  // Arrange
  let container = Container::new();
  container.register_factory::<AppConfig, _>(|_: &Container| {
    let err: BoxError = "no configuration source".into();
    Err(err)
  });

  // Act
  let err = container.resolve::<AppConfig>().err().unwrap();

  // Assert
  match err.cause() {
    Cause::Factory { source } => assert_eq!(source.to_string(), "no configuration source"),
    other => panic!("unexpected cause: {other}"),
  }
}
