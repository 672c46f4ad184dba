//! Internal macros generating the `Inject` arities and the value impls.

// Implements `Inject` for functions taking `Arc<$arg>` parameters. Each
// parameter is resolved through `Container::resolve` in declaration order.
macro_rules! impl_inject {
  ($($arg:ident),*) => {
    impl<Func, Out, $($arg,)*> $crate::construct::Inject<($(::std::sync::Arc<$arg>,)*)> for Func
    where
      Func: Fn($(::std::sync::Arc<$arg>),*) -> Out + 'static,
      $($arg: ?Sized + $crate::construct::Injectable,)*
    {
      type Output = Out;

      fn params() -> Vec<$crate::core::Token> {
        vec![$($crate::core::Token::of::<$arg>()),*]
      }

      #[allow(non_snake_case, unused_variables)]
      fn inject(
        &self,
        container: &$crate::container::Container,
      ) -> Result<Out, $crate::error::Error> {
        $(let $arg = container.resolve::<$arg>()?;)*
        Ok((self)($($arg),*))
      }
    }
  };
}

// Values the container cannot build on its own but may hold as singletons
// or produce from factories.
macro_rules! impl_injectable_value {
  ($($ty:ty),+ $(,)?) => {
    $(impl $crate::construct::Injectable for $ty {})+
  };
}
