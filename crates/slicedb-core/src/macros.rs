/// Build a `Vec<Value>` from heterogeneous key components.
///
/// ```ignore
/// session.slice::<Reading>()
///     .for_select()
///     .with_partition_components(slice_values!["s1", 7])?
/// ```
#[macro_export]
macro_rules! slice_values {
    () => {
        ::std::vec::Vec::<$crate::value::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::value::Value::from($value)),+]
    };
}
