//! Callable core integration tests.


mod dispatch;
