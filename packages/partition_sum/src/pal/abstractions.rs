use std::fmt::Debug;
use std::time::Instant;

/// Source of monotonic timestamps for the stopwatch.
///
/// This trait is automatically mocked by mockall in test builds, generating `MockTimeSource`.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait TimeSource: Debug + Send {
    fn now(&mut self) -> Instant;
}
