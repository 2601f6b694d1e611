//! Deferred units of work.
//!
//! A [`Deferred`] captures its inputs when it is built and does nothing until
//! [`Deferred::run`] is awaited. Digest-backed derivations return one so the
//! caller decides when (and whether) the digest call happens, and can chain
//! follow-up steps with [`Deferred::map`] and [`Deferred::and_then`].
//! Failures travel through the chain as [`BloomError`] values.

use crate::error::{BloomError, BloomResult};
use futures::future::{self, BoxFuture, FutureExt};
use std::future::Future;

type Thunk<'a, T> = Box<dyn FnOnce() -> BoxFuture<'a, BloomResult<T>> + Send + 'a>;

#[must_use = "deferred work does nothing until `run` is awaited"]
pub struct Deferred<'a, T> {
    thunk: Thunk<'a, T>,
}

impl<'a, T: Send + 'a> Deferred<'a, T> {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = BloomResult<T>> + Send + 'a,
    {
        Self {
            thunk: Box::new(move || f().boxed()),
        }
    }

    pub fn ready(value: T) -> Self {
        Self::new(move || future::ready(Ok(value)))
    }

    pub fn fail(err: BloomError) -> Self {
        Self::new(move || future::ready(Err(err)))
    }

    /// Starts the work and waits for it.
    pub async fn run(self) -> BloomResult<T> {
        (self.thunk)().await
    }

    pub fn map<U, F>(self, f: F) -> Deferred<'a, U>
    where
        U: Send + 'a,
        F: FnOnce(T) -> U + Send + 'a,
    {
        Deferred::new(move || async move { self.run().await.map(f) })
    }

    /// Feeds the result into another deferred step. Skipped on error.
    pub fn and_then<U, F>(self, f: F) -> Deferred<'a, U>
    where
        U: Send + 'a,
        F: FnOnce(T) -> Deferred<'a, U> + Send + 'a,
    {
        Deferred::new(move || async move {
            let value = self.run().await?;
            f(value).run().await
        })
    }

    /// Runs both concurrently; the first error wins.
    pub fn join<U>(self, other: Deferred<'a, U>) -> Deferred<'a, (T, U)>
    where
        U: Send + 'a,
    {
        Deferred::new(move || future::try_join(self.run(), other.run()))
    }

    pub fn join_all<I>(tasks: I) -> Deferred<'a, Vec<T>>
    where
        I: IntoIterator<Item = Deferred<'a, T>>,
        I::IntoIter: Send + 'a,
    {
        let tasks = tasks.into_iter();
        Deferred::new(move || future::try_join_all(tasks.map(Deferred::run)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting(counter: &Arc<AtomicUsize>, value: u32) -> Deferred<'static, u32> {
        let counter = Arc::clone(counter);
        Deferred::new(move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(value)
        })
    }

    #[tokio::test]
    async fn test_nothing_runs_until_triggered() {
        let counter = Arc::new(AtomicUsize::new(0));
        let task = counting(&counter, 7);
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        assert_eq!(task.run().await.unwrap(), 7);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_dropped_task_has_no_effect() {
        let counter = Arc::new(AtomicUsize::new(0));
        drop(counting(&counter, 1).map(|v| v + 1));
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_map_and_then_chain() {
        let counter = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&counter);
        let task = counting(&counter, 20)
            .map(|v| v + 1)
            .and_then(move |v| counting(&inner, v * 2));

        assert_eq!(task.run().await.unwrap(), 42);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_error_short_circuits_chain() {
        let counter = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&counter);
        let task = Deferred::<u32>::fail(BloomError::DigestFailure("boom".into()))
            .and_then(move |v| counting(&inner, v));

        assert_eq!(
            task.run().await,
            Err(BloomError::DigestFailure("boom".into()))
        );
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_join_and_join_all() {
        let pair = Deferred::ready(1u8).join(Deferred::ready("two"));
        assert_eq!(pair.run().await.unwrap(), (1, "two"));

        let all = Deferred::join_all((0..4u32).map(Deferred::ready));
        assert_eq!(all.run().await.unwrap(), vec![0, 1, 2, 3]);

        let failing = Deferred::join_all(vec![
            Deferred::ready(1u32),
            Deferred::fail(BloomError::DigestFailure("x".into())),
        ]);
        assert!(failing.run().await.is_err());
    }
}
