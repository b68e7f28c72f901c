//! Single slot, latest value wins channel.
//!
//! A [`BroadcastCell`] holds at most one value. Publishing always replaces whatever is held,
//! whether or not it was ever read, so a slow reader can never hold up the writer. Readers either
//! consume the value ([`BroadcastCell::receive`]) or observe it in place
//! ([`BroadcastCell::peek`]); both wait while the slot is empty.

use core::{
    cell::RefCell,
    future::{poll_fn, Future},
    task::{Context, Poll},
};
use embassy_sync::{
    blocking_mutex::{raw::RawMutex, Mutex},
    waitqueue::MultiWakerRegistration,
};

/// Counters describing the traffic through a cell.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "no-std", derive(defmt::Format))]
pub struct CellStatistics {
    /// Total number of values published.
    pub published: usize,

    /// Number of published values that replaced a value which was never consumed.
    pub overwritten: usize,

    /// Number of values removed by consuming reads.
    pub consumed: usize,
}

struct CellState<T, const N: usize> {
    value: Option<T>,
    statistics: CellStatistics,
    waiters: MultiWakerRegistration<N>,
}

/// Holder of the most recent value of type `T`.
///
/// `N` is the number of readers that can be parked on the cell at once. Registering more than
/// that wakes every parked reader, which then simply re-check the slot.
pub struct BroadcastCell<M: RawMutex, T: Clone, const N: usize> {
    state: Mutex<M, RefCell<CellState<T, N>>>,
}

impl<M: RawMutex, T: Clone, const N: usize> Default for BroadcastCell<M, T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex, T: Clone, const N: usize> BroadcastCell<M, T, N> {
    /// Creates an empty cell.
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(RefCell::new(CellState {
                value: None,
                statistics: CellStatistics {
                    published: 0,
                    overwritten: 0,
                    consumed: 0,
                },
                waiters: MultiWakerRegistration::new(),
            })),
        }
    }

    /// Stores `value`, replacing any previous content, and wakes all waiting readers.
    pub fn publish(&self, value: T) {
        self.state.lock(|s| {
            let mut s = s.borrow_mut();

            if s.value.replace(value).is_some() {
                s.statistics.overwritten = s.statistics.overwritten.wrapping_add(1);
            }
            s.statistics.published = s.statistics.published.wrapping_add(1);

            s.waiters.wake();
        })
    }

    /// Removes and returns the held value, if there is one.
    pub fn try_receive(&self) -> Option<T> {
        self.state.lock(|s| {
            let mut s = s.borrow_mut();

            let value = s.value.take();
            if value.is_some() {
                s.statistics.consumed = s.statistics.consumed.wrapping_add(1);
            }
            value
        })
    }

    /// Waits for a value, then removes and returns it.
    ///
    /// The slot is empty afterwards, so the next call waits for the next publish.
    pub fn receive(&self) -> impl Future<Output = T> + '_ {
        poll_fn(move |cx| self.poll_receive(cx))
    }

    /// Returns a copy of the held value, if there is one, leaving it in place.
    pub fn try_peek(&self) -> Option<T> {
        self.state.lock(|s| s.borrow().value.clone())
    }

    /// Waits for a value, then returns a copy of it, leaving it in place.
    pub fn peek(&self) -> impl Future<Output = T> + '_ {
        poll_fn(move |cx| self.poll_peek(cx))
    }

    /// Returns whether a value is currently held.
    pub fn is_empty(&self) -> bool {
        self.state.lock(|s| s.borrow().value.is_none())
    }

    pub fn statistics(&self) -> CellStatistics {
        self.state.lock(|s| s.borrow().statistics.clone())
    }

    /// Write access to this cell.
    pub fn publisher(&self) -> Publisher<'_, M, T, N> {
        Publisher { cell: self }
    }

    /// Consuming read access to this cell.
    pub fn receiver(&self) -> Receiver<'_, M, T, N> {
        Receiver { cell: self }
    }

    /// Non-consuming read access to this cell.
    pub fn observer(&self) -> Observer<'_, M, T, N> {
        Observer { cell: self }
    }

    fn poll_receive(&self, cx: &mut Context<'_>) -> Poll<T> {
        self.state.lock(|s| {
            let mut s = s.borrow_mut();

            match s.value.take() {
                Some(value) => {
                    s.statistics.consumed = s.statistics.consumed.wrapping_add(1);
                    Poll::Ready(value)
                }
                None => {
                    s.waiters.register(cx.waker());
                    Poll::Pending
                }
            }
        })
    }

    fn poll_peek(&self, cx: &mut Context<'_>) -> Poll<T> {
        self.state.lock(|s| {
            let mut s = s.borrow_mut();

            match &s.value {
                Some(value) => Poll::Ready(value.clone()),
                None => {
                    s.waiters.register(cx.waker());
                    Poll::Pending
                }
            }
        })
    }
}

/// Write-only handle to a [`BroadcastCell`].
pub struct Publisher<'a, M: RawMutex, T: Clone, const N: usize> {
    cell: &'a BroadcastCell<M, T, N>,
}

impl<M: RawMutex, T: Clone, const N: usize> Publisher<'_, M, T, N> {
    pub fn publish(&self, value: T) {
        self.cell.publish(value)
    }
}

/// Consuming read handle to a [`BroadcastCell`].
pub struct Receiver<'a, M: RawMutex, T: Clone, const N: usize> {
    cell: &'a BroadcastCell<M, T, N>,
}

impl<M: RawMutex, T: Clone, const N: usize> Receiver<'_, M, T, N> {
    pub async fn receive(&mut self) -> T {
        self.cell.receive().await
    }

    pub fn try_receive(&mut self) -> Option<T> {
        self.cell.try_receive()
    }
}

/// Non-consuming read handle to a [`BroadcastCell`].
pub struct Observer<'a, M: RawMutex, T: Clone, const N: usize> {
    cell: &'a BroadcastCell<M, T, N>,
}

impl<M: RawMutex, T: Clone, const N: usize> Clone for Observer<'_, M, T, N> {
    fn clone(&self) -> Self {
        Self { cell: self.cell }
    }
}

impl<M: RawMutex, T: Clone, const N: usize> Observer<'_, M, T, N> {
    pub async fn peek(&self) -> T {
        self.cell.peek().await
    }

    pub fn try_peek(&self) -> Option<T> {
        self.cell.try_peek()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use embassy_futures::{
        join::join3,
        select::{select, Either},
        yield_now,
    };
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

    type TestCell = BroadcastCell<CriticalSectionRawMutex, u32, 4>;

    #[test]
    fn empty_at_creation() {
        let cell = TestCell::new();
        assert!(cell.is_empty());
        assert_eq!(cell.try_peek(), None);
        assert_eq!(cell.try_receive(), None);
        assert_eq!(cell.statistics(), CellStatistics::default());
    }

    #[test]
    fn publish_overwrites_unconsumed_value() {
        let cell = TestCell::new();
        cell.publish(1);
        cell.publish(2);
        assert_eq!(cell.try_receive(), Some(2));
        assert_eq!(cell.try_receive(), None);

        assert_eq!(
            cell.statistics(),
            CellStatistics {
                published: 2,
                overwritten: 1,
                consumed: 1,
            }
        );
    }

    #[test]
    fn peek_does_not_remove() {
        let cell = TestCell::new();
        cell.publish(7);
        assert_eq!(cell.try_peek(), Some(7));
        assert_eq!(cell.try_peek(), Some(7));
        assert!(!cell.is_empty());
        assert_eq!(cell.statistics().consumed, 0);
    }

    #[tokio::test]
    async fn receive_after_publish() {
        let cell = TestCell::new();
        cell.publish(1);
        cell.publish(2);
        assert_eq!(cell.receive().await, 2);
        assert!(cell.is_empty());
    }

    #[tokio::test]
    async fn parked_receiver_wakes_on_publish() {
        let cell = TestCell::new();

        let publish_later = async {
            // Let the receiver park first
            yield_now().await;
            yield_now().await;
            cell.publish(42);
            core::future::pending::<()>().await
        };

        match select(cell.receive(), publish_later).await {
            Either::First(value) => assert_eq!(value, 42),
            Either::Second(_) => unreachable!(),
        }
        assert!(cell.is_empty());
    }

    #[tokio::test]
    async fn receive_waits_again_after_consuming() {
        let cell = TestCell::new();
        cell.publish(1);
        assert_eq!(cell.receive().await, 1);

        let timed_out =
            tokio::time::timeout(std::time::Duration::from_millis(50), cell.receive()).await;
        assert!(timed_out.is_err());
    }

    #[tokio::test]
    async fn peek_waits_for_first_publish() {
        let cell = TestCell::new();

        let timed_out =
            tokio::time::timeout(std::time::Duration::from_millis(50), cell.peek()).await;
        assert!(timed_out.is_err());

        cell.publish(3);
        assert_eq!(cell.peek().await, 3);
    }

    #[tokio::test]
    async fn concurrent_peeks_see_same_value() {
        let cell = TestCell::new();
        let observer = cell.observer();

        let publish_later = async {
            yield_now().await;
            cell.publish(9);
        };

        let peeks = join3(observer.peek(), observer.peek(), observer.peek());

        let ((a, b, c), ()) = embassy_futures::join::join(peeks, publish_later).await;
        assert_eq!((a, b, c), (9, 9, 9));
        assert_eq!(cell.try_peek(), Some(9));
    }

    #[tokio::test]
    async fn handles() {
        let cell = TestCell::new();
        let publisher = cell.publisher();
        let mut receiver = cell.receiver();
        let observer = cell.observer();

        publisher.publish(5);
        assert_eq!(observer.clone().peek().await, 5);
        assert_eq!(receiver.receive().await, 5);
        assert_eq!(observer.try_peek(), None);
        assert_eq!(receiver.try_receive(), None);
    }
}
