use core::cell::RefCell;

use embassy_sync::blocking_mutex::{raw::RawMutex, Mutex};

use crate::{BusFull, BusQueue, Frame, MAX_MESSAGES};

/// A [`BusQueue`] that several producers can feed. The capacity check and
/// the append happen under one lock so the queue never exceeds `N` frames.
///
/// Pick `M` for the context: `NoopRawMutex` within a single executor,
/// `CriticalSectionRawMutex` when interrupts or other cores enqueue too.
pub struct SharedBus<M: RawMutex, const N: usize = MAX_MESSAGES> {
    inner: Mutex<M, RefCell<BusQueue<N>>>,
}

impl<M: RawMutex, const N: usize> Default for SharedBus<M, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex, const N: usize> SharedBus<M, N> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(BusQueue::new())),
        }
    }

    pub fn enqueue(&self, frame: Frame) -> Result<(), BusFull> {
        self.inner.lock(|bus| bus.borrow_mut().enqueue(frame))
    }

    pub fn len(&self) -> usize {
        self.inner.lock(|bus| bus.borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs `f` with the queue locked, e.g. to render its contents
    pub fn with_queue<R>(&self, f: impl FnOnce(&BusQueue<N>) -> R) -> R {
        self.inner.lock(|bus| f(&bus.borrow()))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, NoopRawMutex};

    use crate::{BusFull, Frame, SharedBus, MAX_MESSAGES};

    #[test]
    fn shared_bus_honours_capacity() {
        let bus = SharedBus::<NoopRawMutex, 3>::new();
        let frame = Frame::build(0x321, false, 1, &[0x01]).unwrap();

        assert!(bus.is_empty());
        for _ in 0..3 {
            assert_eq!(bus.enqueue(frame), Ok(()));
        }
        assert_eq!(bus.enqueue(frame), Err(BusFull));
        assert_eq!(bus.len(), 3);
    }

    #[test]
    fn shared_bus_renders_under_lock() {
        let bus: SharedBus<NoopRawMutex> = SharedBus::new();
        let frame = Frame::build(0x1ABCDEF, true, 2, &[0xCA, 0xFE]).unwrap();
        bus.enqueue(frame).unwrap();

        let rendered = bus.with_queue(|queue| queue.drain_and_render().next());

        assert_eq!(rendered, Some(frame.render()));
    }

    #[test]
    fn concurrent_producers_never_exceed_capacity() {
        let bus: SharedBus<CriticalSectionRawMutex> = SharedBus::new();

        let accepted: usize = std::thread::scope(|scope| {
            let producers: [_; 2] = core::array::from_fn(|producer| {
                let bus = &bus;
                scope.spawn(move || {
                    let frame =
                        Frame::build(producer as u32, false, 1, &[producer as u8]).unwrap();
                    (0..MAX_MESSAGES)
                        .filter(|_| bus.enqueue(frame).is_ok())
                        .count()
                })
            });

            producers.into_iter().map(|p| p.join().unwrap()).sum()
        });

        assert_eq!(accepted, MAX_MESSAGES);
        assert_eq!(bus.len(), MAX_MESSAGES);
        assert_eq!(bus.enqueue(Frame::build(0, false, 0, &[]).unwrap()), Err(BusFull));
    }
}
