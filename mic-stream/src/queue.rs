use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};

use defmt::Format;

/// Occupancy and overflow accounting, for periodic reporting.
#[derive(Format, Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueStats {
    pub occupancy: usize,
    pub dropped: u32,
}

/// Fixed-capacity single-producer single-consumer queue of PCM16 samples.
///
/// Built for two interrupt-driven contexts sharing one core with no lock
/// available: the write cursor is only ever stored by the producer, the read
/// cursor only by the consumer, and each side observes the other's cursor
/// through an acquire load. One slot stays unused so that `write + 1 == read`
/// means full and `write == read` means empty.
pub struct SampleQueue<const C: usize> {
    storage: [UnsafeCell<i16>; C],
    write: AtomicUsize,
    read: AtomicUsize,
    dropped: AtomicU32,
    taken: AtomicBool,
}

// Safe to share across contexts: the storage cell at `write` is only touched
// by the producer before the release store that hands it over, and cells
// below `write` are only touched by the consumer.
unsafe impl<const C: usize> Sync for SampleQueue<C> {}

impl<const C: usize> SampleQueue<C> {
    pub const fn new() -> Self {
        assert!(C >= 2);

        SampleQueue {
            storage: [const { UnsafeCell::new(0) }; C],
            write: AtomicUsize::new(0),
            read: AtomicUsize::new(0),
            dropped: AtomicU32::new(0),
            taken: AtomicBool::new(false),
        }
    }

    /// Hands out the two endpoint handles. Each endpoint is owned by exactly
    /// one execution context; calling this a second time panics.
    pub fn split(&self) -> (Producer<'_, C>, Consumer<'_, C>) {
        let already_split = self.taken.swap(true, Ordering::Relaxed);
        assert!(!already_split);

        (Producer { queue: self }, Consumer { queue: self })
    }

    /// Number of samples currently buffered.
    pub fn len(&self) -> usize {
        let write = self.write.load(Ordering::Acquire);
        let read = self.read.load(Ordering::Acquire);
        (write + C - read) % C
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() == Self::capacity()
    }

    /// Usable capacity. One slot is sacrificed to tell full from empty.
    pub const fn capacity() -> usize {
        C - 1
    }

    /// Samples discarded because the queue was full.
    pub fn dropped_samples(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    pub fn stats(&self) -> QueueStats {
        QueueStats {
            occupancy: self.len(),
            dropped: self.dropped_samples(),
        }
    }
}

/// Write endpoint. Owned by the sampling context.
pub struct Producer<'q, const C: usize> {
    queue: &'q SampleQueue<C>,
}

impl<const C: usize> Producer<'_, C> {
    /// Stores one sample, or drops it if the queue is full. Never blocks.
    ///
    /// Returns whether the sample was stored. Overflow leaves both cursors
    /// and the stored contents exactly as they were.
    pub fn try_push(&mut self, sample: i16) -> bool {
        let write = self.queue.write.load(Ordering::Relaxed);
        let next = (write + 1) % C;

        if next == self.queue.read.load(Ordering::Acquire) {
            self.queue.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        // Sole writer of this slot until the release store below publishes it.
        unsafe { self.queue.storage[write].get().write(sample) };
        self.queue.write.store(next, Ordering::Release);

        true
    }

    pub fn stats(&self) -> QueueStats {
        self.queue.stats()
    }
}

/// Read endpoint. Owned by the streaming context.
pub struct Consumer<'q, const C: usize> {
    queue: &'q SampleQueue<C>,
}

impl<const C: usize> Consumer<'_, C> {
    /// Takes the oldest buffered sample, or `None` when empty. Never blocks.
    pub fn try_pop(&mut self) -> Option<i16> {
        let read = self.queue.read.load(Ordering::Relaxed);

        if read == self.queue.write.load(Ordering::Acquire) {
            return None;
        }

        let sample = unsafe { self.queue.storage[read].get().read() };
        self.queue.read.store((read + 1) % C, Ordering::Release);

        Some(sample)
    }
}
