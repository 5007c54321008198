//! Host-side test doubles for register-level drivers

use core::cell::{Cell, RefCell};

use bramble_hal::{Monotonic, RegisterBus};
use heapless::{FnvIndexMap, Vec};

/// In-memory register file
///
/// Unscripted reads return the last written (or [`set`](FakeBus::set))
/// value, defaulting to zero. Scripted values for an address are returned
/// first, in order, one per read. Every write is logged.
pub struct FakeBus {
    regs: RefCell<FnvIndexMap<usize, u32, 64>>,
    scripted: RefCell<Vec<(usize, u32), 256>>,
    writes: RefCell<Vec<(usize, u32), 256>>,
    reads: RefCell<FnvIndexMap<usize, usize, 64>>,
}

impl FakeBus {
    pub fn new() -> Self {
        Self {
            regs: RefCell::new(FnvIndexMap::new()),
            scripted: RefCell::new(Vec::new()),
            writes: RefCell::new(Vec::new()),
            reads: RefCell::new(FnvIndexMap::new()),
        }
    }

    /// Preload a register without logging a write
    pub fn set(&self, addr: usize, value: u32) {
        self.regs.borrow_mut().insert(addr, value).unwrap();
    }

    /// Queue values returned by the next reads of `addr`
    pub fn script(&self, addr: usize, values: &[u32]) {
        let mut scripted = self.scripted.borrow_mut();
        for &v in values {
            scripted.push((addr, v)).unwrap();
        }
    }

    /// Current stored value of a register
    pub fn value(&self, addr: usize) -> u32 {
        self.regs.borrow().get(&addr).copied().unwrap_or(0)
    }

    /// Number of reads issued to `addr`
    pub fn read_count(&self, addr: usize) -> usize {
        self.reads.borrow().get(&addr).copied().unwrap_or(0)
    }

    /// Every write, in order
    pub fn writes(&self) -> Vec<(usize, u32), 256> {
        self.writes.borrow().clone()
    }

    /// Values written to `addr`, in order
    pub fn writes_to(&self, addr: usize) -> Vec<u32, 256> {
        self.writes
            .borrow()
            .iter()
            .filter(|(a, _)| *a == addr)
            .map(|(_, v)| *v)
            .collect()
    }

    /// Total number of reads and writes
    pub fn transactions(&self) -> usize {
        self.reads.borrow().values().sum::<usize>() + self.writes.borrow().len()
    }
}

impl RegisterBus for FakeBus {
    fn read32(&self, addr: usize) -> u32 {
        {
            let mut reads = self.reads.borrow_mut();
            let count = reads.get(&addr).copied().unwrap_or(0);
            reads.insert(addr, count + 1).unwrap();
        }

        let mut scripted = self.scripted.borrow_mut();
        if let Some(pos) = scripted.iter().position(|(a, _)| *a == addr) {
            return scripted.remove(pos).1;
        }
        self.value(addr)
    }

    fn write32(&self, addr: usize, value: u32) {
        self.writes.borrow_mut().push((addr, value)).unwrap();
        self.regs.borrow_mut().insert(addr, value).unwrap();
    }
}

/// Clock that advances by a fixed step on every read
pub struct StepClock {
    now: Cell<u64>,
    step: u64,
}

impl StepClock {
    pub fn new(start: u64, step: u64) -> Self {
        Self {
            now: Cell::new(start),
            step,
        }
    }

    /// Value the next read would return
    pub fn peek(&self) -> u64 {
        self.now.get()
    }
}

impl Monotonic for StepClock {
    fn ticks(&self) -> u64 {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }
}
