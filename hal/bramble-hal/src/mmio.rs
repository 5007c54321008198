//! Register access abstraction
//!
//! Every peripheral driver reaches the hardware through [`RegisterBus`].
//! The production implementation performs volatile accesses at physical
//! addresses; tests substitute an in-memory register file.

/// Access to 32-bit memory-mapped registers at absolute addresses
///
/// Implementations must issue exactly one bus transaction per call, in
/// program order, without caching or merging. A read may have side effects
/// on the device, so reads take `&self` just like writes.
pub trait RegisterBus {
    /// Read the register at `addr`
    fn read32(&self, addr: usize) -> u32;

    /// Write `value` to the register at `addr`
    fn write32(&self, addr: usize, value: u32);

    /// Read-modify-write the register at `addr`
    ///
    /// Issues one read followed by one write. Not atomic with respect to
    /// the hardware.
    fn modify32<F>(&self, addr: usize, f: F)
    where
        F: FnOnce(u32) -> u32,
    {
        let value = self.read32(addr);
        self.write32(addr, f(value));
    }
}

impl<B: RegisterBus + ?Sized> RegisterBus for &B {
    fn read32(&self, addr: usize) -> u32 {
        (**self).read32(addr)
    }

    fn write32(&self, addr: usize, value: u32) {
        (**self).write32(addr, value)
    }
}
