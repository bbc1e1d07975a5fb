//! Bus trait connecting the CPU core to memory and peripherals.
//!
//! The core masks every address to the 68000's 24-bit external bus before it
//! reaches the trait, and rejects word/long accesses to odd addresses itself
//! (address error), so implementations only see aligned sized accesses.
//!
//! Word and long values cross the bus big-endian: `read` returns the
//! assembled value right-aligned in the low `size * 8` bits, and `write`
//! receives it the same way.

use crate::size::Size;

/// Memory and peripheral access for the CPU.
///
/// Implementations that need per-access timestamps (device timing, DMA
/// contention) override [`read_cycle`](Bus::read_cycle) and
/// [`write_cycle`](Bus::write_cycle); the core routes every access through
/// those, passing the cycle counter as of the start of the current
/// instruction, so all accesses of one instruction share one timestamp.
/// Buses that do not care inherit the defaults and see plain
/// `read`/`write`.
pub trait Bus {
    /// Read a value of the given size. `addr` is already masked to 24 bits.
    fn read(&mut self, size: Size, addr: u32) -> u32;

    /// Write the low `size * 8` bits of `value`. `addr` is already masked
    /// to 24 bits.
    fn write(&mut self, size: Size, addr: u32, value: u32);

    /// Assert the RESET line: reset connected peripherals.
    ///
    /// Invoked when the CPU executes a RESET instruction.
    fn reset(&mut self) {}

    /// Timestamped read. `cycle` is the CPU cycle count at the start of the
    /// instruction performing this access.
    fn read_cycle(&mut self, _cycle: u64, size: Size, addr: u32) -> u32 {
        self.read(size, addr)
    }

    /// Timestamped write. `cycle` is the CPU cycle count at the start of the
    /// instruction performing this access.
    fn write_cycle(&mut self, _cycle: u64, size: Size, addr: u32, value: u32) {
        self.write(size, addr, value)
    }
}
