//! Save-state codec.
//!
//! The full CPU state serializes to a fixed 104-byte big-endian layout:
//! version byte, D0-D7, A0-A7, PC, SR, USP, SSP, IR, cycle counter, latched
//! instruction word, stopped/halted flags, previous PC, pending interrupt
//! level and optional vector, and the cycle deficit. The bus is not part of
//! the snapshot; deserializing leaves the wired bus untouched.

use thiserror::Error;

use crate::bus::Bus;
use crate::cpu::Cpu68000;

/// Version byte written at offset 0. Bumped whenever the layout changes.
const SNAPSHOT_VERSION: u8 = 1;

/// Number of bytes produced by [`Cpu68000::serialize`].
pub const SNAPSHOT_SIZE: usize = 104;

/// Errors surfaced by the snapshot codec.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    /// The supplied buffer holds fewer than [`SNAPSHOT_SIZE`] bytes.
    #[error("snapshot buffer too small: need {SNAPSHOT_SIZE} bytes, got {0}")]
    BufferTooSmall(usize),
    /// The buffer's version byte does not match this codec.
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u8),
}

struct Writer<'a> {
    buf: &'a mut [u8],
    off: usize,
}

impl Writer<'_> {
    fn u8(&mut self, v: u8) {
        self.buf[self.off] = v;
        self.off += 1;
    }

    fn u16(&mut self, v: u16) {
        self.buf[self.off..self.off + 2].copy_from_slice(&v.to_be_bytes());
        self.off += 2;
    }

    fn u32(&mut self, v: u32) {
        self.buf[self.off..self.off + 4].copy_from_slice(&v.to_be_bytes());
        self.off += 4;
    }

    fn u64(&mut self, v: u64) {
        self.buf[self.off..self.off + 8].copy_from_slice(&v.to_be_bytes());
        self.off += 8;
    }
}

struct Reader<'a> {
    buf: &'a [u8],
    off: usize,
}

impl Reader<'_> {
    fn u8(&mut self) -> u8 {
        let v = self.buf[self.off];
        self.off += 1;
        v
    }

    fn u16(&mut self) -> u16 {
        u16::from(self.u8()) << 8 | u16::from(self.u8())
    }

    fn u32(&mut self) -> u32 {
        u32::from(self.u16()) << 16 | u32::from(self.u16())
    }

    fn u64(&mut self) -> u64 {
        u64::from(self.u32()) << 32 | u64::from(self.u32())
    }
}

impl<B: Bus> Cpu68000<B> {
    /// Write the full CPU state into `buf`, which must hold at least
    /// [`SNAPSHOT_SIZE`] bytes. The bus is not included.
    pub fn serialize(&self, buf: &mut [u8]) -> Result<(), SnapshotError> {
        if buf.len() < SNAPSHOT_SIZE {
            return Err(SnapshotError::BufferTooSmall(buf.len()));
        }

        let mut w = Writer { buf, off: 0 };
        w.u8(SNAPSHOT_VERSION);

        for &d in &self.reg.d {
            w.u32(d);
        }
        for &a in &self.reg.a {
            w.u32(a);
        }

        w.u32(self.reg.pc);
        w.u16(self.reg.sr);
        w.u32(self.reg.usp);
        w.u32(self.reg.ssp);
        w.u16(self.reg.ir);

        w.u64(self.cycles);
        w.u16(self.ir);

        w.u8(u8::from(self.stopped));
        w.u8(u8::from(self.halted));

        w.u32(self.prev_pc);

        w.u8(self.pending_ipl);
        match self.pending_vec {
            Some(v) => {
                w.u8(1);
                w.u8(v);
            }
            None => {
                w.u8(0);
                w.u8(0);
            }
        }

        w.u32(self.deficit as u32);
        Ok(())
    }

    /// Restore CPU state from `buf`, which must hold at least
    /// [`SNAPSHOT_SIZE`] bytes of a matching version. The bus is left
    /// unchanged, so a round trip on identical buses resumes with identical
    /// step behavior.
    pub fn deserialize(&mut self, buf: &[u8]) -> Result<(), SnapshotError> {
        if buf.len() < SNAPSHOT_SIZE {
            return Err(SnapshotError::BufferTooSmall(buf.len()));
        }
        if buf[0] != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(buf[0]));
        }

        let mut r = Reader { buf, off: 1 };

        for d in &mut self.reg.d {
            *d = r.u32();
        }
        for a in &mut self.reg.a {
            *a = r.u32();
        }

        self.reg.pc = r.u32();
        self.reg.sr = r.u16();
        self.reg.usp = r.u32();
        self.reg.ssp = r.u32();
        self.reg.ir = r.u16();

        self.cycles = r.u64();
        self.ir = r.u16();

        self.stopped = r.u8() != 0;
        self.halted = r.u8() != 0;

        self.prev_pc = r.u32();

        self.pending_ipl = r.u8();
        let has_vec = r.u8() != 0;
        let vec = r.u8();
        self.pending_vec = if has_vec { Some(vec) } else { None };

        self.deficit = r.u32() as i32;
        Ok(())
    }
}
