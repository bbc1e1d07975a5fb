//! Branches and jumps: Bcc, BRA, BSR, DBcc, JMP, JSR, RTS, RTE, RTR, Scc.

use crate::bus::Bus;
use crate::cpu::Cpu68000;
use crate::decode::{Op, OpcodeTable};
use crate::exceptions::VEC_PRIVILEGE_VIOLATION;
use crate::size::Size;

pub(crate) fn register(t: &mut OpcodeTable) {
    register_bcc(t);
    register_bra(t);
    register_bsr(t);
    register_dbcc(t);
    register_jmp(t);
    register_jsr(t);
    t.set(0x4E75, Op::Rts);
    t.set(0x4E73, Op::Rte);
    t.set(0x4E77, Op::Rtr);
    register_scc(t);
}

/// Bcc <label>
/// Encoding: 0110 CCCC DDDDDDDD
///   CCCC = condition (2-15; 0=BRA and 1=BSR have their own handlers)
///   DDDDDDDD = 8-bit displacement (0 selects a 16-bit extension word)
fn register_bcc(t: &mut OpcodeTable) {
    for cc in 2u16..16 {
        for disp in 0u16..256 {
            t.set(0x6000 | cc << 8 | disp, Op::Bcc);
        }
    }
}

/// BRA <label>
fn register_bra(t: &mut OpcodeTable) {
    for disp in 0u16..256 {
        t.set(0x6000 | disp, Op::Bra);
    }
}

/// BSR <label>
fn register_bsr(t: &mut OpcodeTable) {
    for disp in 0u16..256 {
        t.set(0x6100 | disp, Op::Bsr);
    }
}

/// DBcc Dn,<label>
/// Encoding: 0101 CCCC 1100 1DDD
fn register_dbcc(t: &mut OpcodeTable) {
    for cc in 0u16..16 {
        for dn in 0u16..8 {
            t.set(0x50C8 | cc << 8 | dn, Op::Dbcc);
        }
    }
}

/// JMP <ea>
/// Encoding: 0100 1110 11ss ssss (control addressing modes)
fn register_jmp(t: &mut OpcodeTable) {
    for mode in 2u16..8 {
        if mode == 3 || mode == 4 {
            continue;
        }
        for reg in 0u16..8 {
            if mode == 7 && reg > 3 {
                continue;
            }
            t.set(0x4EC0 | mode << 3 | reg, Op::Jmp);
        }
    }
}

/// JSR <ea>
fn register_jsr(t: &mut OpcodeTable) {
    for mode in 2u16..8 {
        if mode == 3 || mode == 4 {
            continue;
        }
        for reg in 0u16..8 {
            if mode == 7 && reg > 3 {
                continue;
            }
            t.set(0x4E80 | mode << 3 | reg, Op::Jsr);
        }
    }
}

/// Scc <ea>
/// Encoding: 0101 CCCC 11ss ssss
fn register_scc(t: &mut OpcodeTable) {
    for cc in 0u16..16 {
        for mode in 0u16..8 {
            if mode == 1 {
                continue;
            }
            for reg in 0u16..8 {
                if mode == 7 && reg > 1 {
                    continue;
                }
                t.set(0x50C0 | cc << 8 | mode << 3 | reg, Op::Scc);
            }
        }
    }
}

impl<B: Bus> Cpu68000<B> {
    pub(crate) fn op_bcc(&mut self) {
        let cc = (self.ir >> 8) & 0xF;
        let mut disp = i32::from(self.ir as u8 as i8);
        let base = self.reg.pc; // PC after opcode fetch = instruction address + 2

        if disp == 0 {
            disp = i32::from(self.fetch_pc() as i16);
        }

        if self.test_condition(cc) {
            // Displacement is relative to instruction address + 2
            self.reg.pc = base.wrapping_add(disp as u32);
            self.cycles += 10;
        } else {
            self.cycles += 8;
            if self.ir as u8 == 0 {
                self.cycles += 4;
            }
        }
    }

    pub(crate) fn op_bra(&mut self) {
        let mut disp = i32::from(self.ir as u8 as i8);
        let base = self.reg.pc;

        if disp == 0 {
            disp = i32::from(self.fetch_pc() as i16);
        }

        self.reg.pc = base.wrapping_add(disp as u32);
        self.cycles += 10;
    }

    pub(crate) fn op_bsr(&mut self) {
        let mut disp = i32::from(self.ir as u8 as i8);
        let base = self.reg.pc;

        if disp == 0 {
            disp = i32::from(self.fetch_pc() as i16);
        }

        let ret = self.reg.pc;
        self.push_long(ret);
        self.reg.pc = base.wrapping_add(disp as u32);
        self.cycles += 18;
    }

    pub(crate) fn op_dbcc(&mut self) {
        let cc = (self.ir >> 8) & 0xF;
        let dn = usize::from(self.ir & 7);

        let disp = self.fetch_pc() as i16;

        if self.test_condition(cc) {
            // Condition true: no branch, no decrement
            self.cycles += 12;
            return;
        }

        // Decrement low word of Dn
        let val = (self.reg.d[dn] as u16 as i16).wrapping_sub(1);
        self.reg.d[dn] = (self.reg.d[dn] & 0xFFFF_0000) | u32::from(val as u16);

        if val == -1 {
            // Counter expired: fall through
            self.cycles += 14;
        } else {
            // Branch relative to the displacement word
            self.reg.pc = self
                .reg
                .pc
                .wrapping_sub(2)
                .wrapping_add(disp as i32 as u32);
            self.cycles += 10;
        }
    }

    pub(crate) fn op_jmp(&mut self) {
        let mode = ((self.ir >> 3) & 7) as u8;
        let reg = (self.ir & 7) as u8;

        let dst = self.resolve_ea(mode, reg, Size::Word);
        self.reg.pc = dst.address();

        self.cycles += 8;
    }

    pub(crate) fn op_jsr(&mut self) {
        let mode = ((self.ir >> 3) & 7) as u8;
        let reg = (self.ir & 7) as u8;

        let dst = self.resolve_ea(mode, reg, Size::Word);
        let ret = self.reg.pc;
        self.push_long(ret);
        self.reg.pc = dst.address();

        self.cycles += 16;
    }

    pub(crate) fn op_rts(&mut self) {
        self.reg.pc = self.pop_long();
        self.cycles += 16;
    }

    pub(crate) fn op_rte(&mut self) {
        if !self.supervisor() {
            self.exception(VEC_PRIVILEGE_VIOLATION);
            return;
        }

        let sr = self.pop_word();
        let pc = self.pop_long();
        self.set_sr(sr);
        self.reg.pc = pc;

        self.cycles += 20;
    }

    pub(crate) fn op_rtr(&mut self) {
        let ccr = self.pop_word();
        self.set_ccr(ccr as u8);
        self.reg.pc = self.pop_long();

        self.cycles += 20;
    }

    pub(crate) fn op_scc(&mut self) {
        let cc = (self.ir >> 8) & 0xF;
        let mode = ((self.ir >> 3) & 7) as u8;
        let reg = (self.ir & 7) as u8;

        let dst = self.resolve_ea(mode, reg, Size::Byte);

        if self.test_condition(cc) {
            dst.write(self, Size::Byte, 0xFF);
            self.cycles += 6;
        } else {
            dst.write(self, Size::Byte, 0x00);
            self.cycles += 4;
        }
        if mode >= 2 {
            self.cycles += 4;
        }
    }
}
