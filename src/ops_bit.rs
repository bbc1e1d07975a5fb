//! Bit manipulation: BTST, BCHG, BCLR, BSET.
//!
//! Each comes in two forms:
//! - Dynamic: 0000 DDD1 00tt teee (Dn supplies the bit number)
//! - Static:  0000 1000 00tt teee + immediate word (bit number in extension)
//!
//! With a Dn destination the operation is long-sized (bit mod 32); with a
//! memory destination it is byte-sized (bit mod 8).

use crate::bus::Bus;
use crate::cpu::Cpu68000;
use crate::decode::{Op, OpcodeTable};
use crate::flags::Z;
use crate::size::Size;

pub(crate) fn register(t: &mut OpcodeTable) {
    register_btst(t);
    register_bchg(t);
    register_bclr(t);
    register_bset(t);
}

fn register_btst(t: &mut OpcodeTable) {
    // Dynamic form: BTST Dn,<ea> (immediate allowed as source)
    for dn in 0u16..8 {
        for mode in 0u16..8 {
            if mode == 1 {
                continue;
            }
            for reg in 0u16..8 {
                if mode == 7 && reg > 4 {
                    continue;
                }
                t.set(0x0100 | dn << 9 | mode << 3 | reg, Op::BtstDyn);
            }
        }
    }
    // Static form: BTST #imm,<ea>
    for mode in 0u16..8 {
        if mode == 1 {
            continue;
        }
        for reg in 0u16..8 {
            if mode == 7 && reg > 3 {
                continue;
            }
            t.set(0x0800 | mode << 3 | reg, Op::BtstStatic);
        }
    }
}

fn register_bchg(t: &mut OpcodeTable) {
    for dn in 0u16..8 {
        for mode in 0u16..8 {
            if mode == 1 {
                continue;
            }
            for reg in 0u16..8 {
                if mode == 7 && reg > 1 {
                    continue;
                }
                t.set(0x0140 | dn << 9 | mode << 3 | reg, Op::BchgDyn);
            }
        }
    }
    for mode in 0u16..8 {
        if mode == 1 {
            continue;
        }
        for reg in 0u16..8 {
            if mode == 7 && reg > 1 {
                continue;
            }
            t.set(0x0840 | mode << 3 | reg, Op::BchgStatic);
        }
    }
}

fn register_bclr(t: &mut OpcodeTable) {
    for dn in 0u16..8 {
        for mode in 0u16..8 {
            if mode == 1 {
                continue;
            }
            for reg in 0u16..8 {
                if mode == 7 && reg > 1 {
                    continue;
                }
                t.set(0x0180 | dn << 9 | mode << 3 | reg, Op::BclrDyn);
            }
        }
    }
    for mode in 0u16..8 {
        if mode == 1 {
            continue;
        }
        for reg in 0u16..8 {
            if mode == 7 && reg > 1 {
                continue;
            }
            t.set(0x0880 | mode << 3 | reg, Op::BclrStatic);
        }
    }
}

fn register_bset(t: &mut OpcodeTable) {
    for dn in 0u16..8 {
        for mode in 0u16..8 {
            if mode == 1 {
                continue;
            }
            for reg in 0u16..8 {
                if mode == 7 && reg > 1 {
                    continue;
                }
                t.set(0x01C0 | dn << 9 | mode << 3 | reg, Op::BsetDyn);
            }
        }
    }
    for mode in 0u16..8 {
        if mode == 1 {
            continue;
        }
        for reg in 0u16..8 {
            if mode == 7 && reg > 1 {
                continue;
            }
            t.set(0x08C0 | mode << 3 | reg, Op::BsetStatic);
        }
    }
}

impl<B: Bus> Cpu68000<B> {
    /// Set Z from the tested bit.
    fn set_z_from_bit(&mut self, val: u32, bit_mask: u32) {
        if val & bit_mask == 0 {
            self.reg.sr |= Z;
        } else {
            self.reg.sr &= !Z;
        }
    }

    pub(crate) fn op_btst_dyn(&mut self) {
        let dn = usize::from((self.ir >> 9) & 7);
        let mode = ((self.ir >> 3) & 7) as u8;
        let reg = (self.ir & 7) as u8;
        let bit_num = self.reg.d[dn];

        if mode == 0 {
            let val = self.reg.d[usize::from(reg)];
            self.set_z_from_bit(val, 1 << (bit_num & 31));
            self.cycles += 6;
        } else {
            let dst = self.resolve_ea(mode, reg, Size::Byte);
            let val = dst.read(self, Size::Byte);
            self.set_z_from_bit(val, 1 << (bit_num & 7));
            self.cycles += 4;
        }
    }

    pub(crate) fn op_btst_static(&mut self) {
        let bit_num = u32::from(self.fetch_pc() & 0xFF);
        let mode = ((self.ir >> 3) & 7) as u8;
        let reg = (self.ir & 7) as u8;

        if mode == 0 {
            let val = self.reg.d[usize::from(reg)];
            self.set_z_from_bit(val, 1 << (bit_num & 31));
            self.cycles += 10;
        } else {
            let dst = self.resolve_ea(mode, reg, Size::Byte);
            let val = dst.read(self, Size::Byte);
            self.set_z_from_bit(val, 1 << (bit_num & 7));
            self.cycles += 8;
        }
    }

    pub(crate) fn op_bchg_dyn(&mut self) {
        let dn = usize::from((self.ir >> 9) & 7);
        let mode = ((self.ir >> 3) & 7) as u8;
        let reg = (self.ir & 7) as u8;
        let bit_num = self.reg.d[dn];

        if mode == 0 {
            let mask = 1u32 << (bit_num & 31);
            let r = usize::from(reg);
            self.set_z_from_bit(self.reg.d[r], mask);
            self.reg.d[r] ^= mask;
            self.cycles += 8;
        } else {
            let mask = 1u32 << (bit_num & 7);
            let dst = self.resolve_ea(mode, reg, Size::Byte);
            let val = dst.read(self, Size::Byte);
            self.set_z_from_bit(val, mask);
            dst.write(self, Size::Byte, val ^ mask);
            self.cycles += 8;
        }
    }

    pub(crate) fn op_bchg_static(&mut self) {
        let bit_num = u32::from(self.fetch_pc() & 0xFF);
        let mode = ((self.ir >> 3) & 7) as u8;
        let reg = (self.ir & 7) as u8;

        if mode == 0 {
            let mask = 1u32 << (bit_num & 31);
            let r = usize::from(reg);
            self.set_z_from_bit(self.reg.d[r], mask);
            self.reg.d[r] ^= mask;
            self.cycles += 12;
        } else {
            let mask = 1u32 << (bit_num & 7);
            let dst = self.resolve_ea(mode, reg, Size::Byte);
            let val = dst.read(self, Size::Byte);
            self.set_z_from_bit(val, mask);
            dst.write(self, Size::Byte, val ^ mask);
            self.cycles += 12;
        }
    }

    pub(crate) fn op_bclr_dyn(&mut self) {
        let dn = usize::from((self.ir >> 9) & 7);
        let mode = ((self.ir >> 3) & 7) as u8;
        let reg = (self.ir & 7) as u8;
        let bit_num = self.reg.d[dn];

        if mode == 0 {
            let mask = 1u32 << (bit_num & 31);
            let r = usize::from(reg);
            self.set_z_from_bit(self.reg.d[r], mask);
            self.reg.d[r] &= !mask;
            self.cycles += 10;
        } else {
            let mask = 1u32 << (bit_num & 7);
            let dst = self.resolve_ea(mode, reg, Size::Byte);
            let val = dst.read(self, Size::Byte);
            self.set_z_from_bit(val, mask);
            dst.write(self, Size::Byte, val & !mask);
            self.cycles += 8;
        }
    }

    pub(crate) fn op_bclr_static(&mut self) {
        let bit_num = u32::from(self.fetch_pc() & 0xFF);
        let mode = ((self.ir >> 3) & 7) as u8;
        let reg = (self.ir & 7) as u8;

        if mode == 0 {
            let mask = 1u32 << (bit_num & 31);
            let r = usize::from(reg);
            self.set_z_from_bit(self.reg.d[r], mask);
            self.reg.d[r] &= !mask;
            self.cycles += 14;
        } else {
            let mask = 1u32 << (bit_num & 7);
            let dst = self.resolve_ea(mode, reg, Size::Byte);
            let val = dst.read(self, Size::Byte);
            self.set_z_from_bit(val, mask);
            dst.write(self, Size::Byte, val & !mask);
            self.cycles += 12;
        }
    }

    pub(crate) fn op_bset_dyn(&mut self) {
        let dn = usize::from((self.ir >> 9) & 7);
        let mode = ((self.ir >> 3) & 7) as u8;
        let reg = (self.ir & 7) as u8;
        let bit_num = self.reg.d[dn];

        if mode == 0 {
            let mask = 1u32 << (bit_num & 31);
            let r = usize::from(reg);
            self.set_z_from_bit(self.reg.d[r], mask);
            self.reg.d[r] |= mask;
            self.cycles += 8;
        } else {
            let mask = 1u32 << (bit_num & 7);
            let dst = self.resolve_ea(mode, reg, Size::Byte);
            let val = dst.read(self, Size::Byte);
            self.set_z_from_bit(val, mask);
            dst.write(self, Size::Byte, val | mask);
            self.cycles += 8;
        }
    }

    pub(crate) fn op_bset_static(&mut self) {
        let bit_num = u32::from(self.fetch_pc() & 0xFF);
        let mode = ((self.ir >> 3) & 7) as u8;
        let reg = (self.ir & 7) as u8;

        if mode == 0 {
            let mask = 1u32 << (bit_num & 31);
            let r = usize::from(reg);
            self.set_z_from_bit(self.reg.d[r], mask);
            self.reg.d[r] |= mask;
            self.cycles += 12;
        } else {
            let mask = 1u32 << (bit_num & 7);
            let dst = self.resolve_ea(mode, reg, Size::Byte);
            let val = dst.read(self, Size::Byte);
            self.set_z_from_bit(val, mask);
            dst.write(self, Size::Byte, val | mask);
            self.cycles += 12;
        }
    }
}
