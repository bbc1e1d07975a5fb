//! Data movement: MOVE, MOVEA, MOVEQ, MOVEP, MOVEM, LEA, PEA, EXG, SWAP.

use crate::bus::Bus;
use crate::cpu::Cpu68000;
use crate::decode::{Op, OpcodeTable};
use crate::size::{move_size_field, Size};
use crate::timing::{ea_fetch_cycles, ea_write_cycles};

pub(crate) fn register(t: &mut OpcodeTable) {
    register_move(t);
    register_movea(t);
    register_moveq(t);
    register_movep(t);
    register_lea(t);
    register_pea(t);
    register_movem(t);
    register_exg(t);
    register_swap(t);
}

/// MOVE.B/W/L <ea>,<ea>
/// Encoding: 00SS DDDd ddss ssss
///   SS = size (01=B, 11=W, 10=L)
///   DDD/ddd = destination reg/mode (note: reversed from source)
///   sss/ssssss = source mode/reg
fn register_move(t: &mut OpcodeTable) {
    for sz_bits in [0x1000u16, 0x2000, 0x3000] {
        for dst_mode in 0u16..8 {
            // Destination cannot be An direct or PC-relative/immediate
            if dst_mode == 1 {
                continue;
            }
            for dst_reg in 0u16..8 {
                if dst_mode == 7 && dst_reg > 1 {
                    continue;
                }
                for src_mode in 0u16..8 {
                    for src_reg in 0u16..8 {
                        if src_mode == 7 && src_reg > 4 {
                            continue;
                        }
                        let opcode =
                            sz_bits | dst_reg << 9 | dst_mode << 6 | src_mode << 3 | src_reg;
                        t.set(opcode, Op::Move);
                    }
                }
            }
        }
    }
}

/// MOVEA.W/L <ea>,An
/// Encoding: 00SS DDD0 01ss ssss (destination mode = 001 = An)
fn register_movea(t: &mut OpcodeTable) {
    for sz_bits in [0x2000u16, 0x3000] {
        for dst_reg in 0u16..8 {
            for src_mode in 0u16..8 {
                for src_reg in 0u16..8 {
                    if src_mode == 7 && src_reg > 4 {
                        continue;
                    }
                    let opcode = sz_bits | dst_reg << 9 | 1 << 6 | src_mode << 3 | src_reg;
                    t.set(opcode, Op::Movea);
                }
            }
        }
    }
}

/// MOVEQ #imm8,Dn
/// Encoding: 0111 DDD0 dddddddd
fn register_moveq(t: &mut OpcodeTable) {
    for dn in 0u16..8 {
        for data in 0u16..256 {
            t.set(0x7000 | dn << 9 | data, Op::Moveq);
        }
    }
}

/// MOVEP.W/L Dn,(d16,An) and (d16,An),Dn
/// Encoding: 0000 DDD OOO 001 AAA + 16-bit displacement
///   OOO=100: MOVEP.W (An),Dn   101: MOVEP.L (An),Dn
///   OOO=110: MOVEP.W Dn,(An)   111: MOVEP.L Dn,(An)
fn register_movep(t: &mut OpcodeTable) {
    for dn in 0u16..8 {
        for an in 0u16..8 {
            t.set(0x0108 | dn << 9 | an, Op::Movep); // W, mem -> reg
            t.set(0x0148 | dn << 9 | an, Op::Movep); // L, mem -> reg
            t.set(0x0188 | dn << 9 | an, Op::Movep); // W, reg -> mem
            t.set(0x01C8 | dn << 9 | an, Op::Movep); // L, reg -> mem
        }
    }
}

/// LEA <ea>,An
/// Encoding: 0100 AAA1 11ss ssss (control addressing modes only)
fn register_lea(t: &mut OpcodeTable) {
    for an in 0u16..8 {
        for src_mode in 2u16..8 {
            // (An)+ and -(An) are not control modes
            if src_mode == 3 || src_mode == 4 {
                continue;
            }
            for src_reg in 0u16..8 {
                if src_mode == 7 && src_reg > 3 {
                    continue;
                }
                t.set(0x41C0 | an << 9 | src_mode << 3 | src_reg, Op::Lea);
            }
        }
    }
}

/// PEA <ea>
/// Encoding: 0100 1000 01ss ssss (control addressing modes only)
fn register_pea(t: &mut OpcodeTable) {
    for src_mode in 2u16..8 {
        if src_mode == 3 || src_mode == 4 {
            continue;
        }
        for src_reg in 0u16..8 {
            if src_mode == 7 && src_reg > 3 {
                continue;
            }
            t.set(0x4840 | src_mode << 3 | src_reg, Op::Pea);
        }
    }
}

/// MOVEM.W/L <list>,<ea> and <ea>,<list>
/// Encoding: 0100 1D00 1Sss ssss  D=direction (0=reg-to-mem, 1=mem-to-reg),
/// S=size (0=W, 1=L)
fn register_movem(t: &mut OpcodeTable) {
    for dir in 0u16..2 {
        for sz_bit in 0u16..2 {
            for mode in 2u16..8 {
                // (An)+ is only valid mem-to-reg, -(An) only reg-to-mem
                if dir == 0 && mode == 3 {
                    continue;
                }
                if dir == 1 && mode == 4 {
                    continue;
                }
                for reg in 0u16..8 {
                    if mode == 7 {
                        if dir == 0 && reg > 1 {
                            continue;
                        }
                        if dir == 1 && reg > 3 {
                            continue;
                        }
                    }
                    t.set(0x4880 | dir << 10 | sz_bit << 6 | mode << 3 | reg, Op::Movem);
                }
            }
        }
    }
}

/// EXG Dx,Dy / EXG Ax,Ay / EXG Dx,Ay
/// Encoding: 1100 XXX1 MMMM MYYY
fn register_exg(t: &mut OpcodeTable) {
    for rx in 0u16..8 {
        for ry in 0u16..8 {
            t.set(0xC100 | rx << 9 | 0x40 | ry, Op::Exg); // Data-Data: mode 01000
            t.set(0xC100 | rx << 9 | 0x48 | ry, Op::Exg); // Addr-Addr: mode 01001
            t.set(0xC100 | rx << 9 | 0x88 | ry, Op::Exg); // Data-Addr: mode 10001
        }
    }
}

/// SWAP Dn
/// Encoding: 0100 1000 0100 0DDD
fn register_swap(t: &mut OpcodeTable) {
    for dn in 0u16..8 {
        t.set(0x4840 | dn, Op::Swap);
    }
}

impl<B: Bus> Cpu68000<B> {
    pub(crate) fn op_move(&mut self) {
        let sz = move_size_field((self.ir >> 12) & 3);
        let src_mode = ((self.ir >> 3) & 7) as u8;
        let src_reg = (self.ir & 7) as u8;
        let dst_mode = ((self.ir >> 6) & 7) as u8;
        let dst_reg = ((self.ir >> 9) & 7) as u8;

        let src = self.resolve_ea(src_mode, src_reg, sz);
        let val = src.read(self, sz);

        let dst = self.resolve_ea(dst_mode, dst_reg, sz);
        dst.write(self, sz, val);

        self.set_flags_logical(val, sz);
        self.cycles += 4
            + ea_fetch_cycles(src_mode, src_reg, sz)
            + ea_write_cycles(dst_mode, dst_reg, sz);
    }

    pub(crate) fn op_movea(&mut self) {
        let sz = move_size_field((self.ir >> 12) & 3);
        let src_mode = ((self.ir >> 3) & 7) as u8;
        let src_reg = (self.ir & 7) as u8;
        let an = usize::from((self.ir >> 9) & 7);

        let src = self.resolve_ea(src_mode, src_reg, sz);
        let mut val = src.read(self, sz);

        // MOVEA.W sign-extends to 32 bits
        if sz == Size::Word {
            val = val as u16 as i16 as i32 as u32;
        }
        self.reg.a[an] = val;

        // MOVEA does not affect condition codes
        self.cycles += 4 + ea_fetch_cycles(src_mode, src_reg, sz);
    }

    pub(crate) fn op_moveq(&mut self) {
        let dn = usize::from((self.ir >> 9) & 7);
        let data = self.ir as u8 as i8; // sign-extended 8-bit immediate
        self.reg.d[dn] = data as i32 as u32;
        let val = self.reg.d[dn];
        self.set_flags_logical(val, Size::Long);
        self.cycles += 4;
    }

    pub(crate) fn op_movep(&mut self) {
        let dn = usize::from((self.ir >> 9) & 7);
        let an = usize::from(self.ir & 7);
        let opmode = (self.ir >> 6) & 7;
        let disp = self.fetch_pc() as i16;
        let addr = self.reg.a[an].wrapping_add(disp as i32 as u32);

        // Memory bytes are big-endian at addr, addr+2, addr+4, ...
        match opmode {
            4 => {
                // MOVEP.W mem -> reg
                let b0 = self.read_bus(Size::Byte, addr);
                let b1 = self.read_bus(Size::Byte, addr.wrapping_add(2));
                let val = b0 << 8 | b1;
                self.reg.d[dn] = (self.reg.d[dn] & 0xFFFF_0000) | (val & 0xFFFF);
                self.cycles += 16;
            }
            5 => {
                // MOVEP.L mem -> reg
                let b0 = self.read_bus(Size::Byte, addr);
                let b1 = self.read_bus(Size::Byte, addr.wrapping_add(2));
                let b2 = self.read_bus(Size::Byte, addr.wrapping_add(4));
                let b3 = self.read_bus(Size::Byte, addr.wrapping_add(6));
                self.reg.d[dn] = b0 << 24 | b1 << 16 | b2 << 8 | b3;
                self.cycles += 24;
            }
            6 => {
                // MOVEP.W reg -> mem
                let val = self.reg.d[dn];
                self.write_bus(Size::Byte, addr, (val >> 8) & 0xFF);
                self.write_bus(Size::Byte, addr.wrapping_add(2), val & 0xFF);
                self.cycles += 16;
            }
            7 => {
                // MOVEP.L reg -> mem
                let val = self.reg.d[dn];
                self.write_bus(Size::Byte, addr, (val >> 24) & 0xFF);
                self.write_bus(Size::Byte, addr.wrapping_add(2), (val >> 16) & 0xFF);
                self.write_bus(Size::Byte, addr.wrapping_add(4), (val >> 8) & 0xFF);
                self.write_bus(Size::Byte, addr.wrapping_add(6), val & 0xFF);
                self.cycles += 24;
            }
            _ => {}
        }
        // MOVEP does not affect condition codes
    }

    pub(crate) fn op_lea(&mut self) {
        let an = usize::from((self.ir >> 9) & 7);
        let src_mode = ((self.ir >> 3) & 7) as u8;
        let src_reg = (self.ir & 7) as u8;

        let src = self.resolve_ea(src_mode, src_reg, Size::Long);
        self.reg.a[an] = src.address();

        self.cycles += match src_mode {
            2 => 4,
            5 => 8,
            6 => 12,
            7 => match src_reg {
                0 | 2 => 8,  // abs.W, d16(PC)
                1 | 3 => 12, // abs.L, d8(PC,Xn)
                _ => 0,
            },
            _ => 0,
        };
    }

    pub(crate) fn op_pea(&mut self) {
        let src_mode = ((self.ir >> 3) & 7) as u8;
        let src_reg = (self.ir & 7) as u8;

        let src = self.resolve_ea(src_mode, src_reg, Size::Long);
        let addr = src.address();
        self.push_long(addr);

        self.cycles += match src_mode {
            2 => 12,
            5 => 16,
            6 => 20,
            7 => match src_reg {
                0 | 2 => 16, // abs.W, d16(PC)
                1 | 3 => 20, // abs.L, d8(PC,Xn)
                _ => 0,
            },
            _ => 0,
        };
    }

    pub(crate) fn op_movem(&mut self) {
        let dir = (self.ir >> 10) & 1; // 0 = reg-to-mem, 1 = mem-to-reg
        let sz_bit = (self.ir >> 6) & 1;
        let mode = ((self.ir >> 3) & 7) as u8;
        let reg = (self.ir & 7) as u8;

        let sz = if sz_bit != 0 { Size::Long } else { Size::Word };

        // The register list mask precedes any EA extension words
        let mask = self.fetch_pc();

        if dir == 0 {
            if mode == 4 {
                // -(An): mask is reversed: bit 0=A7, bit 15=D0
                let mut addr = self.reg.a[usize::from(reg)];
                for i in 0..16 {
                    if mask & (1 << i) != 0 {
                        addr = addr.wrapping_sub(sz.bytes());
                        let ri = 15 - i;
                        let val = if ri < 8 {
                            self.reg.d[ri]
                        } else {
                            self.reg.a[ri - 8]
                        };
                        self.write_bus(sz, addr, val);
                    }
                }
                self.reg.a[usize::from(reg)] = addr;
            } else {
                // Other modes: natural order (D0 first, A7 last)
                let src = self.resolve_ea(mode, reg, sz);
                let mut addr = src.address();
                for i in 0..16 {
                    if mask & (1 << i) != 0 {
                        let val = if i < 8 {
                            self.reg.d[i]
                        } else {
                            self.reg.a[i - 8]
                        };
                        self.write_bus(sz, addr, val);
                        addr = addr.wrapping_add(sz.bytes());
                    }
                }
            }
        } else if mode == 3 {
            // (An)+: load then update An
            let mut addr = self.reg.a[usize::from(reg)];
            for i in 0..16 {
                if mask & (1 << i) != 0 {
                    let mut val = self.read_bus(sz, addr);
                    if sz == Size::Word {
                        val = val as u16 as i16 as i32 as u32;
                    }
                    if i < 8 {
                        self.reg.d[i] = val;
                    } else {
                        self.reg.a[i - 8] = val;
                    }
                    addr = addr.wrapping_add(sz.bytes());
                }
            }
            self.reg.a[usize::from(reg)] = addr;
        } else {
            let src = self.resolve_ea(mode, reg, sz);
            let mut addr = src.address();
            for i in 0..16 {
                if mask & (1 << i) != 0 {
                    let mut val = self.read_bus(sz, addr);
                    if sz == Size::Word {
                        val = val as u16 as i16 as i32 as u32;
                    }
                    if i < 8 {
                        self.reg.d[i] = val;
                    } else {
                        self.reg.a[i - 8] = val;
                    }
                    addr = addr.wrapping_add(sz.bytes());
                }
            }
        }

        let n = u64::from(mask.count_ones());
        let per_reg: u64 = if sz == Size::Long { 8 } else { 4 };

        // PRM Table 8-7 base costs
        let base: u64 = if dir == 0 {
            match mode {
                2 | 4 => 8, // (An), -(An)
                5 => 12,    // d16(An)
                6 => 14,    // d8(An,Xn)
                7 => match reg {
                    0 => 12, // abs.W
                    1 => 16, // abs.L
                    _ => 0,
                },
                _ => 0,
            }
        } else {
            match mode {
                2 | 3 => 12, // (An), (An)+
                5 => 16,     // d16(An)
                6 => 18,     // d8(An,Xn)
                7 => match reg {
                    0 => 16, // abs.W
                    1 => 20, // abs.L
                    2 => 16, // d16(PC)
                    3 => 18, // d8(PC,Xn)
                    _ => 0,
                },
                _ => 0,
            }
        };

        self.cycles += base + n * per_reg;
    }

    pub(crate) fn op_exg(&mut self) {
        let rx = usize::from((self.ir >> 9) & 7);
        let ry = usize::from(self.ir & 7);
        let opmode = (self.ir >> 3) & 0x1F;

        match opmode {
            0x08 => self.reg.d.swap(rx, ry),
            0x09 => self.reg.a.swap(rx, ry),
            0x11 => {
                let tmp = self.reg.d[rx];
                self.reg.d[rx] = self.reg.a[ry];
                self.reg.a[ry] = tmp;
            }
            _ => {}
        }

        self.cycles += 6;
    }

    pub(crate) fn op_swap(&mut self) {
        let dn = usize::from(self.ir & 7);
        let val = self.reg.d[dn];
        self.reg.d[dn] = (val >> 16) & 0xFFFF | (val & 0xFFFF) << 16;
        let result = self.reg.d[dn];
        self.set_flags_logical(result, Size::Long);
        self.cycles += 4;
    }
}
