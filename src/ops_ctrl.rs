//! System control: NOP, STOP, RESET, TRAP, TRAPV, LINK, UNLK, and the
//! SR/CCR/USP move and immediate-to-SR/CCR instructions.

use crate::bus::Bus;
use crate::cpu::Cpu68000;
use crate::decode::{Op, OpcodeTable};
use crate::exceptions::{VEC_PRIVILEGE_VIOLATION, VEC_TRAPV, VEC_TRAP_0};
use crate::flags::V;
use crate::size::Size;
use crate::timing::ea_fetch_cycles;

pub(crate) fn register(t: &mut OpcodeTable) {
    t.set(0x4E71, Op::Nop);
    t.set(0x4E72, Op::Stop);
    t.set(0x4E70, Op::Reset);
    register_trap(t);
    t.set(0x4E76, Op::Trapv);
    register_link(t);
    register_unlk(t);
    register_sr_moves(t);
    register_imm_to_sr_ccr(t);
}

/// TRAP #n
/// Encoding: 0100 1110 0100 VVVV (vectors 32-47)
fn register_trap(t: &mut OpcodeTable) {
    for v in 0u16..16 {
        t.set(0x4E40 | v, Op::Trap);
    }
}

/// LINK An,#disp
/// Encoding: 0100 1110 0101 0AAA
fn register_link(t: &mut OpcodeTable) {
    for an in 0u16..8 {
        t.set(0x4E50 | an, Op::Link);
    }
}

/// UNLK An
/// Encoding: 0100 1110 0101 1AAA
fn register_unlk(t: &mut OpcodeTable) {
    for an in 0u16..8 {
        t.set(0x4E58 | an, Op::Unlk);
    }
}

fn register_sr_moves(t: &mut OpcodeTable) {
    // MOVE SR,<ea> (unprivileged on the 68000)
    // Encoding: 0100 0000 11ss ssss
    for mode in 0u16..8 {
        if mode == 1 {
            continue;
        }
        for reg in 0u16..8 {
            if mode == 7 && reg > 1 {
                continue;
            }
            t.set(0x40C0 | mode << 3 | reg, Op::MoveFromSr);
        }
    }

    // MOVE <ea>,CCR
    // Encoding: 0100 0100 11ss ssss
    for mode in 0u16..8 {
        if mode == 1 {
            continue;
        }
        for reg in 0u16..8 {
            if mode == 7 && reg > 4 {
                continue;
            }
            t.set(0x44C0 | mode << 3 | reg, Op::MoveToCcr);
        }
    }

    // MOVE <ea>,SR (privileged)
    // Encoding: 0100 0110 11ss ssss
    for mode in 0u16..8 {
        if mode == 1 {
            continue;
        }
        for reg in 0u16..8 {
            if mode == 7 && reg > 4 {
                continue;
            }
            t.set(0x46C0 | mode << 3 | reg, Op::MoveToSr);
        }
    }

    // MOVE An,USP and MOVE USP,An (privileged)
    // Encoding: 0100 1110 0110 DAAA (D=0: An->USP, D=1: USP->An)
    for an in 0u16..8 {
        t.set(0x4E60 | an, Op::MoveToUsp);
        t.set(0x4E68 | an, Op::MoveFromUsp);
    }
}

fn register_imm_to_sr_ccr(t: &mut OpcodeTable) {
    t.set(0x003C, Op::OriToCcr); // ORI to CCR
    t.set(0x007C, Op::OriToSr); // ORI to SR
    t.set(0x023C, Op::AndiToCcr); // ANDI to CCR
    t.set(0x027C, Op::AndiToSr); // ANDI to SR
    t.set(0x0A3C, Op::EoriToCcr); // EORI to CCR
    t.set(0x0A7C, Op::EoriToSr); // EORI to SR
}

impl<B: Bus> Cpu68000<B> {
    pub(crate) fn op_nop(&mut self) {
        self.cycles += 4;
    }

    pub(crate) fn op_stop(&mut self) {
        if !self.supervisor() {
            self.exception(VEC_PRIVILEGE_VIOLATION);
            return;
        }

        let imm = self.fetch_pc();
        self.set_sr(imm);
        self.stopped = true;
        // Rewind PC to the instruction start: the stopped CPU does not
        // advance, so the exception frame pushed by the waking interrupt
        // carries the address expected by hardware captures.
        self.reg.pc = self.prev_pc;
        self.cycles += 4;
    }

    pub(crate) fn op_reset(&mut self) {
        if !self.supervisor() {
            self.exception(VEC_PRIVILEGE_VIOLATION);
            return;
        }

        self.bus.reset();
        self.cycles += 132;
    }

    pub(crate) fn op_trap(&mut self) {
        let vector = u32::from(self.ir & 0xF) + VEC_TRAP_0;
        self.exception(vector);
    }

    pub(crate) fn op_trapv(&mut self) {
        if self.reg.sr & V != 0 {
            self.exception(VEC_TRAPV);
        } else {
            self.cycles += 4;
        }
    }

    pub(crate) fn op_link(&mut self) {
        let an = usize::from(self.ir & 7);
        let disp = self.fetch_pc() as i16;

        let frame = self.reg.a[an];
        self.push_long(frame);
        self.reg.a[an] = self.reg.a[7];
        self.reg.a[7] = self.reg.a[7].wrapping_add(disp as i32 as u32);

        self.cycles += 16;
    }

    pub(crate) fn op_unlk(&mut self) {
        let an = usize::from(self.ir & 7);
        self.reg.a[7] = self.reg.a[an];
        self.reg.a[an] = self.pop_long();

        self.cycles += 12;
    }

    pub(crate) fn op_move_from_sr(&mut self) {
        let mode = ((self.ir >> 3) & 7) as u8;
        let reg = (self.ir & 7) as u8;

        let dst = self.resolve_ea(mode, reg, Size::Word);
        let sr = self.reg.sr;
        dst.write(self, Size::Word, u32::from(sr));

        if mode == 0 {
            self.cycles += 6;
        } else {
            self.cycles += 8 + ea_fetch_cycles(mode, reg, Size::Word);
        }
    }

    pub(crate) fn op_move_to_ccr(&mut self) {
        let mode = ((self.ir >> 3) & 7) as u8;
        let reg = (self.ir & 7) as u8;

        let src = self.resolve_ea(mode, reg, Size::Word);
        let val = src.read(self, Size::Word);
        self.set_ccr(val as u8);

        self.cycles += 12 + ea_fetch_cycles(mode, reg, Size::Word);
    }

    pub(crate) fn op_move_to_sr(&mut self) {
        if !self.supervisor() {
            self.exception(VEC_PRIVILEGE_VIOLATION);
            return;
        }

        let mode = ((self.ir >> 3) & 7) as u8;
        let reg = (self.ir & 7) as u8;

        let src = self.resolve_ea(mode, reg, Size::Word);
        let val = src.read(self, Size::Word);
        self.set_sr(val as u16);

        self.cycles += 12 + ea_fetch_cycles(mode, reg, Size::Word);
    }

    pub(crate) fn op_move_to_usp(&mut self) {
        if !self.supervisor() {
            self.exception(VEC_PRIVILEGE_VIOLATION);
            return;
        }
        let an = usize::from(self.ir & 7);
        self.reg.usp = self.reg.a[an];
        self.cycles += 4;
    }

    pub(crate) fn op_move_from_usp(&mut self) {
        if !self.supervisor() {
            self.exception(VEC_PRIVILEGE_VIOLATION);
            return;
        }
        let an = usize::from(self.ir & 7);
        self.reg.a[an] = self.reg.usp;
        self.cycles += 4;
    }

    pub(crate) fn op_andi_to_ccr(&mut self) {
        let imm = self.fetch_pc();
        self.set_ccr(self.reg.sr as u8 & imm as u8);
        self.cycles += 20;
    }

    pub(crate) fn op_andi_to_sr(&mut self) {
        if !self.supervisor() {
            self.exception(VEC_PRIVILEGE_VIOLATION);
            return;
        }
        let imm = self.fetch_pc();
        let sr = self.reg.sr & imm;
        self.set_sr(sr);
        self.cycles += 20;
    }

    pub(crate) fn op_ori_to_ccr(&mut self) {
        let imm = self.fetch_pc();
        self.set_ccr(self.reg.sr as u8 | imm as u8);
        self.cycles += 20;
    }

    pub(crate) fn op_ori_to_sr(&mut self) {
        if !self.supervisor() {
            self.exception(VEC_PRIVILEGE_VIOLATION);
            return;
        }
        let imm = self.fetch_pc();
        let sr = self.reg.sr | imm;
        self.set_sr(sr);
        self.cycles += 20;
    }

    pub(crate) fn op_eori_to_ccr(&mut self) {
        let imm = self.fetch_pc();
        self.set_ccr(self.reg.sr as u8 ^ imm as u8);
        self.cycles += 20;
    }

    pub(crate) fn op_eori_to_sr(&mut self) {
        if !self.supervisor() {
            self.exception(VEC_PRIVILEGE_VIOLATION);
            return;
        }
        let imm = self.fetch_pc();
        let sr = self.reg.sr ^ imm;
        self.set_sr(sr);
        self.cycles += 20;
    }
}
