//! Exception, interrupt, and address-error behavior.

mod common;

use common::{cpu_with, cpu_with_state, TestBus, CODE, STACK};
use mc68000::Cpu68000;

/// Install an exception handler address in the vector table.
fn set_vector(cpu: &mut Cpu68000<TestBus>, vector: u32, handler: u32) {
    cpu.bus_mut().write_long(vector * 4, handler);
}

// ========== Address errors ==========

#[test]
fn word_read_from_odd_address_halts() {
    let mut cpu = cpu_with_state(&[0x3010], |r| r.a[0] = 0x2001); // MOVE.W (A0),D0
    cpu.step();
    assert!(cpu.halted());
}

#[test]
fn long_read_from_odd_address_halts() {
    let mut cpu = cpu_with_state(&[0x2010], |r| r.a[0] = 0x2001); // MOVE.L (A0),D0
    cpu.step();
    assert!(cpu.halted());
}

#[test]
fn word_write_to_odd_address_halts_without_bus_effect() {
    let mut cpu = cpu_with_state(&[0x3080], |r| {
        // MOVE.W D0,(A0)
        r.d[0] = 0x1234;
        r.a[0] = 0x2001;
    });
    cpu.step();
    assert!(cpu.halted());
    assert_eq!(cpu.bus().mem[0x2001], 0);
    assert_eq!(cpu.bus().mem[0x2002], 0);
}

#[test]
fn byte_write_to_odd_address_works() {
    let mut cpu = cpu_with_state(&[0x1080], |r| {
        // MOVE.B D0,(A0)
        r.d[0] = 0xCD;
        r.a[0] = 0x2001;
    });
    cpu.step();
    assert!(!cpu.halted());
    assert_eq!(cpu.bus().mem[0x2001], 0xCD);
}

#[test]
fn odd_pc_halts_with_zero_cycles() {
    let mut cpu = cpu_with_state(&[0x4E71], |r| r.pc = CODE + 1);
    assert_eq!(cpu.step(), 0);
    assert!(cpu.halted());
}

#[test]
fn jump_to_odd_address_halts_after_the_instruction() {
    let mut cpu = cpu_with_state(&[0x4ED0], |r| r.a[0] = 0x2001); // JMP (A0)
    cpu.step();
    assert!(cpu.halted());
}

#[test]
fn halted_cpu_performs_no_bus_io_until_reset() {
    let mut cpu = cpu_with_state(&[0x4E71], |r| r.pc = CODE + 1);
    cpu.step();
    assert!(cpu.halted());
    assert_eq!(cpu.step(), 0);
    assert_eq!(cpu.step_cycles(100), 0);

    // reset() clears the halt and reloads SSP/PC from the vector table
    cpu.bus_mut().write_long(0, 0x20000);
    cpu.bus_mut().write_long(4, 0x3000);
    cpu.reset();
    assert!(!cpu.halted());
    let regs = cpu.registers();
    assert_eq!(regs.a[7], 0x20000);
    assert_eq!(regs.pc, 0x3000);
    assert_eq!(regs.sr, 0x2700);
}

#[test]
fn exception_push_to_odd_ssp_is_a_double_fault() {
    // 0x4AFC is the dedicated ILLEGAL encoding; with an odd SSP the frame
    // push faults and the CPU halts instead of completing the exception.
    let mut cpu = cpu_with_state(&[0x4AFC], |r| r.ssp = 0x10001);
    set_vector(&mut cpu, 4, 0x2000);
    cpu.step();
    assert!(cpu.halted());
}

// ========== In-model exceptions ==========

#[test]
fn illegal_instruction_pushes_faulting_address() {
    let mut cpu = cpu_with(&[0x4AFC]);
    set_vector(&mut cpu, 4, 0x2000);
    cpu.bus_mut().write_word(0x2000, 0x4E71);
    assert_eq!(cpu.step(), 34);
    let regs = cpu.registers();
    assert!(!cpu.halted());
    assert_eq!(regs.pc, 0x2000);
    assert_eq!(cpu.bus().read_long(STACK - 4), CODE); // group-1: faulting PC
    assert_eq!(cpu.bus().read_word(STACK - 6), 0x2700);
}

#[test]
fn line_a_and_line_f_dispatch_their_own_vectors() {
    let mut cpu = cpu_with(&[0xA123]);
    set_vector(&mut cpu, 10, 0x2000);
    cpu.step();
    assert_eq!(cpu.registers().pc, 0x2000);

    let mut cpu = cpu_with(&[0xF123]);
    set_vector(&mut cpu, 11, 0x2400);
    cpu.step();
    assert_eq!(cpu.registers().pc, 0x2400);
}

#[test]
fn trap_dispatches_through_vector_32_plus_n() {
    let mut cpu = cpu_with(&[0x4E45]); // TRAP #5
    set_vector(&mut cpu, 37, 0x2000);
    assert_eq!(cpu.step(), 34);
    let regs = cpu.registers();
    assert_eq!(regs.pc, 0x2000);
    // TRAP pushes the next instruction address
    assert_eq!(cpu.bus().read_long(STACK - 4), CODE + 2);
}

#[test]
fn trapv_fires_only_on_overflow() {
    let mut cpu = cpu_with(&[0x4E76]); // TRAPV, V clear
    assert_eq!(cpu.step(), 4);
    assert_eq!(cpu.registers().pc, CODE + 2);

    let mut cpu = cpu_with_state(&[0x4E76], |r| r.sr = 0x2700 | 0x0002);
    set_vector(&mut cpu, 7, 0x2000);
    cpu.step();
    assert_eq!(cpu.registers().pc, 0x2000);
}

#[test]
fn chk_traps_on_negative_or_above_bound() {
    // In bounds: no trap
    let mut cpu = cpu_with_state(&[0x4181], |r| {
        // CHK D1,D0
        r.d[0] = 5;
        r.d[1] = 10;
    });
    assert_eq!(cpu.step(), 10);
    assert_eq!(cpu.registers().pc, CODE + 2);

    // Negative: trap with N set
    let mut cpu = cpu_with_state(&[0x4181], |r| {
        r.d[0] = 0x8000;
        r.d[1] = 10;
    });
    set_vector(&mut cpu, 6, 0x2000);
    cpu.step();
    let regs = cpu.registers();
    assert_eq!(regs.pc, 0x2000);
    assert_ne!(regs.sr & 0x0008, 0);

    // Above bound: trap with N clear
    let mut cpu = cpu_with_state(&[0x4181], |r| {
        r.d[0] = 11;
        r.d[1] = 10;
    });
    set_vector(&mut cpu, 6, 0x2000);
    cpu.step();
    let regs = cpu.registers();
    assert_eq!(regs.pc, 0x2000);
    assert_eq!(regs.sr & 0x0008, 0);
}

#[test]
fn divide_by_zero_raises_vector_5_without_writing_dn() {
    let mut cpu = cpu_with_state(&[0x80C1], |r| r.d[0] = 1234); // DIVU D1,D0, D1=0
    set_vector(&mut cpu, 5, 0x2000);
    cpu.step();
    let regs = cpu.registers();
    assert_eq!(regs.pc, 0x2000);
    assert_eq!(regs.d[0], 1234);
}

#[test]
fn privileged_instruction_in_user_mode_faults() {
    // MOVE #$2700,SR from user mode
    let mut cpu = cpu_with_state(&[0x46FC, 0x2700], |r| {
        r.sr = 0x0000;
        r.usp = 0x8000;
    });
    set_vector(&mut cpu, 8, 0x2000);
    cpu.step();
    let regs = cpu.registers();
    assert_eq!(regs.pc, 0x2000);
    // Back in supervisor mode on the supervisor stack
    assert_ne!(regs.sr & 0x2000, 0);
    assert_eq!(regs.a[7], STACK - 6);
    // Privilege violation is a group-1 fault: faulting address pushed
    assert_eq!(cpu.bus().read_long(STACK - 4), CODE);
    // The interrupted user stack is preserved in the shadow
    assert_eq!(regs.usp, 0x8000);
}

#[test]
fn uninitialized_vector_falls_back_then_halts() {
    // Vector 4 empty, vector 15 installed: handler reached
    let mut cpu = cpu_with(&[0x4AFC]);
    set_vector(&mut cpu, 15, 0x2800);
    cpu.step();
    assert!(!cpu.halted());
    assert_eq!(cpu.registers().pc, 0x2800);

    // Both empty: double fault, halt
    let mut cpu = cpu_with(&[0x4AFC]);
    cpu.step();
    assert!(cpu.halted());
}

// ========== Interrupts ==========

#[test]
fn interrupt_below_mask_is_deferred_until_higher_level_arrives() {
    let mut cpu = cpu_with_state(&[0x4E71, 0x4E71], |r| r.sr = 0x2300); // mask 3
    set_vector(&mut cpu, 29, 0x2000);
    cpu.bus_mut().write_word(0x2000, 0x4E71);

    cpu.request_interrupt(2, None);
    assert_eq!(cpu.step(), 4); // level 2 stays pending
    assert_eq!(cpu.registers().pc, CODE + 2);

    cpu.request_interrupt(5, None);
    let cycles = cpu.step(); // service + first handler instruction
    assert_eq!(cycles, 48);
    let regs = cpu.registers();
    assert_eq!(regs.pc, 0x2002);
    assert_eq!((regs.sr >> 8) & 7, 5); // mask raised to serviced level
    // Frame: next-instruction PC and pre-interrupt SR
    assert_eq!(cpu.bus().read_long(STACK - 4), CODE + 2);
    assert_eq!(cpu.bus().read_word(STACK - 6), 0x2300);
}

#[test]
fn level_seven_is_non_maskable() {
    let mut cpu = cpu_with(&[0x4E71]); // mask 7
    set_vector(&mut cpu, 31, 0x2000);
    cpu.bus_mut().write_word(0x2000, 0x4E71);
    cpu.request_interrupt(7, None);
    cpu.step();
    assert_eq!(cpu.registers().pc, 0x2002);
}

#[test]
fn supplied_vector_overrides_auto_vector() {
    let mut cpu = cpu_with_state(&[0x4E71], |r| r.sr = 0x2000); // mask 0
    set_vector(&mut cpu, 64, 0x2000);
    cpu.bus_mut().write_word(0x2000, 0x4E71);
    cpu.request_interrupt(3, Some(64));
    cpu.step();
    assert_eq!(cpu.registers().pc, 0x2002);
}

#[test]
fn higher_pending_level_replaces_lower() {
    let mut cpu = cpu_with_state(&[0x4E71], |r| r.sr = 0x2000);
    set_vector(&mut cpu, 30, 0x2000); // auto-vector for level 6
    cpu.bus_mut().write_word(0x2000, 0x4E71);
    cpu.request_interrupt(4, None);
    cpu.request_interrupt(6, None);
    cpu.step();
    let regs = cpu.registers();
    assert_eq!(regs.pc, 0x2002);
    assert_eq!((regs.sr >> 8) & 7, 6);
}

#[test]
fn stop_waits_for_interrupt_then_resumes_at_handler() {
    let mut cpu = cpu_with(&[0x4E72, 0x2500]); // STOP #$2500
    set_vector(&mut cpu, 30, 0x2000);
    cpu.bus_mut().write_word(0x2000, 0x4E71);

    assert_eq!(cpu.step(), 4);
    let regs = cpu.registers();
    assert_eq!(regs.sr, 0x2500);
    assert_eq!(regs.pc, CODE); // rewound to the STOP itself

    // Stopped: each step just bills the idle cost
    assert_eq!(cpu.step(), 4);
    assert_eq!(cpu.step(), 4);
    assert_eq!(cpu.registers().pc, CODE);

    // A level above the mask wakes it through the handler
    cpu.request_interrupt(6, None);
    assert_eq!(cpu.step(), 48);
    let regs = cpu.registers();
    assert_eq!(regs.pc, 0x2000);
    assert_eq!((regs.sr >> 8) & 7, 6);
}

#[test]
fn masked_interrupt_does_not_wake_stop() {
    let mut cpu = cpu_with(&[0x4E72, 0x2700]); // STOP #$2700, mask 7
    cpu.step();
    cpu.request_interrupt(3, None);
    assert_eq!(cpu.step(), 4);
    let regs = cpu.registers();
    assert_eq!(regs.pc, CODE); // still stopped
}

#[test]
fn rte_returns_from_handler_and_restores_mode() {
    // Enter an interrupt from user mode, then RTE back
    let mut cpu = cpu_with_state(&[0x4E71, 0x4E71], |r| {
        r.sr = 0x0000;
        r.usp = 0x8000;
    });
    set_vector(&mut cpu, 25, 0x2000);
    cpu.bus_mut().write_word(0x2000, 0x4E73); // RTE
    cpu.request_interrupt(1, None);

    // One step services the interrupt and then executes the handler's RTE,
    // restoring user mode and the interrupted PC.
    cpu.step();
    let regs = cpu.registers();
    assert_eq!(regs.pc, CODE);
    assert_eq!(regs.sr & 0x2000, 0);
    assert_eq!(regs.a[7], 0x8000);
    assert_eq!(regs.ssp, STACK);
}
