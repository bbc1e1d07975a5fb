//! Cycle-budgeted execution: deficit accounting across scanline slices.

mod common;

use common::{cpu_with_state, nop_cpu, CODE};

#[test]
fn budget_larger_than_cost() {
    let mut cpu = nop_cpu(1);
    assert_eq!(cpu.step_cycles(100), 4);
    assert_eq!(cpu.deficit(), 0);
}

#[test]
fn budget_equal_to_cost() {
    let mut cpu = nop_cpu(1);
    assert_eq!(cpu.step_cycles(4), 4);
    assert_eq!(cpu.deficit(), 0);
}

#[test]
fn budget_smaller_than_cost_creates_deficit() {
    let mut cpu = nop_cpu(1);
    assert_eq!(cpu.step_cycles(1), 1);
    assert_eq!(cpu.deficit(), 3);
}

#[test]
fn deficit_paid_off_in_one_call() {
    let mut cpu = nop_cpu(2);

    // NOP costs 4, budget is 1: deficit of 3
    cpu.step_cycles(1);

    // A large budget settles it without running a new instruction
    assert_eq!(cpu.step_cycles(100), 3);
    assert_eq!(cpu.deficit(), 0);
    assert_eq!(cpu.registers().pc, CODE + 2);
}

#[test]
fn deficit_paid_off_across_multiple_calls() {
    let mut cpu = nop_cpu(2);
    cpu.step_cycles(1); // deficit 3

    assert_eq!(cpu.step_cycles(1), 1);
    assert_eq!(cpu.deficit(), 2);
    assert_eq!(cpu.step_cycles(1), 1);
    assert_eq!(cpu.deficit(), 1);
    assert_eq!(cpu.step_cycles(1), 1);
    assert_eq!(cpu.deficit(), 0);

    // The deficit settlement never executed the second NOP
    assert_eq!(cpu.registers().pc, CODE + 2);
}

#[test]
fn multiple_instructions_within_budget() {
    let mut cpu = nop_cpu(10);

    let mut budget = 12;
    let mut count = 0;
    while budget > 0 {
        let cycles = cpu.step_cycles(budget);
        budget -= cycles;
        count += 1;
    }
    assert_eq!(count, 3);
    assert_eq!(budget, 0);
}

#[test]
fn scanline_boundary_simulation() {
    let mut cpu = nop_cpu(20);

    // Scanline 1: 10 cycles. Two NOPs fit; the third overruns by 2.
    let mut budget = 10;
    let mut total = 0;
    while budget > 0 {
        let cycles = cpu.step_cycles(budget);
        budget -= cycles;
        total += cycles;
    }
    assert_eq!(total, 10);
    assert_eq!(cpu.deficit(), 2);

    // Scanline 2: the first call pays off the deficit.
    let mut budget = 10;
    let first = cpu.step_cycles(budget);
    assert_eq!(first, 2);
    budget -= first;
    let mut total = first;
    while budget > 0 {
        let cycles = cpu.step_cycles(budget);
        budget -= cycles;
        total += cycles;
    }
    assert_eq!(total, 10);
}

#[test]
fn halted_cpu_returns_zero() {
    let mut cpu = cpu_with_state(&[0x4E71], |r| r.pc = CODE + 1);
    cpu.step();
    assert_eq!(cpu.step_cycles(100), 0);
}

#[test]
fn reset_clears_deficit() {
    let mut cpu = nop_cpu(1);
    cpu.step_cycles(1);
    assert_ne!(cpu.deficit(), 0);

    cpu.bus_mut().write_long(0, 0x10000); // SSP
    cpu.bus_mut().write_long(4, 0x1000); // PC
    cpu.reset();
    assert_eq!(cpu.deficit(), 0);
}

#[test]
fn cycle_counter_is_monotone_and_add_cycles_accounts_dma_holds() {
    let mut cpu = nop_cpu(4);
    let mut last = cpu.cycles();
    for _ in 0..4 {
        cpu.step();
        assert!(cpu.cycles() >= last);
        last = cpu.cycles();
    }
    cpu.add_cycles(100);
    assert_eq!(cpu.cycles(), last + 100);
}
