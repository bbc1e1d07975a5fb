//! Snapshot codec: fixed 104-byte layout, version checks, and resumability.

mod common;

use common::{cpu_with, cpu_with_state, nop_cpu, TestBus, CODE};
use mc68000::{Cpu68000, SnapshotError, SNAPSHOT_SIZE};

#[test]
fn snapshot_is_104_bytes_versioned_big_endian() {
    let cpu = nop_cpu(1);
    let mut buf = [0u8; SNAPSHOT_SIZE];
    cpu.serialize(&mut buf).unwrap();
    assert_eq!(SNAPSHOT_SIZE, 104);
    assert_eq!(buf[0], 1); // version byte
}

#[test]
fn serialize_rejects_short_buffer() {
    let cpu = nop_cpu(1);
    let mut buf = [0u8; 10];
    assert_eq!(
        cpu.serialize(&mut buf),
        Err(SnapshotError::BufferTooSmall(10))
    );
}

#[test]
fn deserialize_rejects_short_buffer_and_bad_version() {
    let mut cpu = nop_cpu(1);
    assert_eq!(
        cpu.deserialize(&[0u8; 10]),
        Err(SnapshotError::BufferTooSmall(10))
    );

    let mut buf = [0u8; SNAPSHOT_SIZE];
    cpu.serialize(&mut buf).unwrap();
    buf[0] = 99;
    assert_eq!(
        cpu.deserialize(&buf),
        Err(SnapshotError::UnsupportedVersion(99))
    );
}

#[test]
fn round_trip_preserves_registers() {
    let mut cpu = cpu_with_state(&[0x4E71], |r| {
        for i in 0..8 {
            r.d[i] = 0x10 + i as u32;
            r.a[i] = 0x20 + i as u32;
        }
        r.usp = 0x5000;
        r.ssp = 0x6000;
    });
    cpu.request_interrupt(5, Some(64));

    let mut buf = vec![0u8; SNAPSHOT_SIZE];
    cpu.serialize(&mut buf).unwrap();

    let mut other = cpu_with(&[0x4E71]);
    other.deserialize(&buf).unwrap();
    assert_eq!(other.registers(), cpu.registers());
    assert_eq!(other.cycles(), cpu.cycles());
    assert_eq!(other.deficit(), cpu.deficit());
    assert_eq!(other.halted(), cpu.halted());
}

#[test]
fn round_trip_resumes_with_identical_step_behavior() {
    let mut cpu1 = nop_cpu(10);
    cpu1.step();
    cpu1.step();

    let mut buf = vec![0u8; SNAPSHOT_SIZE];
    cpu1.serialize(&mut buf).unwrap();

    // Same program image behind a separate bus instance
    let mut cpu2 = nop_cpu(10);
    cpu2.deserialize(&buf).unwrap();

    let c1 = cpu1.step();
    let c2 = cpu2.step();
    assert_eq!(c1, c2);
    assert_eq!(cpu1.registers(), cpu2.registers());
    assert_eq!(cpu1.cycles(), cpu2.cycles());
}

#[test]
fn pending_interrupt_survives_round_trip() {
    let mut cpu1 = nop_cpu(4);
    cpu1.bus_mut().write_long(64 * 4, 0x2000);
    cpu1.bus_mut().write_word(0x2000, 0x4E71);
    cpu1.request_interrupt(5, Some(64));

    let mut buf = vec![0u8; SNAPSHOT_SIZE];
    cpu1.serialize(&mut buf).unwrap();

    let mut cpu2 = nop_cpu(4);
    cpu2.bus_mut().write_long(64 * 4, 0x2000);
    cpu2.bus_mut().write_word(0x2000, 0x4E71);
    cpu2.deserialize(&buf).unwrap();

    // Both service the restored interrupt identically
    assert_eq!(cpu1.step(), cpu2.step());
    assert_eq!(cpu1.registers(), cpu2.registers());
    assert_eq!(cpu1.registers().pc, 0x2002);
}

#[test]
fn deficit_survives_round_trip() {
    let mut cpu1 = nop_cpu(2);
    cpu1.step_cycles(1);
    assert_eq!(cpu1.deficit(), 3);

    let mut buf = vec![0u8; SNAPSHOT_SIZE];
    cpu1.serialize(&mut buf).unwrap();

    let mut cpu2 = nop_cpu(2);
    cpu2.deserialize(&buf).unwrap();
    assert_eq!(cpu2.deficit(), 3);
    assert_eq!(cpu2.step_cycles(100), 3);
}

#[test]
fn halted_state_survives_round_trip() {
    let mut cpu1 = cpu_with_state(&[0x4E71], |r| r.pc = CODE + 1);
    cpu1.step();
    assert!(cpu1.halted());

    let mut buf = vec![0u8; SNAPSHOT_SIZE];
    cpu1.serialize(&mut buf).unwrap();

    let mut cpu2 = nop_cpu(1);
    cpu2.deserialize(&buf).unwrap();
    assert!(cpu2.halted());
    assert_eq!(cpu2.step(), 0);
}

#[test]
fn deserialize_leaves_the_bus_untouched() {
    let cpu1 = nop_cpu(1);
    let mut buf = vec![0u8; SNAPSHOT_SIZE];
    cpu1.serialize(&mut buf).unwrap();

    let mut bus = TestBus::new();
    bus.mem[0x2000] = 0xAB;
    let mut cpu2 = Cpu68000::new(bus);
    cpu2.deserialize(&buf).unwrap();
    assert_eq!(cpu2.bus().mem[0x2000], 0xAB);
}
