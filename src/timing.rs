//! Effective-address cycle costs from the Programmer's Reference Manual
//! timing tables (Table 8-1). Handlers add these on top of their base cost.

use crate::size::Size;

/// Source operand EA fetch timing.
///
/// Register-direct modes (Dn, An) cost 0; memory and immediate modes pay the
/// extension-word fetch and operand read. Long accesses add 4 to every
/// non-zero entry.
pub(crate) fn ea_fetch_cycles(mode: u8, reg: u8, sz: Size) -> u64 {
    let base: u64 = match mode {
        0 | 1 => 0,  // Dn, An
        2 | 3 => 4,  // (An), (An)+
        4 => 6,      // -(An)
        5 => 8,      // d16(An)
        6 => 10,     // d8(An,Xn)
        7 => match reg {
            0 => 8,  // abs.W
            1 => 12, // abs.L
            2 => 8,  // d16(PC)
            3 => 10, // d8(PC,Xn)
            4 => 4,  // #imm
            _ => 0,
        },
        _ => 0,
    };
    if sz == Size::Long && base > 0 {
        base + 4
    } else {
        base
    }
}

/// Destination EA write timing.
///
/// Same table as [`ea_fetch_cycles`] except -(An) costs 4 rather than 6.
pub(crate) fn ea_write_cycles(mode: u8, reg: u8, sz: Size) -> u64 {
    let base: u64 = match mode {
        0 | 1 => 0,     // Dn, An
        2 | 3 | 4 => 4, // (An), (An)+, -(An)
        5 => 8,         // d16(An)
        6 => 10,        // d8(An,Xn)
        7 => match reg {
            0 => 8,  // abs.W
            1 => 12, // abs.L
            _ => 0,
        },
        _ => 0,
    };
    if sz == Size::Long && base > 0 {
        base + 4
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::{ea_fetch_cycles, ea_write_cycles};
    use crate::size::Size;

    #[test]
    fn register_modes_are_free() {
        assert_eq!(ea_fetch_cycles(0, 3, Size::Long), 0);
        assert_eq!(ea_fetch_cycles(1, 0, Size::Word), 0);
        assert_eq!(ea_write_cycles(0, 0, Size::Long), 0);
    }

    #[test]
    fn long_adds_four_to_memory_modes() {
        assert_eq!(ea_fetch_cycles(2, 0, Size::Word), 4);
        assert_eq!(ea_fetch_cycles(2, 0, Size::Long), 8);
        assert_eq!(ea_fetch_cycles(7, 1, Size::Long), 16);
    }

    #[test]
    fn predecrement_write_is_cheaper_than_fetch() {
        assert_eq!(ea_fetch_cycles(4, 0, Size::Word), 6);
        assert_eq!(ea_write_cycles(4, 0, Size::Word), 4);
    }
}
