//! Synthetic trace generation.
//!
//! Two workloads that isolate the effect of one cache parameter each: an
//! associativity trace whose hit rate climbs with the number of ways, and a
//! block-size trace whose hit rate over block size follows the familiar
//! bowl curve. Both emit the text format accepted by [`crate::trace`].

use std::io::Write;

/// Write a trace whose hit rate improves with associativity.
/// Tuned for a 1 KiB cache with 8-byte blocks.
pub fn write_associativity_trace(w: &mut impl Write) -> std::io::Result<()> {
    let cache_size: u32 = 1024;
    let block_size: u32 = 8;
    let total_blocks = cache_size / block_size;

    // Phase 1: conflict misses for a direct-mapped cache; four blocks per
    // set index so low associativity keeps thrashing
    for i in 0..50u32 {
        for way in 0..4u32 {
            let address = (way * total_blocks + (i % 16)) * block_size;
            writeln!(w, "read {:08x}", address)?;
        }
    }

    // Phase 2: high temporal locality, poor spatial locality
    for i in 0..50u32 {
        let way = i % 4;
        let set_index = (i / 4) % 32;
        let address = (way * total_blocks + set_index) * block_size;
        writeln!(w, "read {:08x}", address)?;
    }

    // Phase 3: alternating access to conflicting address pairs
    for i in 0..50u32 {
        let ways: [u32; 2] = if i % 2 == 0 { [0, 1] } else { [2, 3] };
        for way in ways {
            let set_index = i % 32;
            let address = (way * total_blocks + set_index) * block_size;
            writeln!(w, "read {:08x}", address)?;
        }
    }

    // Phase 4: stores over the same conflict pattern
    for i in 0..50u32 {
        let way = i % 4;
        let set_index = i % 16;
        let address = (way * total_blocks + set_index) * block_size;
        writeln!(w, "write {:08x}", address)?;
    }

    Ok(())
}

/// Write a trace that produces the block-size bowl curve: small blocks win
/// the strided phases, large blocks win the sequential phase, and the
/// conflict phases punish both extremes.
pub fn write_block_size_trace(w: &mut impl Write) -> std::io::Result<()> {
    // Phase 1: good spatial locality, rewarding small and medium blocks
    for base in (0..60u32).step_by(8) {
        for offset in (0..8u32).step_by(4) {
            writeln!(w, "read {:08x}", base + offset)?;
        }
    }

    // Phase 2: strided working set that wastes space in large blocks
    for i in 0..50u32 {
        let address = (i % 16) * 2 + ((i / 32) % 32) * 512;
        writeln!(w, "read {:08x}", address)?;
    }

    // Phase 3: large strides mapping to few sets, polluting large blocks
    for i in 0..10u32 {
        let set_index = i % 4;
        let address = set_index * 512 + (i % 64) * 512;
        writeln!(w, "read {:08x}", address)?;
    }

    // Phase 4: spread accesses across different sets
    let block_size = 32u32;
    for i in 0..30u32 {
        let address = i * block_size * 129;
        writeln!(w, "load {:08x}", address)?;
    }

    // Phase 5: revisit the same addresses as stores to demonstrate hits
    for i in 0..30u32 {
        let address = i * block_size * 129;
        writeln!(w, "store {:08x}", address)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::parse_trace;
    use crate::trace::AccessKind;
    use std::path::Path;

    #[test]
    fn test_associativity_trace_parses_back() {
        let mut buffer = Vec::new();
        write_associativity_trace(&mut buffer).unwrap();
        let content = String::from_utf8(buffer).unwrap();
        let accesses = parse_trace(Path::new("associative.trace"), &content)
            .unwrap();

        // 50*4 reads + 50 reads + 50*2 reads + 50 writes
        assert_eq!(accesses.len(), 400);
        assert!(accesses[..350]
            .iter()
            .all(|a| a.kind == AccessKind::Load));
        assert!(accesses[350..]
            .iter()
            .all(|a| a.kind == AccessKind::Store));
    }

    #[test]
    fn test_block_size_trace_parses_back() {
        let mut buffer = Vec::new();
        write_block_size_trace(&mut buffer).unwrap();
        let content = String::from_utf8(buffer).unwrap();
        let accesses =
            parse_trace(Path::new("block.trace"), &content).unwrap();

        // 16 + 50 + 10 + 30 reads, then 30 stores
        assert_eq!(accesses.len(), 136);
        assert!(accesses[..106]
            .iter()
            .all(|a| a.kind == AccessKind::Load));
        assert!(accesses[106..]
            .iter()
            .all(|a| a.kind == AccessKind::Store));
    }
}
