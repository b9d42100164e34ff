//! Cache store implementation

use crate::config::CacheConfig;
use crate::config::WritePolicy;
use crate::error::SimulatorError;
use crate::error::SimulatorResult;
use crate::stats::SimStats;
use crate::trace::AccessKind;

/// Bytes written to memory by a single write-through store
pub const WORD_BYTES: usize = 4;

pub fn get_log_2(value: u32) -> usize {
    assert!(value > 0);
    31 - value.leading_zeros() as usize
}

pub fn is_pow_2(value: u32) -> bool {
    value != 0 && value & (value - 1) == 0
}

pub fn get_mask(bits: usize) -> u32 {
    (1 << bits) - 1
}

/// A single cache line slot.
/// The store never tracks data payloads, only presence and dirtiness.
#[derive(Clone, Copy, Default)]
pub struct Block {
    pub valid: bool,
    pub dirty: bool,
    pub tag: u32,
    /// Sequence number of the last access that touched this line,
    /// used as the LRU ordering key
    pub last_used: u64,
}

/// Cache store.
///
/// Blocks are stored set-major: the lines of set `s` occupy
/// `s * num_ways .. (s + 1) * num_ways`.
pub struct Cache {
    pub config: CacheConfig,

    offset_mask: u32,
    set_mask: u32,

    pub blocks: Vec<Block>,
}

// Address layout, most to least significant:
// | tag | set index | offset |
impl Cache {
    /// Create a cold cache for an already-validated configuration
    pub fn make(config: CacheConfig) -> Self {
        let offset_mask = get_mask(config.offset_bits);
        let set_mask = get_mask(config.set_bits);
        Self {
            config,
            offset_mask,
            set_mask,
            blocks: vec![Block::default(); config.num_blocks],
        }
    }

    pub fn get_tag(&self, address: u32) -> u32 {
        address >> self.config.tag_shift
    }

    pub fn get_set_index(&self, address: u32) -> usize {
        ((address >> self.config.offset_bits) & self.set_mask) as usize
    }

    pub fn get_block_offset(&self, address: u32) -> u32 {
        address & self.offset_mask
    }

    /// Slot range of the given set in the flat block vector
    fn set_range(&self, set_index: usize) -> (usize, usize) {
        let begin = set_index * self.config.num_ways;
        (begin, begin + self.config.num_ways)
    }

    /// Scan the target set for a valid line holding the tag of `address`.
    /// Finding the same tag twice in one set is an internal defect and is
    /// surfaced as an error rather than resolved to the first match.
    pub fn lookup(&self, address: u32) -> SimulatorResult<Option<usize>> {
        let tag = self.get_tag(address);
        let set_index = self.get_set_index(address);
        let (begin, end) = self.set_range(set_index);

        let mut found = None;
        for i in begin..end {
            let block = &self.blocks[i];
            if block.valid && block.tag == tag {
                if found.is_some() {
                    return Err(SimulatorError::InvariantViolation(format!(
                        "two valid lines with tag {:#x} in set {}",
                        tag, set_index
                    )));
                }
                found = Some(i);
            }
        }
        Ok(found)
    }

    /// Pick the slot to fill in the given set: an invalid slot if one
    /// exists, otherwise the valid line with the smallest `last_used`.
    /// Ties break toward the lowest slot index.
    pub fn victim_index(&self, set_index: usize) -> usize {
        let (begin, end) = self.set_range(set_index);
        let mut result = begin;
        let mut min_used = self.blocks[begin].last_used;

        for i in begin..end {
            let block = &self.blocks[i];
            if !block.valid {
                return i;
            }
            if block.last_used < min_used {
                min_used = block.last_used;
                result = i;
            }
        }
        result
    }

    /// Install the block containing `address`, evicting the LRU victim if
    /// the set is full. Returns the filled slot and whether a valid dirty
    /// line was overwritten. The new line starts clean; the caller marks it
    /// dirty afterwards if the access requires it.
    pub fn allocate(&mut self, address: u32, seq: u64) -> (usize, bool) {
        let set_index = self.get_set_index(address);
        let i = self.victim_index(set_index);
        let victim = &self.blocks[i];
        let evicted_dirty = victim.valid && victim.dirty;

        self.blocks[i] = Block {
            valid: true,
            dirty: false,
            tag: self.get_tag(address),
            last_used: seq,
        };
        (i, evicted_dirty)
    }

    /// Apply one classified access and return whether it hit.
    ///
    /// Misses always allocate, for stores as well as loads (write-allocate
    /// under both write policies). Dirty bits are only ever set under
    /// write-back; a write-through store instead counts one word written to
    /// memory. Evicting a dirty victim counts a full block written back.
    pub fn access(
        &mut self,
        kind: AccessKind,
        address: u32,
        seq: u64,
        stats: &mut SimStats,
    ) -> SimulatorResult<bool> {
        let write_policy = self.config.write_policy;
        let block_size = self.config.block_size as u64;

        match self.lookup(address)? {
            Some(i) => {
                stats.record_hit();
                let block = &mut self.blocks[i];
                block.last_used = seq;
                if kind == AccessKind::Store {
                    match write_policy {
                        WritePolicy::WriteBack => block.dirty = true,
                        WritePolicy::WriteThrough => {
                            stats.bytes_to_memory += WORD_BYTES as u64;
                        }
                    }
                }
                Ok(true)
            }
            None => {
                stats.record_miss();
                // The whole block comes in from memory on a miss
                stats.bytes_to_cache += block_size;

                let (i, evicted_dirty) = self.allocate(address, seq);
                if evicted_dirty {
                    // Dirty lines only exist under write-back
                    stats.writebacks += 1;
                    stats.bytes_to_memory += block_size;
                }

                if kind == AccessKind::Store {
                    match write_policy {
                        WritePolicy::WriteBack => self.blocks[i].dirty = true,
                        WritePolicy::WriteThrough => {
                            stats.bytes_to_memory += WORD_BYTES as u64;
                        }
                    }
                }
                Ok(false)
            }
        }
    }
}
