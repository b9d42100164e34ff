//! Validated cache configuration

use crate::cache::get_log_2;
use crate::cache::is_pow_2;
use crate::error::ConfigError;

/// Default address width in bits
pub const ADDRESS_BITS: usize = 32;

/// Block placement scheme, determining the number of line slots per set
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// One way per set
    DirectMapped,
    /// N ways per set
    NWay(usize),
    /// A single set spanning every line
    FullyAssociative,
}

impl Placement {
    /// Short label used in result files ("DM", "2W", "4W", "FA")
    pub fn label(&self) -> String {
        match self {
            Placement::DirectMapped => "DM".to_string(),
            Placement::NWay(n) => format!("{}W", n),
            Placement::FullyAssociative => "FA".to_string(),
        }
    }
}

/// Write-hit policy.
/// Write misses allocate into the cache under both variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WritePolicy {
    /// Mark the line dirty on a store hit; write the block out on eviction
    WriteBack,
    /// Propagate every store to memory immediately; lines never go dirty
    WriteThrough,
}

impl WritePolicy {
    /// Short label used in result files ("WB", "WT")
    pub fn label(&self) -> &'static str {
        match self {
            WritePolicy::WriteBack => "WB",
            WritePolicy::WriteThrough => "WT",
        }
    }
}

/// Cache configuration, immutable once constructed.
///
/// `make` rejects invalid combinations up front, so the simulation loop
/// never has to re-check geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    pub cache_size: usize,
    pub block_size: usize,
    pub placement: Placement,
    pub write_policy: WritePolicy,
    /// Address width in bits; `ADDRESS_BITS` unless overridden
    pub address_bits: usize,

    // Derived geometry
    pub num_blocks: usize,
    pub num_ways: usize,
    pub num_sets: usize,
    pub offset_bits: usize,
    pub set_bits: usize,
    pub tag_shift: usize,
}

impl CacheConfig {
    /// Create a validated configuration with the default address width
    pub fn make(
        cache_size: usize,
        block_size: usize,
        placement: Placement,
        write_policy: WritePolicy,
    ) -> Result<Self, ConfigError> {
        Self::with_address_bits(
            cache_size,
            block_size,
            placement,
            write_policy,
            ADDRESS_BITS,
        )
    }

    /// Create a validated configuration with an explicit address width
    pub fn with_address_bits(
        cache_size: usize,
        block_size: usize,
        placement: Placement,
        write_policy: WritePolicy,
        address_bits: usize,
    ) -> Result<Self, ConfigError> {
        // The geometry math runs in 32 bits; a cache bigger than the
        // address space cannot be valid anyway
        if cache_size > u32::MAX as usize {
            return Err(ConfigError::CacheTooLarge(cache_size));
        }
        if !is_pow_2(cache_size as u32) {
            return Err(ConfigError::CacheSizeNotPow2(cache_size));
        }
        if !is_pow_2(block_size as u32) {
            return Err(ConfigError::BlockSizeNotPow2(block_size));
        }
        if cache_size % block_size != 0 {
            return Err(ConfigError::SizeNotMultipleOfBlock(
                cache_size, block_size,
            ));
        }

        let num_blocks = cache_size / block_size;
        let num_ways = match placement {
            Placement::DirectMapped => 1,
            Placement::NWay(n) => n,
            Placement::FullyAssociative => num_blocks,
        };
        if num_ways == 0 || num_ways > num_blocks {
            return Err(ConfigError::BadAssociativity(num_ways, num_blocks));
        }
        if num_blocks % num_ways != 0 {
            return Err(ConfigError::UnevenSets(num_blocks, num_ways));
        }

        // Divisors of a power of two are powers of two, so num_sets is one
        // as well and its log is exact
        let num_sets = num_blocks / num_ways;
        let offset_bits = get_log_2(block_size as u32);
        let set_bits = get_log_2(num_sets as u32);
        let tag_shift = offset_bits + set_bits;
        if tag_shift > address_bits || address_bits > ADDRESS_BITS {
            return Err(ConfigError::AddressWidthTooSmall(
                tag_shift,
                address_bits,
            ));
        }

        Ok(Self {
            cache_size,
            block_size,
            placement,
            write_policy,
            address_bits,
            num_blocks,
            num_ways,
            num_sets,
            offset_bits,
            set_bits,
            tag_shift,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_mapped_geometry() {
        let config = CacheConfig::make(
            1024,
            256,
            Placement::DirectMapped,
            WritePolicy::WriteBack,
        )
        .unwrap();
        assert_eq!(config.num_blocks, 4);
        assert_eq!(config.num_ways, 1);
        assert_eq!(config.num_sets, 4);
        assert_eq!(config.offset_bits, 8);
        assert_eq!(config.set_bits, 2);
        assert_eq!(config.tag_shift, 10);
    }

    #[test]
    fn test_fully_associative_geometry() {
        let config = CacheConfig::make(
            1024,
            4,
            Placement::FullyAssociative,
            WritePolicy::WriteBack,
        )
        .unwrap();
        assert_eq!(config.num_blocks, 256);
        assert_eq!(config.num_ways, 256);
        assert_eq!(config.num_sets, 1);
        assert_eq!(config.set_bits, 0);
        assert_eq!(config.tag_shift, 2);
    }

    #[test]
    fn test_n_way_geometry() {
        let config = CacheConfig::make(
            2048,
            8,
            Placement::NWay(4),
            WritePolicy::WriteThrough,
        )
        .unwrap();
        assert_eq!(config.num_blocks, 256);
        assert_eq!(config.num_ways, 4);
        assert_eq!(config.num_sets, 64);
    }

    #[test]
    fn test_rejects_non_pow_2_sizes() {
        assert!(matches!(
            CacheConfig::make(
                1000,
                4,
                Placement::DirectMapped,
                WritePolicy::WriteBack
            ),
            Err(ConfigError::CacheSizeNotPow2(1000))
        ));
        assert!(matches!(
            CacheConfig::make(
                1024,
                3,
                Placement::DirectMapped,
                WritePolicy::WriteBack
            ),
            Err(ConfigError::BlockSizeNotPow2(3))
        ));
    }

    #[test]
    fn test_rejects_bad_associativity() {
        // 1024 / 4 = 256 lines; 512 ways is more than the cache holds
        assert!(matches!(
            CacheConfig::make(
                1024,
                4,
                Placement::NWay(512),
                WritePolicy::WriteBack
            ),
            Err(ConfigError::BadAssociativity(512, 256))
        ));
        assert!(matches!(
            CacheConfig::make(
                1024,
                4,
                Placement::NWay(0),
                WritePolicy::WriteBack
            ),
            Err(ConfigError::BadAssociativity(0, 256))
        ));
        assert!(matches!(
            CacheConfig::make(
                1024,
                4,
                Placement::NWay(3),
                WritePolicy::WriteBack
            ),
            Err(ConfigError::UnevenSets(256, 3))
        ));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_rejects_oversized_cache() {
        // (1 << 32) + 1024 truncates to 1024 in u32, which would slip
        // through the power-of-two check
        let cache_size = (1usize << 32) + 1024;
        assert!(matches!(
            CacheConfig::make(
                cache_size,
                4,
                Placement::DirectMapped,
                WritePolicy::WriteBack
            ),
            Err(ConfigError::CacheTooLarge(_))
        ));
    }

    #[test]
    fn test_rejects_narrow_address_width() {
        // 2 offset bits + 8 set bits do not fit in 8 address bits
        assert!(matches!(
            CacheConfig::with_address_bits(
                1024,
                4,
                Placement::DirectMapped,
                WritePolicy::WriteBack,
                8
            ),
            Err(ConfigError::AddressWidthTooSmall(10, 8))
        ));
    }

    #[test]
    fn test_standard_sweep_grid_is_valid() {
        let placements = [
            Placement::DirectMapped,
            Placement::NWay(2),
            Placement::NWay(4),
            Placement::FullyAssociative,
        ];
        for cache_size in [1024, 2048, 8192, 65536] {
            for block_size in [4, 8, 32, 256] {
                for placement in placements {
                    for write_policy in
                        [WritePolicy::WriteBack, WritePolicy::WriteThrough]
                    {
                        assert!(CacheConfig::make(
                            cache_size,
                            block_size,
                            placement,
                            write_policy
                        )
                        .is_ok());
                    }
                }
            }
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Placement::DirectMapped.label(), "DM");
        assert_eq!(Placement::NWay(2).label(), "2W");
        assert_eq!(Placement::NWay(4).label(), "4W");
        assert_eq!(Placement::FullyAssociative.label(), "FA");
        assert_eq!(WritePolicy::WriteBack.label(), "WB");
        assert_eq!(WritePolicy::WriteThrough.label(), "WT");
    }
}
