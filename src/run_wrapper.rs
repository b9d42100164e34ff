//! Simulation driver and configuration sweep

use std::io::Write;

use crate::cache::Cache;
use crate::config::CacheConfig;
use crate::config::Placement;
use crate::config::WritePolicy;
use crate::config::ADDRESS_BITS;
use crate::error::AccessError;
use crate::error::SimulatorResult;
use crate::stats::SimStats;
use crate::trace::Access;

/// Cache sizes covered by the standard sweep
pub const CACHE_SIZES: [usize; 4] = [1024, 2048, 8192, 65536];

/// Block sizes covered by the standard sweep
pub const BLOCK_SIZES: [usize; 4] = [4, 8, 32, 256];

/// Placements covered by the standard sweep
pub const PLACEMENTS: [Placement; 4] = [
    Placement::DirectMapped,
    Placement::NWay(2),
    Placement::NWay(4),
    Placement::FullyAssociative,
];

/// Write policies covered by the standard sweep
pub const WRITE_POLICIES: [WritePolicy; 2] =
    [WritePolicy::WriteBack, WritePolicy::WriteThrough];

/// Replay the access sequence against a cold cache and return the final
/// statistics.
///
/// Each run owns its cache and statistics, so runs over different
/// configurations are independent; replaying the same sequence against the
/// same configuration is deterministic. A malformed access aborts the whole
/// run and no partial statistics are returned.
pub fn run(
    config: &CacheConfig,
    accesses: &[Access],
) -> SimulatorResult<SimStats> {
    let mut cache = Cache::make(*config);
    let mut stats = SimStats::default();

    for (index, access) in accesses.iter().enumerate() {
        if config.address_bits < ADDRESS_BITS
            && (access.address >> config.address_bits) != 0
        {
            return Err(AccessError::AddressOutOfRange {
                index,
                address: access.address,
                width: config.address_bits,
            }
            .into());
        }

        // Sequence numbers start at 1 and strictly increase; they are the
        // LRU clock
        let seq = index as u64 + 1;
        cache.access(access.kind, access.address, seq, &mut stats)?;
        stats.verify()?;
    }

    Ok(stats)
}

/// Run every standard-sweep configuration (128 in total) over the access
/// sequence. A grid combination that fails validation is skipped with a
/// diagnostic rather than aborting the sweep.
pub fn sweep(
    accesses: &[Access],
) -> SimulatorResult<Vec<(CacheConfig, SimStats)>> {
    let mut results = Vec::new();
    for cache_size in CACHE_SIZES {
        for block_size in BLOCK_SIZES {
            for placement in PLACEMENTS {
                for write_policy in WRITE_POLICIES {
                    let config = match CacheConfig::make(
                        cache_size,
                        block_size,
                        placement,
                        write_policy,
                    ) {
                        Ok(config) => config,
                        Err(e) => {
                            eprintln!(
                                "Skipping invalid configuration {} {} {} {}: {}",
                                cache_size,
                                block_size,
                                placement.label(),
                                write_policy.label(),
                                e
                            );
                            continue;
                        }
                    };
                    let stats = run(&config, accesses)?;
                    results.push((config, stats));
                }
            }
        }
    }
    Ok(results)
}

/// Format a rate for the result file ("NA" for an empty run)
pub fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(rate) => format!("{:.2}", rate),
        None => "NA".to_string(),
    }
}

/// One-line summary of a configuration's result, space-delimited:
/// size, block, placement, ways, policy, requests, hits, hit rate, bytes
/// in, bytes out
pub fn result_line(config: &CacheConfig, stats: &SimStats) -> String {
    format!(
        "{} {} {} {} {} {} {} {} {} {}",
        config.cache_size,
        config.block_size,
        config.placement.label(),
        config.num_ways,
        config.write_policy.label(),
        stats.total_accesses,
        stats.hits,
        format_rate(stats.hit_rate()),
        stats.bytes_to_cache,
        stats.bytes_to_memory
    )
}

/// Write one CSV record per simulated configuration to the result sink
pub fn write_results<W: Write>(
    out: W,
    results: &[(CacheConfig, SimStats)],
) -> SimulatorResult<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record([
        "cache_size",
        "block_size",
        "placement",
        "ways",
        "write_policy",
        "requests",
        "hits",
        "misses",
        "hit_rate",
        "bytes_to_cache",
        "bytes_to_memory",
    ])?;
    for (config, stats) in results {
        writer.write_record([
            config.cache_size.to_string(),
            config.block_size.to_string(),
            config.placement.label(),
            config.num_ways.to_string(),
            config.write_policy.label().to_string(),
            stats.total_accesses.to_string(),
            stats.hits.to_string(),
            stats.misses.to_string(),
            format_rate(stats.hit_rate()),
            stats.bytes_to_cache.to_string(),
            stats.bytes_to_memory.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
