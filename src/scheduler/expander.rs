//! Expands a validated configuration into the full set of conversion jobs.

use crate::core::{Config, ConversionJob};
use tracing::debug;

/// Produces one job per (source file, platform, output target) combination.
///
/// The sequence is deterministic: sources in sorted order, platforms in
/// sentinel-expansion order, targets in convention order. An empty source
/// set expands to zero jobs, which is a valid run.
pub fn expand(config: &Config) -> Vec<ConversionJob> {
    let mut sources = config.sources.clone();
    sources.sort();

    let platforms = config.platforms.platforms();
    let mut jobs = Vec::new();
    for source in &sources {
        for platform in platforms {
            for target in platform.scales() {
                jobs.push(ConversionJob {
                    source: source.clone(),
                    platform: *platform,
                    target: *target,
                });
            }
        }
    }

    debug!(
        "Expanded {} sources x {} platforms into {} jobs",
        sources.len(),
        platforms.len(),
        jobs.len()
    );
    jobs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Platform, PlatformSet};
    use std::path::PathBuf;

    fn sources(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn empty_source_set_expands_to_zero_jobs() {
        assert!(expand(&Config::new(vec![])).is_empty());
    }

    #[test]
    fn job_count_is_sources_times_scales_per_platform() {
        let config = Config::new(sources(&["a.png", "b.png", "c.png"]))
            .with_platforms(PlatformSet::Single(Platform::Android));
        assert_eq!(expand(&config).len(), 3 * 5);

        let config = Config::new(sources(&["a.png", "b.png", "c.png"]))
            .with_platforms(PlatformSet::Single(Platform::Ios));
        assert_eq!(expand(&config).len(), 3 * 3);
    }

    #[test]
    fn all_sentinel_sums_scales_across_platforms() {
        let config = Config::new(sources(&["a.png", "b.png"])).with_platforms(PlatformSet::All);
        let jobs = expand(&config);
        assert_eq!(jobs.len(), 2 * (5 + 3));

        // every triple is unique
        for (i, job) in jobs.iter().enumerate() {
            assert!(jobs[i + 1..].iter().all(|other| other != job));
        }
    }

    #[test]
    fn expansion_is_deterministic_and_idempotent() {
        let shuffled = Config::new(sources(&["c.png", "a.png", "b.png"]));
        let ordered = Config::new(sources(&["a.png", "b.png", "c.png"]));

        let first = expand(&shuffled);
        let second = expand(&shuffled);
        assert_eq!(first, second);
        assert_eq!(first, expand(&ordered));
        assert!(first[0].source.ends_with("a.png"));
    }
}
