use crate::{init_tracing, write_dataset};
use figment::Jail;
use realdata_harness::{
    Aggregator, DatasetLoader, ErrorKind, Gate, HarnessConfig, Measurement, Suite, SuiteStatus,
};

/// Runs each routine once and keeps what it returned.
#[derive(Default)]
struct Once {
    results: Vec<(String, u64)>,
}

impl Measurement for Once {
    fn measure(&mut self, name: &str, routine: &mut dyn FnMut() -> u64) {
        self.results.push((name.to_string(), routine()));
    }
}

#[test]
fn disabled_gate_never_touches_the_repository() {
    init_tracing();
    Jail::expect_with(|jail| {
        jail.set_env("BENCH_REAL_DATA", "nope");
        jail.set_env("BENCH_DATASETS_DIR", "/definitely/not/here");
        let config = HarnessConfig::load().unwrap();
        assert_eq!(config.gate(), Gate::Disabled);

        let suite = Suite::from_config(Aggregator::ParOr.suite_name(), &config).unwrap();
        let mut measurement = Once::default();
        let report = suite.run(
            &DatasetLoader::from_config(&config),
            |bitmaps: &[croaring::Bitmap]| Aggregator::ParOr.aggregate(bitmaps),
            &mut measurement,
        );
        assert_eq!(report.status, SuiteStatus::Skipped);
        assert!(report.outcomes.is_empty());
        assert!(measurement.results.is_empty());
        Ok(())
    });
}

#[test]
fn runs_every_selected_dataset_in_registry_order() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), "census1881", &[("a", "1,2,3"), ("b", "3,4,5")]);
    write_dataset(dir.path(), "uscensus2000", &[("a", "10"), ("b", "10,11"), ("c", "12")]);
    let datasets_dir = dir.path().display().to_string();

    Jail::expect_with(|jail| {
        jail.set_env("BENCH_REAL_DATA", "1");
        jail.set_env("BENCH_DATASETS_DIR", &datasets_dir);
        jail.set_env("BENCH_DATASETS", "uscensus2000,weather_sept_85,census1881");
        let config = HarnessConfig::load().unwrap();
        let loader = DatasetLoader::from_config(&config);

        for aggregator in Aggregator::ALL {
            let suite = Suite::from_config(aggregator.suite_name(), &config).unwrap();
            let mut measurement = Once::default();
            let report = suite.run(
                &loader,
                |bitmaps: &[croaring::Bitmap]| aggregator.aggregate(bitmaps),
                &mut measurement,
            );

            assert_eq!(report.status, SuiteStatus::Failed);
            let order: Vec<_> = report.outcomes.iter().map(|outcome| outcome.dataset).collect();
            assert_eq!(order, vec!["census1881", "uscensus2000", "weather_sept_85"]);
            assert_eq!(report.outcomes[0].result.as_ref().ok(), Some(&2));
            assert_eq!(report.outcomes[1].result.as_ref().ok(), Some(&3));

            let failure = report.outcomes[2].result.as_ref().unwrap_err();
            assert_eq!(failure.kind(), ErrorKind::DatasetMissing);

            assert_eq!(
                measurement.results,
                vec![("census1881".to_string(), 5), ("uscensus2000".to_string(), 3)]
            );
        }
        Ok(())
    });
}

#[test]
fn missing_datasets_dir_fails_each_dataset() {
    let suite = Suite::new("real-data-fast-or", Gate::Enabled, vec!["census1881", "dimension_003"]);
    let mut measurement = Once::default();
    let report = suite.run(
        &DatasetLoader::new(None),
        |bitmaps: &[croaring::Bitmap]| Aggregator::FastOr.aggregate(bitmaps),
        &mut measurement,
    );

    assert_eq!(report.status, SuiteStatus::Failed);
    assert_eq!(report.failures().count(), 2);
    assert!(report.failures().all(|err| err.kind() == ErrorKind::Unconfigured));
    assert!(measurement.results.is_empty());
}
