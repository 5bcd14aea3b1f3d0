#[cfg(test)]
mod detection_integration_tests {
    use rocm_variant_provider::device::common::{
        CommandOutput, CommandRunner, DeviceError, DeviceResult,
    };
    use rocm_variant_provider::device::{DriverVersion, RuntimeVersion};
    use rocm_variant_provider::{
        AmdVariantPlugin, DetectorConfig, FeatureKey, ProviderConfig, ProviderError, RocmDetector,
    };
    use std::collections::HashMap;
    use std::fs;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};
    use std::thread;
    use std::time::Duration;
    use tempfile::TempDir;

    /// Fake tool set: programs listed in `outputs` succeed, others are "not installed".
    #[derive(Default)]
    struct FakeTools {
        outputs: HashMap<&'static str, &'static str>,
        invocations: AtomicUsize,
    }

    impl FakeTools {
        fn with(mut self, program: &'static str, stdout: &'static str) -> Self {
            self.outputs.insert(program, stdout);
            self
        }

        fn invocations(&self) -> usize {
            self.invocations.load(Ordering::SeqCst)
        }
    }

    impl CommandRunner for FakeTools {
        fn run(&self, program: &str, _: &[&str], _: Duration) -> DeviceResult<CommandOutput> {
            self.invocations.fetch_add(1, Ordering::SeqCst);
            // Makes concurrent first calls overlap.
            thread::sleep(Duration::from_millis(5));
            self.outputs
                .get(program)
                .map(|out| CommandOutput::from_stdout(*out))
                .ok_or_else(|| DeviceError::CommandNotFound(program.to_string()))
        }
    }

    fn config_in(dir: &TempDir) -> DetectorConfig {
        DetectorConfig::default()
            .with_target_os("linux")
            .with_sysfs_version_path(dir.path().join("sys/module/amdgpu/version"))
            .with_rocm_root(dir.path().join("opt/rocm"))
    }

    fn write_marker(root: &Path, content: &str) {
        let info = root.join("opt/rocm/.info");
        fs::create_dir_all(&info).unwrap();
        fs::write(info.join("version"), content).unwrap();
    }

    const SCENARIO_A_ROCMINFO: &str = "\
ROCk module version 6.10.5 is loaded
=====================
HSA Agents
=====================
Agent 1
  Name:                    AMD Ryzen 9 7950X
  Vendor Name:             CPU
Agent 2
  Name:                    gfx90a
  Marketing Name:          AMD Instinct MI210
Agent 3
  Name:                    gfx1100
  Marketing Name:          Radeon RX 7900 XTX
  ISA 1
    Name:                    amdgcn-amd-amdhsa--gfx90a:sramecc+:xnack-
";

    #[test]
    fn test_scenario_a_rocminfo_driver_and_archs() {
        let dir = TempDir::new().unwrap();
        let tools = Arc::new(FakeTools::default().with("rocminfo", SCENARIO_A_ROCMINFO));
        let detector = RocmDetector::with_runner(config_in(&dir), tools);
        let result = detector.detect();

        assert_eq!(result.driver_version, Some(DriverVersion::new(6, 10, 5)));
        assert_eq!(result.architecture_names(), vec!["gfx1100", "gfx90a"]);
    }

    #[test]
    fn test_scenario_b_install_marker_fallback() {
        let dir = TempDir::new().unwrap();
        write_marker(dir.path(), "6.4.1\n");
        let tools = Arc::new(FakeTools::default());
        let detector = RocmDetector::with_runner(config_in(&dir), tools);
        let result = detector.detect();

        assert_eq!(result.runtime_version, Some(RuntimeVersion::new(6, 4, 1)));
        assert_eq!(result.driver_version, None);
        assert!(result.architectures.is_empty());
    }

    #[test]
    fn test_scenario_c_forced_runtime_version_only() {
        let dir = TempDir::new().unwrap();
        let config = ProviderConfig {
            forced_rocm_version: Some("7.0.0".to_string()),
            ..ProviderConfig::default()
        };
        let detector = RocmDetector::with_runner(config_in(&dir), Arc::new(FakeTools::default()));
        let plugin = AmdVariantPlugin::with_detector(config, detector);
        let configs = plugin.get_supported_configs().unwrap();

        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].name, FeatureKey::RocmVersion);
        assert_eq!(configs[0].values, vec!["7.0"]);
        assert!(!configs[0].multi_value);
    }

    #[test]
    fn test_scenario_d_malformed_runtime_override_fails() {
        let dir = TempDir::new().unwrap();
        write_marker(dir.path(), "6.4.1");
        let config = ProviderConfig {
            forced_rocm_version: Some("7.0".to_string()),
            ..ProviderConfig::default()
        };
        let detector = RocmDetector::with_runner(config_in(&dir), Arc::new(FakeTools::default()));
        let plugin = AmdVariantPlugin::with_detector(config, detector);

        match plugin.get_supported_configs() {
            Err(ProviderError::InvalidOverride { value, .. }) => assert_eq!(value, "7.0"),
            other => panic!("expected InvalidOverride, got {other:?}"),
        }
    }

    #[test]
    fn test_detection_is_memoized() {
        let dir = TempDir::new().unwrap();
        let tools = Arc::new(FakeTools::default().with("rocminfo", SCENARIO_A_ROCMINFO));
        let detector = RocmDetector::with_runner(config_in(&dir), tools.clone());

        let first = detector.detect().clone();
        let after_first = tools.invocations();
        let second = detector.detect().clone();

        assert_eq!(first, second);
        assert_eq!(tools.invocations(), after_first);
    }

    #[test]
    fn test_fresh_detector_probes_again() {
        let dir = TempDir::new().unwrap();
        let tools = Arc::new(FakeTools::default().with("rocminfo", SCENARIO_A_ROCMINFO));

        RocmDetector::with_runner(config_in(&dir), tools.clone()).detect();
        let one_pass = tools.invocations();
        RocmDetector::with_runner(config_in(&dir), tools.clone()).detect();

        assert_eq!(tools.invocations(), one_pass * 2);
    }

    #[test]
    fn test_concurrent_first_calls_probe_once() {
        let dir = TempDir::new().unwrap();
        let tools = Arc::new(FakeTools::default());
        let detector = Arc::new(RocmDetector::with_runner(config_in(&dir), tools.clone()));

        // Reference count for one full pass on a host with nothing installed.
        let reference = Arc::new(FakeTools::default());
        RocmDetector::with_runner(config_in(&dir), reference.clone()).detect();

        let barrier = Arc::new(Barrier::new(8));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let detector = Arc::clone(&detector);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    detector.detect().clone()
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(tools.invocations(), reference.invocations());
    }

    #[test]
    fn test_unlisted_architectures_never_reported() {
        let dir = TempDir::new().unwrap();
        let tools = Arc::new(
            FakeTools::default()
                .with("rocminfo", "Name: gfx1150\nName: gfx90a\n")
                .with("rocm_agent_enumerator", "gfx1150\ngfx90a\n"),
        );
        let detector = RocmDetector::with_runner(config_in(&dir), tools);
        assert_eq!(detector.detect().architecture_names(), vec!["gfx90a"]);
    }

    #[test]
    fn test_forced_architectures_win_over_detection() {
        let dir = TempDir::new().unwrap();
        let config = ProviderConfig {
            forced_gfx_archs: Some("GFX1100; gfx1150 gfx1100".to_string()),
            ..ProviderConfig::default()
        };
        let tools = Arc::new(FakeTools::default().with("rocminfo", SCENARIO_A_ROCMINFO));
        let detector = RocmDetector::with_runner(config_in(&dir), tools);
        let plugin = AmdVariantPlugin::with_detector(config, detector);
        let configs = plugin.get_supported_configs().unwrap();

        assert_eq!(configs[0].name, FeatureKey::GfxArch);
        assert_eq!(configs[0].values, vec!["gfx1100", "gfx1150"]);
        assert!(configs[0].multi_value);
    }

    #[test]
    fn test_nothing_detected_reports_nothing() {
        let dir = TempDir::new().unwrap();
        let detector = RocmDetector::with_runner(config_in(&dir), Arc::new(FakeTools::default()));
        let plugin = AmdVariantPlugin::with_detector(ProviderConfig::default(), detector);
        assert!(plugin.get_supported_configs().unwrap().is_empty());
    }

    #[test]
    fn test_env_style_config_end_to_end() {
        let dir = TempDir::new().unwrap();
        write_marker(dir.path(), "6.3.4-71");
        let root = dir.path().join("opt/rocm").display().to_string();
        let config = ProviderConfig::from_lookup(|key| match key {
            "ROCM_PATH" => Some(root.clone()),
            "AMD_PREFERRED_GFX_ARCHS" => Some("gfx1150".to_string()),
            _ => None,
        });
        let detector_config = config
            .detector_config()
            .with_target_os("linux")
            .with_sysfs_version_path(dir.path().join("missing"));
        let tools = Arc::new(FakeTools::default().with("rocm_agent_enumerator", "gfx1150\n"));
        let detector = RocmDetector::with_runner(detector_config, tools);
        let plugin = AmdVariantPlugin::with_detector(config, detector);

        let configs = plugin.get_supported_configs().unwrap();
        assert_eq!(configs[0].values, vec!["gfx1150"]);
        assert_eq!(configs[1].values, vec!["6.3"]);

        let all = plugin.get_all_configs();
        assert_eq!(all[1].values, vec!["gfx1150"]);
    }
}
