//! End-to-end tests for the processor over real directory trees.

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use crate::processor::{Execution, OutputMode, ProcessError, ProcessOptions, Processor};
    use crate::index::SourceKind;
    use crate::serialize::KeyOrder;

    const CONFIG: &str = r#"apiVersion: v1
kind: ConfigMap
metadata:
  name: db-host
data:
  DB_HOST: postgres.svc
---
apiVersion: v1
kind: Secret
metadata:
  name: api-key
stringData:
  API_KEY: abc
"#;

    const WORKLOAD: &str = r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
spec:
  replicas: 2
  template:
    spec:
      containers:
      - name: app
        image: nginx
        env:
        - name: DB_HOST
        - name: API_KEY
        - name: MODE
          value: fast
---
apiVersion: v1
kind: Service
metadata:
  name: web
spec:
  ports:
  - port: 80
"#;

    const BOUND_WORKLOAD: &str = r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
spec:
  replicas: 2
  template:
    spec:
      containers:
      - name: app
        image: nginx
        env:
        - name: DB_HOST
          valueFrom:
            configMapKeyRef:
              name: db-host
              key: DB_HOST
        - name: API_KEY
          valueFrom:
            secretKeyRef:
              name: api-key
              key: API_KEY
        - name: MODE
          value: fast
---
apiVersion: v1
kind: Service
metadata:
  name: web
spec:
  ports:
  - port: 80
"#;

    struct Fixture {
        dir: TempDir,
    }

    impl Fixture {
        fn new(files: &[(&str, &str)]) -> Self {
            let dir = tempfile::tempdir().unwrap();
            for (name, content) in files {
                let path = dir.path().join("in").join(name);
                fs::create_dir_all(path.parent().unwrap()).unwrap();
                fs::write(path, content).unwrap();
            }
            Fixture { dir }
        }

        fn input(&self) -> std::path::PathBuf {
            self.dir.path().join("in")
        }

        fn output(&self) -> std::path::PathBuf {
            self.dir.path().join("out")
        }

        fn options(&self, mode: OutputMode) -> ProcessOptions {
            ProcessOptions::new(self.input())
                .with_output_dir(self.output())
                .with_mode(mode)
        }

        fn run(&self, mode: OutputMode) -> Execution {
            Processor::new(self.options(mode)).execute().unwrap()
        }
    }

    fn read(path: impl AsRef<Path>) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_safe_mode_mirrors_changed_files() {
        // The workload's file sorts before the file declaring its config.
        let fixture = Fixture::new(&[
            ("apps/a-web.yaml", WORKLOAD),
            ("z-config.yaml", CONFIG),
            ("apps/notes.txt", "not a manifest"),
        ]);

        let execution = fixture.run(OutputMode::Safe);

        let report = &execution.report;
        assert_eq!(report.total_files, 2);
        assert_eq!(report.processed_files, 1);
        assert_eq!(report.successful_updates, 1);
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
        assert!(report.errors.is_empty(), "{:?}", report.errors);
        assert!(execution.previews.is_empty());

        assert_eq!(read(fixture.output().join("apps/a-web.yaml")), BOUND_WORKLOAD);
        assert!(!fixture.output().join("z-config.yaml").exists());
        assert_eq!(read(fixture.input().join("apps/a-web.yaml")), WORKLOAD);
    }

    #[test]
    fn test_overwrite_mode_replaces_source() {
        let fixture = Fixture::new(&[("web.yaml", WORKLOAD), ("config.yml", CONFIG)]);

        let execution = fixture.run(OutputMode::Overwrite);

        assert_eq!(execution.report.processed_files, 1);
        assert_eq!(read(fixture.input().join("web.yaml")), BOUND_WORKLOAD);
        assert_eq!(read(fixture.input().join("config.yml")), CONFIG);
        assert!(!fixture.output().exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let fixture = Fixture::new(&[("web.yaml", WORKLOAD), ("config.yaml", CONFIG)]);

        let execution = fixture.run(OutputMode::DryRun);

        assert_eq!(execution.report.processed_files, 1);
        assert_eq!(execution.report.successful_updates, 1);
        assert_eq!(execution.previews.len(), 1);
        assert_eq!(execution.previews[0].source, fixture.input().join("web.yaml"));
        assert_eq!(execution.previews[0].rendered, BOUND_WORKLOAD);
        assert_eq!(read(fixture.input().join("web.yaml")), WORKLOAD);
        assert!(!fixture.output().exists());
        assert_eq!(execution.index.config_map_count(), 1);
        assert_eq!(execution.index.secret_count(), 1);
    }

    #[test]
    fn test_second_run_changes_nothing() {
        let fixture = Fixture::new(&[("web.yaml", WORKLOAD), ("config.yaml", CONFIG)]);
        fixture.run(OutputMode::Overwrite);

        let second = fixture.run(OutputMode::Overwrite);

        assert_eq!(second.report.processed_files, 0);
        assert_eq!(second.report.successful_updates, 0);
        assert_eq!(read(fixture.input().join("web.yaml")), BOUND_WORKLOAD);
    }

    #[test]
    fn test_unresolved_variables_are_warnings() {
        let fixture = Fixture::new(&[("web.yaml", WORKLOAD)]);

        let execution = fixture.run(OutputMode::Safe);

        let report = &execution.report;
        assert_eq!(report.processed_files, 0);
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings[0].contains("DB_HOST"));
        assert!(report.warnings[0].contains("default/web"));
        assert!(report.warnings[1].contains("API_KEY"));
        assert!(report.errors.is_empty());
        assert!(!fixture.output().exists());
    }

    #[test]
    fn test_structural_error_does_not_stop_siblings() {
        let broken = r#"apiVersion: apps/v1
kind: StatefulSet
metadata:
  name: db
spec:
  template:
    spec:
      containers: not-a-list
"#;
        let content = format!("{}---\n{}", broken, WORKLOAD);
        let fixture = Fixture::new(&[("mixed.yaml", content.as_str()), ("config.yaml", CONFIG)]);

        let execution = fixture.run(OutputMode::Safe);

        let report = &execution.report;
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("StatefulSet default/db"));
        assert!(report.errors[0].contains("containers must be a sequence"));
        assert_eq!(report.successful_updates, 1);
        assert_eq!(report.processed_files, 1);
        assert_eq!(
            read(fixture.output().join("mixed.yaml")),
            format!("{}---\n{}", broken, BOUND_WORKLOAD)
        );
    }

    #[test]
    fn test_file_with_parse_errors_is_not_rewritten() {
        let content = format!("{}---\nkind: [unclosed\n", WORKLOAD);
        let fixture = Fixture::new(&[("web.yaml", content.as_str()), ("config.yaml", CONFIG)]);

        let execution = fixture.run(OutputMode::Overwrite);

        let report = &execution.report;
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("document 3"));
        assert!(report.warnings.iter().any(|w| w.contains("not rewritten")));
        assert_eq!(report.processed_files, 0);
        assert_eq!(report.successful_updates, 0);
        assert_eq!(read(fixture.input().join("web.yaml")), content);
    }

    #[test]
    fn test_non_utf8_file_is_reported_and_skipped() {
        let fixture = Fixture::new(&[("web.yaml", WORKLOAD), ("config.yaml", CONFIG)]);
        let latin1 = b"kind: ConfigMap\nname: caf\xe9\n";
        fs::write(fixture.input().join("a-latin1.yaml"), latin1).unwrap();

        let execution = fixture.run(OutputMode::Safe);

        let report = &execution.report;
        assert_eq!(report.total_files, 3);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("a-latin1.yaml"));
        assert!(report.errors[0].contains("not valid UTF-8"));
        assert_eq!(report.processed_files, 1);
        assert_eq!(read(fixture.output().join("web.yaml")), BOUND_WORKLOAD);
        assert!(!fixture.output().join("a-latin1.yaml").exists());
    }

    #[test]
    fn test_numeric_data_keys_round_trip() {
        let tcp_services = r#"apiVersion: v1
kind: ConfigMap
metadata:
  name: tcp-services
data:
  9000: default/svc:8080
"#;
        let content = format!("{}---\n{}", tcp_services, WORKLOAD);
        let fixture = Fixture::new(&[("web.yaml", content.as_str()), ("config.yaml", CONFIG)]);

        let execution = fixture.run(OutputMode::Safe);

        assert!(execution.report.errors.is_empty(), "{:?}", execution.report.errors);
        assert_eq!(execution.report.successful_updates, 1);
        assert_eq!(
            execution
                .index
                .value(SourceKind::ConfigMap, "default", "tcp-services", "9000"),
            Some("default/svc:8080")
        );
        assert_eq!(
            read(fixture.output().join("web.yaml")),
            format!("{}---\n{}", tcp_services, BOUND_WORKLOAD)
        );
    }

    #[test]
    fn test_config_in_broken_file_is_still_indexed() {
        let config = format!("{}---\n: : :\n  - [\n", CONFIG);
        let fixture = Fixture::new(&[("config.yaml", config.as_str()), ("web.yaml", WORKLOAD)]);

        let execution = fixture.run(OutputMode::Safe);

        assert_eq!(execution.report.errors.len(), 1);
        assert_eq!(execution.report.successful_updates, 1);
        assert_eq!(read(fixture.output().join("web.yaml")), BOUND_WORKLOAD);
    }

    #[test]
    fn test_kubernetes_key_order() {
        let reordered = WORKLOAD.replacen(
            "apiVersion: apps/v1\nkind: Deployment\n",
            "kind: Deployment\napiVersion: apps/v1\n",
            1,
        );
        let fixture = Fixture::new(&[("web.yaml", reordered.as_str()), ("config.yaml", CONFIG)]);
        let options = fixture
            .options(OutputMode::Safe)
            .with_key_order(KeyOrder::Kubernetes);

        let execution = Processor::new(options).execute().unwrap();

        assert_eq!(execution.report.processed_files, 1);
        assert_eq!(read(fixture.output().join("web.yaml")), BOUND_WORKLOAD);
    }

    #[test]
    fn test_missing_input_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let options = ProcessOptions::new(dir.path().join("missing"));

        let err = Processor::new(options).execute().unwrap_err();

        assert!(matches!(err, ProcessError::InputNotFound(_)));
    }
}
