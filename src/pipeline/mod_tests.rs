//! Tests for the pipeline option set.

use std::io::Write;

use tempfile::NamedTempFile;

use crate::interchange::to_external;
use crate::resolve::ResolveError;

use super::{CheckLevel, PipelineError, PipelineOptions, names, pipeline_schema, runner_group};

mod schema {
    use super::*;

    #[test]
    fn composes_base_codec_and_runner_options() {
        let schema = pipeline_schema().unwrap();

        assert!(schema.declaration(names::JOB_NAME).is_some());
        assert!(schema.declaration(names::CODEC_BUFFER_SIZE).is_some());
        assert!(schema.declaration(names::BLOCKING).is_some());
        assert!(schema.declaration(names::ZSTD_DICTIONARY).is_some());
    }

    #[test]
    fn options_file_is_hidden() {
        let schema = pipeline_schema().unwrap();

        assert!(!schema.declaration(names::OPTIONS_FILE).unwrap().visible);
    }

    #[test]
    fn group_composes_idempotently() {
        let group = runner_group().unwrap();

        let first = group.compose().unwrap();
        let second = group.compose().unwrap();

        assert_eq!(first.len(), second.len());
    }
}

mod defaults {
    use super::*;

    #[test]
    fn no_input_yields_documented_defaults() {
        let options = PipelineOptions::from_args(Vec::<String>::new()).unwrap();

        assert_eq!(options.chained_joins(), CheckLevel::Warning);
        assert!(!options.is_blocking());
        assert!(!options.nullable_encoding());
        assert!(!options.codec_reference_tracking());
        assert_eq!(options.job_name(), "");
        assert!(options.zstd_dictionary().is_empty());
    }
}

mod from_args {
    use super::*;

    #[test]
    fn typed_accessors_reflect_arguments() {
        let options = PipelineOptions::from_args([
            "--job_name=nightly-aggregation",
            "--runner=cluster",
            "--blocking=true",
            "--block_for=1h30m",
            "--chained_joins=ERROR",
            "--zstd_dictionary=a.Foo:gs://bucket/f1|b.Bar:gs://bucket/f2",
        ])
        .unwrap();

        assert_eq!(options.job_name(), "nightly-aggregation");
        assert_eq!(options.runner(), "cluster");
        assert!(options.is_blocking());
        assert_eq!(options.block_for(), "1h30m");
        assert_eq!(options.chained_joins(), CheckLevel::Error);
        assert_eq!(options.zstd_dictionary().len(), 2);
    }

    #[test]
    fn unknown_check_level_is_a_hard_error() {
        let result = PipelineOptions::from_args(["--chained_joins=MAYBE"]);

        assert!(matches!(
            result,
            Err(PipelineError::Resolve(ResolveError::Invalid(_)))
        ));
    }

    #[test]
    fn options_file_indirection_applies() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"--runner=cluster\n--blocking=true\n").unwrap();

        let options = PipelineOptions::from_args([
            format!("--options_file={}", file.path().display()),
            "--runner=local".to_string(),
        ])
        .unwrap();

        assert_eq!(options.runner(), "local");
        assert!(options.is_blocking());
        assert!(!options.options_file().is_empty());
    }

    #[test]
    fn missing_options_file_is_fatal() {
        let result = PipelineOptions::from_args(["--options_file=/nonexistent/options.txt"]);

        assert!(matches!(
            result,
            Err(PipelineError::Resolve(ResolveError::Source(_)))
        ));
    }
}

mod serialization {
    use super::*;

    #[test]
    fn options_file_never_reaches_job_metadata() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"--blocking=true\n").unwrap();

        let options = PipelineOptions::from_args([format!(
            "--options_file={}",
            file.path().display()
        )])
        .unwrap();

        let document = to_external(options.instance());

        assert!(!document.contains_key(names::OPTIONS_FILE));
        assert_eq!(document[names::BLOCKING], serde_json::json!(true));
    }
}

mod display {
    use super::*;

    #[test]
    fn summary_is_one_line() {
        let options = PipelineOptions::from_args(["--job_name=nightly", "--blocking=true"]).unwrap();
        let summary = options.to_string();

        assert!(summary.contains("job: nightly"));
        assert!(summary.contains("blocking: true"));
        assert!(!summary.contains('\n'));
    }
}

mod check_level {
    use super::*;

    #[test]
    fn domain_round_trips_through_as_str() {
        for (member, level) in [
            ("OFF", CheckLevel::Off),
            ("WARNING", CheckLevel::Warning),
            ("ERROR", CheckLevel::Error),
        ] {
            assert_eq!(level.as_str(), member);
        }
    }

    #[test]
    fn default_is_warning() {
        assert_eq!(CheckLevel::default(), CheckLevel::Warning);
    }
}
