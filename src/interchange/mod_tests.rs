//! Tests for interchange serialization and the round-trip law.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::options::OptionsInstance;
use crate::resolve::Resolver;
use crate::schema::{ComposedSchema, OptionDecl, OptionGroup};
use crate::source::ArgsSource;

use super::{InterchangeError, from_external, from_json_str, to_external, to_json_string};

/// Helper building a schema with visible and hidden fields.
fn schema() -> Arc<ComposedSchema> {
    let mut group = OptionGroup::new("test");
    group
        .declare(OptionDecl::string("pipeline_version", "Version string"))
        .unwrap();
    group
        .declare(OptionDecl::boolean("blocking", "Block on completion").with_default(false))
        .unwrap();
    group
        .declare(
            OptionDecl::enumeration("level", "Check level", ["OFF", "WARNING", "ERROR"])
                .with_default("WARNING"),
        )
        .unwrap();
    group
        .declare(OptionDecl::list("zstd_dictionary", "Dictionary mappings").delimited_by('|'))
        .unwrap();
    group
        .declare(OptionDecl::string("options_file", "Options file path").hidden())
        .unwrap();
    group.compose().unwrap()
}

mod output {
    use super::*;

    #[test]
    fn emits_visible_set_fields_with_native_types() {
        let mut instance = OptionsInstance::empty(schema());
        instance.set_str("pipeline_version", "0.14.0").unwrap();
        instance.set_bool("blocking", true).unwrap();
        instance
            .set_list("zstd_dictionary", vec!["a:f1".to_string(), "b:f2".to_string()])
            .unwrap();

        let document = to_external(&instance);

        assert_eq!(document["pipeline_version"], json!("0.14.0"));
        assert_eq!(document["blocking"], json!(true));
        assert_eq!(document["zstd_dictionary"], json!(["a:f1", "b:f2"]));
    }

    #[test]
    fn defaulted_fields_are_emitted() {
        let instance = OptionsInstance::empty(schema());

        let document = to_external(&instance);

        assert_eq!(document["level"], json!("WARNING"));
        assert_eq!(document["blocking"], json!(false));
    }

    #[test]
    fn unset_undefaulted_fields_are_omitted() {
        let instance = OptionsInstance::empty(schema());

        let document = to_external(&instance);

        assert!(!document.contains_key("pipeline_version"));
        assert!(!document.contains_key("zstd_dictionary"));
    }

    #[test]
    fn hidden_fields_never_appear_even_when_set() {
        let mut instance = OptionsInstance::empty(schema());
        instance.set_str("options_file", "/tmp/options.txt").unwrap();

        let document = to_external(&instance);

        assert!(!document.contains_key("options_file"));
    }
}

mod input {
    use super::*;

    #[test]
    fn parses_native_representations() {
        let document = json!({
            "pipeline_version": "0.14.0",
            "blocking": true,
            "level": "ERROR",
            "zstd_dictionary": ["a:f1", "b:f2"],
        });

        let instance = from_external(document.as_object().unwrap(), &schema()).unwrap();

        assert_eq!(instance.get_str("pipeline_version"), "0.14.0");
        assert!(instance.get_bool("blocking"));
        assert_eq!(instance.get_enum("level"), "ERROR");
        assert_eq!(instance.get_list("zstd_dictionary").len(), 2);
    }

    #[test]
    fn hidden_keys_are_ignored_not_errors() {
        let document = json!({ "options_file": "/tmp/leaked.txt" });

        let instance = from_external(document.as_object().unwrap(), &schema()).unwrap();

        assert!(!instance.is_set("options_file"));
        assert_eq!(instance.get_str("options_file"), "");
    }

    #[test]
    fn unknown_keys_become_passthrough_extras() {
        let document = json!({ "runner_flag": "native" });

        let instance = from_external(document.as_object().unwrap(), &schema()).unwrap();

        assert_eq!(
            instance.extras().get("runner_flag").map(|v| v.last()),
            Some("native")
        );
    }

    #[test]
    fn type_and_domain_failures_are_batched() {
        let document = json!({
            "blocking": 7,
            "level": "MAYBE",
        });

        let result = from_external(document.as_object().unwrap(), &schema());

        let Err(InterchangeError::Invalid(batch)) = result else {
            panic!("expected batched failure");
        };
        assert_eq!(batch.issues.len(), 2);
    }

    #[test]
    fn delimited_string_accepted_for_lists() {
        let document = json!({ "zstd_dictionary": "a:f1|b:f2" });

        let instance = from_external(document.as_object().unwrap(), &schema()).unwrap();

        assert_eq!(instance.get_list("zstd_dictionary"), ["a:f1", "b:f2"]);
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let result = from_json_str("{not json", &schema());

        assert!(matches!(result, Err(InterchangeError::Json(_))));
    }

    #[test]
    fn non_object_top_level_rejected() {
        let result = from_json_str("[1, 2, 3]", &schema());

        assert!(matches!(result, Err(InterchangeError::NotAnObject)));
    }
}

mod round_trip {
    use super::*;

    #[test]
    fn visible_fields_survive_exactly() {
        let args = ArgsSource::new([
            "--pipeline_version=0.14.0",
            "--blocking=true",
            "--level=ERROR",
            "--zstd_dictionary=a.Foo:gs://bucket/f1|b.Bar:gs://bucket/f2",
        ]);
        let original = Resolver::new().resolve(&schema(), &[&args]).unwrap();

        let document = to_external(&original);
        let reparsed = from_external(&document, &schema()).unwrap();

        for decl in schema().declarations().iter().filter(|d| d.visible) {
            assert_eq!(
                original.effective(&decl.name),
                reparsed.effective(&decl.name),
                "field {} did not survive the round trip",
                decl.name
            );
        }
    }

    #[test]
    fn hidden_fields_are_lost() {
        let args = ArgsSource::new(["--options_file=/tmp/options.txt", "--blocking=true"]);
        // no options-file key configured: the path is just a value here
        let original = Resolver::new().resolve(&schema(), &[&args]).unwrap();
        assert!(original.is_set("options_file"));

        let reparsed = from_external(&to_external(&original), &schema()).unwrap();

        assert!(!reparsed.is_set("options_file"));
        assert!(reparsed.get_bool("blocking"));
    }

    #[test]
    fn document_renders_as_stable_json() {
        let mut instance = OptionsInstance::empty(schema());
        instance.set_bool("blocking", true).unwrap();

        let rendered = to_json_string(&instance).unwrap();
        let value: Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["blocking"], json!(true));
    }
}
