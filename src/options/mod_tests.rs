//! Tests for the options instance accessor layer.

use std::sync::Arc;

use crate::schema::{ComposedSchema, OptionDecl, OptionGroup, OptionValue};

use super::{InstanceError, OptionsInstance};

/// Helper building a schema with one field of every kind.
fn schema() -> Arc<ComposedSchema> {
    let mut group = OptionGroup::new("test");
    group
        .declare(OptionDecl::string("app_arguments", "Application arguments"))
        .unwrap();
    group
        .declare(OptionDecl::string("runner", "Runner name").with_default("local"))
        .unwrap();
    group
        .declare(OptionDecl::boolean("blocking", "Block on completion"))
        .unwrap();
    group
        .declare(
            OptionDecl::enumeration("level", "Check level", ["OFF", "WARNING", "ERROR"])
                .with_default("WARNING"),
        )
        .unwrap();
    group
        .declare(OptionDecl::list("zstd_dictionary", "Dictionary mappings"))
        .unwrap();
    group.compose().unwrap()
}

fn instance() -> OptionsInstance {
    OptionsInstance::empty(schema())
}

mod reads {
    use super::*;

    #[test]
    fn unset_undefaulted_fields_read_as_zero_values() {
        let options = instance();

        assert_eq!(options.get_str("app_arguments"), "");
        assert!(!options.get_bool("blocking"));
        assert!(options.get_list("zstd_dictionary").is_empty());
    }

    #[test]
    fn unset_defaulted_fields_read_as_default() {
        let options = instance();

        assert_eq!(options.get_str("runner"), "local");
        assert_eq!(options.get_enum("level"), "WARNING");
    }

    #[test]
    fn set_value_shadows_default() {
        let mut options = instance();
        options.set_str("runner", "cluster").unwrap();

        assert_eq!(options.get_str("runner"), "cluster");
    }

    #[test]
    fn defaults_do_not_count_as_set() {
        let options = instance();

        assert!(!options.is_set("runner"));
        assert!(options.value("runner").is_none());
        assert_eq!(
            options.effective("runner"),
            Some(OptionValue::Str("local".to_string()))
        );
    }

    #[test]
    fn undeclared_name_reads_as_zero_value() {
        let options = instance();

        assert_eq!(options.get_str("no_such_option"), "");
        assert!(options.effective("no_such_option").is_none());
    }

    #[test]
    fn kind_mismatched_read_is_zero_value_not_error() {
        let mut options = instance();
        options.set_bool("blocking", true).unwrap();

        // blocking is boolean, so a string read falls back to the zero value
        assert_eq!(options.get_str("blocking"), "");
        assert!(options.get_bool("blocking"));
    }
}

mod writes {
    use super::*;

    #[test]
    fn typed_setters_round_trip() {
        let mut options = instance();

        options.set_bool("blocking", true).unwrap();
        options.set_enum("level", "ERROR").unwrap();
        options
            .set_list("zstd_dictionary", vec!["a:f1".to_string()])
            .unwrap();

        assert!(options.get_bool("blocking"));
        assert_eq!(options.get_enum("level"), "ERROR");
        assert_eq!(options.get_list("zstd_dictionary"), ["a:f1".to_string()]);
    }

    #[test]
    fn unknown_name_rejected() {
        let mut options = instance();

        assert!(matches!(
            options.set_str("no_such_option", "x"),
            Err(InstanceError::UnknownOption { .. })
        ));
    }

    #[test]
    fn kind_mismatch_rejected_without_partial_write() {
        let mut options = instance();

        let result = options.set_str("blocking", "yes");

        assert!(matches!(result, Err(InstanceError::TypeMismatch { .. })));
        assert!(!options.is_set("blocking"));
    }

    #[test]
    fn enum_member_outside_domain_rejected() {
        let mut options = instance();

        let result = options.set_enum("level", "MAYBE");

        assert!(matches!(
            result,
            Err(InstanceError::UnknownEnumValue { ref value, .. }) if value == "MAYBE"
        ));
        assert_eq!(options.get_enum("level"), "WARNING");
    }
}
