use std::collections::BTreeMap;

use compliance_normalizer::{normalize, ExceptionSpec, Matcher};
use compliance_schema::{NonCompliantEntry, ProfileReport, Section};
use proptest::prelude::*;
use proptest::test_runner::Config;
use serde_json::json;

fn identifier() -> impl Strategy<Value = String> {
    "(Class|Cron|File)\\[[A-Za-z]{1,6}\\](::[a-z_]{1,8})?"
}

fn non_compliant_section() -> impl Strategy<Value = BTreeMap<String, NonCompliantEntry>> {
    prop::collection::btree_map(
        "Class\\[[A-Z][a-z]{0,4}\\]",
        prop::collection::btree_map("[a-z]{1,4}", any::<i64>(), 0..5).prop_map(|params| {
            NonCompliantEntry::with_parameters(params.into_iter().map(|(k, v)| (k, json!(v))))
        }),
        0..6,
    )
}

fn exemptions() -> impl Strategy<Value = BTreeMap<String, Vec<String>>> {
    prop::collection::btree_map(
        "Class\\[[A-Z][a-z]{0,4}\\]",
        prop::collection::vec("[a-z]{1,4}", 0..6),
        0..6,
    )
}

fn spec_from(exemptions: BTreeMap<String, Vec<String>>) -> ExceptionSpec {
    exemptions
        .into_iter()
        .fold(ExceptionSpec::builder(), |builder, (resource, params)| {
            builder.exempt(resource, params)
        })
        .build()
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn empty_exceptions_leave_list_sections_unchanged(
        params in prop::collection::vec(identifier(), 0..12),
        resources in prop::collection::vec(identifier(), 0..12),
    ) {
        let report = ProfileReport::new(90.0)
            .with_documented_missing_parameters(params.clone())
            .with_documented_missing_resources(resources.clone());
        let spec = ExceptionSpec::empty();

        let normalized = normalize(&report, Section::DocumentedMissingParameters, &spec);
        prop_assert_eq!(normalized.documented_missing_parameters, Some(params));

        let normalized = normalize(&report, Section::DocumentedMissingResources, &spec);
        prop_assert_eq!(normalized.documented_missing_resources, Some(resources));
    }

    #[test]
    fn exemptions_never_leave_an_emptied_resource(
        section in non_compliant_section(),
        exempt in exemptions(),
    ) {
        let report = ProfileReport::new(50.0).with_non_compliant(section.clone());
        let normalized = normalize(&report, Section::NonCompliant, &spec_from(exempt));

        let entries = normalized.non_compliant.expect("section present");
        for (resource, entry) in &entries {
            let input = section.get(resource);
            prop_assert!(input.is_some(), "{} appeared from nowhere", resource);
            // Only entries reported without parameters may come back empty,
            // and those come back exactly as reported.
            if entry.parameters.is_empty() {
                prop_assert_eq!(Some(entry), input);
            }
        }
    }

    #[test]
    fn resources_losing_every_parameter_are_removed(
        section in non_compliant_section(),
        exempt in exemptions(),
    ) {
        let report = ProfileReport::new(50.0).with_non_compliant(section.clone());
        let normalized = normalize(&report, Section::NonCompliant, &spec_from(exempt.clone()));
        let entries = normalized.non_compliant.expect("section present");

        for (resource, entry) in &section {
            let fully_exempted = !entry.parameters.is_empty()
                && exempt.get(resource).map_or(false, |names| {
                    entry.parameters.keys().all(|name| names.contains(name))
                });
            prop_assert_eq!(entries.contains_key(resource), !fully_exempted);
        }
    }

    #[test]
    fn input_report_is_never_modified(
        section in non_compliant_section(),
        exempt in exemptions(),
        items in prop::collection::vec(identifier(), 0..12),
        prefix in "(Class|Cron|File)",
    ) {
        let report = ProfileReport::new(75.0)
            .with_documented_missing_parameters(items)
            .with_non_compliant(section);
        let before = report.clone();

        let mut spec = ExceptionSpec::builder();
        for (resource, params) in exempt {
            spec = spec.exempt(resource, params);
        }
        let spec = spec
            .matcher(Section::DocumentedMissingParameters, Matcher::pattern(&format!("^{}", prefix)).expect("pattern"))
            .expect("list section")
            .build();

        for section in Section::ALL {
            let _ = normalize(&report, section, &spec);
        }
        prop_assert_eq!(report, before);
    }

    #[test]
    fn survivors_keep_relative_order(
        items in prop::collection::vec(identifier(), 0..16),
        prefix in "(Class|Cron|File)",
    ) {
        let report = ProfileReport::new(10.0).with_documented_missing_resources(items.clone());
        let spec = ExceptionSpec::builder()
            .pattern(Section::DocumentedMissingResources, &format!("^{}", prefix))
            .expect("pattern")
            .build();

        let normalized = normalize(&report, Section::DocumentedMissingResources, &spec);
        let expected: Vec<String> = items.into_iter().filter(|i| !i.starts_with(&prefix)).collect();
        prop_assert_eq!(normalized.documented_missing_resources, Some(expected));
    }
}
