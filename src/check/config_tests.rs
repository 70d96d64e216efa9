//! Unit tests for check configuration loading.

use rstest::*;

use super::*;

const FULL_YAML: &str = r##"
disableSchemaValidation: false
enableMismatchesOnUI: true
interactive: true
maxErrorsToShow: 5
titlePath:
  - users API
  - returns a valid user
issuesStyles:
  iconPropertyError: "🟦"
  colorPropertyError: "#5178eb"
  iconPropertyMissing: "🟪"
  colorPropertyMissing: "#800080"
"##;

#[fixture]
fn full_config() -> CheckConfig {
    load_check_config(FULL_YAML).expect("full config should load")
}

#[rstest]
fn empty_document_yields_defaults() {
    let config = load_check_config("  \n").expect("empty config should load");
    assert_eq!(config, CheckConfig::default());
    assert_eq!(config.max_errors_to_show, 10);
    assert!(!config.annotates_view());
}

#[rstest]
fn full_document_populates_every_field(full_config: CheckConfig) {
    assert!(full_config.annotates_view());
    assert_eq!(full_config.max_errors_to_show, 5);
    assert_eq!(
        full_config.title_path,
        vec!["users API".to_owned(), "returns a valid user".to_owned()]
    );

    let style = full_config.issue_style();
    assert_eq!(style.icon_property_error, "🟦");
    assert_eq!(style.color_property_error, "#5178eb");
    assert_eq!(style.icon_property_missing, "🟪");
    assert_eq!(style.color_property_missing, "#800080");
}

#[rstest]
fn snake_case_aliases_are_accepted() {
    let yaml = r"
disable_schema_validation: true
enable_mismatches_on_ui: true
max_errors_to_show: 3
";
    let config = load_check_config(yaml).expect("aliases should load");
    assert!(config.disable_schema_validation);
    assert!(config.enable_mismatches_on_ui);
    assert!(!config.annotates_view());
    assert_eq!(config.max_errors_to_show, 3);
}

#[rstest]
fn partial_styles_fall_back_to_defaults() {
    let yaml = r"
issuesStyles:
  iconPropertyMissing: '❓'
";
    let style = load_check_config(yaml)
        .expect("partial styles should load")
        .issue_style();
    assert_eq!(style.icon_property_missing, "❓");
    assert_eq!(style.icon_property_error, "⚠️");
    assert_eq!(style.color_property_missing, "#c10000");
}

#[rstest]
fn unknown_key_is_rejected_with_parse_diagnostic() {
    let yaml = "interactive: true\nenableMismatches: true\n";
    let result = load_check_config_with_source("cypress.env.yaml", yaml);

    let Err(error) = result else {
        panic!("unknown key should fail");
    };
    assert!(error.to_string().contains("unknown field"));
    let Some(diagnostic) = error.diagnostic() else {
        panic!("diagnostic should be present");
    };
    assert_eq!(diagnostic.code, ConfigDiagnosticCode::ParseFailure);
    assert_eq!(diagnostic.location.source, "cypress.env.yaml");
    assert!(diagnostic.location.line > 0);
}

#[rstest]
#[case::zero_limit("maxErrorsToShow: 0\n", "maxErrorsToShow must be a positive integer", 1)]
#[case::bad_color(
    "issuesStyles:\n  colorPropertyError: red\n",
    "colorPropertyError must be a hex color",
    2
)]
#[case::blank_icon(
    "issuesStyles:\n  colorPropertyError: '#fff'\n  iconPropertyMissing: '  '\n",
    "iconPropertyMissing must be non-empty",
    3
)]
fn constraint_violations_are_located(
    #[case] yaml: &str,
    #[case] expected_fragment: &str,
    #[case] expected_line: usize,
) {
    let result = load_check_config_with_source("config.yaml", yaml);

    let Err(error) = result else {
        panic!("expected {yaml:?} to fail validation");
    };
    let message = error.to_string();
    assert!(
        message.contains(expected_fragment),
        "expected '{expected_fragment}', got: {message}"
    );
    let Some(diagnostic) = error.diagnostic() else {
        panic!("diagnostic should be present");
    };
    assert_eq!(diagnostic.code, ConfigDiagnosticCode::ValidationFailure);
    assert_eq!(diagnostic.location.line, expected_line);
    assert!(
        diagnostic
            .render()
            .starts_with(&format!("config.validation_failure | config.yaml:{expected_line}:"))
    );
}

#[rstest]
#[case::short("#fff", true)]
#[case::long("#c10000", true)]
#[case::alpha("#c10000ff", true)]
#[case::no_hash("c10000", false)]
#[case::bad_digit("#c1000g", false)]
#[case::wrong_length("#c100", false)]
fn hex_colors_are_recognised(#[case] color: &str, #[case] expected: bool) {
    assert_eq!(is_hex_color(color), expected);
}

#[rstest]
fn non_interactive_sessions_never_annotate() {
    let config = CheckConfig {
        enable_mismatches_on_ui: true,
        ..CheckConfig::default()
    };
    assert!(!config.annotates_view());
}
