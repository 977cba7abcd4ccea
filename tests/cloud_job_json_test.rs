//! Cloud Job JSON Tests
//!
//! End-to-end decode/encode behavior of cloud job configurations through the
//! registry-backed JSON entry points.

use cloud_job_codec::cloud::json;
use cloud_job_codec::models::{
    CloudJobConfiguration, JobCoreConfiguration, JobExecutionType, JobProperties,
    JobTypeConfiguration,
};
use cloud_job_codec::{CodecConfig, CodecError, CodecRegistry};
use serde_json::{json, Value};

fn registry() -> CodecRegistry {
    let registry = CodecRegistry::default();
    json::register(&registry).expect("cloud codec registers once");
    registry
}

fn base_input() -> Value {
    json!({
        "jobName": "test_job",
        "jobClass": "com.example.TestJob",
        "jobType": "SIMPLE",
        "cron": "0/30 * * * * ?",
        "shardingTotalCount": 10,
        "cpuCount": 1.0,
        "memoryMB": 128,
        "appURL": "http://x/app.jar",
        "bootstrapScript": "start.sh",
        "jobExecutionType": "TRANSIENT"
    })
}

fn decode(input: &Value) -> Result<CloudJobConfiguration, CodecError> {
    json::from_json(&registry(), &input.to_string())
}

#[test]
fn decodes_plain_execution_variant() {
    let config = decode(&base_input()).unwrap();

    assert_eq!(config.job_name(), "test_job");
    assert_eq!(config.cpu_count(), 1.0);
    assert_eq!(config.memory_mb(), 128.0);
    assert_eq!(config.app_url(), "http://x/app.jar");
    assert_eq!(config.bootstrap_script(), "start.sh");
    assert_eq!(config.job_execution_type(), JobExecutionType::Transient);
    assert!(config.bean_name().is_none());
    assert!(config.application_context().is_none());
}

#[test]
fn decodes_bean_execution_variant() {
    let mut input = base_input();
    input["beanName"] = json!("b1");
    input["applicationContext"] = json!("ctx1");

    let config = decode(&input).unwrap();
    assert_eq!(config.bean_name(), Some("b1"));
    assert_eq!(config.application_context(), Some("ctx1"));

    // Base fields are identical to the plain variant
    let plain = decode(&base_input()).unwrap();
    assert_eq!(config.type_config(), plain.type_config());
    assert_eq!(config.cpu_count(), plain.cpu_count());
    assert_eq!(config.app_url(), plain.app_url());
}

#[test]
fn single_bean_field_falls_back_to_plain_execution() {
    for field in ["beanName", "applicationContext"] {
        let mut input = base_input();
        input[field] = json!("only_one");
        let config = decode(&input).unwrap();
        assert!(config.bean().is_none(), "{field} alone must not select bean execution");
    }
}

#[test]
fn cpu_count_boundary() {
    let mut input = base_input();
    input["cpuCount"] = json!(0.01);
    assert_eq!(decode(&input).unwrap().cpu_count(), 0.01);

    input["cpuCount"] = json!(0.0099);
    let err = decode(&input).unwrap_err();
    assert!(matches!(
        err,
        CodecError::InvalidFieldValue { ref field, .. } if field == "cpuCount"
    ));
    assert_eq!(err.to_string(), "cpuCount cannot be less than 0.01");
}

#[test]
fn memory_boundary() {
    let mut input = base_input();
    input["memoryMB"] = json!(16);
    assert_eq!(decode(&input).unwrap().memory_mb(), 16.0);

    input["memoryMB"] = json!(15.999);
    let err = decode(&input).unwrap_err();
    assert!(matches!(
        err,
        CodecError::InvalidFieldValue { ref field, .. } if field == "memoryMB"
    ));
    assert_eq!(err.to_string(), "memory cannot be less than 16");
}

#[test]
fn omitting_required_field_names_it() {
    let cases = [
        ("cpuCount", "cpuCount cannot be null."),
        ("memoryMB", "memoryMB cannot be null."),
        ("appURL", "appURL cannot be null."),
        ("bootstrapScript", "bootstrapScript cannot be null."),
        ("jobExecutionType", "jobExecutionType cannot be null."),
    ];

    for (field, message) in cases {
        let mut input = base_input();
        input.as_object_mut().unwrap().remove(field);

        let err = decode(&input).unwrap_err();
        assert!(
            matches!(err, CodecError::MissingRequiredField { field: ref f, .. } if f == field),
            "expected missing {field}, got {err:?}"
        );
        assert_eq!(err.to_string(), message);
    }
}

#[test]
fn null_required_field_counts_as_missing() {
    let mut input = base_input();
    input["appURL"] = Value::Null;
    let err = decode(&input).unwrap_err();
    assert_eq!(err.field(), Some("appURL"));
    assert!(matches!(err, CodecError::MissingRequiredField { .. }));
}

#[test]
fn unknown_fields_are_ignored() {
    let mut input = base_input();
    input["futureField"] = json!("anything");
    input["futureObject"] = json!({"nested": [1, 2, {"deep": true}]});
    input["futureList"] = json!([null, 1.5, "x"]);

    let config = decode(&input).unwrap();
    assert_eq!(config, decode(&base_input()).unwrap());
}

#[test]
fn unknown_execution_type_is_rejected() {
    let mut input = base_input();
    input["jobExecutionType"] = json!("NOT_A_TAG");

    let err = decode(&input).unwrap_err();
    assert!(matches!(
        err,
        CodecError::InvalidFieldValue { ref field, ref value, .. }
            if field == "jobExecutionType" && value == "NOT_A_TAG"
    ));
}

#[test]
fn field_order_is_irrelevant_on_decode() {
    let reordered = r#"{
        "jobExecutionType": "DAEMON",
        "bootstrapScript": "start.sh",
        "memoryMB": 256.5,
        "shardingTotalCount": 2,
        "cpuCount": 0.5,
        "cron": "0 0 * * * ?",
        "appURL": "http://x/app.jar",
        "jobType": "SIMPLE",
        "jobClass": "com.example.TestJob",
        "jobName": "reordered"
    }"#;

    let config = json::from_json(&registry(), reordered).unwrap();
    assert_eq!(config.job_name(), "reordered");
    assert_eq!(config.memory_mb(), 256.5);
    assert_eq!(config.job_execution_type(), JobExecutionType::Daemon);
}

#[test]
fn malformed_input_is_reported() {
    let registry = registry();
    for input in [
        "",
        "{",
        "not json",
        r#"{"cpuCount": }"#,
        "42",
        r#"{"cpuCount":true}"#,
        r#"{"cpuCount":"one"}"#,
    ] {
        let err = json::from_json(&registry, input).unwrap_err();
        assert!(
            matches!(err, CodecError::MalformedInput(_)),
            "expected malformed input for {input:?}, got {err:?}"
        );
    }
}

#[test]
fn quoted_numbers_and_bare_number_text_decode() {
    let mut input = base_input();
    input["cpuCount"] = json!("1.0");
    input["memoryMB"] = json!("128");
    input["shardingTotalCount"] = json!("10");
    input["appURL"] = json!(123);

    let config = decode(&input).unwrap();
    assert_eq!(config.cpu_count(), 1.0);
    assert_eq!(config.memory_mb(), 128.0);
    assert_eq!(config.type_config().core().sharding_total_count, 10);
    assert_eq!(config.app_url(), "123");
}

#[test]
fn encoding_infinite_memory_fails() {
    let config = CloudJobConfiguration::new(
        JobTypeConfiguration::Simple {
            core: JobCoreConfiguration::new("test_job", "0/30 * * * * ?", 10),
            job_class: "com.example.TestJob".to_string(),
        },
        1.0,
        f64::INFINITY,
        "http://x/app.jar",
        "start.sh",
        JobExecutionType::Transient,
    );
    let err = json::to_json(&registry(), &config).unwrap_err();
    assert!(matches!(err, CodecError::Serialization(_)), "got {err:?}");
}

#[test]
fn encode_writes_extension_fields_after_common_fields() {
    let config = decode(&base_input()).unwrap();
    let text = json::to_json(&registry(), &config).unwrap();

    let expected_order = [
        "\"jobName\"",
        "\"jobType\"",
        "\"jobProperties\"",
        "\"cpuCount\"",
        "\"memoryMB\"",
        "\"appURL\"",
        "\"bootstrapScript\"",
        "\"jobExecutionType\"",
        "\"beanName\"",
        "\"applicationContext\"",
    ];
    let positions: Vec<usize> = expected_order
        .iter()
        .map(|name| text.find(name).unwrap_or_else(|| panic!("{name} missing in {text}")))
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]), "{text}");

    // Plain execution still emits both bean slots
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["beanName"], Value::Null);
    assert_eq!(value["applicationContext"], Value::Null);
    assert_eq!(value["jobExecutionType"], json!("TRANSIENT"));
}

#[test]
fn round_trip_preserves_every_field() {
    let core = JobCoreConfiguration::new("script_job", "0 0/5 * * * ?", 4)
        .with_sharding_item_parameters("0=a,1=b,2=c,3=d")
        .with_job_parameter("mode=full")
        .with_failover(true)
        .with_misfire(false)
        .with_description("nightly export")
        .with_job_properties(JobProperties {
            job_exception_handler: Some("LoggingHandler".to_string()),
            executor_service_handler: Some("PooledExecutor".to_string()),
        });
    let config = CloudJobConfiguration::with_bean(
        JobTypeConfiguration::Script {
            core,
            script_command_line: "/opt/export.sh --all".to_string(),
        },
        2.5,
        1024.0,
        "http://repo/export.tar.gz",
        "bin/start.sh",
        JobExecutionType::Daemon,
        "exportJob",
        "classpath:export.xml",
    );

    let registry = registry();
    let text = json::to_json(&registry, &config).unwrap();
    assert_eq!(json::from_json(&registry, &text).unwrap(), config);
}

#[test]
fn pretty_printed_registry_round_trips() {
    let registry = json::init_registry(CodecConfig::default().with_pretty_print(true)).unwrap();
    let config = decode(&base_input()).unwrap();

    let text = json::to_json(&registry, &config).unwrap();
    assert!(text.contains("\n  \"cpuCount\""));
    assert_eq!(json::from_json(&registry, &text).unwrap(), config);
}

#[test]
fn oversized_input_is_rejected_before_parsing() {
    let registry = json::init_registry(CodecConfig::default().with_max_input_bytes(64)).unwrap();
    let err = json::from_json(&registry, &base_input().to_string()).unwrap_err();
    assert!(matches!(err, CodecError::InputTooLarge { max: 64, .. }));
}
