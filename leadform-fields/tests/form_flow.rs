//! End-to-end tests: schema on disk, form session, submission and display.

use std::sync::Mutex;

use async_trait::async_trait;
use leadform_fields::{
    display_rows, format_value, lead_defaults, DataType, FailureKind, FieldDef, FormState,
    RawValue, Record, RecordSubmitter, Result, SchemaContext, SubmitOutcome, YamlFileSubmitter,
};
use tempfile::TempDir;

#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<Record>>,
}

#[async_trait]
impl RecordSubmitter for Recorder {
    async fn submit(&self, record: &Record) -> Result<()> {
        self.calls.lock().unwrap().push(record.clone());
        Ok(())
    }
}

#[tokio::test]
async fn name_and_age_scenario() {
    let fields = vec![
        FieldDef::new("name", "Name", DataType::Text).required(),
        FieldDef::new("age", "Age", DataType::Number).min("0"),
    ];
    let recorder = Recorder::default();
    let mut form = FormState::new(
        fields,
        Some(Record::new().with("name", "").with("age", "-5")),
    );

    let outcome = form.submit(&recorder).await.unwrap();
    match outcome {
        SubmitOutcome::Rejected(failures) => {
            assert_eq!(failures.len(), 2);
            assert_eq!(failures[0].field, "name");
            assert_eq!(failures[0].kind, FailureKind::RequiredFieldMissing);
            assert_eq!(failures[1].field, "age");
            assert_eq!(failures[1].kind, FailureKind::NumberOutOfRange);
        }
        SubmitOutcome::Submitted => panic!("invalid record was submitted"),
    }
    assert!(recorder.calls.lock().unwrap().is_empty());

    form.change_value("name", "Ann");
    form.change_value("age", "30");
    assert!(!form.has_errors());

    let outcome = form.submit(&recorder).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Submitted);
    let calls = recorder.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], Record::new().with("name", "Ann").with("age", "30"));
}

#[tokio::test]
async fn lead_schema_round_trip_through_disk() {
    let tmp = TempDir::new().unwrap();
    let schema_dir = tmp.path().join("lead");
    let ctx = SchemaContext::open(&schema_dir)
        .with_defaults(lead_defaults())
        .build()
        .await
        .unwrap();

    let mut form = ctx.new_form(None);
    assert_eq!(form.value("lead_status"), &RawValue::from("NEW"));

    form.change_value("company_name", "Acme Freight");
    form.change_value("country", "SG");
    form.change_value("primary_contact_name", "Ann Lee");
    form.change_value("email", "ann@acme");
    assert_eq!(form.blur("email"), Some("Invalid email format"));
    form.change_value("email", "ann@acme.sg");
    assert_eq!(form.blur("email"), None);
    form.change_value(
        "service_line_interested",
        vec!["FREIGHT_FORWARDING", "3PL"],
    );
    form.change_value("estimated_monthly_volume", 1250.5);
    form.change_value("expected_start_date", "2025-03-01");

    let out = tmp.path().join("lead-001.yaml");
    let outcome = form.submit(&YamlFileSubmitter::new(&out)).await.unwrap();
    assert!(outcome.is_submitted(), "{outcome:?}");

    let saved: Record =
        serde_yaml_ng::from_str(&tokio::fs::read_to_string(&out).await.unwrap()).unwrap();
    assert_eq!(&saved, form.record());

    let rows = display_rows(ctx.all_fields(), &saved, ctx.registry());
    let shown = |key: &str| {
        rows.iter()
            .find(|r| r.key == key)
            .and_then(|r| r.value.clone())
    };
    assert_eq!(shown("country").as_deref(), Some("Singapore"));
    assert_eq!(shown("lead_status").as_deref(), Some("New"));
    assert_eq!(
        shown("service_line_interested").as_deref(),
        Some("Freight Forwarding, 3PL")
    );
    assert_eq!(shown("estimated_monthly_volume").as_deref(), Some("1250.50"));
    assert_eq!(shown("expected_start_date").as_deref(), Some("Mar 1, 2025"));
    assert_eq!(shown("notes"), None);
}

#[tokio::test]
async fn missing_required_lead_fields_block_submit() {
    let tmp = TempDir::new().unwrap();
    let ctx = SchemaContext::open(tmp.path())
        .with_defaults(lead_defaults())
        .build()
        .await
        .unwrap();

    let recorder = Recorder::default();
    let mut form = ctx.new_form(None);
    form.change_value("service_line_interested", Vec::<String>::new());
    let SubmitOutcome::Rejected(failures) = form.submit(&recorder).await.unwrap() else {
        panic!("expected rejection");
    };
    let keys: Vec<_> = failures.iter().map(|f| f.field.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "company_name",
            "country",
            "primary_contact_name",
            "email",
            "service_line_interested",
        ]
    );
    assert!(failures
        .iter()
        .all(|f| f.kind == FailureKind::RequiredFieldMissing));
    for key in keys {
        assert!(form.visible_error(key).is_some());
    }
    assert!(recorder.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn user_field_resolves_once_reps_are_registered() {
    let tmp = TempDir::new().unwrap();
    let mut ctx = SchemaContext::open(tmp.path())
        .with_defaults(lead_defaults())
        .build()
        .await
        .unwrap();

    let rep = ctx.field("assigned_sales_rep").unwrap().clone();
    let value = RawValue::from("u-42");
    assert_eq!(format_value(&rep, &value, ctx.registry()), "u-42");

    ctx.write_lov(
        "SALES_REP_LOV",
        vec![leadform_fields::LovOption::new("u-42", "Dana Cruz")],
    )
    .await
    .unwrap();
    assert_eq!(format_value(&rep, &value, ctx.registry()), "Dana Cruz");
}
