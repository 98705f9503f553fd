//! Statement output that existing consumers depend on. These strings must not
//! change in legacy mode.

use mango_n1ql::{
    mango_query::{IndexDefinition, IndexRequest, IndexSpec, MangoQuery},
    N1qlTranslator,
};
use serde_json::{json, Value};

fn job_selector() -> Value {
    json!({
        "jobDate": {"$gt": null},
        "compDate": null,
        "startDate": null,
        "finDate": null,
        "currentStatusIndex": "pretreatment-ready"
    })
}

fn job_query() -> MangoQuery {
    serde_json::from_value(json!({
        "bucketName": "jobs",
        "selector": job_selector(),
        "limit": 5,
        "execution_stats": true
    }))
    .expect("query should deserialize")
}

#[test]
fn test_normalise_selector() {
    let translator = N1qlTranslator::default();
    let normalized = translator.normalize_selector(&job_selector()).unwrap();

    assert_eq!(
        serde_json::to_string(&normalized).unwrap(),
        serde_json::to_string(&json!({
            "$and": [
                {"jobDate": {"$gt": null}},
                {"compDate": {"$eq": null}},
                {"startDate": {"$eq": null}},
                {"finDate": {"$eq": null}},
                {"currentStatusIndex": {"$eq": "pretreatment-ready"}}
            ]
        }))
        .unwrap()
    );
}

#[test]
fn test_index_statement_from_explicit_fields() {
    let translator = N1qlTranslator::default();
    let request: IndexRequest = serde_json::from_value(json!({
        "bucketName": "jobs",
        "index": {"fields": ["_id", "jobDate", "startDate"]}
    }))
    .unwrap();

    assert_eq!(
        translator.build_index_statement(&request).unwrap(),
        "CREATE INDEX idx__id_jobDate_startDate ON jobs (`_id`, `jobDate`, `startDate`)"
    );
}

#[test]
fn test_operand_with_date_string() {
    let translator = N1qlTranslator::default();
    let date = "2024-03-01T10:15:30.000Z";

    assert_eq!(
        translator
            .compile_operand(&json!({"jobDate": {"$eq": date}}))
            .unwrap(),
        format!("`jobDate` = '{}'", date)
    );
    assert_eq!(
        translator
            .compile_operand(&json!({"jobDate": {"$gt": date}}))
            .unwrap(),
        format!("`jobDate` > '{}'", date)
    );
}

#[test]
fn test_operand_with_null() {
    let translator = N1qlTranslator::default();
    assert_eq!(
        translator
            .compile_operand(&json!({"jobDate": {"$eq": null}}))
            .unwrap(),
        "`jobDate` IS NULL"
    );
    assert_eq!(
        translator
            .compile_operand(&json!({"jobDate": {"$ne": null}}))
            .unwrap(),
        "`jobDate` IS NOT NULL"
    );
}

#[test]
fn test_find_query() {
    let translator = N1qlTranslator::default();
    assert_eq!(
        translator.build_find_statement(&job_query()).unwrap(),
        "SELECT meta().id as _id, jobs.* FROM jobs WHERE `jobDate` IS NOT NULL AND `compDate` IS NULL \
         AND `startDate` IS NULL AND `finDate` IS NULL AND `currentStatusIndex` = 'pretreatment-ready' LIMIT 5"
    );
}

#[test]
fn test_count_query() {
    let translator = N1qlTranslator::default();
    assert_eq!(
        translator.build_count_statement(&job_query()).unwrap(),
        "SELECT COUNT(`jobDate`) AS docCount FROM jobs WHERE `jobDate` IS NOT NULL AND `compDate` IS NULL \
         AND `startDate` IS NULL AND `finDate` IS NULL AND `currentStatusIndex` = 'pretreatment-ready'"
    );
}

#[test]
fn test_selector_to_index() {
    let translator = N1qlTranslator::default();
    let spec = translator.derive_index_from_selector(&job_selector()).unwrap();

    assert_eq!(
        serde_json::to_string(&json!({"index": spec.index})).unwrap(),
        serde_json::to_string(&json!({
            "index": {"fields": ["jobDate", "compDate", "startDate", "finDate", "currentStatusIndex"]}
        }))
        .unwrap()
    );
}

#[test]
fn test_full_round() {
    let translator = N1qlTranslator::default();
    let query = job_query();

    let mut spec = translator.derive_index_from_selector(&query.selector).unwrap();
    spec.bucket_name = query.bucket_name.clone();
    let index = translator
        .build_index_statement(&IndexRequest::from(spec))
        .unwrap();
    let count = translator.build_count_statement(&query).unwrap();
    let find = translator.build_find_statement(&query).unwrap();

    assert_eq!(
        index,
        "CREATE INDEX idx_jobDate_compDate_startDate_finDate_currentStatusIndex ON jobs \
         (`jobDate`, `compDate`, `startDate`, `finDate`, `currentStatusIndex`)"
    );
    assert!(count.starts_with("SELECT COUNT(`jobDate`) AS docCount FROM jobs WHERE "));
    assert!(find.ends_with(" LIMIT 5"));

    // Translation never touches the caller's query
    assert_eq!(query, job_query());
}

#[test]
fn test_index_spec_round_trip_through_request() {
    let translator = N1qlTranslator::default();
    let spec = IndexSpec {
        bucket_name: "jobs".to_string(),
        index: IndexDefinition {
            fields: vec!["owner.name".to_string()],
        },
    };

    assert_eq!(
        translator
            .build_index_statement(&IndexRequest::from(spec))
            .unwrap(),
        "CREATE INDEX idx_owner-name ON jobs (`owner`.`name`)"
    );
}
