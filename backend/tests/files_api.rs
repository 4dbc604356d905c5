use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use backend::store::AppState;
use backend::{configure_app, services};
use serde_json::{json, Value};

const STRINGS_CSV: &str = "Tier,Industry,Topic,Subtopic,Prefix,Fuzzing-Idx,Prompt,Risks,Keywords\n\
1,Tech,AI,ML,pre,1,Explain ML,low,ml\n\
2,Finance,Blockchain,InvalidSub,pre,2,Explain chains,high,chain\n";

const CLASSIFICATIONS_CSV: &str = "Topic,SubTopic,Industry,Classification\n\
AI,ML,Tech,safe\n\
Blockchain,DeFi,Finance,risky\n";

const BOUNDARY: &str = "refcheck-test-boundary";

/// Builds a multipart body with one file part per `(field, filename, content)`.
fn multipart(files: &[(&str, &str, &str)]) -> (String, Vec<u8>) {
    let mut body = String::new();
    for (field, filename, content) in files {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: text/csv\r\n\r\n{content}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    (
        format!("multipart/form-data; boundary={BOUNDARY}"),
        body.into_bytes(),
    )
}

fn upload_request(files: &[(&str, &str, &str)]) -> test::TestRequest {
    let (content_type, body) = multipart(files);
    test::TestRequest::post()
        .uri("/api/files/upload")
        .insert_header((header::CONTENT_TYPE, content_type))
        .set_payload(body)
}

fn strings_row(tier: &str, industry: &str, topic: &str, subtopic: &str) -> Value {
    json!({
        "Tier": tier,
        "Industry": industry,
        "Topic": topic,
        "Subtopic": subtopic,
        "Prefix": "",
        "Fuzzing-Idx": "",
        "Prompt": "edited",
        "Risks": "",
        "Keywords": ""
    })
}

macro_rules! app {
    ($max_upload:expr) => {
        test::init_service(
            App::new()
                .configure(configure_app(AppState::new($max_upload), 1024 * 1024))
                .default_service(web::route().to(services::not_found)),
        )
        .await
    };
    () => {
        app!(1024 * 1024)
    };
}

macro_rules! upload_both {
    ($app:expr) => {{
        let req = upload_request(&[
            ("file1", "prompts.csv", STRINGS_CSV),
            ("file2", "labels.CSV", CLASSIFICATIONS_CSV),
        ])
        .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }};
}

#[actix_web::test]
async fn health_check_responds() {
    let app = app!();
    let req = test::TestRequest::get().uri("/health-check").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["statusCode"], 200);
}

#[actix_web::test]
async fn upload_detects_types_from_headers() {
    let app = app!();
    // Field names are swapped on purpose; only the headers decide the type.
    let req = upload_request(&[
        ("classifications", "prompts.csv", STRINGS_CSV),
        ("strings", "labels.csv", CLASSIFICATIONS_CSV),
    ])
    .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["message"], "Files uploaded");
    let uploaded = &body["responseObject"];
    assert_eq!(uploaded["strings"]["rowCount"], 2);
    assert_eq!(uploaded["strings"]["originalFilename"], "prompts.csv");
    assert_eq!(uploaded["classifications"]["headers"][3], "Classification");

    let req = test::TestRequest::get().uri("/api/files/strings").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let view = &body["responseObject"];
    assert_eq!(view["fileType"], "strings");
    assert_eq!(view["rowCount"], 2);
    assert_eq!(view["headers"][5], "Fuzzing-Idx");
    assert_eq!(view["data"][0]["Prompt"], "Explain ML");
}

#[actix_web::test]
async fn upload_rejects_non_csv_and_unknown_structures() {
    let app = app!();

    let req = upload_request(&[("file1", "notes.txt", "a,b\n1,2\n")]).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Only CSV files are allowed");

    let req = upload_request(&[("file1", "other.csv", "Name,Value\nx,1\n")]).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Unrecognized CSV structure");
    assert_eq!(
        body["responseObject"]["message"],
        "File other.csv doesn't match expected structure. Headers found: Name, Value"
    );

    let req = upload_request(&[("file1", "empty.csv", "Topic,SubTopic,Industry,Classification\n")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Empty CSV file");
}

#[actix_web::test]
async fn upload_enforces_size_limit() {
    let app = app!(64);
    let req = upload_request(&[("file1", "prompts.csv", STRINGS_CSV)]).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "File too large");
}

#[actix_web::test]
async fn unknown_file_type_is_rejected() {
    let app = app!();
    let req = test::TestRequest::get().uri("/api/files/prompts").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid file type");
}

#[actix_web::test]
async fn validation_requires_both_datasets() {
    let app = app!();

    let req = test::TestRequest::get().uri("/api/files/validate/status").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let status = &body["responseObject"];
    assert_eq!(status["canValidate"], false);
    assert_eq!(
        status["error"],
        "No data available for validation. Please upload both files first."
    );
    assert_eq!(status["dataInfo"]["stringsRows"], 0);

    let req = test::TestRequest::get().uri("/api/files/validate/stats").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Cannot validate");
}

#[actix_web::test]
async fn validate_reports_stored_data() {
    let app = app!();
    upload_both!(app);

    let req = test::TestRequest::post()
        .uri("/api/files/validate")
        .set_json(json!({ "includeRowDetails": true, "onlyShowErrors": true }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let report = &body["responseObject"];

    assert_eq!(report["isValid"], false);
    assert_eq!(report["summary"]["totalStringsRows"], 2);
    assert_eq!(report["summary"]["validationPercentage"], 50.0);
    assert_eq!(
        report["invalidCombinations"][0]["combination"],
        "blockchain|invalidsub|finance"
    );
    assert_eq!(report["invalidCombinations"][0]["rows"], json!([2]));
    assert_eq!(
        report["missingClassifications"][0]["suggestedClassification"],
        "risky"
    );
    assert_eq!(report["rowDetails"].as_array().unwrap().len(), 1);
    assert_eq!(report["rowDetails"][0]["rowIndex"], 2);
    assert_eq!(report["availableClassifications"].as_array().unwrap().len(), 2);

    let req = test::TestRequest::get().uri("/api/files/validate/stats").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["responseObject"]["uniqueCombinations"], 2);
    assert_eq!(body["responseObject"]["validCombinations"], 1);
}

#[actix_web::test]
async fn validate_uses_inline_data_when_both_given() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/files/validate/stats")
        .set_json(json!({
            "stringsData": [
                strings_row("1", "Tech", "AI", "ML"),
                strings_row("1", "tech", "ai", "ml")
            ],
            "classificationsData": [
                { "Topic": "AI", "SubTopic": "ML", "Industry": "Tech", "Classification": "safe" }
            ]
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["responseObject"]["duplicateRows"], 1);
    assert_eq!(body["responseObject"]["invalidCombinations"], 0);
}

#[actix_web::test]
async fn empty_or_malformed_bodies_are_rejected() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/files/validate")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Validation error: request body is empty");

    let req = test::TestRequest::put()
        .uri("/api/files/strings")
        .set_json(json!({ "data": "not an array" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Validation error");
}

#[actix_web::test]
async fn rejected_update_leaves_store_untouched() {
    let app = app!();
    upload_both!(app);

    let req = test::TestRequest::put()
        .uri("/api/files/strings")
        .set_json(json!({
            "data": [
                strings_row("1", "Tech", "AI", "ML"),
                strings_row("3", "Tech", "AI", "Unknown")
            ]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Data validation failed");
    assert_eq!(body["responseObject"]["field"], "cross-reference validation");
    assert_eq!(
        body["responseObject"]["message"],
        "1 rows have invalid Topic+Subtopic+Industry combinations"
    );

    let req = test::TestRequest::get().uri("/api/files/strings").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["responseObject"]["data"][0]["Prompt"], "Explain ML");
    assert_eq!(body["responseObject"]["rowCount"], 2);
}

#[actix_web::test]
async fn structural_errors_fail_the_update() {
    let app = app!();
    let mut row = strings_row("", "Tech", "AI", "ML");
    row.as_object_mut().unwrap().remove("Keywords");

    let req = test::TestRequest::put()
        .uri("/api/files/strings")
        .set_json(json!({ "data": [row] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Update failed");
    assert_eq!(
        body["responseObject"]["message"],
        "Missing required fields: Keywords; Row 1: Tier is required"
    );
}

#[actix_web::test]
async fn accepted_updates_are_committed() {
    let app = app!();
    upload_both!(app);

    let req = test::TestRequest::put()
        .uri("/api/files/strings")
        .set_json(json!({ "data": [strings_row("1", "tech", "ai", "ml")] }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let update = &body["responseObject"];
    assert_eq!(update["message"], "Data updated successfully");
    assert_eq!(update["updatedRows"], 1);
    assert_eq!(update["validationResults"]["valid"], true);

    // Skipping the reference check accepts rows that would otherwise fail.
    let req = test::TestRequest::put()
        .uri("/api/files/strings")
        .set_json(json!({
            "data": [strings_row("1", "Tech", "AI", "Unknown")],
            "validateReferences": false
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert!(body["responseObject"].get("validationResults").is_none());

    let req = test::TestRequest::get().uri("/api/files").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let strings = &body["responseObject"]["strings"];
    assert_eq!(strings["originalFilename"], "prompts.csv");
    assert_eq!(strings["data"][0]["Subtopic"], "Unknown");
}

#[actix_web::test]
async fn export_downloads_csv_attachment() {
    let app = app!();
    upload_both!(app);

    let req = test::TestRequest::get()
        .uri("/api/files/export/classifications?delimiter=;&includeHeaders=false&filename=out.csv")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let headers = resp.headers();
    assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "text/csv; charset=utf-8");
    assert_eq!(
        headers.get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"out.csv\""
    );
    assert_eq!(
        headers.get(header::CACHE_CONTROL).unwrap(),
        "no-cache, no-store, must-revalidate"
    );
    let metadata: Value =
        serde_json::from_slice(headers.get("X-Export-Metadata").unwrap().as_bytes()).unwrap();
    assert_eq!(metadata["rowCount"], 2);
    assert_eq!(metadata["originalFilename"], "labels.CSV");

    let body = test::read_body(resp).await;
    assert_eq!(
        body,
        web::Bytes::from_static(b"AI;ML;Tech;safe\nBlockchain;DeFi;Finance;risky\n")
    );
}

#[actix_web::test]
async fn export_summary_and_metadata() {
    let app = app!();

    let req = test::TestRequest::get().uri("/api/files/export/batch").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["responseObject"]["message"], "No data available for export");

    upload_both!(app);

    let req = test::TestRequest::get().uri("/api/files/export").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let summary = &body["responseObject"];
    assert_eq!(summary["totalRows"], 4);
    assert_eq!(summary["downloadLinks"]["batch"], "/api/files/export/batch");

    let req = test::TestRequest::get().uri("/api/files/export/batch").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["responseObject"]["batchSize"], 2);

    let req = test::TestRequest::get()
        .uri("/api/files/export/metadata/strings")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let details = &body["responseObject"];
    assert_eq!(details["rowCount"], 2);
    assert_eq!(details["originalFilename"], "prompts.csv");
    assert!(details["filename"]
        .as_str()
        .unwrap()
        .starts_with("prompts_updated_"));
}

#[actix_web::test]
async fn unknown_routes_use_the_failure_envelope() {
    let app = app!();
    let req = test::TestRequest::get().uri("/api/nothing/here").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["statusCode"], 404);
}
