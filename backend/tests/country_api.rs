mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use chrono::{TimeZone, Utc};
use learnhub::models::entities::CountryModel;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use serde_json::json;

use common::*;

fn country(id: i32, name: &str) -> CountryModel {
    let at = Utc.with_ymd_and_hms(2024, 11, 7, 2, 47, 42).unwrap();
    CountryModel {
        id,
        name: name.to_string(),
        created_at: at,
        updated_at: at,
    }
}

#[actix_web::test]
async fn any_authenticated_user_lists_countries() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![country(1, "Chile"), country(2, "Peru")]])
        .into_connection();
    let app = init_app(db).await;

    let req = test::TestRequest::get()
        .uri("/country")
        .insert_header(bearer(&learner_access_token()))
        .to_request();
    let (status, body) = call(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["statusCode"], 200);
    assert_eq!(body["message"], "Countries fetched successfully");
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["data"][1]["name"], "Peru");
}

#[actix_web::test]
async fn find_one_returns_404_when_missing() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<CountryModel>::new()])
        .into_connection();
    let app = init_app(db).await;

    let req = test::TestRequest::get()
        .uri("/country/42")
        .insert_header(bearer(&admin_token()))
        .to_request();
    let (status, body) = call(&app, req).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Country not found");
}

#[actix_web::test]
async fn find_by_name() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![country(3, "Uzbekistan")]])
        .into_connection();
    let app = init_app(db).await;

    let req = test::TestRequest::get()
        .uri("/country/name/Uzbekistan")
        .insert_header(bearer(&learner_access_token()))
        .to_request();
    let (status, body) = call(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Country fetched successfully by name");
    assert_eq!(body["data"]["id"], 3);
}

#[actix_web::test]
async fn admin_creates_country() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![country(5, "Kenya")]])
        .into_connection();
    let app = init_app(db).await;

    let req = test::TestRequest::post()
        .uri("/country")
        .insert_header(bearer(&admin_token()))
        .set_json(json!({"name": "  Kenya "}))
        .to_request();
    let (status, body) = call(&app, req).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["statusCode"], 201);
    assert_eq!(body["message"], "Country created successfully");
    assert_eq!(body["data"]["name"], "Kenya");
}

#[actix_web::test]
async fn blank_name_is_rejected() {
    let app = init_app(empty_db()).await;

    let req = test::TestRequest::post()
        .uri("/country")
        .insert_header(bearer(&admin_token()))
        .set_json(json!({"name": "   "}))
        .to_request();
    let (status, body) = call(&app, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "name must not be empty");
}

#[actix_web::test]
async fn admin_updates_country() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![country(1, "Chili")], vec![country(1, "Chile")]])
        .into_connection();
    let app = init_app(db).await;

    let req = test::TestRequest::patch()
        .uri("/country/1")
        .insert_header(bearer(&admin_token()))
        .set_json(json!({"name": "Chile"}))
        .to_request();
    let (status, body) = call(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Country updated successfully");
    assert_eq!(body["data"]["name"], "Chile");
}

#[actix_web::test]
async fn deleting_missing_country_is_404() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();
    let app = init_app(db).await;

    let req = test::TestRequest::delete()
        .uri("/country/9")
        .insert_header(bearer(&admin_token()))
        .to_request();
    let (status, _) = call(&app, req).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn learner_cannot_create_country() {
    let app = init_app(empty_db()).await;

    let req = test::TestRequest::post()
        .uri("/country")
        .insert_header(bearer(&learner_access_token()))
        .set_json(json!({"name": "Atlantis"}))
        .to_request();
    let (status, body) = call(&app, req).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Access denied! Only admins can access this route.");
}

#[actix_web::test]
async fn health_needs_no_token() {
    let app = init_app(empty_db()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let (status, body) = call(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
