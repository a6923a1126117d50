//! Contract tests for the HTTP-facing types: the response envelope, the
//! error-to-status mapping and the receipt rendering pipeline.
//!
//! Everything here is infrastructure-free. Flows that need Postgres/Redis
//! (login round-trips, refresh races) run against a deployed stack, not in
//! `cargo test`.

use axum::response::IntoResponse;
use chrono::{TimeZone, Utc};
use uuid::Uuid;

use kasa::errors::AppError;
use kasa::models::check::{Check, PaymentInput, PaymentType, ProductInput};
use kasa::models::session::Session;
use kasa::responses::{Envelope, Paginated, ResponseStatus};

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

mod error_mapping {
    use super::*;

    #[tokio::test]
    async fn test_domain_errors_map_to_status_and_code() {
        let cases = [
            (AppError::UserNotFound, 404, "USER_NOT_FOUND"),
            (AppError::UserAlreadyExists, 409, "USER_ALREADY_EXISTS"),
            (AppError::IncorrectPassword, 401, "INCORRECT_PASSWORD"),
            (AppError::InvalidToken, 401, "INVALID_TOKEN"),
            (
                AppError::ProductListEmpty,
                400,
                "PRODUCT_LIST_CANNOT_BE_EMPTY",
            ),
            (AppError::NotEnoughMoney, 400, "NOT_ENOUGH_MONEY"),
            (AppError::EmptyCheck, 400, "EMPTY_CHECK"),
            (AppError::CheckNotFound, 404, "CHECK_NOT_FOUND"),
        ];

        for (error, status, code) in cases {
            let response = error.into_response();
            assert_eq!(response.status().as_u16(), status, "status for {code}");
            let body = body_json(response).await;
            assert_eq!(body["custom_code"], code);
            assert!(body["message"].is_string());
            assert!(body["data"].is_null());
        }
    }

    #[tokio::test]
    async fn test_validation_error_carries_its_message() {
        let response =
            AppError::Validation("password must be between 8 and 20 characters".to_string())
                .into_response();
        assert_eq!(response.status().as_u16(), 400);
        let body = body_json(response).await;
        assert_eq!(body["custom_code"], "VALIDATION_ERROR");
        assert_eq!(
            body["message"],
            "password must be between 8 and 20 characters"
        );
    }

    #[tokio::test]
    async fn test_internal_errors_never_leak_details() {
        let response = AppError::Internal(anyhow::anyhow!("secret pool state")).into_response();
        assert_eq!(response.status().as_u16(), 500);
        let body = body_json(response).await;
        assert_eq!(body["custom_code"], "INTERNAL_ERROR");
        assert_eq!(body["message"], "internal server error");
    }
}

mod envelope {
    use super::*;

    #[tokio::test]
    async fn test_session_envelope_shape() {
        let session = Session::new(
            "access.jwt".into(),
            "refresh.jwt".into(),
            Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap(),
        );
        let body = body_json(Envelope::ok(session).into_response()).await;

        assert_eq!(body["custom_code"], "OK");
        assert_eq!(body["data"]["access_token"], "access.jwt");
        assert_eq!(body["data"]["refresh_token"], "refresh.jwt");
        assert_eq!(body["data"]["token_type"], "bearer");
        assert!(body["data"]["expires_in"].is_string());
    }

    #[test]
    fn test_envelope_parses_back() {
        let raw = r#"{"custom_code":"OK","data":{"access_token":"a","refresh_token":"r","expires_in":"2024-04-01T00:00:00Z","token_type":"bearer"}}"#;
        let envelope: Envelope<Session> = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.custom_code, ResponseStatus::Ok);
        assert_eq!(envelope.data.unwrap().access_token, "a");
    }

    #[test]
    fn test_paginated_shape() {
        let page = Paginated {
            total_count: 42,
            page_count: 3,
            next: Some(1),
            previous: None,
            results: vec!["a", "b"],
        };
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["total_count"], 42);
        assert_eq!(value["page_count"], 3);
        assert_eq!(value["next"], 1);
        assert!(value["previous"].is_null());
        assert_eq!(value["results"].as_array().unwrap().len(), 2);
    }
}

mod check_payload {
    use super::*;

    fn sample_check() -> Check {
        Check::build(
            Uuid::new_v4(),
            Utc.with_ymd_and_hms(2024, 4, 1, 12, 30, 0).unwrap(),
            vec![ProductInput {
                name: "bread".into(),
                price: 10.0,
                quantity: 2.0,
            }],
            PaymentInput {
                r#type: PaymentType::Cashless,
                amount: 1000.0,
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_created_check_envelope_carries_derived_totals() {
        let body = body_json(Envelope::ok(sample_check()).into_response()).await;
        assert_eq!(body["custom_code"], "OK");
        assert_eq!(body["data"]["total"], 20.0);
        assert_eq!(body["data"]["rest"], 980.0);
        assert_eq!(body["data"]["payment"]["type"], "CASHLESS");
        assert_eq!(body["data"]["products"][0]["total"], 20.0);
    }

    #[test]
    fn test_receipt_renders_from_domain_check() {
        let style = kasa::config::ReceiptStyle {
            width: 40,
            header: "ФОП Петренко І.І.".into(),
            footer: "Дякуємо за покупку!".into(),
        };
        let text = kasa::receipt::render(&sample_check(), &style);

        assert!(text.contains("2.00 x 10.00"));
        assert!(text.contains("Картка"));
        assert!(text.contains("01.04.2024 12:30"));
        // СУМА row keeps the fixed 40-char width
        let total_row = text.lines().find(|l| l.starts_with("СУМА")).unwrap();
        assert_eq!(total_row.chars().count(), 40);
        assert!(total_row.ends_with("20.00"));
    }
}
