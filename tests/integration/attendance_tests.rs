//! Attendance roster, save stub, history and printable sheet tests.

use actix_web::http::{StatusCode, header};
use actix_web::test;
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, NotSet, Set};
use serde_json::{Value, json};

use invernadero_lib::db::attendance;
use invernadero_lib::entity::{attendance_detail, attendance_session};

use super::test_helpers::*;

#[actix_rt::test]
async fn test_save_attendance_accepts_any_payload_and_stores_nothing() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    let payloads: [(&str, &str); 3] = [
        (
            "application/json",
            r#"{"grupo_id": 1, "fecha": "2024-05-01", "alumnos": [{"matricula": "A1", "asistencia": true}]}"#,
        ),
        ("application/json", "not json at all {"),
        ("text/plain", ""),
    ];

    for (content_type, payload) in payloads {
        let req = test::TestRequest::post()
            .uri("/api/guardar-asistencia")
            .cookie(cookie.clone())
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{}", payload);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Asistencia guardada correctamente");
        assert_eq!(body["persisted"], false);
    }

    let counts = attendance::row_counts(env.pool.connection()).await.unwrap();
    assert_eq!(counts, (0, 0));
}

#[actix_rt::test]
async fn test_save_attendance_accepts_large_payload() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    let payload = "x".repeat(300 * 1024);
    let req = test::TestRequest::post()
        .uri("/api/guardar-asistencia")
        .cookie(cookie.clone())
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["persisted"], false);

    let counts = attendance::row_counts(env.pool.connection()).await.unwrap();
    assert_eq!(counts, (0, 0));
}

#[actix_rt::test]
async fn test_save_attendance_requires_session() {
    let env = setup().await;
    let app = create_test_app(&env).await;

    let req = test::TestRequest::post()
        .uri("/api/guardar-asistencia")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_roster_marks_everyone_absent() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    post_json(
        &app,
        "/api/alumnos",
        &cookie,
        json!({ "grupo_id": 1, "matricula": "R100", "apellidos": "Soto", "nombre": "Iván" }),
    )
    .await;

    let (status, body) =
        get_page(&app, "/lista-asistencia?grupo_id=1&fecha=2024-05-01", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("R100"));
    assert!(body.contains("2024-05-01"));
    assert!(!body.contains("checked"));
}

#[actix_rt::test]
async fn test_roster_rejects_bad_date_and_unknown_group() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    let (status, _) =
        get_page(&app, "/lista-asistencia?grupo_id=1&fecha=01-05-2024", &cookie).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) =
        get_page(&app, "/lista-asistencia?grupo_id=999&fecha=2024-05-01", &cookie).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get_page(&app, "/lista-asistencia?fecha=2024-05-01", &cookie).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_history_is_empty_without_stored_sessions() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    let (status, body) = get_json(&app, "/api/historial-asistencia?grupo_id=1", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, _) = get_json(&app, "/api/historial-asistencia?grupo_id=999", &cookie).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_pdf_for_unknown_session_is_404() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    let (status, _) = get_json(&app, "/generar-pdf-asistencia/1", &cookie).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_history_and_pdf_read_stored_sessions() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;
    let db = env.pool.connection();

    let mut student_ids = Vec::new();
    for (matricula, apellidos) in [("P1", "Alvarez"), ("P2", "Benítez")] {
        let (_, created) = post_json(
            &app,
            "/api/alumnos",
            &cookie,
            json!({ "grupo_id": 1, "matricula": matricula, "apellidos": apellidos, "nombre": "X" }),
        )
        .await;
        student_ids.push(created["id"].as_i64().unwrap() as i32);
    }

    // Sessions are never written through the API; store one directly.
    let session = attendance_session::ActiveModel {
        id: NotSet,
        group_id: Set(1),
        date: Set(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .unwrap();
    for (student_id, present) in [(student_ids[0], true), (student_ids[1], false)] {
        attendance_detail::ActiveModel {
            id: NotSet,
            session_id: Set(session.id),
            student_id: Set(student_id),
            present: Set(present),
        }
        .insert(db)
        .await
        .unwrap();
    }

    let (status, body) = get_json(&app, "/api/historial-asistencia?grupo_id=1", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["fecha"], "2024-05-01");
    assert_eq!(body[0]["presentes"], 1);
    assert_eq!(body[0]["total"], 2);
    assert_eq!(body[0]["porcentaje"], 50);

    let req = test::TestRequest::get()
        .uri(&format!("/generar-pdf-asistencia/{}", session.id))
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    assert_eq!(
        resp.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        format!("attachment; filename=asistencia_{}.pdf", session.id).as_str()
    );

    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("P1"));
    assert!(html.contains("Presente"));
    assert!(html.contains("Ausente"));
}
