//! Report generation and deletion tests.

use actix_web::http::{StatusCode, header};
use actix_web::test;
use chrono::Local;

use invernadero_lib::db::reports;
use invernadero_lib::services::reports::{disambiguated_file_name, report_file_name};

use super::test_helpers::*;

fn expected_file_name(project_name: &str) -> String {
    report_file_name(project_name, Local::now().date_naive())
}

#[actix_rt::test]
async fn test_generate_report_writes_file_and_row() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    let req = test::TestRequest::get()
        .uri("/generar-reporte/1")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.starts_with("attachment"), "{}", disposition);

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "Reporte del proyecto: Bomba/Sistema de Riego");
    assert_eq!(lines[1], "Estado: Sin iniciar");
    assert_eq!(lines[2], "Avance: 0%");
    assert!(lines[3].starts_with("Fecha: "));

    let file_name = expected_file_name("Bomba/Sistema de Riego");
    assert_eq!(report_files(&env).await, vec![file_name.clone()]);

    let rows = reports::list_with_projects(env.pool.connection()).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].file_name, file_name);
    assert_eq!(rows[0].kind, "texto");
    assert_eq!(rows[0].project_name, "Bomba/Sistema de Riego");
}

#[actix_rt::test]
async fn test_generate_twice_same_day_keeps_one_row() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    for _ in 0..2 {
        let req = test::TestRequest::get()
            .uri("/generar-reporte/2")
            .cookie(cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let (status, body) = get_json(&app, "/api/reportes", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(report_files(&env).await.len(), 1);
}

#[actix_rt::test]
async fn test_colliding_file_names_keep_one_row_per_project() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    // "Bomba/Sistema de Riego" and "Bomba_Sistema de Riego" clean up to the same name.
    let (status, _) = post_json(
        &app,
        "/actualizar-proyecto/2",
        &cookie,
        serde_json::json!({ "nombre": "Bomba_Sistema de Riego" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    for id in [1, 2, 1, 2] {
        let req = test::TestRequest::get()
            .uri(&format!("/generar-reporte/{}", id))
            .cookie(cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "project {}", id);
    }

    let first = expected_file_name("Bomba/Sistema de Riego");
    let second = disambiguated_file_name("Bomba_Sistema de Riego", Local::now().date_naive(), 2);
    assert_eq!(first, expected_file_name("Bomba_Sistema de Riego"));

    let mut expected = vec![first.clone(), second.clone()];
    expected.sort();
    assert_eq!(report_files(&env).await, expected);

    let rows = reports::list_with_projects(env.pool.connection()).await.unwrap();
    assert_eq!(rows.len(), 2);
    for (project_id, file_name, title) in [
        (1, &first, "Bomba/Sistema de Riego"),
        (2, &second, "Bomba_Sistema de Riego"),
    ] {
        let row = rows.iter().find(|r| r.project_id == project_id).unwrap();
        assert_eq!(&row.file_name, file_name);

        let body = tokio::fs::read_to_string(env.reports_dir().join(file_name))
            .await
            .unwrap();
        assert_eq!(
            body.lines().next(),
            Some(format!("Reporte del proyecto: {}", title).as_str())
        );
    }
}

#[actix_rt::test]
async fn test_generate_unknown_project_is_404_without_file() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    let (status, body) = get_json(&app, "/generar-reporte/999", &cookie).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert!(report_files(&env).await.is_empty());
}

#[actix_rt::test]
async fn test_report_reflects_project_update() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    post_json(
        &app,
        "/actualizar-proyecto/5",
        &cookie,
        serde_json::json!({ "estado": "Terminado", "avance": "100%" }),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/generar-reporte/5")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Estado: Terminado\n"));
    assert!(body.contains("Avance: 100%\n"));
}

#[actix_rt::test]
async fn test_delete_report_removes_file_and_row() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    let req = test::TestRequest::get()
        .uri("/generar-reporte/3")
        .cookie(cookie.clone())
        .to_request();
    test::call_service(&app, req).await;

    let (_, list) = get_json(&app, "/api/reportes", &cookie).await;
    let id = list[0]["id"].as_i64().unwrap();
    assert_eq!(report_files(&env).await.len(), 1);

    let (status, body) = delete_json(&app, &format!("/eliminar-reporte/{}", id), &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    assert!(report_files(&env).await.is_empty());
    let (_, list) = get_json(&app, "/api/reportes", &cookie).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_delete_unknown_report_leaves_files_untouched() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    let req = test::TestRequest::get()
        .uri("/generar-reporte/4")
        .cookie(cookie.clone())
        .to_request();
    test::call_service(&app, req).await;
    let before = report_files(&env).await;

    let (status, body) = delete_json(&app, "/eliminar-reporte/999", &cookie).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Reporte no encontrado");

    assert_eq!(report_files(&env).await, before);
}

#[actix_rt::test]
async fn test_delete_report_with_missing_file_still_removes_row() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    let req = test::TestRequest::get()
        .uri("/generar-reporte/6")
        .cookie(cookie.clone())
        .to_request();
    test::call_service(&app, req).await;

    let file_name = expected_file_name("Hotel de Insectos");
    tokio::fs::remove_file(env.reports_dir().join(&file_name))
        .await
        .unwrap();

    let (_, list) = get_json(&app, "/api/reportes", &cookie).await;
    let id = list[0]["id"].as_i64().unwrap();

    let (status, _) = delete_json(&app, &format!("/eliminar-reporte/{}", id), &cookie).await;
    assert_eq!(status, StatusCode::OK);

    let rows = reports::list_with_projects(env.pool.connection()).await.unwrap();
    assert!(rows.is_empty());
}

#[actix_rt::test]
async fn test_reports_page_lists_generated_reports() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    let req = test::TestRequest::get()
        .uri("/generar-reporte/9")
        .cookie(cookie.clone())
        .to_request();
    test::call_service(&app, req).await;

    let (status, body) = get_page(&app, "/reportes", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(&expected_file_name("Mantenimiento")));
}
