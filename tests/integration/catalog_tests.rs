//! Academic catalog tests: careers, groups and students.

use actix_web::http::StatusCode;
use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_list_seeded_careers() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    let (status, body) = get_json(&app, "/api/carreras", &cookie).await;
    assert_eq!(status, StatusCode::OK);

    let careers = body.as_array().unwrap();
    assert_eq!(careers.len(), 2);
    assert_eq!(careers[0]["codigo"], "IS");
    assert_eq!(careers[0]["icono"], "fa-laptop-code");
    assert_eq!(careers[1]["codigo"], "ITM");
}

#[actix_rt::test]
async fn test_list_groups_of_career() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    let (status, body) = get_json(&app, "/api/grupos/1", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    let groups = body.as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert!(groups.iter().all(|g| g["carrera_id"] == 1));

    let (status, body) = get_json(&app, "/api/grupos/2", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[actix_rt::test]
async fn test_unknown_parents_are_404() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    let (status, _) = get_json(&app, "/api/grupos/999", &cookie).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get_json(&app, "/api/alumnos/999", &cookie).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_create_and_list_students_sorted() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    for (matricula, apellidos, nombre) in [
        ("A003", "Ramírez", "Luis"),
        ("A001", "García", "María"),
        ("A002", "García", "Ana"),
    ] {
        let (status, body) = post_json(
            &app,
            "/api/alumnos",
            &cookie,
            json!({
                "grupo_id": 1,
                "matricula": matricula,
                "apellidos": apellidos,
                "nombre": nombre,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["matricula"], matricula);
        assert_eq!(body["grupo_id"], 1);
    }

    let (status, body) = get_json(&app, "/api/alumnos/1", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    let order: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["matricula"].as_str().unwrap())
        .collect();
    assert_eq!(order, vec!["A002", "A001", "A003"]);

    let (_, other_group) = get_json(&app, "/api/alumnos/2", &cookie).await;
    assert!(other_group.as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_duplicate_enrollment_id_is_409() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    let student = json!({
        "grupo_id": 1,
        "matricula": "DUP-1",
        "apellidos": "Pérez",
        "nombre": "Juan",
    });
    let (status, _) = post_json(&app, "/api/alumnos", &cookie, student.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let mut again = student;
    again["grupo_id"] = json!(2);
    let (status, body) = post_json(&app, "/api/alumnos", &cookie, again).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE");
    assert!(body["error"].as_str().unwrap().contains("DUP-1"));

    assert_eq!(count_students_with_enrollment_id(&env, "DUP-1").await, 1);
}

#[actix_rt::test]
async fn test_create_student_requires_every_field() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    for body in [
        json!({ "matricula": "X1", "apellidos": "A", "nombre": "B" }),
        json!({ "grupo_id": 1, "apellidos": "A", "nombre": "B" }),
        json!({ "grupo_id": 1, "matricula": "X1", "apellidos": " ", "nombre": "B" }),
        json!({ "grupo_id": 1, "matricula": "X1", "apellidos": "A", "nombre": "" }),
    ] {
        let (status, resp) = post_json(&app, "/api/alumnos", &cookie, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp["code"], "INVALID_INPUT");
    }
}

#[actix_rt::test]
async fn test_create_student_in_unknown_group_is_404() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    let (status, _) = post_json(
        &app,
        "/api/alumnos",
        &cookie,
        json!({ "grupo_id": 999, "matricula": "Z1", "apellidos": "A", "nombre": "B" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_delete_student() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    let (_, created) = post_json(
        &app,
        "/api/alumnos",
        &cookie,
        json!({ "grupo_id": 3, "matricula": "D1", "apellidos": "López", "nombre": "Eva" }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = delete_json(&app, &format!("/api/alumnos/{}", id), &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = delete_json(&app, &format!("/api/alumnos/{}", id), &cookie).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
