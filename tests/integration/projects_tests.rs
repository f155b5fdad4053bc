//! Project registry tests.

use actix_web::http::StatusCode;
use serde_json::{Value, json};

use super::test_helpers::*;

const DETAIL_KEYS: [&str; 9] = [
    "id",
    "nombre",
    "descripcion",
    "estado",
    "responsable",
    "fecha_inicio",
    "avance",
    "inversion",
    "recursos",
];

fn without(body: &Value, key: &str) -> Value {
    let mut copy = body.clone();
    if let Some(obj) = copy.as_object_mut() {
        obj.remove(key);
    }
    copy
}

#[actix_rt::test]
async fn test_seed_project_one() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    let (status, body) = get_json(&app, "/get-proyecto/1", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["nombre"], "Bomba/Sistema de Riego");
    assert_eq!(body["estado"], "Sin iniciar");
    assert_eq!(body["avance"], "0%");

    let keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
    for key in DETAIL_KEYS {
        assert!(keys.contains(&key), "missing {}", key);
    }
    assert_eq!(keys.len(), DETAIL_KEYS.len());
}

#[actix_rt::test]
async fn test_list_has_nine_seeded_projects_in_order() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    let (status, body) = get_json(&app, "/api/proyectos", &cookie).await;
    assert_eq!(status, StatusCode::OK);

    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, (1..=9).collect::<Vec<_>>());
    assert!(body[0].get("ultima_actualizacion").is_some());
}

#[actix_rt::test]
async fn test_get_unknown_project_is_404() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    let (status, body) = get_json(&app, "/get-proyecto/999", &cookie).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Proyecto no encontrado");
}

#[actix_rt::test]
async fn test_update_status_changes_only_that_field() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    let (_, before) = get_json(&app, "/get-proyecto/3", &cookie).await;

    let (status, body) = post_json(
        &app,
        "/actualizar-proyecto/3",
        &cookie,
        json!({ "estado": "En progreso" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (_, after) = get_json(&app, "/get-proyecto/3", &cookie).await;
    assert_eq!(after["estado"], "En progreso");
    assert_eq!(without(&after, "estado"), without(&before, "estado"));
}

#[actix_rt::test]
async fn test_update_progress_of_project_one() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    let (_, before) = get_json(&app, "/get-proyecto/1", &cookie).await;

    let (status, _) = post_json(
        &app,
        "/actualizar-proyecto/1",
        &cookie,
        json!({ "avance": "50%" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, after) = get_json(&app, "/get-proyecto/1", &cookie).await;
    assert_eq!(after["avance"], "50%");
    assert_eq!(after["nombre"], "Bomba/Sistema de Riego");
    assert_eq!(without(&after, "avance"), without(&before, "avance"));
}

#[actix_rt::test]
async fn test_update_null_clears_nullable_field() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    let (status, _) = post_json(
        &app,
        "/actualizar-proyecto/2",
        &cookie,
        json!({ "responsable": "Ana", "inversion": "$1,500" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post_json(
        &app,
        "/actualizar-proyecto/2",
        &cookie,
        json!({ "responsable": null }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, after) = get_json(&app, "/get-proyecto/2", &cookie).await;
    assert_eq!(after["responsable"], Value::Null);
    assert_eq!(after["inversion"], "$1,500");
}

#[actix_rt::test]
async fn test_update_rejects_non_allow_listed_keys() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    let (_, before) = get_json(&app, "/get-proyecto/4", &cookie).await;

    for body in [
        json!({ "id": 42 }),
        json!({ "ultima_actualizacion": "2000-01-01" }),
        json!({ "estado": "Terminado", "nombre = 'x'; --": "y" }),
    ] {
        let (status, resp) = post_json(&app, "/actualizar-proyecto/4", &cookie, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp["code"], "INVALID_INPUT");
    }

    let (_, after) = get_json(&app, "/get-proyecto/4", &cookie).await;
    assert_eq!(after, before);
}

#[actix_rt::test]
async fn test_update_rejects_empty_payload() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    let (status, body) = post_json(&app, "/actualizar-proyecto/1", &cookie, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Datos no proporcionados");
}

#[actix_rt::test]
async fn test_update_unknown_project_is_404() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    let (status, _) = post_json(
        &app,
        "/actualizar-proyecto/999",
        &cookie,
        json!({ "estado": "En progreso" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_projects_page_lists_names() {
    let env = setup().await;
    let app = create_test_app(&env).await;
    let cookie = login(&app).await;

    let (status, body) = get_page(&app, "/proyectos", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Hotel de Insectos"));
    assert!(body.contains("Mantenimiento"));
}
