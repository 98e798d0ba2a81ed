//! Ownership-aware job CRUD through the HTTP surface.

mod common;

use actix_web::test;
use serde_json::{json, Value};

use common::{bearer, login_user, register_user, seed_admin, test_app, test_state};

fn job_payload(title: &str) -> Value {
    json!({
        "title": title,
        "description": "Build and run the data platform",
        "location": "Remote",
        "company": "Acme",
        "salary": "120k",
    })
}

async fn create_job<S, B>(app: &S, token: &str, title: &str) -> Value
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: actix_web::body::MessageBody,
    B::Error: std::fmt::Debug,
{
    let req = test::TestRequest::post()
        .uri("/v1/jobs")
        .insert_header(bearer(token))
        .set_json(job_payload(title))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    test::read_body_json(resp).await
}

#[actix_web::test]
async fn created_job_is_owned_by_actor() {
    let (state, _uploads) = test_state().await;
    let app = test_app(state).await;

    let alice = register_user(&app, "alice", "alice@example.com", "pw123456").await;
    let token = login_user(&app, "alice", "pw123456").await;

    let job = create_job(&app, &token, "Engineer").await;
    assert_eq!(job["user_id"], alice["id"]);
    assert_eq!(job["title"], "Engineer");
}

#[actix_web::test]
async fn owner_field_in_payload_is_ignored() {
    let (state, _uploads) = test_state().await;
    let app = test_app(state).await;

    let alice = register_user(&app, "alice", "alice@example.com", "pw123456").await;
    let token = login_user(&app, "alice", "pw123456").await;

    // A client-supplied owner is not part of the request shape and has no effect.
    let mut payload = job_payload("Engineer");
    payload["user_id"] = json!(9999);
    let req = test::TestRequest::post()
        .uri("/v1/jobs")
        .insert_header(bearer(&token))
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);

    let job: Value = test::read_body_json(resp).await;
    assert_eq!(job["user_id"], alice["id"]);
}

#[actix_web::test]
async fn non_owner_cannot_update_or_delete() {
    let (state, _uploads) = test_state().await;
    let app = test_app(state).await;

    register_user(&app, "alice", "alice@example.com", "pw123456").await;
    register_user(&app, "bob", "bob@example.com", "pw123456").await;
    let alice_token = login_user(&app, "alice", "pw123456").await;
    let bob_token = login_user(&app, "bob", "pw123456").await;

    let job = create_job(&app, &alice_token, "Engineer").await;
    let job_id = job["id"].as_i64().unwrap();

    let update = test::TestRequest::put()
        .uri(&format!("/v1/jobs/{job_id}"))
        .insert_header(bearer(&bob_token))
        .set_json(job_payload("Hijacked"))
        .to_request();
    assert_eq!(test::call_service(&app, update).await.status().as_u16(), 403);

    let delete = test::TestRequest::delete()
        .uri(&format!("/v1/jobs/{job_id}"))
        .insert_header(bearer(&bob_token))
        .to_request();
    assert_eq!(test::call_service(&app, delete).await.status().as_u16(), 403);

    // The job is unchanged.
    let get = test::TestRequest::get()
        .uri(&format!("/v1/jobs/{job_id}"))
        .insert_header(bearer(&alice_token))
        .to_request();
    let resp = test::call_service(&app, get).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "Engineer");
}

#[actix_web::test]
async fn owner_can_update_and_delete() {
    let (state, _uploads) = test_state().await;
    let app = test_app(state).await;

    register_user(&app, "alice", "alice@example.com", "pw123456").await;
    let token = login_user(&app, "alice", "pw123456").await;

    let job = create_job(&app, &token, "Engineer").await;
    let job_id = job["id"].as_i64().unwrap();

    let update = test::TestRequest::put()
        .uri(&format!("/v1/jobs/{job_id}"))
        .insert_header(bearer(&token))
        .set_json(job_payload("Senior Engineer"))
        .to_request();
    let resp = test::call_service(&app, update).await;
    assert_eq!(resp.status().as_u16(), 200);
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["title"], "Senior Engineer");
    assert_eq!(updated["user_id"], job["user_id"], "owner never changes");

    let delete = test::TestRequest::delete()
        .uri(&format!("/v1/jobs/{job_id}"))
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, delete).await.status().as_u16(), 204);

    let get = test::TestRequest::get()
        .uri(&format!("/v1/jobs/{job_id}"))
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, get).await.status().as_u16(), 404);
}

#[actix_web::test]
async fn admin_can_mutate_any_job() {
    let (state, _uploads) = test_state().await;
    seed_admin(&state, "root", "root@example.com", "adminpw1").await;
    let app = test_app(state).await;

    register_user(&app, "alice", "alice@example.com", "pw123456").await;
    let alice_token = login_user(&app, "alice", "pw123456").await;
    let admin_token = login_user(&app, "root", "adminpw1").await;

    let job = create_job(&app, &alice_token, "Engineer").await;
    let job_id = job["id"].as_i64().unwrap();

    let update = test::TestRequest::put()
        .uri(&format!("/v1/jobs/{job_id}"))
        .insert_header(bearer(&admin_token))
        .set_json(job_payload("Moderated"))
        .to_request();
    let resp = test::call_service(&app, update).await;
    assert_eq!(resp.status().as_u16(), 200);
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["user_id"], job["user_id"], "owner survives admin edits");

    let delete = test::TestRequest::delete()
        .uri(&format!("/v1/jobs/{job_id}"))
        .insert_header(bearer(&admin_token))
        .to_request();
    assert_eq!(test::call_service(&app, delete).await.status().as_u16(), 204);
}

#[actix_web::test]
async fn mine_lists_only_own_jobs() {
    let (state, _uploads) = test_state().await;
    let app = test_app(state).await;

    register_user(&app, "alice", "alice@example.com", "pw123456").await;
    register_user(&app, "bob", "bob@example.com", "pw123456").await;
    let alice_token = login_user(&app, "alice", "pw123456").await;
    let bob_token = login_user(&app, "bob", "pw123456").await;

    create_job(&app, &alice_token, "Alice job 1").await;
    create_job(&app, &alice_token, "Alice job 2").await;
    create_job(&app, &bob_token, "Bob job").await;

    let req = test::TestRequest::get()
        .uri("/v1/jobs/mine")
        .insert_header(bearer(&alice_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let mine: Vec<Value> = test::read_body_json(resp).await;
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|j| j["title"].as_str().unwrap().starts_with("Alice")));

    let all = test::TestRequest::get()
        .uri("/v1/jobs")
        .insert_header(bearer(&alice_token))
        .to_request();
    let resp = test::call_service(&app, all).await;
    let everything: Vec<Value> = test::read_body_json(resp).await;
    assert_eq!(everything.len(), 3);
}

#[actix_web::test]
async fn get_by_id_is_idempotent() {
    let (state, _uploads) = test_state().await;
    let app = test_app(state).await;

    register_user(&app, "alice", "alice@example.com", "pw123456").await;
    let token = login_user(&app, "alice", "pw123456").await;

    let job = create_job(&app, &token, "Engineer").await;
    let job_id = job["id"].as_i64().unwrap();

    let mut bodies = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::get()
            .uri(&format!("/v1/jobs/{job_id}"))
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: Value = test::read_body_json(resp).await;
        bodies.push(body);
    }
    assert_eq!(bodies[0], bodies[1]);
}

#[actix_web::test]
async fn job_validation_rejects_empty_title() {
    let (state, _uploads) = test_state().await;
    let app = test_app(state).await;

    register_user(&app, "alice", "alice@example.com", "pw123456").await;
    let token = login_user(&app, "alice", "pw123456").await;

    let req = test::TestRequest::post()
        .uri("/v1/jobs")
        .insert_header(bearer(&token))
        .set_json(job_payload(""))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 400);
}

#[actix_web::test]
async fn listing_is_readable_without_a_token() {
    let (state, _uploads) = test_state().await;
    let app = test_app(state).await;

    register_user(&app, "alice", "alice@example.com", "pw123456").await;
    let token = login_user(&app, "alice", "pw123456").await;
    create_job(&app, &token, "Engineer").await;

    let open = test::TestRequest::get().uri("/v1/jobs").to_request();
    let resp = test::call_service(&app, open).await;
    assert_eq!(resp.status().as_u16(), 200);
    let listed: Vec<Value> = test::read_body_json(resp).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["title"], "Engineer");

    // Writes on the same path still demand a token.
    let anonymous_post = test::TestRequest::post()
        .uri("/v1/jobs")
        .set_json(job_payload("Intruder"))
        .to_request();
    assert_eq!(
        test::call_service(&app, anonymous_post).await.status().as_u16(),
        401
    );

    // As do single reads.
    let anonymous_get = test::TestRequest::get().uri("/v1/jobs/1").to_request();
    assert_eq!(
        test::call_service(&app, anonymous_get).await.status().as_u16(),
        401
    );
}
