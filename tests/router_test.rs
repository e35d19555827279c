mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;
use traitquiz::{models::Pool, names, router, AppState};

async fn app() -> (Router, traitquiz::db::Db) {
    let db = common::create_test_db().await;
    (router(AppState::new(db.clone(), false)), db)
}

async fn send(app: &Router, method: Method, uri: &str, form: Option<String>) -> Response<Body> {
    let mut req = Request::builder()
        .method(method)
        .uri(uri)
        .header("HX-Request", "true")
        .header(header::COOKIE, format!("{}=en", names::LOCALE_COOKIE_NAME));
    let body = match form {
        Some(form) => {
            req = req.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
            Body::from(form)
        }
        None => Body::empty(),
    };
    app.clone()
        .oneshot(req.body(body).expect("request build should succeed"))
        .await
        .expect("router should respond")
}

async fn text(resp: Response<Body>) -> String {
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body should be utf-8")
}

fn hx_redirect(resp: &Response<Body>) -> Option<String> {
    resp.headers()
        .get("HX-Redirect")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[tokio::test]
async fn state_changing_requests_need_htmx() {
    let (app, _) = app().await;

    let req = Request::builder()
        .method(Method::POST)
        .uri(names::REGISTER_URL)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("full_name=x&birthdate=2000-01-01&role=student"))
        .expect("request build should succeed");
    let resp = app.oneshot(req).await.expect("router should respond");

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn root_redirects_to_registration() {
    let (app, _) = app().await;
    let resp = send(&app, Method::GET, "/", None).await;

    assert!(resp.status().is_redirection());
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        names::REGISTER_URL
    );
}

#[tokio::test]
async fn registration_reports_the_missing_role_first() {
    let (app, _) = app().await;
    let resp = send(
        &app,
        Method::POST,
        names::REGISTER_URL,
        Some("full_name=&birthdate=&role=".to_string()),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(hx_redirect(&resp).is_none());
    let body = text(resp).await;
    assert!(body.contains("Please choose whether you are a student or a coach."));
}

#[tokio::test]
async fn registration_keeps_typed_values_on_error() {
    let (app, _) = app().await;
    let resp = send(
        &app,
        Method::POST,
        names::REGISTER_URL,
        Some("full_name=Ali+Veli&birthdate=&role=coach".to_string()),
    )
    .await;

    let body = text(resp).await;
    assert!(body.contains("Please enter your birthdate."));
    assert!(body.contains(r#"value="Ali Veli""#));
}

#[tokio::test]
async fn unknown_user_cannot_open_the_test() {
    let (app, _) = app().await;
    let resp = send(&app, Method::GET, &names::test_url(999, "Nobody"), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_classic_pool_is_shown() {
    let (app, _) = app().await;
    let resp = send(
        &app,
        Method::POST,
        names::REGISTER_URL,
        Some("full_name=Ali&birthdate=2000-01-01&role=student".to_string()),
    )
    .await;
    let location = hx_redirect(&resp).expect("registration should redirect");

    let body = text(send(&app, Method::GET, &location, None).await).await;
    assert!(body.contains("No questions have been added for this section yet."));
}

#[tokio::test]
async fn admin_saves_a_question_and_rejects_three_options() {
    let (app, db) = app().await;

    let resp = send(
        &app,
        Method::POST,
        names::ADMIN_URL,
        Some("pool=trait&question=Pick+one&raw_options=a%29+Cesur%0Ab%29+Sakin%0Ac%29+Planl%C4%B1".to_string()),
    )
    .await;
    let body = text(resp).await;
    assert!(body.contains("option D is missing"));
    assert_eq!(db.count_questions(Pool::Trait).await.unwrap(), 0);

    let resp = send(
        &app,
        Method::POST,
        names::ADMIN_URL,
        Some(
            "pool=trait&question=Pick+one&raw_options=a%29+Cesur%0Ab%29+Sakin%0Ac%29+Planl%C4%B1%0Ad%29+Ne%C5%9Feli"
                .to_string(),
        ),
    )
    .await;
    let body = text(resp).await;
    assert!(body.contains("Question saved!"));

    let stored = db.questions(Pool::Trait).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].options.c, "Planlı");
    assert_eq!(stored[0].options.d, "Neşeli");
    assert_eq!(db.count_questions(Pool::Classic).await.unwrap(), 0);
}

#[tokio::test]
async fn full_run_from_registration_to_results() {
    let (app, db) = app().await;
    common::seed_pool(&db, Pool::Classic, 12).await;
    common::seed_pool(&db, Pool::Trait, names::TRAIT_POOL_SIZE).await;

    let resp = send(
        &app,
        Method::POST,
        names::REGISTER_URL,
        Some("full_name=Ay%C5%9Fe+Y%C4%B1lmaz&birthdate=2001-04-23&role=student".to_string()),
    )
    .await;
    let location = hx_redirect(&resp).expect("registration should redirect");
    assert!(location.starts_with("/test?userId="));
    assert!(location.ends_with("fullName=Ay%C5%9Fe%20Y%C4%B1lmaz"));

    let user_id: i64 = location
        .trim_start_matches("/test?userId=")
        .split('&')
        .next()
        .and_then(|id| id.parse().ok())
        .expect("user id in redirect");
    let identity = format!("userId={user_id}&fullName=Ay%C5%9Fe+Y%C4%B1lmaz");

    let body = text(send(&app, Method::GET, &location, None).await).await;
    assert!(body.contains("c question 1"));
    assert!(body.contains("1 / 12"));

    for n in 1..=12 {
        let resp = send(
            &app,
            Method::POST,
            names::ANSWER_URL,
            Some(format!("{identity}&choice=b")),
        )
        .await;
        let body = text(resp).await;
        if n < 12 {
            assert!(body.contains(&format!("c question {}", n + 1)));
        } else {
            assert!(body.contains("YOUR PERSONALITY PROFILE"));
        }
    }

    let classic = db
        .latest_classic_result("Ayşe Yılmaz")
        .await
        .unwrap()
        .expect("classic result stored");
    assert_eq!(classic.b_pct, 100);
    assert!(db.status(user_id).await.unwrap().unwrap().classic_done);

    let body = text(
        send(
            &app,
            Method::POST,
            names::START_TRAIT_URL,
            Some(identity.clone()),
        )
        .await,
    )
    .await;
    assert!(body.contains("t question 1"));
    assert!(body.contains("Strong Traits"));

    let mut last = None;
    for _ in 0..names::TRAIT_POOL_SIZE {
        last = Some(
            send(
                &app,
                Method::POST,
                names::ANSWER_URL,
                Some(format!("{identity}&choice=a")),
            )
            .await,
        );
    }
    let done = hx_redirect(&last.expect("answered")).expect("finishing should redirect");
    assert_eq!(done, names::done_url(user_id, "Ayşe Yılmaz"));

    let body = text(send(&app, Method::GET, &done, None).await).await;
    assert!(body.contains("Hello, Ayşe Yılmaz"));
    assert!(body.contains("Yellow"));
    assert!(body.contains("t1-a"));
    assert!(!body.contains("t21-a"));

    let weak = names::results_tab_url("Ayşe Yılmaz", "weak");
    let body = text(send(&app, Method::GET, &weak, None).await).await;
    assert!(body.contains("t21-a"));
    assert!(body.contains("t40-a"));

    // a finished user goes straight to the results page
    let resp = send(&app, Method::GET, &location, None).await;
    assert!(resp.status().is_redirection());
}

#[tokio::test]
async fn back_returns_to_the_previous_question() {
    let (app, db) = app().await;
    common::seed_pool(&db, Pool::Classic, 3).await;

    let resp = send(
        &app,
        Method::POST,
        names::REGISTER_URL,
        Some("full_name=Can&birthdate=1999-09-09&role=coach".to_string()),
    )
    .await;
    let location = hx_redirect(&resp).expect("registration should redirect");
    let identity = location.trim_start_matches("/test?").to_string();

    send(&app, Method::GET, &location, None).await;
    send(
        &app,
        Method::POST,
        names::ANSWER_URL,
        Some(format!("{identity}&choice=d")),
    )
    .await;

    let body = text(send(&app, Method::POST, names::BACK_URL, Some(identity)).await).await;
    assert!(body.contains("c question 1"));
    assert!(body.contains("outline selected"));
}

#[tokio::test]
async fn results_without_data_show_placeholders() {
    let (app, _) = app().await;
    let body = text(send(&app, Method::GET, "/done?fullName=Nobody", None).await).await;

    assert!(body.contains("No classic test result found."));
    assert!(body.contains("No strong traits selected yet."));
}

#[tokio::test]
async fn static_assets_are_served() {
    let (app, _) = app().await;
    let resp = send(&app, Method::GET, "/static/index.css", None).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "text/css");
}

#[tokio::test]
async fn quiz_posts_for_unknown_users_store_nothing() {
    let (app, db) = app().await;
    common::seed_pool(&db, Pool::Classic, 1).await;

    for uri in [names::ANSWER_URL, names::BACK_URL, names::START_TRAIT_URL] {
        let resp = send(
            &app,
            Method::POST,
            uri,
            Some("userId=999&fullName=Ghost&choice=a".to_string()),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "expected 404 for {uri}");
    }

    assert_eq!(db.latest_classic_result("Ghost").await.unwrap(), None);
    assert_eq!(db.status(999).await.unwrap(), None);
}

#[tokio::test]
async fn malformed_answer_is_a_bad_request() {
    let (app, _) = app().await;
    let resp = send(
        &app,
        Method::POST,
        names::ANSWER_URL,
        Some("userId=1&fullName=Ali&choice=z".to_string()),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(text(resp).await.contains("malformed answer"));
}

#[tokio::test]
async fn registering_again_restarts_an_abandoned_test() {
    let (app, db) = app().await;
    common::seed_pool(&db, Pool::Classic, 3).await;
    let register = "full_name=Can&birthdate=1999-09-09&role=coach".to_string();

    let resp = send(&app, Method::POST, names::REGISTER_URL, Some(register.clone())).await;
    let location = hx_redirect(&resp).expect("registration should redirect");
    let identity = location.trim_start_matches("/test?").to_string();
    send(&app, Method::GET, &location, None).await;
    send(
        &app,
        Method::POST,
        names::ANSWER_URL,
        Some(format!("{identity}&choice=b")),
    )
    .await;

    send(&app, Method::POST, names::REGISTER_URL, Some(register)).await;

    // no flow left: going back re-enters at the first, unanswered question
    let body = text(send(&app, Method::POST, names::BACK_URL, Some(identity)).await).await;
    assert!(body.contains("c question 1"));
    assert!(!body.contains("outline selected"));
}
