use actix_web::{
    App, HttpResponse,
    http::{StatusCode, header},
    test, web,
};

use pushkind_showcase::middleware::{RedirectUnauthorized, SIGNIN_PATH};

#[actix_web::test]
async fn unauthorized_get_is_sent_to_signin() {
    let app = test::init_service(
        App::new()
            .wrap(RedirectUnauthorized)
            .default_service(web::to(|| async { HttpResponse::Unauthorized().finish() })),
    )
    .await;

    let req = test::TestRequest::get().uri("/admin/products").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), SIGNIN_PATH);
}

#[actix_web::test]
async fn unauthorized_post_is_sent_to_signin() {
    let app = test::init_service(
        App::new().service(
            web::scope("/admin")
                .wrap(RedirectUnauthorized)
                .route(
                    "/products/{id}/delete",
                    web::post().to(|| async { HttpResponse::Unauthorized().body("denied") }),
                ),
        ),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/admin/products/1/delete")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/auth/signin");
    let body = test::read_body(resp).await;
    assert!(body.is_empty());
}

#[actix_web::test]
async fn success_response_passes_through() {
    let app = test::init_service(
        App::new()
            .wrap(RedirectUnauthorized)
            .default_service(web::to(|| async { HttpResponse::Ok().body("listing") })),
    )
    .await;

    let req = test::TestRequest::default().to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get(header::LOCATION).is_none());
    assert_eq!(test::read_body(resp).await, "listing");
}

#[actix_web::test]
async fn other_errors_are_not_redirected() {
    let app = test::init_service(
        App::new()
            .wrap(RedirectUnauthorized)
            .route("/forbidden", web::get().to(|| async { HttpResponse::Forbidden().finish() }))
            .route("/missing", web::get().to(|| async { HttpResponse::NotFound().finish() })),
    )
    .await;

    let forbidden = test::TestRequest::get().uri("/forbidden").to_request();
    let resp = test::call_service(&app, forbidden).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(resp.headers().get(header::LOCATION).is_none());

    let missing = test::TestRequest::get().uri("/missing").to_request();
    let resp = test::call_service(&app, missing).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
