mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use highball::{Error, Params, Request, Resource, Response};
use hyper::{Method, StatusCode};

use common::{builder, entries, new_log, Recorder};

#[tokio::test]
async fn test_basic_route() {
    let mut b = builder();
    b.route("/home", |_, resp, _| {
        resp.set_text("YOLO");
        Ok(())
    })
    .unwrap();
    let app = b.build();

    let resp = app.test_client().get("/home").await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text(), "YOLO");
}

#[test]
fn test_route_overlap_fails() {
    let mut b = builder();
    b.route("/home", |_, _, _| Ok(())).unwrap();
    let err = b
        .route("/home", |_, resp, _| {
            resp.set_text("other");
            Ok(())
        })
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateRoute { ref pattern } if pattern == "/home"));
}

#[tokio::test]
async fn test_client_accepts_absolute_urls() {
    let mut b = builder();
    b.route("/hey/", |_, resp, _| {
        resp.set_text("THIS IS COOL");
        Ok(())
    })
    .unwrap();
    let app = b.build();

    let resp = app.test_client().get("http://testserver/hey/").await.unwrap();
    assert_eq!(resp.text(), "THIS IS COOL");
}

#[tokio::test]
async fn test_parameterized_route_binds_strings() {
    let mut b = builder();
    b.route("/{name}", |_, resp, params| {
        resp.set_text(format!("hey {}", params.get("name").unwrap_or_default()));
        Ok(())
    })
    .unwrap();
    let app = b.build();
    let client = app.test_client();

    assert_eq!(client.get("http://testserver/gyu").await.unwrap().text(), "hey gyu");
    assert_eq!(client.get("http://testserver/123").await.unwrap().text(), "hey 123");
}

#[tokio::test]
async fn test_route_matches_decoded_path() {
    let mut b = builder();
    b.route("/hello/{name}", |_, resp, params| {
        resp.set_text(format!("Hello, {}", params.get("name").unwrap_or_default()));
        Ok(())
    })
    .unwrap();
    let app = b.build();
    let client = app.test_client();

    let resp = client.get("/hello/John%20Doe").await.unwrap();
    assert_eq!(resp.text(), "Hello, John Doe");

    let resp = client.get("/h%65llo/gyu").await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text(), "Hello, gyu");
}

#[tokio::test]
async fn test_default_404_response() {
    let app = builder().build();
    let resp = app.test_client().get("http://testserver/gyu").await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(resp.text(), "Not found");
}

#[tokio::test]
async fn test_first_registered_route_shadows_later() {
    let mut b = builder();
    b.route("/books/{id}", |_, resp, params| {
        resp.set_text(format!("book {}", params.get("id").unwrap_or_default()));
        Ok(())
    })
    .unwrap()
    .route("/books/new", |_, resp, _| {
        resp.set_text("new book form");
        Ok(())
    })
    .unwrap();
    let app = b.build();

    let resp = app.test_client().get("/books/new").await.unwrap();
    assert_eq!(resp.text(), "book new");
}

#[derive(Default)]
struct BookResource;

impl Resource for BookResource {
    fn get(&mut self, _req: &Request, resp: &mut Response, _params: &Params) -> highball::Result<()> {
        resp.set_text("this is a get request");
        Ok(())
    }

    fn post(&mut self, _req: &Request, resp: &mut Response, _params: &Params) -> highball::Result<()> {
        resp.set_text("this is a post request");
        Ok(())
    }
}

#[derive(Default)]
struct PostOnly;

impl Resource for PostOnly {
    fn post(&mut self, _req: &Request, resp: &mut Response, _params: &Params) -> highball::Result<()> {
        resp.set_text("yolo");
        Ok(())
    }
}

#[tokio::test]
async fn test_resource_handler_dispatches_by_verb() {
    let mut b = builder();
    b.resource::<BookResource>("/book").unwrap();
    let app = b.build();
    let client = app.test_client();

    assert_eq!(client.get("/book").await.unwrap().text(), "this is a get request");
    assert_eq!(client.post("/book").await.unwrap().text(), "this is a post request");
}

#[tokio::test]
async fn test_resource_handler_rejects_missing_verb() {
    let mut b = builder();
    b.resource::<PostOnly>("/book").unwrap();
    let app = b.build();

    let err = app.test_client().get("/book").await.unwrap_err();
    assert!(matches!(err, Error::MethodNotAllowed { ref method } if method == "GET"));
}

#[tokio::test]
async fn test_resource_ignores_allowed_methods() {
    let mut b = builder();
    b.add_route(
        "/book",
        highball::Handler::resource::<PostOnly>(),
        Some(["get"].into_iter().collect()),
    )
    .unwrap();
    let app = b.build();
    let client = app.test_client();

    assert_eq!(client.post("/book").await.unwrap().text(), "yolo");
    assert!(client.get("/book").await.unwrap_err().is_method_not_allowed());
}

#[tokio::test]
async fn test_allowed_methods_for_function_handler() {
    let mut b = builder();
    b.route_with_methods("/submit", ["POST"], |_, resp, _| {
        resp.set_text("submitted");
        Ok(())
    })
    .unwrap();
    let app = b.build();
    let client = app.test_client();

    let err = client.get("/submit").await.unwrap_err();
    assert!(err.is_method_not_allowed());
    assert_eq!(client.post("/submit").await.unwrap().text(), "submitted");
}

#[tokio::test]
async fn test_default_allowed_methods_exclude_patch() {
    let mut b = builder();
    b.route("/thing", |_, _, _| Ok(())).unwrap();
    let app = b.build();
    let client = app.test_client();

    for method in [Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS] {
        assert!(client.request(method, "/thing").await.is_ok());
    }
    assert!(client
        .request(Method::PATCH, "/thing")
        .await
        .unwrap_err()
        .is_method_not_allowed());
}

#[tokio::test]
async fn test_middleware_hook_order() {
    let log = new_log();
    let mut b = builder();
    b.route("/home", |_, resp, _| {
        resp.set_text("home");
        Ok(())
    })
    .unwrap();
    b.middleware(Recorder {
        name: "m1",
        log: Arc::clone(&log),
    })
    .middleware(Recorder {
        name: "m2",
        log: Arc::clone(&log),
    });
    let app = b.build();

    let resp = app.test_client().get("/home").await.unwrap();
    assert_eq!(resp.text(), "home");
    assert_eq!(
        entries(&log),
        vec![
            "m2 request /home",
            "m1 request /home",
            "m1 response 200",
            "m2 response 200",
        ]
    );
}

#[tokio::test]
async fn test_middleware_sees_default_404() {
    let log = new_log();
    let mut b = builder();
    b.middleware(Recorder {
        name: "m1",
        log: Arc::clone(&log),
    });
    let app = b.build();

    app.test_client().get("/nowhere").await.unwrap();
    assert_eq!(entries(&log), vec!["m1 request /nowhere", "m1 response 404"]);
}

#[tokio::test]
async fn test_unhandled_error_skips_response_hooks() {
    let log = new_log();
    let mut b = builder();
    b.route("/exception", |_, _, _| Err(Error::handler("AttributeError")))
        .unwrap();
    b.middleware(Recorder {
        name: "m1",
        log: Arc::clone(&log),
    });
    let app = b.build();

    let err = app.test_client().get("/exception").await.unwrap_err();
    assert_eq!(err.to_string(), "AttributeError");
    assert_eq!(entries(&log), vec!["m1 request /exception"]);
}

#[tokio::test]
async fn test_custom_exception_handler() {
    let mut b = builder();
    b.route("/exception", |_, _, _| Err(Error::handler("AttributeError")))
        .unwrap();
    b.exception_handler(|_, resp, err| resp.set_text(err.to_string()));
    let app = b.build();

    let resp = app.test_client().get("http://testserver/exception").await.unwrap();
    assert_eq!(resp.text(), "AttributeError");
}

#[tokio::test]
async fn test_exception_handler_catches_method_not_allowed() {
    let mut b = builder();
    b.resource::<PostOnly>("/book").unwrap();
    b.exception_handler(|_, resp, err| {
        if err.is_method_not_allowed() {
            resp.set_status(StatusCode::METHOD_NOT_ALLOWED);
        }
        resp.set_text(err.to_string());
    });
    let app = b.build();

    let resp = app.test_client().get("/book").await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(resp.text(), "method not allowed: GET");
}

#[tokio::test]
async fn test_last_exception_handler_wins() {
    let mut b = builder();
    b.route("/exception", |_, _, _| Err(Error::handler("boom")))
        .unwrap();
    b.exception_handler(|_, resp, _| resp.set_text("first"))
        .exception_handler(|_, resp, _| resp.set_text("second"));
    let app = b.build();

    let resp = app.test_client().get("/exception").await.unwrap();
    assert_eq!(resp.text(), "second");
}

#[tokio::test]
async fn test_template_rendering_in_handler() {
    let mut b = builder();
    let templates = b.templates();
    b.route("/html", move |_, resp, _| {
        let body = templates.render(
            "index.html",
            minijinja::context! { title => "Some Title", name => "Some Name" },
        )?;
        resp.set_html(body);
        Ok(())
    })
    .unwrap();
    let app = b.build();

    let resp = app.test_client().get("/html").await.unwrap();
    assert_eq!(resp.content_type(), Some("text/html; charset=utf-8"));
    assert!(resp.text().contains("Some Title"));
    assert!(resp.text().contains("Some Name"));
    assert!(app
        .template("index.html", minijinja::context! { title => "t", name => "n" })
        .is_ok());
}

#[tokio::test]
async fn test_missing_template_goes_through_exception_path() {
    let mut b = builder();
    let templates = b.templates();
    b.route("/broken", move |_, resp, _| {
        resp.set_html(templates.render("missing.html", ())?);
        Ok(())
    })
    .unwrap();
    let app = b.build();

    let err = app.test_client().get("/broken").await.unwrap_err();
    assert!(matches!(err, Error::Template(_)));
}

#[tokio::test]
async fn test_static_asset_served() {
    let app = builder().build();
    let resp = app.test_client().get("/static/main.css").await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.content_type(), Some("text/css; charset=utf-8"));
    assert!(resp.text().contains("chocolate"));
}

#[tokio::test]
async fn test_static_path_is_decoded() {
    let app = builder().build();
    let client = app.test_client();

    let resp = client.get("/static/m%61in.css").await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().contains("chocolate"));

    let resp = client.get("/static/%2e%2e/%2e%2e/Cargo.toml").await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_static_bypasses_routes_and_middleware() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let log = new_log();

    let mut b = builder();
    b.route("/static/{file}", move |_, resp, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        resp.set_text("routed");
        Ok(())
    })
    .unwrap();
    b.middleware(Recorder {
        name: "m1",
        log: Arc::clone(&log),
    });
    let app = b.build();

    let resp = app.test_client().get("/static/missing.css").await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_ne!(resp.text(), "routed");
    assert_ne!(resp.text(), "Not found");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(entries(&log).is_empty());
}

#[tokio::test]
async fn test_custom_static_prefix() {
    let mut b = builder();
    b.static_prefix("/assets");
    let app = b.build();
    let client = app.test_client();

    assert_eq!(client.get("/assets/css/site.css").await.unwrap().status(), StatusCode::OK);
    // The old prefix now goes through routing
    assert_eq!(client.get("/static/main.css").await.unwrap().text(), "Not found");
}

#[tokio::test]
async fn test_request_body_reaches_handler() {
    let mut b = builder();
    b.route_with_methods("/echo", ["post"], |req, resp, _| {
        let value: serde_json::Value = req.json()?;
        resp.set_json(&value)?;
        Ok(())
    })
    .unwrap();
    let app = b.build();

    let resp = app
        .test_client()
        .request_with_body(Method::POST, "/echo", r#"{"title":"Dune"}"#)
        .await
        .unwrap();
    assert_eq!(resp.content_type(), Some("application/json"));
    assert_eq!(resp.text(), r#"{"title":"Dune"}"#);
}
