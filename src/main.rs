use std::sync::Arc;

use highball::config::Config;
use highball::{logger, server, App, Error, Middleware, Params, Request, Resource, Response};
use hyper::StatusCode;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args().nth(1);
    let cfg = match config_path.as_deref() {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    logger::init(&cfg)?;

    // Build Tokio runtime, worker count from config
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    let app = Arc::new(build_app(&cfg)?);
    for route in app.routes().iter() {
        let methods = if route.handler().is_resource() {
            "resource".to_string()
        } else {
            route.allowed_methods().to_string()
        };
        logger::log_route_registered(route.pattern(), &methods);
    }

    runtime.block_on(server::run(app, Arc::new(cfg)))
}

fn build_app(cfg: &Config) -> Result<App, Error> {
    let mut builder = highball::AppBuilder::from_config(&cfg.app);
    let templates = builder.templates();

    builder
        .route("/home", |_, resp, _| {
            resp.set_text("Hello from the HOME page");
            Ok(())
        })?
        .route("/about", |_, resp, _| {
            resp.set_text("Hello from the ABOUT page");
            Ok(())
        })?
        .route("/hello/{name}", greeting)?
        .resource::<BooksResource>("/book")?
        .route("/template", move |_, resp, _| {
            let html = templates.render(
                "index.html",
                minijinja::context! { title => "Best Framework", name => "highball" },
            )?;
            resp.set_html(html);
            Ok(())
        })?
        .route_with_methods("/echo", ["post"], |req, resp, _| {
            resp.set_text(req.text()?);
            Ok(())
        })?
        .route("/exception", |_, _, _| Err(Error::handler("AttributeError")))?;

    builder
        .middleware(ServerHeader)
        .exception_handler(|req, resp, err| {
            logger::log_warning(&format!("{} {} failed: {err}", req.method(), req.path()));
            let status = if err.is_method_not_allowed() {
                StatusCode::METHOD_NOT_ALLOWED
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            resp.set_status(status);
            resp.set_text(err.to_string());
        });

    Ok(builder.build())
}

fn greeting(_req: &Request, resp: &mut Response, params: &Params) -> highball::Result<()> {
    resp.set_text(format!("Hello, {}", params.get("name").unwrap_or_default()));
    Ok(())
}

#[derive(Default)]
struct BooksResource;

impl Resource for BooksResource {
    fn get(&mut self, _req: &Request, resp: &mut Response, _params: &Params) -> highball::Result<()> {
        resp.set_text("Books Page");
        Ok(())
    }

    fn post(&mut self, _req: &Request, resp: &mut Response, _params: &Params) -> highball::Result<()> {
        resp.set_text("Endpoint to create a book");
        Ok(())
    }
}

/// Stamps every routed response with the server name
struct ServerHeader;

impl Middleware for ServerHeader {
    fn process_response(&self, _req: &Request, resp: &mut Response) {
        resp.set_header(
            hyper::header::SERVER,
            hyper::header::HeaderValue::from_static("highball"),
        );
    }
}
