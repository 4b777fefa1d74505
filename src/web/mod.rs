// src/web/mod.rs
//! HTTP surface over the extraction pipelines.

pub mod types;

pub use types::*;

use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use tracing::{info, warn};

use crate::core::ConfigManager;
use crate::extraction::merge_profiles;
use crate::types::{ExtractionResponse, HealthResponse};

pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        // Credentials stay off: the API has no cookies or auth, and browsers
        // reject them alongside a `*` origin.
    }
}

#[get("/health")]
pub fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[post("/extract/page", data = "<request>")]
pub fn extract_page(
    request: Json<PageExtractionRequest>,
    state: &State<AppState>,
) -> Json<ExtractionResponse> {
    info!(
        "Page extraction request: {} bytes of HTML, source {:?}",
        request.html.len(),
        request.source_url
    );
    Json(state.page.extract(&request.html, &request.page_request()))
}

#[post("/extract/document", data = "<request>")]
pub fn extract_document(
    request: Json<DocumentExtractionRequest>,
    state: &State<AppState>,
) -> Json<ExtractionResponse> {
    info!("Document extraction request: {} characters", request.text.len());
    Json(state.document.extract(&request.text))
}

#[post("/extract/merge", data = "<request>")]
pub fn merge(request: Json<MergeRequest>) -> Json<ExtractionResponse> {
    let merged = merge_profiles(&request.page, &request.document);
    Json(ExtractionResponse::success(merged))
}

#[post("/profile/edit", data = "<request>")]
pub fn edit_profile(
    request: Json<EditRequest>,
    state: &State<AppState>,
) -> Json<ExtractionResponse> {
    let edited = request.edits.apply(&request.profile, state.skill_cap);
    Json(ExtractionResponse::success(edited))
}

#[options("/<_..>")]
pub fn preflight() -> Status {
    Status::Ok
}

#[rocket::catch(400)]
pub fn bad_request() -> Json<ErrorResponse> {
    warn!("Rejected malformed request");
    Json(ErrorResponse::new("Invalid request format", "BAD_REQUEST"))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<ErrorResponse> {
    warn!("Rejected request with missing or mistyped fields");
    Json(ErrorResponse::new(
        "Request body is missing required fields",
        "UNPROCESSABLE_ENTITY",
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Internal server error", "INTERNAL_ERROR"))
}

pub fn build_rocket(config: &ConfigManager) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("address", "0.0.0.0"))
        .merge(("port", config.server.port));

    rocket::custom(figment)
        .attach(Cors)
        .manage(AppState {
            page: config.page_extractor(),
            document: config.document_extractor(),
            skill_cap: config.extractor.page_skill_cap,
        })
        .register("/api", catchers![bad_request, unprocessable, internal_error])
        .mount(
            "/api",
            routes![
                health,
                extract_page,
                extract_document,
                merge,
                edit_profile,
                preflight
            ],
        )
}

pub async fn start_web_server(config: ConfigManager) -> Result<()> {
    info!("Starting profile extraction API server");
    info!("Environment: {}", config.environment);
    info!("Site domain: {}", config.extractor.site_domain);
    info!("Server: http://0.0.0.0:{}", config.server.port);

    build_rocket(&config)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Web server failed: {e}"))?;

    Ok(())
}
