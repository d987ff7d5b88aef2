use std::collections::BTreeMap;
use std::sync::Mutex;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, delete, get, post, web};
use serde::{Deserialize, Serialize};

use ppm_core::error::PpmError;
use ppm_core::model::bundle::ModelBundle;
use ppm_core::model::generator::{generate, join_symbols};
use ppm_core::model::prediction::predict_text;
use ppm_core::registry::{DEFAULT_SESSION, ModelRegistry};
use ppm_core::tokenizer::Level;

use crate::config::{MAX_GENERATE_LENGTH, MAX_ORDER_LIMIT, ServerConfig};
use crate::fetch::fetch_text;

/// State shared by every worker.
#[derive(Default)]
pub struct SharedData {
	pub registry: ModelRegistry,
}

/// Body of `POST /v1/train`. Exactly one of `url` and `text` is expected.
#[derive(Deserialize)]
struct TrainBody {
	url: Option<String>,
	text: Option<String>,
	session: Option<String>,
	max_order: Option<usize>,
}

#[derive(Serialize)]
struct TrainResponse {
	session: String,
	message: String,
	nodes: BTreeMap<Level, usize>,
}

/// Body of `POST /v1/predict`.
#[derive(Deserialize)]
struct PredictBody {
	input: Option<String>,
	level: Option<String>,
	session: Option<String>,
	limit: Option<usize>,
}

/// Query parameters of `GET /v1/generate`.
#[derive(Deserialize)]
struct GenerateParams {
	level: Option<String>,
	seed: Option<String>,
	length: Option<usize>,
	session: Option<String>,
}

#[derive(Serialize)]
struct GenerateResponse {
	text: String,
	symbols: Vec<String>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
	error: &'a str,
}

fn error_response(status: StatusCode, message: &str) -> HttpResponse {
	HttpResponse::build(status).json(ErrorBody { error: message })
}

/// Invariant violations are server faults, everything else is a bad request.
fn ppm_error_response(err: &PpmError) -> HttpResponse {
	let status = if err.is_invariant_violation() {
		log::error!("Model invariant violated: {err}");
		StatusCode::INTERNAL_SERVER_ERROR
	} else {
		StatusCode::BAD_REQUEST
	};
	error_response(status, &err.to_string())
}

fn session_or_default(session: &Option<String>) -> &str {
	match session {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => DEFAULT_SESSION,
	}
}

fn parse_level(level: &str) -> Result<Level, HttpResponse> {
	level
		.parse::<Level>()
		.map_err(|_| error_response(StatusCode::BAD_REQUEST, "Invalid level specified"))
}

/// HTTP POST endpoint `/v1/train`
///
/// Trains one model per level from a remote document (`url`) or from
/// inline `text`, and stores the bundle under the request session.
#[post("/v1/train")]
async fn post_train(
	data: web::Data<Mutex<SharedData>>,
	config: web::Data<ServerConfig>,
	body: web::Json<TrainBody>,
) -> impl Responder {
	let text = match (&body.url, &body.text) {
		(Some(url), None) if !url.trim().is_empty() => match fetch_text(url.trim()).await {
			Ok(text) => text,
			Err(e) => {
				log::warn!("Failed to fetch {url}: {e}");
				return error_response(StatusCode::BAD_GATEWAY, "Failed to fetch data from URL");
			}
		},
		(None, Some(text)) => text.clone(),
		_ => return error_response(StatusCode::BAD_REQUEST, "Either URL or text is required"),
	};

	let max_order = body.max_order.unwrap_or(config.max_order);
	if max_order > MAX_ORDER_LIMIT {
		return error_response(
			StatusCode::BAD_REQUEST,
			&format!("max_order must be <= {MAX_ORDER_LIMIT}"),
		);
	}

	// Training is CPU bound, keep it off the worker's event loop.
	let bundle = match web::block(move || ModelBundle::train(&text, max_order)).await {
		Ok(Ok(bundle)) => bundle,
		Ok(Err(PpmError::DegenerateVocabulary { .. })) => {
			return error_response(StatusCode::BAD_REQUEST, "Training text yields no symbols");
		}
		Ok(Err(e)) => return ppm_error_response(&e),
		Err(e) => {
			log::error!("Training task failed: {e}");
			return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Training failed");
		}
	};
	let nodes = bundle.node_counts();

	let session = session_or_default(&body.session).to_owned();
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Model lock failed"),
	};
	if shared_data.registry.insert(&session, bundle).is_some() {
		log::info!("Replaced models of session {session}");
	}

	HttpResponse::Ok().json(TrainResponse {
		session,
		message: "Training complete for all levels".to_owned(),
		nodes,
	})
}

/// HTTP POST endpoint `/v1/predict`
///
/// Returns the ranked next-symbol predictions for `input` at `level`.
#[post("/v1/predict")]
async fn post_predict(
	data: web::Data<Mutex<SharedData>>,
	config: web::Data<ServerConfig>,
	body: web::Json<PredictBody>,
) -> impl Responder {
	let (input, level) = match (&body.input, &body.level) {
		(Some(input), Some(level)) if !input.is_empty() && !level.is_empty() => (input, level),
		_ => return error_response(StatusCode::BAD_REQUEST, "Input text and level are required"),
	};
	let level = match parse_level(level) {
		Ok(level) => level,
		Err(response) => return response,
	};

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Model lock failed"),
	};
	let model = match shared_data
		.registry
		.get_mut(session_or_default(&body.session))
		.and_then(|bundle| bundle.model_mut(level))
	{
		Ok(model) => model,
		Err(e) => return ppm_error_response(&e),
	};

	let limit = body.limit.unwrap_or(config.default_limit);
	HttpResponse::Ok().json(predict_text(model, level, input, Some(limit)))
}

/// HTTP GET endpoint `/v1/generate`
///
/// Samples a continuation of `seed` from the model of `level`.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let level = match query.level.as_deref() {
		Some(level) if !level.is_empty() => match parse_level(level) {
			Ok(level) => level,
			Err(response) => return response,
		},
		_ => return error_response(StatusCode::BAD_REQUEST, "Level is required"),
	};
	let seed = query.seed.as_deref().unwrap_or_default();
	let length = query.length.unwrap_or(20);
	if length > MAX_GENERATE_LENGTH {
		return error_response(
			StatusCode::BAD_REQUEST,
			&format!("length must be <= {MAX_GENERATE_LENGTH}"),
		);
	}

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Model lock failed"),
	};
	let model = match shared_data
		.registry
		.get(session_or_default(&query.session))
		.and_then(|bundle| bundle.model(level))
	{
		Ok(model) => model,
		Err(e) => return ppm_error_response(&e),
	};

	let symbols = generate(model, level, seed, length, &mut rand::rng());
	HttpResponse::Ok().json(GenerateResponse { text: join_symbols(level, &symbols), symbols })
}

#[get("/v1/sessions")]
async fn get_sessions(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Model lock failed"),
	};
	HttpResponse::Ok().json(shared_data.registry.session_ids())
}

#[delete("/v1/sessions/{session}")]
async fn delete_session(data: web::Data<Mutex<SharedData>>, path: web::Path<String>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Model lock failed"),
	};
	let session = path.into_inner();
	match shared_data.registry.remove(&session) {
		Some(_) => HttpResponse::Ok().json(serde_json::json!({ "session": session, "message": "Session removed" })),
		None => error_response(StatusCode::NOT_FOUND, &PpmError::UnknownSession(session).to_string()),
	}
}

/// Registers every endpoint.
pub fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(post_train)
		.service(post_predict)
		.service(get_generated)
		.service(get_sessions)
		.service(delete_session);
}
