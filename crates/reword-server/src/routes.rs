use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use reword_core::{LengthPreference, ParaphraseRequest, ParaphraseResult, SimpleRng, Style};
use reword_engine::Engine;

/// Paragraph cap for a single bulk request.
const MAX_PARAGRAPHS: usize = 50;

pub struct AppState {
    pub engine: Engine,
    seed: AtomicU64,
}

impl AppState {
    pub fn new(engine: Engine) -> Self {
        let base = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(1);
        Self {
            engine,
            seed: AtomicU64::new(base),
        }
    }

    /// Fresh seed per request unless the caller pins one.
    fn next_seed(&self) -> u64 {
        self.seed.fetch_add(0x9e3779b97f4a7c15, Ordering::Relaxed)
    }
}

// ─── Request / Response types ────────────────────────────────

#[derive(Deserialize)]
struct LookupQuery {
    #[serde(default)]
    word: String,
}

#[derive(Deserialize)]
struct ParaphraseBody {
    #[serde(default)]
    sentence: String,
    #[serde(flatten)]
    options: ParaphraseRequest,
    /// Pin the RNG seed for reproducible output.
    #[serde(default)]
    seed: Option<u64>,
}

/// Bulk carries its own option fields: its variation default (3) is lower
/// than the single-sentence default.
#[derive(Deserialize)]
struct BulkBody {
    #[serde(default)]
    paragraphs: Vec<String>,
    #[serde(default = "default_bulk_variations")]
    num_variations: usize,
    #[serde(default)]
    style: Style,
    #[serde(default)]
    length_preference: LengthPreference,
    #[serde(default)]
    anti_detection: bool,
    #[serde(default)]
    seed: Option<u64>,
}

fn default_bulk_variations() -> usize {
    3
}

#[derive(Serialize)]
struct BulkItem {
    index: usize,
    original: String,
    success: bool,
    result: ParaphraseResult,
}

#[derive(Serialize)]
struct BulkError {
    index: usize,
    error: String,
}

#[derive(Serialize)]
struct BulkResponse {
    success: usize,
    errors: usize,
    results: Vec<BulkItem>,
    errors_detail: Vec<BulkError>,
    settings: BulkSettings,
}

#[derive(Serialize)]
struct BulkSettings {
    num_variations: usize,
    style: Style,
    length_preference: LengthPreference,
    anti_detection: bool,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn bad_request(message: &str) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

// ─── Routes ──────────────────────────────────────────────────

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/lookup", get(lookup))
        .route("/api/paraphrase", post(paraphrase))
        .route("/api/bulk-paraphrase", post(bulk_paraphrase))
}

// ─── Handlers ────────────────────────────────────────────────

async fn lookup(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LookupQuery>,
) -> impl IntoResponse {
    let word = query.word.trim();
    if word.is_empty() {
        return bad_request("word is required");
    }
    Json(state.engine.lookup(word)).into_response()
}

async fn paraphrase(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ParaphraseBody>,
) -> impl IntoResponse {
    let sentence = body.sentence.trim().to_string();
    if sentence.is_empty() {
        return bad_request("sentence is required");
    }
    let mut rng = SimpleRng::new(body.seed.unwrap_or_else(|| state.next_seed()));
    let result = state.engine.paraphrase(&sentence, &body.options, &mut rng);
    tracing::debug!(
        variations = result.variations.len(),
        best_score = result.best_score,
        "paraphrase complete"
    );
    Json(result).into_response()
}

async fn bulk_paraphrase(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BulkBody>,
) -> impl IntoResponse {
    if body.paragraphs.is_empty() {
        return bad_request("paragraphs is required");
    }
    if body.paragraphs.len() > MAX_PARAGRAPHS {
        return bad_request("too many paragraphs (limit 50)");
    }

    let base_seed = body.seed.unwrap_or_else(|| state.next_seed());
    let options = ParaphraseRequest {
        num_variations: body.num_variations,
        style: body.style,
        length_preference: body.length_preference,
        anti_detection: body.anti_detection,
    };
    let settings = BulkSettings {
        num_variations: options.num_variations,
        style: options.style,
        length_preference: options.length_preference,
        anti_detection: options.anti_detection,
    };

    let worker_state = state.clone();
    let paragraphs = body.paragraphs;
    let task = tokio::task::spawn_blocking(move || {
        paragraphs
            .par_iter()
            .enumerate()
            .map(|(index, paragraph)| {
                // Blank paragraphs become error entries, not silent output.
                let trimmed = paragraph.trim().to_string();
                if trimmed.is_empty() {
                    return (index, trimmed, None);
                }
                let seed =
                    base_seed.wrapping_add((index as u64).wrapping_mul(0x9e3779b97f4a7c15));
                let mut rng = SimpleRng::new(seed);
                let result = worker_state.engine.paraphrase(&trimmed, &options, &mut rng);
                (index, trimmed, Some(result))
            })
            .collect::<Vec<(usize, String, Option<ParaphraseResult>)>>()
    });

    match task.await {
        Ok(items) => {
            let mut results = Vec::new();
            let mut errors_detail = Vec::new();
            for (index, original, outcome) in items {
                match outcome {
                    Some(result) => results.push(BulkItem {
                        index,
                        original,
                        success: true,
                        result,
                    }),
                    None => errors_detail.push(BulkError {
                        index,
                        error: "Empty paragraph".to_string(),
                    }),
                }
            }
            Json(BulkResponse {
                success: results.len(),
                errors: errors_detail.len(),
                results,
                errors_detail,
                settings,
            })
            .into_response()
        }
        Err(err) => {
            tracing::error!(%err, "bulk paraphrase task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "internal error".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reword_lex::MemorySource;

    fn test_state() -> Arc<AppState> {
        let mut source = MemorySource::new();
        source.add_synset("cat.n.01", "n", &["cat", "felid", "mouser"]);
        Arc::new(AppState::new(Engine::new(Arc::new(source))))
    }

    #[tokio::test]
    async fn lookup_rejects_blank_word() {
        let response = lookup(
            State(test_state()),
            Query(LookupQuery {
                word: "   ".to_string(),
            }),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    fn bulk_body(paragraphs: Vec<String>) -> BulkBody {
        BulkBody {
            paragraphs,
            num_variations: 3,
            style: Style::Balanced,
            length_preference: LengthPreference::Same,
            anti_detection: false,
            seed: Some(42),
        }
    }

    #[tokio::test]
    async fn paraphrase_rejects_blank_sentence() {
        let response = paraphrase(
            State(test_state()),
            Json(ParaphraseBody {
                sentence: String::new(),
                options: ParaphraseRequest::default(),
                seed: None,
            }),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn paraphrase_body_reads_the_sentence_field() {
        let body: ParaphraseBody =
            serde_json::from_str(r#"{"sentence": "The cat sat.", "style": "formal"}"#)
                .unwrap();
        assert_eq!(body.sentence, "The cat sat.");
        assert_eq!(body.options.num_variations, 5);
    }

    #[test]
    fn bulk_body_defaults_to_three_variations() {
        let body: BulkBody =
            serde_json::from_str(r#"{"paragraphs": ["The cat sat."]}"#).unwrap();
        assert_eq!(body.num_variations, 3);
        assert!(!body.anti_detection);
    }

    #[tokio::test]
    async fn bulk_rejects_oversized_batches() {
        let response = bulk_paraphrase(
            State(test_state()),
            Json(bulk_body(vec!["The cat sat.".to_string(); MAX_PARAGRAPHS + 1])),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn bulk_reports_blank_paragraphs_as_indexed_errors() {
        let response = bulk_paraphrase(
            State(test_state()),
            Json(bulk_body(vec![
                "   ".to_string(),
                "The cat sat.".to_string(),
            ])),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(payload["success"], 1);
        assert_eq!(payload["errors"], 1);
        assert_eq!(payload["errors_detail"][0]["index"], 0);
        assert_eq!(payload["errors_detail"][0]["error"], "Empty paragraph");
        assert_eq!(payload["results"][0]["index"], 1);
        assert_eq!(payload["results"][0]["success"], true);
        assert_eq!(payload["results"][0]["original"], "The cat sat.");
        assert_eq!(payload["settings"]["num_variations"], 3);
    }

    #[test]
    fn seeds_advance() {
        let state = test_state();
        assert_ne!(state.next_seed(), state.next_seed());
    }
}
