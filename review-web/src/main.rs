//! Servidor web Axum com WebSocket para visualizar a classificação por alvo em tempo real

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use review_core::{
    corpus::demo_reviews,
    pipeline::{PipelineEvent, ReviewPipeline},
    AnalysisError, EmotionLexicon, LexiconError, SentimentLexicon,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

/// Configuração lida das variáveis de ambiente
#[derive(Debug, Clone, PartialEq)]
struct ServerConfig {
    /// `REVIEW_WEB_ADDR`
    addr: String,
    /// `REVIEW_SENTIMENT_LEXICON`: arquivo no formato do VADER
    sentiment_lexicon: Option<String>,
    /// `REVIEW_EMOTION_LEXICON`: arquivo `'palavra': 'emoção',`
    emotion_lexicon: Option<String>,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            addr: non_blank("REVIEW_WEB_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string()),
            sentiment_lexicon: non_blank("REVIEW_SENTIMENT_LEXICON"),
            emotion_lexicon: non_blank("REVIEW_EMOTION_LEXICON"),
        }
    }

    /// Monta o pipeline, carregando os léxicos configurados uma única vez.
    fn build_pipeline(&self) -> Result<ReviewPipeline, LexiconError> {
        let mut pipeline = ReviewPipeline::new();
        if let Some(path) = &self.sentiment_lexicon {
            let lexicon = SentimentLexicon::load(path)?;
            info!(path = %path, words = lexicon.len(), "léxico de sentimento carregado");
            pipeline = pipeline.with_sentiment_lexicon(lexicon);
        }
        if let Some(path) = &self.emotion_lexicon {
            let lexicon = EmotionLexicon::load(path)?;
            info!(path = %path, entries = lexicon.len(), "léxico de emoções carregado");
            pipeline = pipeline.with_emotion_lexicon(lexicon);
        }
        Ok(pipeline)
    }
}

/// Estado compartilhado da aplicação
struct AppState {
    pipeline: ReviewPipeline,
}

#[derive(Deserialize)]
struct TargetRequest {
    target: String,
    review: String,
}

#[derive(Deserialize)]
struct ReviewRequest {
    review: String,
}

#[derive(Deserialize)]
struct BatchRequest {
    target: String,
    reviews: Vec<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env();
    let pipeline = match config.build_pipeline() {
        Ok(pipeline) => pipeline,
        Err(err) => {
            error!(error = %err, "falha ao carregar léxico, abortando");
            std::process::exit(1);
        }
    };
    let state = Arc::new(AppState { pipeline });

    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    info!("🚀 Servidor de avaliações iniciado em http://{}", config.addr);
    axum::serve(listener, app(state)).await
}

fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/demo-reviews", get(demo_reviews_handler))
        .route("/analyze/target", post(analyze_target_handler))
        .route("/analyze/review", post(analyze_review_handler))
        .route("/analyze/batch", post(analyze_batch_handler))
        .route("/ws", get(ws_handler))
        .layer(cors)
        .with_state(state)
}

fn error_response(status: StatusCode, message: impl ToString) -> Response {
    (status, Json(serde_json::json!({ "error": message.to_string() }))).into_response()
}

/// Retorna a página principal HTML
async fn index_handler() -> impl IntoResponse {
    Html(include_str!("templates/index.html"))
}

/// Retorna as avaliações de demonstração
async fn demo_reviews_handler() -> impl IntoResponse {
    Json(demo_reviews())
}

/// Classificação de um alvo via HTTP POST (sem streaming)
async fn analyze_target_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TargetRequest>,
) -> Response {
    info!(target_len = req.target.len(), review_len = req.review.len(), "POST /analyze/target");
    match state.pipeline.analyze_target(&req.target, &req.review) {
        Ok(result) => Json(result).into_response(),
        Err(err) => error_response(StatusCode::BAD_REQUEST, err),
    }
}

/// Análise da avaliação completa
async fn analyze_review_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReviewRequest>,
) -> Response {
    info!(review_len = req.review.len(), "POST /analyze/review");
    match state.pipeline.analyze_review(&req.review) {
        Ok(report) => {
            let summary = report.summary();
            Json(serde_json::json!({ "report": report, "summary": summary })).into_response()
        }
        Err(err @ AnalysisError::Input(_)) => error_response(StatusCode::BAD_REQUEST, err),
        Err(err @ AnalysisError::Scoring(_)) => {
            error!(error = %err, "falha na análise da avaliação");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, err)
        }
    }
}

/// Mesmo alvo em várias avaliações (paralelo, fora do runtime async)
async fn analyze_batch_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BatchRequest>,
) -> Response {
    info!(reviews = req.reviews.len(), "POST /analyze/batch");
    let worker_state = Arc::clone(&state);
    let outcome = tokio::task::spawn_blocking(move || {
        worker_state.pipeline.analyze_batch(&req.target, &req.reviews)
    })
    .await;

    match outcome {
        Ok(Ok(summary)) => Json(summary).into_response(),
        Ok(Err(err)) => error_response(StatusCode::BAD_REQUEST, err),
        Err(err) => {
            error!(error = %err, "tarefa do lote falhou");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "batch task failed")
        }
    }
}

/// Upgrade HTTP → WebSocket
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Lógica do WebSocket: recebe `{target, review}`, executa o pipeline e envia os eventos
async fn handle_websocket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket conectado");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                let events = match serde_json::from_str::<TargetRequest>(&text) {
                    Ok(req) => run_streaming(&state, req).await,
                    Err(err) => vec![PipelineEvent::Error {
                        message: format!("invalid request: {}", err),
                    }],
                };

                for event in &events {
                    let Ok(json) = serde_json::to_string(event) else {
                        continue;
                    };
                    if socket.send(Message::Text(json)).await.is_err() {
                        return; // cliente desconectou
                    }
                    // Pequena pausa para animação visual (passo a passo)
                    tokio::time::sleep(tokio::time::Duration::from_millis(35)).await;
                }
            }
            Message::Close(_) => {
                info!("WebSocket desconectado");
                return;
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            _ => {}
        }
    }
}

/// Roda o pipeline síncrono numa thread bloqueante e coleta os eventos emitidos.
async fn run_streaming(state: &Arc<AppState>, req: TargetRequest) -> Vec<PipelineEvent> {
    info!(target_len = req.target.len(), review_len = req.review.len(), "analisando via WebSocket");

    let (tx, rx) = std::sync::mpsc::channel::<PipelineEvent>();
    let worker_state = Arc::clone(state);
    let handle = tokio::task::spawn_blocking(move || {
        worker_state
            .pipeline
            .analyze_target_streaming(&req.target, &req.review, tx);
    });

    if let Err(err) = handle.await {
        error!(error = %err, "pipeline interrompido");
        return vec![PipelineEvent::Error {
            message: "pipeline task failed".to_string(),
        }];
    }
    rx.try_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use review_core::{LexiconScorer, ReviewPipeline};
    use serde_json::Value;
    use tower::ServiceExt;

    const REVIEW: &str = "The room was small. The wifi was fast and reliable. Breakfast was cold.";

    fn test_app() -> Router {
        app(Arc::new(AppState {
            pipeline: ReviewPipeline::new(),
        }))
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_config_defaults() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config.addr, DEFAULT_ADDR);
        assert_eq!(config.sentiment_lexicon, None);
        assert_eq!(config.emotion_lexicon, None);
    }

    #[test]
    fn test_config_from_lookup() {
        let config = ServerConfig::from_lookup(|key| match key {
            "REVIEW_WEB_ADDR" => Some("127.0.0.1:8080".to_string()),
            "REVIEW_SENTIMENT_LEXICON" => Some("/tmp/vader.txt".to_string()),
            "REVIEW_EMOTION_LEXICON" => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.addr, "127.0.0.1:8080");
        assert_eq!(config.sentiment_lexicon.as_deref(), Some("/tmp/vader.txt"));
        assert_eq!(config.emotion_lexicon, None);
    }

    #[test]
    fn test_missing_lexicon_aborts_pipeline_build() {
        let config = ServerConfig {
            addr: DEFAULT_ADDR.to_string(),
            sentiment_lexicon: Some("/nonexistent/vader_lexicon.txt".to_string()),
            emotion_lexicon: None,
        };
        assert!(matches!(config.build_pipeline(), Err(LexiconError::Io { .. })));
    }

    #[tokio::test]
    async fn test_index_page() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_demo_reviews_route() {
        let request = Request::builder().uri("/demo-reviews").body(Body::empty()).unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let demos: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(!demos.as_array().unwrap().is_empty());
        assert!(demos[0]["target"].is_string());
    }

    #[tokio::test]
    async fn test_analyze_target_positive() {
        let (status, json) = post_json(
            test_app(),
            "/analyze/target",
            serde_json::json!({ "target": "wifi", "review": REVIEW }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "rated");
        assert_eq!(json["label"], "positive");
        assert_eq!(json["context"], "The wifi was fast and");
    }

    #[tokio::test]
    async fn test_analyze_target_not_mentioned() {
        let (status, json) = post_json(
            test_app(),
            "/analyze/target",
            serde_json::json!({ "target": "parking", "review": REVIEW }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "not_mentioned");
    }

    #[tokio::test]
    async fn test_analyze_target_blank_is_bad_request() {
        let (status, json) = post_json(
            test_app(),
            "/analyze/target",
            serde_json::json!({ "target": " ", "review": REVIEW }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("target"));
    }

    #[tokio::test]
    async fn test_analyze_review_summary() {
        let (status, json) = post_json(
            test_app(),
            "/analyze/review",
            serde_json::json!({ "review": "Lovely hotel, amazing view, friendly staff." }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["report"]["sentiment"], "positive");
        assert_eq!(
            json["summary"],
            "Sentiment: Positive Sentiment\n\nEmotion: Overall Satisfied"
        );
    }

    #[tokio::test]
    async fn test_analyze_review_scoring_failure_is_server_error() {
        let pipeline = ReviewPipeline::with_shared_scorer(Arc::new(LexiconScorer::new(
            SentimentLexicon::default(),
        )));
        let app = app(Arc::new(AppState { pipeline }));
        let (status, _) = post_json(app, "/analyze/review", serde_json::json!({ "review": "nice" })).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_analyze_batch() {
        let (status, json) = post_json(
            test_app(),
            "/analyze/batch",
            serde_json::json!({
                "target": "breakfast",
                "reviews": [REVIEW, "The breakfast was great.", "Nice pool."]
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["negative"], 1);
        assert_eq!(json["positive"], 1);
        assert_eq!(json["not_mentioned"], 1);
        assert_eq!(json["items"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_run_streaming_collects_events() {
        let state = Arc::new(AppState {
            pipeline: ReviewPipeline::new(),
        });
        let events = run_streaming(
            &state,
            TargetRequest {
                target: "wifi".to_string(),
                review: REVIEW.to_string(),
            },
        )
        .await;
        assert!(matches!(events.first(), Some(PipelineEvent::SentencesSegmented { .. })));
        assert!(matches!(events.last(), Some(PipelineEvent::TargetDone { .. })));
    }
}
