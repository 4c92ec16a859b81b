//! Route table and handlers.

use super::error::ApiError;
use super::state::AppState;
use crate::sse::to_sse_event;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::StreamExt;
use ragcast_application::{EventSink, StreamChatInput};
use ragcast_domain::{ChatRequest, StreamId};
use serde_json::{Value, json};
use std::convert::Infallible;
use tokio_stream::wrappers::ReceiverStream;
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Build the HTTP router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/chat/completions", post(chat_completions))
        .route("/v1/chat/completions", post(chat_completions))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn chat_completions(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let resolved = state.resolve_input.execute(&request).await?;

    if !resolved.streaming {
        let completion = state.complete_chat.execute(&resolved.query).await?;
        return Ok(Json(completion).into_response());
    }

    let stream_id = StreamId::generate();
    debug!("Opening stream {}", stream_id);
    let (sink, events) = EventSink::channel(state.channel_capacity);
    let input = StreamChatInput {
        stream_id,
        query: resolved.query,
        modalities: resolved.modalities,
        audio_format: resolved.audio_format,
    };

    // The session owns the sink; dropping the response body closes it.
    let use_case = state.stream_chat.clone();
    tokio::spawn(async move {
        use_case.execute(input, sink).await;
    });

    let frames =
        ReceiverStream::new(events).map(|event| Ok::<Event, Infallible>(to_sse_event(&event)));
    Ok(Sse::new(frames).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use ragcast_application::{
        CompleteChatUseCase, RequestSettings, ResolveInputUseCase, SpeechError, SpeechRecognizer,
        SpeechSynthesizer, StreamChatUseCase, StreamingParams, UpstreamError, UpstreamGateway,
        UpstreamLines,
    };
    use ragcast_domain::{AudioFormat, UpstreamQuery};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    struct StubGateway {
        lines: Option<Vec<String>>,
        answer: Result<String, UpstreamError>,
    }

    #[async_trait]
    impl UpstreamGateway for StubGateway {
        async fn query(&self, _query: &UpstreamQuery) -> Result<String, UpstreamError> {
            self.answer.clone()
        }

        async fn open_stream(
            &self,
            _query: &UpstreamQuery,
        ) -> Result<UpstreamLines, UpstreamError> {
            match &self.lines {
                Some(lines) => Ok(futures::stream::iter(lines.clone().into_iter().map(Ok)).boxed()),
                None => Err(UpstreamError::Status {
                    status: 404,
                    body: "Not Found".to_string(),
                }),
            }
        }
    }

    struct EchoSpeech;

    #[async_trait]
    impl SpeechSynthesizer for EchoSpeech {
        async fn synthesize(
            &self,
            text: &str,
            _format: &AudioFormat,
        ) -> Result<Vec<u8>, SpeechError> {
            Ok(text.as_bytes().to_vec())
        }
    }

    #[async_trait]
    impl SpeechRecognizer for EchoSpeech {
        async fn transcribe(
            &self,
            audio: &[u8],
            _format: &AudioFormat,
        ) -> Result<String, SpeechError> {
            Ok(String::from_utf8_lossy(audio).into_owned())
        }
    }

    fn app(gateway: StubGateway) -> Router {
        let gateway: Arc<dyn UpstreamGateway> = Arc::new(gateway);
        let params = StreamingParams::default()
            .with_fallback_pacing(Duration::ZERO)
            .with_requery_for_speech(false);
        let state = AppState::new(
            ResolveInputUseCase::new(Arc::new(EchoSpeech), RequestSettings::default()),
            CompleteChatUseCase::new(gateway.clone()),
            StreamChatUseCase::new(gateway, Arc::new(EchoSpeech), params),
        );
        create_router(state)
    }

    fn answering(answer: &str) -> StubGateway {
        StubGateway {
            lines: None,
            answer: Ok(answer.to_string()),
        }
    }

    async fn post_json(
        app: Router,
        uri: &str,
        body: Value,
    ) -> (StatusCode, Option<String>, String) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }

    /// Split an SSE body into `data:` payloads.
    fn data_frames(body: &str) -> Vec<String> {
        assert!(body.ends_with("data: [DONE]\n\n"));
        body.split("\n\n")
            .filter(|frame| !frame.is_empty())
            .map(|frame| frame.strip_prefix("data: ").unwrap().to_string())
            .collect()
    }

    fn delta(content: &str) -> String {
        json!({"object": "chat.completion.chunk", "choices": [{"delta": {"content": content}}]})
            .to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(answering("{}"))
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_non_streaming_completion_has_exact_shape() {
        let (status, _, body) = post_json(
            app(answering(r#"{"response":"Hi there"}"#)),
            "/chat/completions",
            json!({"messages": [{"role": "user", "content": "hello"}], "stream": false}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            body,
            json!({
                "object": "chat.completion",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": "Hi there"},
                    "finish_reason": "stop"
                }]
            })
        );
    }

    #[tokio::test]
    async fn test_no_user_message_is_bad_request() {
        let (status, _, body) = post_json(
            app(answering("{}")),
            "/v1/chat/completions",
            json!({"messages": [{"role": "assistant", "content": "hi"}], "stream": false}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body, json!({"error": {"message": "No user message found"}}));
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let request = Request::builder()
            .method("POST")
            .uri("/chat/completions")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app(answering("{}")).oneshot(request).await.unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_upstream_error_is_bad_gateway() {
        let gateway = StubGateway {
            lines: None,
            answer: Err(UpstreamError::Status {
                status: 500,
                body: "boom".to_string(),
            }),
        };
        let (status, _, body) = post_json(
            app(gateway),
            "/chat/completions",
            json!({"messages": [{"role": "user", "content": "hello"}], "stream": false}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["error"]["message"], "Upstream error: 500 boom");
    }

    #[tokio::test]
    async fn test_streaming_proxy_frames() {
        let gateway = StubGateway {
            lines: Some(vec![delta("Hello"), delta("world."), "raw tail".to_string()]),
            answer: Ok("{}".to_string()),
        };
        let (status, content_type, body) = post_json(
            app(gateway),
            "/chat/completions",
            json!({"messages": [{"role": "user", "content": "hello"}]}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap().starts_with("text/event-stream"));

        let frames = data_frames(&body);
        assert_eq!(frames.len(), 3);
        assert_eq!(frames.iter().filter(|f| *f == "[DONE]").count(), 1);

        let chunks: Vec<Value> = frames[..2]
            .iter()
            .map(|f| serde_json::from_str(f).unwrap())
            .collect();
        assert_eq!(chunks[0]["choices"][0]["delta"]["content"], "Hello world.");
        assert_eq!(chunks[1]["choices"][0]["delta"]["content"], "raw tail");
        assert_eq!(chunks[0]["id"], chunks[1]["id"]);
        assert_eq!(chunks[0]["object"], "chat.completion.chunk");
    }

    #[tokio::test]
    async fn test_streaming_fallback_audio_only() {
        let (status, _, body) = post_json(
            app(answering(r#"{"response":"one two three"}"#)),
            "/chat/completions",
            json!({
                "modalities": ["audio"],
                "messages": [{"role": "user", "content": "hello"}]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let frames = data_frames(&body);
        assert_eq!(frames.last().map(String::as_str), Some("[DONE]"));

        let chunks: Vec<Value> = frames[..frames.len() - 1]
            .iter()
            .map(|f| serde_json::from_str(f).unwrap())
            .collect();
        assert!(!chunks.is_empty());
        for chunk in &chunks {
            let delta = &chunk["choices"][0]["delta"];
            assert!(delta.get("content").is_none());
            let audio_id = delta["audio"]["id"].as_str().unwrap();
            assert_eq!(audio_id, format!("{}-audio", chunk["id"].as_str().unwrap()));
        }
    }

    #[tokio::test]
    async fn test_streaming_fallback_failure_is_terminated() {
        let gateway = StubGateway {
            lines: None,
            answer: Err(UpstreamError::Unavailable("connection refused".to_string())),
        };
        let (_, _, body) = post_json(
            app(gateway),
            "/chat/completions",
            json!({"messages": [{"role": "user", "content": "hello"}]}),
        )
        .await;

        let frames = data_frames(&body);
        assert_eq!(frames.len(), 2);
        let chunk: Value = serde_json::from_str(&frames[0]).unwrap();
        assert_eq!(
            chunk["choices"][0]["delta"]["content"],
            "Upstream request failed: connection refused"
        );
    }
}
