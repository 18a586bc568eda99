//! Wine quality prediction handlers.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use sommelier_core::{ModelHandle, WineFeatures};

use crate::extract::{Json, ValidateJson};
use crate::handler::Result;
use crate::handler::request::PredictionRequest;
use crate::handler::response::{ErrorResponse, Prediction};
use crate::service::ServiceState;

/// Tracing target for prediction operations.
const TRACING_TARGET: &str = "sommelier_server::handler::predictions";

/// Predicts the quality score of one wine sample.
///
/// Requests are fully validated before the model is consulted.
#[tracing::instrument(skip_all, fields(algorithm = model.name()))]
async fn predict(
    State(model): State<ModelHandle>,
    ValidateJson(request): ValidateJson<PredictionRequest>,
) -> Result<(StatusCode, Json<Prediction>)> {
    let features = WineFeatures::from(request);
    let result = model.predict(&features)?;

    tracing::debug!(target: TRACING_TARGET, result, "Prediction computed");

    Ok((StatusCode::OK, Json(Prediction::from(result))))
}

fn predict_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Predict wine quality")
        .description(
            "Scores one wine sample with the model loaded at startup. All eleven \
            measurements are required; values may be numbers or numeric strings.",
        )
        .response::<200, Json<Prediction>>()
        .response::<400, Json<ErrorResponse<'static>>>()
        .response::<500, Json<ErrorResponse<'static>>>()
}

/// Returns routes for wine quality predictions.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/predict", post_with(predict, predict_docs))
        .with_path_items(|item| item.tag("predictions"))
}

#[cfg(test)]
mod tests {
    use std::future::IntoFuture;

    use axum::body::Bytes;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use futures::future::join_all;
    use serde_json::json;
    use sommelier_core::{ArtifactLoader, FEATURE_NAMES, ModelHandle};

    use crate::handler::router;
    use crate::handler::test::{
        CountingModel, FailingModel, create_test_server, create_test_server_with_model,
        create_test_server_with_state, reference_request, write_constant_model, write_linear_model,
    };
    use crate::middleware::{BodyLimitConfig, CorsConfig, OpenApiConfig, RouterSecurityExt};
    use crate::service::{ModelProvider, ServiceConfig, ServiceState};

    #[tokio::test]
    async fn reference_input_uses_loaded_model() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let server = create_test_server(dir.path(), 5.0).await?;

        let response = server.post("/predict").json(&reference_request()).await;
        response.assert_status_ok();
        response.assert_json(&json!({ "result": 5.0 }));
        Ok(())
    }

    #[tokio::test]
    async fn missing_field_never_reaches_model() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let model = CountingModel::new(5.0);
        let server = create_test_server_with_model(dir.path(), model.handle()).await?;

        let mut body = reference_request();
        body.as_object_mut().unwrap().remove("pH");

        let response = server.post("/predict").json(&body).await;
        response.assert_status_bad_request();

        let error = response.json::<serde_json::Value>();
        assert_eq!(error["name"], "bad_request");
        assert!(error["context"].as_str().unwrap().contains("pH"));
        assert_eq!(model.calls(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn each_missing_field_is_rejected() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let model = CountingModel::new(5.0);
        let server = create_test_server_with_model(dir.path(), model.handle()).await?;

        for name in FEATURE_NAMES {
            let mut body = reference_request();
            body.as_object_mut().unwrap().remove(name);

            let response = server.post("/predict").json(&body).await;
            response.assert_status_bad_request();
        }

        assert_eq!(model.calls(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_values_are_rejected() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let model = CountingModel::new(5.0);
        let server = create_test_server_with_model(dir.path(), model.handle()).await?;

        for value in [json!("abc"), json!(null), json!(true), json!([7.4]), json!("NaN")] {
            let mut body = reference_request();
            body["fixed_acidity"] = value.clone();

            let response = server.post("/predict").json(&body).await;
            response.assert_status_bad_request();
        }

        assert_eq!(model.calls(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_field_is_rejected() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let model = CountingModel::new(5.0);
        let server = create_test_server_with_model(dir.path(), model.handle()).await?;

        let mut body = reference_request();
        body["colour"] = json!("red");

        let response = server.post("/predict").json(&body).await;
        response.assert_status_bad_request();
        assert_eq!(model.calls(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn numeric_strings_are_accepted() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let model = CountingModel::new(6.5);
        let server = create_test_server_with_model(dir.path(), model.handle()).await?;

        let mut body = reference_request();
        body["alcohol"] = json!("9.4");
        body["pH"] = json!("3.51");

        let response = server.post("/predict").json(&body).await;
        response.assert_status_ok();
        response.assert_json(&json!({ "result": 6.5 }));
        assert_eq!(model.calls(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let model = CountingModel::new(5.0);
        let server = create_test_server_with_model(dir.path(), model.handle()).await?;

        let response = server
            .post("/predict")
            .bytes(Bytes::from_static(b"{\"fixed_acidity\": 7.4,"))
            .content_type("application/json")
            .await;
        response.assert_status_bad_request();

        let response = server.post("/predict").text("7.4").await;
        response.assert_status_bad_request();

        assert_eq!(model.calls(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn inference_failure_is_internal_error() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let server =
            create_test_server_with_model(dir.path(), ModelHandle::new(FailingModel)).await?;

        let response = server.post("/predict").json(&reference_request()).await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<serde_json::Value>()["message"],
            "Prediction failed"
        );
        Ok(())
    }

    #[tokio::test]
    async fn predictions_survive_artifact_removal() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let server = create_test_server(dir.path(), 5.0).await?;
        std::fs::remove_file(dir.path().join("model.json"))?;

        let response = server.post("/predict").json(&reference_request()).await;
        response.assert_status_ok();
        response.assert_json(&json!({ "result": 5.0 }));
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_requests_share_one_model() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let model = CountingModel::new(6.0);
        let server = create_test_server_with_model(dir.path(), model.handle()).await?;

        let body = reference_request();
        let requests = (0..32).map(|_| server.post("/predict").json(&body).into_future());
        for response in join_all(requests).await {
            response.assert_status_ok();
            response.assert_json(&json!({ "result": 6.0 }));
        }

        assert_eq!(model.calls(), 32);
        Ok(())
    }

    #[tokio::test]
    async fn overflowing_prediction_is_internal_error() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write_linear_model(dir.path())?;
        let config = ServiceConfig::builder().with_model_path(path).build()?;
        let server = create_test_server_with_state(ServiceState::from_config(&config).await?)?;

        let response = server.post("/predict").json(&reference_request()).await;
        response.assert_status_ok();
        assert!(response.json::<serde_json::Value>()["result"].is_f64());

        let mut body = reference_request();
        let overflowing = [
            "fixed_acidity",
            "volatile_acidity",
            "citric_acid",
            "residual_sugar",
            "chlorides",
        ];
        for name in overflowing {
            body[name] = json!(1.0e308);
        }

        let response = server.post("/predict").json(&body).await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let error = response.json::<serde_json::Value>();
        assert_eq!(error["message"], "Prediction failed");
        assert!(error["context"].as_str().unwrap().contains("non-finite"));
        Ok(())
    }

    #[tokio::test]
    async fn oversized_body_is_payload_too_large() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let model = CountingModel::new(5.0);
        let path = write_constant_model(dir.path(), 0.0)?;
        let provider = ModelProvider::new(ArtifactLoader::new(path));
        let state = ServiceState::from_parts(model.handle(), provider);

        let limits = BodyLimitConfig { max_body_size: 64 };
        let app = router(state, &OpenApiConfig::default())
            .with_security(&CorsConfig::default(), &limits);
        let server = TestServer::new(app)?;

        let response = server.post("/predict").json(&reference_request()).await;
        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);

        let error = response.json::<serde_json::Value>();
        assert_eq!(error["name"], "payload_too_large");
        assert_eq!(model.calls(), 0);
        Ok(())
    }
}
