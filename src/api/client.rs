//! reqwestによるHTTP実装

use super::{HealthResponse, ScanApi};
use crate::error::{MedicalCardError, Result};
use medical_card_common::{AnalysisResult, Endpoint, MultipartRequest, ReportData};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct HttpScanApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpScanApi {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into(),
        })
    }

    fn build_form(request: &MultipartRequest<'_>) -> Result<Form> {
        let file = request.file;
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.media_type)?;

        let form = request
            .fields
            .iter()
            .fold(Form::new().part("file", part), |form, field| {
                form.text(field.name, field.value.clone())
            });
        Ok(form)
    }

    /// マルチパートPOSTしてJSONを受け取る
    ///
    /// 2xx以外は `failed` で包んだエラー。レスポンス本文は解析しない。
    async fn post_multipart<T: DeserializeOwned>(
        &self,
        request: &MultipartRequest<'_>,
        failed: fn(String) -> MedicalCardError,
    ) -> Result<T> {
        let url = request.endpoint.url(&self.base_url);
        debug!(%url, file = %request.file.name, fields = request.fields.len(), "POST multipart");

        let response = self
            .client
            .post(&url)
            .multipart(Self::build_form(request)?)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(failed(format!("{} returned HTTP {}", request.endpoint.path(), status.as_u16())));
        }

        let body = response.text().await?;
        debug!(%url, bytes = body.len(), "response received");
        Ok(serde_json::from_str(&body)?)
    }
}

impl ScanApi for HttpScanApi {
    async fn check_health(&self) -> Result<HealthResponse> {
        let url = Endpoint::Health.url(&self.base_url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();

        Ok(if status.is_success() {
            HealthResponse::Ok
        } else {
            HealthResponse::Status(status.as_u16())
        })
    }

    async fn analyze(&self, request: &MultipartRequest<'_>) -> Result<AnalysisResult> {
        self.post_multipart(request, MedicalCardError::AnalysisFailed).await
    }

    async fn generate_report(&self, request: &MultipartRequest<'_>) -> Result<ReportData> {
        self.post_multipart(request, MedicalCardError::ReportFailed).await
    }
}
