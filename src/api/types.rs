//! Tipos de dados trocados com o plano de controle e o serviço de
//! processamento.
//!
//! O plano de controle usa o envelope [`ApiResponse`] em todas as respostas e
//! nomes de campo em camelCase; o serviço de processamento usa snake_case.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::ApiError;

/// Envelope `{success, data?, error?, timestamp}` das respostas do plano de
/// controle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    /// Extrai `data` de um envelope bem-sucedido.
    ///
    /// `success: false`, ou `success: true` sem `data`, viram
    /// [`ApiError::Rejected`] com a mensagem do envelope.
    pub fn into_result(self) -> Result<T, ApiError> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(ApiError::Rejected(
                self.error
                    .unwrap_or_else(|| "response envelope carried no data".to_string()),
            )),
        }
    }
}

/// Formato de saída desejado para a partitura.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Pdf,
    Midi,
    Both,
}

/// Opções opcionais de uma criação de job. Campos ausentes não são enviados.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separate_voices: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,
}

impl JobOptions {
    pub fn is_empty(&self) -> bool {
        self == &JobOptions::default()
    }
}

/// Corpo da requisição de criação de job no plano de controle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    pub youtube_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<JobOptions>,
}

impl CreateJobRequest {
    pub fn new(youtube_url: impl Into<String>, options: JobOptions) -> Self {
        Self {
            youtube_url: youtube_url.into(),
            options: (!options.is_empty()).then_some(options),
        }
    }
}

/// Resposta dos endpoints de health (`GET /health` no plano de controle,
/// `GET /` no serviço de processamento).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
}

/// Health detalhado do serviço de processamento (`GET /health`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
}

/// Corpo de `POST /process-audio` no serviço de processamento.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessAudioRequest {
    pub youtube_url: String,
    #[serde(default)]
    pub options: serde_json::Map<String, serde_json::Value>,
}

/// Resposta de `POST /process-audio`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessAudioResponse {
    pub message: String,
    pub youtube_url: String,
    pub status: String,
}
