//! Configuração do SolfaMe carregada a partir de `solfame.toml`.
//!
//! A struct [`SolfameConfig`] contém os endereços dos dois serviços HTTP e a
//! política de polling. Valores não presentes no arquivo usam defaults
//! sensíveis. As variáveis de ambiente `SOLFAME_API_BASE` e
//! `AUDIO_SERVICE_URL` têm precedência sobre o arquivo.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::api::{ClientConfig, DEFAULT_API_BASE, DEFAULT_PROCESSING_BASE};
use crate::error::SolfameError;

/// Configuração de nível superior carregada de `solfame.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SolfameConfig {
    /// Endereço base do plano de controle (API de jobs).
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Endereço base do serviço de processamento de áudio.
    #[serde(default = "default_processing_base")]
    pub processing_base: String,

    /// Intervalo entre consultas de status, em milissegundos.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Número máximo de consultas antes de desistir. Sem limite se ausente.
    #[serde(default)]
    pub max_polls: Option<u32>,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_processing_base() -> String {
    DEFAULT_PROCESSING_BASE.to_string()
}

// Valor padrão para o intervalo de polling: 2000ms.
fn default_poll_interval_ms() -> u64 {
    2000
}

impl Default for SolfameConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            processing_base: default_processing_base(),
            poll_interval_ms: default_poll_interval_ms(),
            max_polls: None,
        }
    }
}

impl SolfameConfig {
    /// Carrega a configuração de `solfame.toml` no diretório atual.
    pub fn load() -> Result<Self, SolfameError> {
        Self::load_from(Path::new("solfame.toml"))
    }

    /// Carrega a configuração do caminho informado.
    /// Usa valores padrão se o arquivo não existir.
    pub fn load_from(path: &Path) -> Result<Self, SolfameError> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<SolfameConfig>(&contents)?
        } else {
            Self::default()
        };

        // Variáveis de ambiente têm precedência sobre o arquivo.
        config.apply_env(|key| std::env::var(key).ok());

        config.validate()?;
        log::debug!(
            "config: api_base={} processing_base={}",
            config.api_base,
            config.processing_base
        );
        Ok(config)
    }

    /// Sobrescreve os endereços com `SOLFAME_API_BASE` e `AUDIO_SERVICE_URL`.
    /// Valores vazios são ignorados.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(base) = var("SOLFAME_API_BASE")
            && !base.is_empty()
        {
            self.api_base = base;
        }
        if let Some(base) = var("AUDIO_SERVICE_URL")
            && !base.is_empty()
        {
            self.processing_base = base;
        }
    }

    /// Rejeita endereços vazios, intervalo de polling zero e `max_polls = 0`.
    pub fn validate(&self) -> Result<(), SolfameError> {
        if self.api_base.trim().is_empty() {
            return Err(SolfameError::Config("api_base must not be empty".into()));
        }
        if self.processing_base.trim().is_empty() {
            return Err(SolfameError::Config("processing_base must not be empty".into()));
        }
        if self.poll_interval_ms == 0 {
            return Err(SolfameError::Config("poll_interval_ms must be positive".into()));
        }
        if self.max_polls == Some(0) {
            return Err(SolfameError::Config("max_polls must be positive".into()));
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_base: self.api_base.clone(),
            processing_base: self.processing_base.clone(),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
