//! Tipos de erro para o cliente HTTP do plano de controle e do serviço de
//! processamento.
//!
//! Define [`ApiError`] com variantes para respostas HTTP não-2xx, falhas de
//! rede e envelopes rejeitados. Usa `thiserror` para derivar `Display` e
//! `Error` a partir dos atributos `#[error(...)]`.

use thiserror::Error;

/// Erros que podem ocorrer em uma chamada do [`ApiClient`](super::ApiClient).
///
/// Nenhuma variante é retentada internamente; o chamador decide a política
/// de recuperação.
#[derive(Debug, Error)]
pub enum ApiError {
    /// O servidor respondeu com um status fora da faixa 2xx.
    /// O corpo da resposta não é lido.
    #[error("HTTP {status}: {status_text}")]
    Transport { status: u16, status_text: String },

    /// Falha de rede subjacente (DNS, conexão recusada) ou corpo que não é
    /// JSON válido. Encapsula o erro original do `reqwest` via `#[from]`.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// O envelope `{success, data, error}` chegou com `success: false` ou sem `data`.
    #[error("request rejected: {0}")]
    Rejected(String),
}

impl ApiError {
    /// Código HTTP, quando a falha veio de uma resposta do servidor.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Transport { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            ApiError::Rejected(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_display() {
        let err = ApiError::Transport {
            status: 500,
            status_text: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn rejected_display() {
        let err = ApiError::Rejected("Invalid YouTube URL".into());
        assert_eq!(err.to_string(), "request rejected: Invalid YouTube URL");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ApiError>();
    }
}
