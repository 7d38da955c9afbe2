//! Interface de linha de comando do SolfaMe baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (validate, submit,
//! status, watch, health) e flags globais (--api-base, --processing-base,
//! --verbose).

use clap::{Parser, Subcommand, ValueEnum};

use solfame::api::{JobOptions, OutputFormat};

/// SolfaMe: transcrição de áudio para notação solfa.
#[derive(Debug, Parser)]
#[command(name = "solfame", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Endereço base do plano de controle (sobrescreve config e ambiente).
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Endereço base do serviço de processamento.
    #[arg(long, global = true)]
    pub processing_base: Option<String>,

    /// Imprime jobs como JSON em vez do resumo colorido.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

/// Formato de saída aceito pela CLI, mapeado para [`OutputFormat`].
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Pdf,
    Midi,
    Both,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Pdf => OutputFormat::Pdf,
            FormatArg::Midi => OutputFormat::Midi,
            FormatArg::Both => OutputFormat::Both,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verifica localmente se a URL tem um formato reconhecido.
    Validate {
        url: String,
    },

    /// Cria um job de transcrição para a URL informada.
    Submit {
        url: String,

        /// Tonalidade desejada para a partitura.
        #[arg(long)]
        target_key: Option<String>,

        /// Separa as vozes (soprano, alto, tenor, baixo).
        #[arg(long)]
        separate_voices: bool,

        /// Formato de saída.
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Acompanha o job até terminar.
        #[arg(long)]
        wait: bool,
    },

    /// Mostra o estado atual de um job.
    Status {
        id: String,
    },

    /// Acompanha um job até ele terminar.
    Watch {
        id: String,
    },

    /// Consulta o health do plano de controle e do serviço de processamento.
    Health,
}

impl Command {
    /// Opções de criação montadas a partir das flags de `submit`.
    pub fn job_options(&self) -> JobOptions {
        match self {
            Command::Submit {
                target_key,
                separate_voices,
                format,
                ..
            } => JobOptions {
                target_key: target_key.clone(),
                separate_voices: separate_voices.then_some(true),
                output_format: format.map(OutputFormat::from),
            },
            _ => JobOptions::default(),
        }
    }
}
