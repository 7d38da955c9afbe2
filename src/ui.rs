//! Interface de terminal do SolfaMe: spinners e saída colorida.
//!
//! Usa as crates `indicatif` para spinners de progresso e `console` para
//! estilização com cores. O [`JobProgress`] acompanha visualmente um job
//! enquanto ele é processado.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use solfame::api::{HealthResponse, ServiceHealth};
use solfame::job::{Job, JobStatus, format_duration};

/// Estilo de terminal equivalente à dica de exibição de cada status.
fn status_style(status: JobStatus) -> Style {
    match status {
        JobStatus::Pending => Style::new().yellow(),
        JobStatus::Processing => Style::new().blue(),
        JobStatus::Completed => Style::new().green().bold(),
        JobStatus::Failed => Style::new().red().bold(),
    }
}

/// Indicador visual de progresso de um job no terminal.
pub struct JobProgress {
    pb: ProgressBar,
}

impl JobProgress {
    /// Inicia o spinner para o job informado.
    pub fn start(id: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(format!("{id}: waiting"));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Self { pb }
    }

    /// Atualiza a mensagem do spinner com o status observado.
    pub fn update(&self, job: &Job) {
        let status = job.status();
        self.pb.set_message(format!(
            "{}: {}",
            job.id(),
            status_style(status).apply_to(status)
        ));
    }

    /// Encerra o spinner e limpa a linha.
    pub fn clear(&self) {
        self.pb.finish_and_clear();
    }
}

/// Imprime um resumo do job: status, metadados e resultados ou erro.
pub fn print_job(job: &Job) {
    let status = job.status();
    let style = status_style(status);
    let dim = Style::new().dim();

    println!("{} {}", style.apply_to(status), job.id());
    println!("  {} {}", dim.apply_to("source:"), job.source_url());
    println!(
        "  {} {}",
        dim.apply_to("updated:"),
        job.updated_at().to_rfc3339()
    );

    if let Some(meta) = job.metadata() {
        println!(
            "  {} {} ({}, {} Hz, {} ch, {})",
            dim.apply_to("media:"),
            meta.title,
            format_duration(meta.duration),
            meta.sample_rate,
            meta.channels,
            meta.format
        );
    }

    if let Some(results) = job.results() {
        println!(
            "  {} {} in {}, {} bpm, confidence {:.0}%",
            dim.apply_to("score:"),
            results.key_signature,
            results.time_signature,
            results.tempo,
            results.overall_confidence * 100.0
        );
        for voice in &results.voice_parts {
            println!(
                "    {:<8} {:>4} notes  {:.0}%",
                voice.part,
                voice.notes.len(),
                voice.confidence * 100.0
            );
        }
    }

    if let Some(error) = job.error() {
        println!("  {} {error}", Style::new().red().apply_to("error:"));
    }
}

/// Imprime o resultado da verificação de health dos dois serviços.
pub fn print_health(
    control: Result<HealthResponse, String>,
    processing: Result<ServiceHealth, String>,
) {
    let ok = Style::new().green().bold();
    let bad = Style::new().red().bold();

    match control {
        Ok(h) => println!("{} {} {} ({})", ok.apply_to("✓"), h.service, h.version, h.status),
        Err(e) => println!("{} control plane: {e}", bad.apply_to("✗")),
    }
    match processing {
        Ok(h) => println!("{} {} {} ({})", ok.apply_to("✓"), h.service, h.version, h.status),
        Err(e) => println!("{} processing service: {e}", bad.apply_to("✗")),
    }
}
