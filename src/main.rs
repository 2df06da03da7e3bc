use anyhow::{Context, Result};
use clap::Parser;
use sonosub::config::Config;
use sonosub::pipeline::{print_summary, run_pipeline, PipelineConfig};
use sonosub::store::TranscriptStore;
use sonosub::subtitle::DEFAULT_WORDS_PER_CUE;
use sonosub::transcribe::SonioxClient;
use sonosub::translate::{GeminiTranslator, Translator, DEFAULT_CHUNK_LINE_THRESHOLD};
use std::fs;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "sonosub")]
#[command(version, about = "Transcripts and translated WebVTT subtitles from audio URLs")]
struct Cli {
    /// URL of the audio file to transcribe
    audio_url: String,

    /// Translate subtitles to a target language (repeatable, e.g. --translate fr)
    #[arg(long = "translate", value_name = "LANG")]
    translate_to: Vec<String>,

    /// Directory to write the .txt and .vtt output files
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Words per subtitle cue
    #[arg(long, default_value_t = DEFAULT_WORDS_PER_CUE)]
    words_per_cue: usize,

    /// Maximum subtitle lines per translation request
    #[arg(long, default_value_t = DEFAULT_CHUNK_LINE_THRESHOLD)]
    chunk_lines: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = Config::load().context("Failed to load configuration")?;
    config
        .validate(!cli.translate_to.is_empty())
        .context("Configuration validation failed")?;

    let api_key = config
        .soniox_api_key
        .clone()
        .context("SONIOX_API_KEY not set")?;
    let mut transcriber =
        SonioxClient::new(api_key).with_language_hints(config.language_hints.clone());
    if let Some(ref base) = config.api_base {
        transcriber = transcriber.with_api_base(base.clone());
    }

    let translator: Option<GeminiTranslator> = config
        .gemini_api_key
        .clone()
        .map(GeminiTranslator::new);

    let store = TranscriptStore::new(config.data_dir());

    let pipeline_config = PipelineConfig {
        translate_to: cli.translate_to,
        words_per_cue: cli.words_per_cue,
        chunk_line_threshold: cli.chunk_lines,
        show_progress: true,
    };

    let result = run_pipeline(
        &cli.audio_url,
        &transcriber,
        translator.as_ref().map(|t| t as &dyn Translator),
        &store,
        &pipeline_config,
    )
    .await?;

    fs::create_dir_all(&cli.output_dir)?;
    let txt_path = cli.output_dir.join(format!("{}.txt", result.record.id));
    let vtt_path = cli.output_dir.join(format!("{}.vtt", result.record.id));
    fs::write(&txt_path, &result.record.text)?;
    fs::write(&vtt_path, &result.record.vtt)?;
    info!("Wrote {} and {}", txt_path.display(), vtt_path.display());

    for (lang, vtt) in &result.record.translations {
        let path = cli
            .output_dir
            .join(format!("{}.{}.vtt", result.record.id, lang));
        fs::write(&path, vtt)?;
        info!("Wrote {}", path.display());
    }

    print_summary(&result);

    Ok(())
}
