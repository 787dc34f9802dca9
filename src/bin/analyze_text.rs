use anyhow::Context;
use clap::Parser;
use emotion_analysis::app::runner::build_analyzer;
use emotion_analysis::config::settings::SettingsOverrides;
use emotion_analysis::config::toml_config::TomlConfig;
use emotion_analysis::domain::model::Approach;
use emotion_analysis::utils::{logger, validation::Validate};
use emotion_analysis::{AnalysisSettings, DashboardView, OpenAiCompatClient};
use std::io::Read;
use std::path::Path;

#[derive(Parser)]
#[command(name = "analyze-text")]
#[command(about = "Analyze a single piece of feedback and show the result")]
struct Args {
    /// Feedback text; read from stdin when omitted
    #[arg(short, long)]
    text: Option<String>,

    #[arg(long, value_enum, default_value_t = Approach::Single)]
    approach: Approach,

    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    #[arg(long)]
    prompts_path: Option<String>,

    /// Print the raw JSON instead of the rendered view
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose, false, None);

    let feedback = match &args.text {
        Some(text) => text.clone(),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("read feedback from stdin")?;
            buffer
        }
    };
    let feedback = feedback.trim();
    if feedback.is_empty() {
        eprintln!("Please enter some feedback to analyze.");
        std::process::exit(2);
    }

    let file_config = args
        .config
        .as_deref()
        .map(TomlConfig::from_file)
        .transpose()
        .context("load configuration file")?;
    let overrides = SettingsOverrides {
        approach: Some(args.approach),
        prompts_path: args.prompts_path.clone(),
        ..Default::default()
    };
    let settings = AnalysisSettings::resolve(file_config.as_ref(), &overrides)?;
    settings.validate()?;

    let client = OpenAiCompatClient::new(&settings.api)?;
    let analyzer = build_analyzer(settings.approach, client, Path::new(&settings.prompts_path))?;

    tracing::info!("Analyzing feedback with the {} approach", settings.approach);
    match analyzer.analyze(feedback).await {
        Ok(result) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                let view = DashboardView::from_result(&result);
                print!("{}", view.render_text());
                println!();
                println!("Analysis JSON");
                println!("{}", serde_json::to_string_pretty(&view.raw)?);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Analysis failed: {}", e);
            eprintln!("Failed to generate analysis");
            std::process::exit(1);
        }
    }
}
