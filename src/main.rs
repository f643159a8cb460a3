use litreview::clients::build_client;
use litreview::config::CREDENTIAL_PREFIX;
use litreview::event::ConsoleEventHandler;
use litreview::feedback::StdinFeedback;
use litreview::papers::SemanticScholarSource;
use litreview::precheck::{probe_endpoint, validate_credential};
use litreview::reference::HUMAN_WRITTEN_REVIEW;
use litreview::scoring::calculate_rouge_score;
use litreview::workflow::LiteratureReviewWorkflow;
use litreview::{ReviewConfig, ReviewError};
use std::process;
use std::sync::Arc;

async fn precheck(config: &ReviewConfig) -> Result<(), ReviewError> {
    println!("\n[Pre-check] Verifying configuration and API access...");
    validate_credential(&config.model.api_key, CREDENTIAL_PREFIX).map_err(|e| {
        ReviewError::Config(format!(
            "GROQ_API_KEY is missing or invalid ({}). Set it to a valid key.",
            e
        ))
    })?;
    probe_endpoint(&config.model).await?;
    println!("[OK] API key is valid and the endpoint is reachable.");
    println!("[Pre-check] All checks passed.\n");
    Ok(())
}

async fn run(config: ReviewConfig) -> Result<(), ReviewError> {
    let workflow = LiteratureReviewWorkflow::new(
        config.clone(),
        build_client(&config.model),
        Arc::new(SemanticScholarSource::new(&config.papers)),
    )
    .with_event_handler(Arc::new(ConsoleEventHandler));

    println!("\nRunning literature review generator workflow...");
    let review = workflow
        .run(&config.topic, &config.paper_titles, &StdinFeedback::new())
        .await?;

    println!("\nAI-Generated Literature Review:\n");
    println!("{}", review);

    println!("\nComparing AI-generated review with human-written review using ROUGE metrics...");
    let scores = calculate_rouge_score(&review, HUMAN_WRITTEN_REVIEW);
    println!("\nROUGE Scores:");
    match serde_json::to_string_pretty(&scores) {
        Ok(json) => println!("{}", json),
        Err(_) => println!("{}", scores),
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    litreview::init_logger();

    let config = match ReviewConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            println!("[ERROR] {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = precheck(&config).await {
        println!("[ERROR] {}", e);
        process::exit(1);
    }

    if let Err(e) = run(config).await {
        log::error!("litreview: {}", e);
        eprintln!("[ERROR] {}", e);
        process::exit(1);
    }
}
