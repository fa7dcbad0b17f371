use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use talent_match::config::AppConfig;
use talent_match::error::AppError;
use talent_match::matching::config::ScoringConfig;
use talent_match::matching::domain::{
    CandidateProfile, ExperienceLevel, JobSpec, MatchInput, OutcomeKind, RemotePolicy,
};
use talent_match::matching::engine::MatchEngine;
use talent_match::matching::repository::MemoryRepository;
use talent_match::matching::router::match_router;
use talent_match::matching::service::MatchService;
use talent_match::telemetry;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Talent Match Scoring Service",
    about = "Run or demonstrate the candidate-job match scoring service from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a built-in sample snapshot and walk through the result
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug, Default)]
struct DemoArgs {
    /// Print the raw result JSON instead of the formatted walkthrough
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Demo(args) => run_demo(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let repository = Arc::new(MemoryRepository::default());
    let service = Arc::new(MatchService::new(
        MatchEngine::new(ScoringConfig::default()),
        repository,
    ));

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(match_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "match scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn demo_input() -> MatchInput {
    MatchInput {
        candidate: CandidateProfile {
            skills: vec![
                "TypeScript".to_string(),
                "React".to_string(),
                "node.js".to_string(),
                "postgres".to_string(),
            ],
            experience_years: 7.5,
            industries: vec!["fintech".to_string()],
            expected_salary: 68_000,
            salary_negotiable: true,
            commute_minutes: Some(35),
            commute_confirmed: true,
            has_work_authorization: true,
            earliest_start: NaiveDate::from_ymd_opt(2026, 10, 12).expect("valid date"),
        },
        job: JobSpec {
            required_skills: vec![
                "typescript".to_string(),
                "react".to_string(),
                "nodejs".to_string(),
            ],
            nice_to_have_skills: vec!["graphql".to_string(), "postgresql".to_string()],
            experience_level: ExperienceLevel::Senior,
            industry: Some("fintech".to_string()),
            salary_ceiling: 65_000,
            remote_policy: RemotePolicy::Hybrid,
            target_start: NaiveDate::from_ymd_opt(2026, 10, 1).expect("valid date"),
            requires_work_authorization: true,
            sponsorship_available: false,
        },
    }
}

fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let repository = Arc::new(MemoryRepository::default());
    let service = MatchService::new(MatchEngine::new(ScoringConfig::default()), repository);

    let stored = service.evaluate(&demo_input())?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stored).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    let result = &stored.result;
    println!("Match scoring demo ({})", result.version);
    println!("Stored as: {}", stored.id.0);

    println!("\nGates ({} overall)", result.gates.overall().label());
    for (name, check) in result.gates.named() {
        println!("- {}: {} ({})", name, check.status.label(), check.detail);
    }

    println!("\nScores");
    println!(
        "- fit {} (skills {}, experience {}, industry {})",
        result.fit_score,
        result.fit_factors.skills.score,
        result.fit_factors.experience.score,
        result.fit_factors.industry.score
    );
    println!(
        "- constraints {} (salary {}, commute {}, start date {})",
        result.constraint_score,
        result.constraint_factors.salary.score,
        result.constraint_factors.commute.score,
        result.constraint_factors.start_date.score
    );
    println!("- overall match {}", result.overall_match);
    println!("- deal probability {}", result.deal_probability);

    println!("\nWhy this score");
    for reason in &result.explainability.top_reasons {
        println!("- {reason}");
    }
    if !result.explainability.top_risks.is_empty() {
        println!("\nRisks");
        for risk in &result.explainability.top_risks {
            println!("- {risk}");
        }
    }
    println!("\nNext action: {}", result.explainability.next_action);
    if let Some(why_not) = &result.explainability.why_not {
        println!("Why not: {why_not}");
    }

    let outcome = service.record_outcome(&stored.id, OutcomeKind::Hired, "offer", None)?;
    println!(
        "\nRecorded outcome '{}' at stage '{}'",
        outcome.outcome.label(),
        outcome.stage
    );

    let report = service.calibration_report(&result.version)?;
    println!(
        "\nCalibration for {}: {} matches, {} hired",
        report.version, report.total_matches, report.total_hired
    );
    for bucket in report.buckets.iter().filter(|bucket| bucket.matches > 0) {
        println!(
            "- {}-{}%: predicted {:.1}, observed {:.1} ({} matches)",
            bucket.lower, bucket.upper, bucket.predicted, bucket.observed, bucket.matches
        );
    }

    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
