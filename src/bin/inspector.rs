//! Gateway Inspector CLI binary.
//!
//! Decodes captured request/response bodies and browses the gateway's
//! request log.
//!
//! # Commands
//!
//! - `decode` - Pretty-print a captured body
//! - `render` - Render a captured body as markup-safe HTML
//! - `classify` - Report the detected body format
//! - `extract` - Reconstruct the assistant reply for an API type
//! - `logs` - List and show request logs from a running gateway

use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use inspector::{
    client::GatewayClient,
    config::Config,
    inspect::{LogInspection, PayloadView},
    models::{ApiType, RequestLogFilter, RequestLogPage},
    payload, InspectorError, VERSION,
};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "inspector")]
#[command(version = VERSION)]
#[command(about = "Gateway Inspector - Decode captured LLM gateway traffic", long_about = None)]
struct Cli {
    /// Config file (default: <config_dir>/gateway-inspector/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a captured body (pretty JSON, reformatted SSE, or raw text)
    Decode {
        /// Body input (or - for stdin)
        input: Option<String>,

        /// Input file path
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render a captured body as markup-safe HTML
    Render {
        /// Body input (or - for stdin)
        input: Option<String>,

        /// Input file path
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Escape only, without JSON highlighting
        #[arg(long)]
        no_highlight: bool,
    },

    /// Report the detected format of a captured body
    Classify {
        /// Body input (or - for stdin)
        input: Option<String>,

        /// Input file path
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Extract the assistant reply from a captured response body
    Extract {
        /// Body input (or - for stdin)
        input: Option<String>,

        /// Input file path
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// API type (openai_chat_completions, openai_responses, openai_models, anthropic_messages)
        #[arg(short, long)]
        api_type: String,
    },

    /// Browse the gateway request log
    Logs {
        #[command(subcommand)]
        action: LogsAction,
    },
}

#[derive(Subcommand)]
enum LogsAction {
    /// List recent requests
    List {
        /// Page size (default: from config)
        #[arg(short, long)]
        limit: Option<u32>,

        /// Number of entries to skip
        #[arg(long, default_value = "0")]
        offset: u32,

        /// Filter by upstream model
        #[arg(long)]
        model: Option<String>,

        /// Filter by alias
        #[arg(long)]
        alias: Option<String>,

        /// Filter by provider
        #[arg(long)]
        provider: Option<String>,

        /// Filter by client IP
        #[arg(long)]
        client_ip: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one request with decoded bodies and the assistant reply
    Show {
        /// Request id
        request_id: Uuid,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Print markup-safe HTML instead of decoded text
        #[arg(long)]
        html: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Decode {
            input,
            file,
            output,
        } => cmd_decode(input, file, output),

        Commands::Render {
            input,
            file,
            output,
            no_highlight,
        } => cmd_render(input, file, output, !no_highlight && config.display.highlight),

        Commands::Classify { input, file } => cmd_classify(input, file),

        Commands::Extract {
            input,
            file,
            api_type,
        } => cmd_extract(input, file, &api_type),

        Commands::Logs { action } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(cmd_logs(action, &config))
        },
    }
}

fn cmd_decode(
    input: Option<String>,
    file: Option<PathBuf>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let body = read_input(input, file)?;
    write_output(output, &payload::decode(Some(body.as_slice())))
}

fn cmd_render(
    input: Option<String>,
    file: Option<PathBuf>,
    output: Option<PathBuf>,
    highlight: bool,
) -> anyhow::Result<()> {
    let body = read_input(input, file)?;
    let decoded = payload::decode(Some(body.as_slice()));
    let html = if highlight {
        payload::render_text(&decoded)
    } else {
        payload::escape_html(&decoded)
    };
    write_output(output, &html)
}

fn cmd_classify(input: Option<String>, file: Option<PathBuf>) -> anyhow::Result<()> {
    let body = read_input(input, file)?;
    println!("{}", payload::classify(Some(body.as_slice())));
    Ok(())
}

fn cmd_extract(input: Option<String>, file: Option<PathBuf>, api_type: &str) -> anyhow::Result<()> {
    let api_type: ApiType = api_type.parse()?;
    let body = read_input(input, file)?;

    match payload::extract(Some(body.as_slice()), Some(api_type)) {
        Some(reply) => {
            println!("{reply}");
            Ok(())
        },
        None => {
            eprintln!("No assistant content found for {api_type}");
            std::process::exit(1);
        },
    }
}

async fn cmd_logs(action: LogsAction, config: &Config) -> anyhow::Result<()> {
    let client = GatewayClient::new(&config.gateway)?;

    let result = match action {
        LogsAction::List {
            limit,
            offset,
            model,
            alias,
            provider,
            client_ip,
            json,
        } => {
            let filter = RequestLogFilter {
                model,
                alias,
                provider,
                client_ip,
            };
            let limit = limit.unwrap_or(config.display.page_size);
            match client.list_request_logs(limit, offset, &filter).await {
                Ok(page) if json => {
                    println!("{}", serde_json::to_string_pretty(&page)?);
                    Ok(())
                },
                Ok(page) => {
                    print_log_page(&page, offset);
                    Ok(())
                },
                Err(e) => Err(e),
            }
        },

        LogsAction::Show {
            request_id,
            json,
            html,
        } => match client.get_request_log(request_id).await {
            Ok(log) => {
                let inspection = LogInspection::with_highlight(&log, config.display.highlight);
                if json {
                    println!("{}", serde_json::to_string_pretty(&inspection)?);
                } else {
                    print_inspection(&inspection, html);
                }
                Ok(())
            },
            Err(e) => Err(e),
        },
    };

    match result {
        Ok(()) => Ok(()),
        Err(InspectorError::Unauthorized) => {
            eprintln!("Session expired or missing: set INSPECTOR_TOKEN or [gateway].token");
            std::process::exit(2);
        },
        Err(e) => Err(e.into()),
    }
}

fn print_log_page(page: &RequestLogPage, offset: u32) {
    println!(
        "Request logs ({}-{} of {}):",
        if page.data.is_empty() { 0 } else { offset + 1 },
        offset as usize + page.data.len(),
        page.total
    );
    println!();
    println!(
        "{:<36} {:<24} {:<24} {:<12} {:>6} {:>8}",
        "ID", "API Type", "Model", "Provider", "Status", "Latency"
    );
    println!("{}", "-".repeat(115));

    for entry in &page.data {
        println!(
            "{:<36} {:<24} {:<24} {:<12} {:>6} {:>8}",
            entry.request_id,
            entry.api_type.map_or("-", |t| t.as_str()),
            entry.model.as_deref().unwrap_or("-"),
            entry.provider.as_deref().unwrap_or("-"),
            entry
                .status_code
                .map_or_else(|| "-".to_string(), |s| s.to_string()),
            entry
                .latency_ms
                .map_or_else(|| "-".to_string(), |ms| format!("{ms}ms")),
        );
    }
}

fn print_inspection(inspection: &LogInspection, html: bool) {
    println!("Request: {}", inspection.request_id);
    println!(
        "API Type: {}",
        inspection.api_type.map_or("unknown", |t| t.as_str())
    );

    for view in [&inspection.request, &inspection.response] {
        print_payload(view, html);
    }

    println!();
    match &inspection.assistant_reply {
        Some(reply) => {
            println!("Assistant Reply:");
            println!("{reply}");
        },
        None => println!("Assistant Reply: (none)"),
    }
}

fn print_payload(view: &PayloadView, html: bool) {
    println!();
    let size = view
        .size
        .map_or_else(|| "not captured".to_string(), |n| format!("{n} bytes"));
    println!("{:?} Body [{}, {}]:", view.role, view.format, size);
    println!("{}", if html { &view.html } else { &view.decoded });
}

// Helper functions

fn read_input(input: Option<String>, file: Option<PathBuf>) -> anyhow::Result<Vec<u8>> {
    if let Some(path) = file {
        Ok(std::fs::read(path)?)
    } else if let Some(s) = input.filter(|s| s != "-") {
        Ok(s.into_bytes())
    } else {
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer)?;
        Ok(buffer)
    }
}

fn write_output(output: Option<PathBuf>, content: &str) -> anyhow::Result<()> {
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}
