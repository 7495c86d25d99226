//! Strike CLI - command line access to the Strike payments API

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::error::Error as _;
use strike_lib::{
    Amount, CreateSubscriptionRequest, Currency, DEFAULT_API_VERSION, DEFAULT_BASE_URL,
    EventType, NewInvoiceRequest, StrikeClient, StrikeError, UpdateSubscriptionRequest,
};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "strike")]
#[command(about = "Command line client for the Strike payments API", long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    log_verbosity: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json: bool,

    /// API key sent as a bearer token
    #[arg(long, env = "STRIKE_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// API version segment appended to the base URL
    #[arg(long, env = "STRIKE_API_VERSION", default_value = DEFAULT_API_VERSION, global = true)]
    api_version: String,

    /// Base URL of the Strike API
    #[arg(long, env = "STRIKE_API_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current exchange rates
    Rates,

    /// Show the public profile of an account
    Profile(ProfileTarget),

    /// Issue, inspect and cancel invoices
    #[command(subcommand)]
    Invoices(InvoiceCommands),

    /// Inspect webhook events
    #[command(subcommand)]
    Events(EventCommands),

    /// Manage webhook subscriptions
    #[command(subcommand)]
    Subscriptions(SubscriptionCommands),
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct ProfileTarget {
    /// Account id
    #[arg(long)]
    id: Option<String>,

    /// Account handle
    #[arg(long)]
    handle: Option<String>,
}

#[derive(Args)]
struct InvoiceArgs {
    /// Amount as a decimal string (e.g. "15.00")
    #[arg(long)]
    amount: String,

    /// Currency of the amount (BTC, USD, EUR, USDT, GBP)
    #[arg(long)]
    currency: Currency,

    /// Free-form description shown to the payer
    #[arg(long)]
    description: Option<String>,

    /// Caller-side reference for reconciliation
    #[arg(long)]
    correlation_id: Option<String>,
}

impl From<InvoiceArgs> for NewInvoiceRequest {
    fn from(args: InvoiceArgs) -> Self {
        let mut request = NewInvoiceRequest::new(Amount::new(args.currency, args.amount));
        if let Some(description) = args.description {
            request = request.with_description(description);
        }
        if let Some(correlation_id) = args.correlation_id {
            request = request.with_correlation_id(correlation_id);
        }
        request
    }
}

#[derive(Subcommand)]
enum InvoiceCommands {
    /// List invoices
    List,

    /// Show one invoice
    Get {
        #[arg(value_name = "INVOICE_ID")]
        id: String,
    },

    /// Issue an invoice payable to the calling account
    Create(InvoiceArgs),

    /// Issue an invoice payable to another account
    CreateFor {
        /// Handle of the receiving account
        #[arg(value_name = "HANDLE")]
        handle: String,

        #[command(flatten)]
        invoice: InvoiceArgs,
    },

    /// Generate a payment quote for an invoice
    Quote {
        #[arg(value_name = "INVOICE_ID")]
        id: String,
    },

    /// Cancel an unpaid invoice
    Cancel {
        #[arg(value_name = "INVOICE_ID")]
        id: String,
    },
}

#[derive(Subcommand)]
enum EventCommands {
    /// List events
    List,

    /// Show one event
    Get {
        #[arg(value_name = "EVENT_ID")]
        id: String,
    },
}

#[derive(Subcommand)]
enum SubscriptionCommands {
    /// List webhook subscriptions
    List,

    /// Show one subscription
    Get {
        #[arg(value_name = "SUBSCRIPTION_ID")]
        id: String,
    },

    /// Create a webhook subscription
    Create {
        /// URL that receives webhook deliveries
        #[arg(long)]
        url: String,

        /// Secret used to sign deliveries
        #[arg(long)]
        secret: String,

        /// Event type to subscribe to (repeatable: --event-type invoice.created)
        #[arg(long = "event-type", value_name = "TYPE")]
        event_types: Vec<String>,

        /// Create the subscription disabled
        #[arg(long)]
        disabled: bool,
    },

    /// Update fields of a webhook subscription
    Update {
        #[arg(value_name = "SUBSCRIPTION_ID")]
        id: String,

        /// New webhook URL
        #[arg(long)]
        url: Option<String>,

        /// New signing secret
        #[arg(long)]
        secret: Option<String>,

        /// Enable or disable deliveries
        #[arg(long)]
        enabled: Option<bool>,

        /// Replace the subscribed event types (repeatable)
        #[arg(long = "event-type", value_name = "TYPE")]
        event_types: Vec<String>,
    },

    /// Delete a webhook subscription
    Delete {
        #[arg(value_name = "SUBSCRIPTION_ID")]
        id: String,
    },
}

/// Initialize tracing subscriber based on verbosity and output format
fn init_tracing(verbose: u8, json: bool) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,strike=info,strike_lib=info".to_string(),
            2 => "info,strike=debug,strike_lib=debug".to_string(),
            _ => "debug,strike=trace,strike_lib=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_thread_ids(false)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), StrikeError> {
    let rendered = serde_json::to_string_pretty(value).map_err(StrikeError::Encode)?;
    println!("{rendered}");
    Ok(())
}

fn event_types(raw: Vec<String>) -> Vec<EventType> {
    raw.into_iter().map(EventType::from).collect()
}

async fn run(client: &StrikeClient, command: Commands) -> Result<(), StrikeError> {
    match command {
        Commands::Rates => print_json(&client.get_rates().await?),

        Commands::Profile(target) => {
            let profile = match (target.id, target.handle) {
                (Some(id), _) => client.fetch_public_profile_by_id(id).await?,
                (None, Some(handle)) => client.fetch_public_profile_by_handle(handle).await?,
                // clap rejects this combination before we get here
                (None, None) => return Ok(()),
            };
            print_json(&profile)
        }

        Commands::Invoices(command) => match command {
            InvoiceCommands::List => print_json(&client.get_invoices().await?),
            InvoiceCommands::Get { id } => print_json(&client.find_invoice_by_id(id).await?),
            InvoiceCommands::Create(args) => print_json(&client.new_invoice(args.into()).await?),
            InvoiceCommands::CreateFor { handle, invoice } => {
                print_json(&client.new_invoice_for_receiver(handle, invoice.into()).await?)
            }
            InvoiceCommands::Quote { id } => print_json(&client.new_quote(id).await?),
            InvoiceCommands::Cancel { id } => print_json(&client.cancel_invoice(id).await?),
        },

        Commands::Events(command) => match command {
            EventCommands::List => print_json(&client.get_events().await?),
            EventCommands::Get { id } => print_json(&client.find_event_by_id(id).await?),
        },

        Commands::Subscriptions(command) => match command {
            SubscriptionCommands::List => print_json(&client.get_subscriptions().await?),
            SubscriptionCommands::Get { id } => {
                print_json(&client.get_subscription_by_id(id).await?)
            }
            SubscriptionCommands::Create {
                url,
                secret,
                event_types: raw,
                disabled,
            } => {
                let request = CreateSubscriptionRequest::new(url, secret, event_types(raw))
                    .with_enabled(!disabled);
                print_json(&client.create_subscription(request).await?)
            }
            SubscriptionCommands::Update {
                id,
                url,
                secret,
                enabled,
                event_types: raw,
            } => {
                let mut request = UpdateSubscriptionRequest::new();
                if let Some(url) = url {
                    request = request.with_webhook_url(url);
                }
                if let Some(secret) = secret {
                    request = request.with_secret(secret);
                }
                if let Some(enabled) = enabled {
                    request = request.with_enabled(enabled);
                }
                if !raw.is_empty() {
                    request = request.with_event_types(event_types(raw));
                }
                print_json(&client.update_subscription(id, request).await?)
            }
            SubscriptionCommands::Delete { id } => {
                client.delete_subscription(&id).await?;
                tracing::info!(subscription = %id, "subscription deleted");
                Ok(())
            }
        },
    }
}

/// Writes a failed call to stderr: the uniform message, then the HTTP status
/// and the remote error body when there is one.
fn report_error(err: &StrikeError) {
    eprintln!("{err}");
    if !err.is_request_failure() {
        return;
    }

    if let StrikeError::InvalidPathValue { param, value } = err {
        eprintln!("invalid {param}: {value:?}");
        return;
    }

    match (err.status(), err.status_text()) {
        (Some(status), Some(text)) => eprintln!("status: {status} {text}"),
        (Some(status), None) => eprintln!("status: {status}"),
        (None, _) => {
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("caused by: {cause}");
                source = cause.source();
            }
        }
    }

    if let Some(body) = err.body() {
        match serde_json::to_string_pretty(body) {
            Ok(rendered) => eprintln!("{rendered}"),
            Err(_) => eprintln!("{body}"),
        }
    }
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_verbosity, cli.json);

    let Some(api_key) = cli.api_key else {
        eprintln!("Error: no API key provided (use --api-key or set STRIKE_API_KEY)");
        std::process::exit(1);
    };

    let client = match StrikeClient::builder(api_key)
        .base_url(cli.base_url)
        .api_version(cli.api_version)
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    tracing::debug!(base_url = %client.base_url(), "Strike CLI starting");

    if let Err(e) = run(&client, cli.command).await {
        report_error(&e);
        std::process::exit(1);
    }
}
