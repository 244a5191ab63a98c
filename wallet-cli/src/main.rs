//! Wallet CLI
//!
//! Drives wallet payments end to end against the simulated native bridge.
//! The platform and environment come from `WALLET_*` environment variables.

mod config;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wallet_bridge::{
    AppleScript, GoogleScript, SimulatedApplePay, SimulatedGateway, SimulatedGooglePay,
    StaticDevice,
};
use wallet_hex::{Checkout, CheckoutOrder, CheckoutOutcome, NativeHost, PaymentRequestService};
use wallet_types::{NativeError, Platform};

#[derive(Parser)]
#[command(name = "wallet")]
#[command(author, version, about = "Wallet payments CLI (simulated device)", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check wallet availability on the device
    Probe,
    /// Open the wallet's add-card flow
    Setup,
    /// Pay for an order with the device wallet
    Pay {
        #[arg(long)]
        amount: Decimal,
        #[arg(long, default_value = "USD")]
        currency: String,
        #[arg(long, default_value = "US")]
        country: String,
        /// Merchant public key (gateway merchant id)
        #[arg(long, env = "WALLET_PUBLIC_KEY")]
        public_key: String,
        /// Processor id of the input currency
        #[arg(long, default_value = "840")]
        currency_id: u64,
        #[arg(long)]
        idempotency_key: Option<String>,
        /// How the simulated user answers the sheet
        #[arg(long, value_enum, default_value = "accept")]
        outcome: SheetOutcome,
    },
    /// Add a card without paying
    AddCard {
        #[arg(long, env = "WALLET_PUBLIC_KEY")]
        public_key: String,
        #[arg(long, default_value = "USD")]
        currency: String,
        #[arg(long, default_value = "US")]
        country: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SheetOutcome {
    Accept,
    Cancel,
    Fail,
}

fn build_host(config: &config::Config, outcome: SheetOutcome) -> NativeHost {
    let device = Arc::new(StaticDevice(config.platform));
    let builder = NativeHost::builder(device)
        .config(config.vendor.clone())
        .environment(config.environment);

    match config.platform {
        Platform::Ios => {
            let script = match outcome {
                SheetOutcome::Accept => AppleScript::accept(),
                // the apple sheet has no dismissal event
                SheetOutcome::Cancel => AppleScript::Idle,
                SheetOutcome::Fail => {
                    AppleScript::FailPresentation(NativeError::new("payment sheet unavailable"))
                }
            };
            builder.apple(Arc::new(SimulatedApplePay::new(script))).build()
        }
        Platform::Android => {
            let script = match outcome {
                SheetOutcome::Accept => GoogleScript::token(),
                SheetOutcome::Cancel => GoogleScript::Cancel,
                SheetOutcome::Fail => {
                    GoogleScript::Fail(NativeError::with_code("8", "internal error"))
                }
            };
            builder.google(Arc::new(SimulatedGooglePay::new(script))).build()
        }
    }
}

fn outcome_json(outcome: &CheckoutOutcome) -> serde_json::Value {
    match outcome {
        CheckoutOutcome::Submitted(receipt) => json!({
            "outcome": "submitted",
            "reference": receipt.reference,
            "redirectUrl": receipt.redirect_url,
        }),
        CheckoutOutcome::Canceled => json!({ "outcome": "canceled" }),
        CheckoutOutcome::AlreadySubmitted => json!({ "outcome": "already_submitted" }),
        CheckoutOutcome::Rejected(reason) => json!({ "outcome": "rejected", "reason": reason }),
        CheckoutOutcome::Failed(reason) => json!({ "outcome": "failed", "reason": reason }),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,wallet_hex=debug,wallet_cli=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = config::Config::from_env()?;

    tracing::info!(
        platform = %config.platform,
        environment = %config.environment,
        "using simulated {} device",
        config.platform.wallet_name()
    );

    match cli.command {
        Commands::Probe => {
            let host = build_host(&config, SheetOutcome::Accept);
            let available = PaymentRequestService::can_make_payments(&host).await?;
            let with_cards = PaymentRequestService::can_make_payments_using_networks(&host).await?;
            let report = json!({
                "platform": config.platform.to_string(),
                "environment": config.environment.to_string(),
                "canMakePayments": available,
                "canMakePaymentsUsingNetworks": with_cards,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Setup => {
            let host = build_host(&config, SheetOutcome::Accept);
            PaymentRequestService::setup(&host).await?;
            println!("✓ Wallet setup flow opened");
        }

        Commands::Pay {
            amount,
            currency,
            country,
            public_key,
            currency_id,
            idempotency_key,
            outcome,
        } => {
            let host = build_host(&config, outcome);
            let checkout = Checkout::new(host, SimulatedGateway::new());
            let order = CheckoutOrder {
                public_key,
                country_code: country,
                currency_code: currency,
                amount,
                currency_id,
                output_currency_id: None,
                idempotency_key,
            };

            let result = if matches!(outcome, SheetOutcome::Cancel)
                && config.platform == Platform::Ios
            {
                // the idle sheet never settles; treat the timeout as a dismissal
                match tokio::time::timeout(std::time::Duration::from_secs(2), checkout.pay(&order))
                    .await
                {
                    Ok(result) => result,
                    Err(_) => CheckoutOutcome::Canceled,
                }
            } else {
                checkout.pay(&order).await
            };

            println!("{}", serde_json::to_string_pretty(&outcome_json(&result))?);
            if matches!(result, CheckoutOutcome::Failed(_) | CheckoutOutcome::Rejected(_)) {
                std::process::exit(1);
            }
        }

        Commands::AddCard {
            public_key,
            currency,
            country,
        } => {
            let host = build_host(&config, SheetOutcome::Cancel);
            let checkout = Checkout::new(host, SimulatedGateway::new());
            checkout.add_card(&public_key, &country, &currency).await?;
            println!("✓ Card setup finished");
        }
    }

    Ok(())
}
