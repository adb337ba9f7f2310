use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pickup_geo::Geocoder;
use pickup_resolver::{PickupCaches, PickupRequest, PickupResolver};
use pickup_shopify::ShopifyGqlClient;

#[derive(Debug, Parser)]
#[command(name = "pickup-cli")]
#[command(about = "Click & collect pickup resolution, from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve pickup locations for a customer postcode.
    Resolve {
        /// Shop domain (e.g. example.myshopify.com).
        #[arg(long)]
        shop: String,

        /// Customer postcode (4 or 6 digits).
        #[arg(long)]
        pincode: String,

        /// Product variant to cross-reference inventory for.
        #[arg(long)]
        variant_id: Option<String>,

        /// Search radius override in kilometers.
        #[arg(long)]
        radius_km: Option<f64>,

        /// Admin API access token for the shop.
        #[arg(long, env = "SHOPIFY_ACCESS_TOKEN", hide_env_values = true)]
        access_token: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = pickup_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Resolve {
            shop,
            pincode,
            variant_id,
            radius_km,
            access_token,
        } => {
            let geocoder = Geocoder::new(
                config.google_maps_api_key.clone(),
                config.geocoder_mode,
                config.http_timeout_secs,
                &config.user_agent,
            )?;
            let shopify = ShopifyGqlClient::new(
                &shop,
                &access_token,
                &config.shopify_api_version,
                config.http_timeout_secs,
                &config.user_agent,
            )?;
            let resolver = PickupResolver::new(
                Arc::new(geocoder),
                shopify,
                Arc::new(PickupCaches::new()),
                config.default_radius_km,
            );

            let result = resolver
                .resolve_pickup(&PickupRequest {
                    pincode,
                    variant_id,
                    radius_km,
                })
                .await?;

            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
