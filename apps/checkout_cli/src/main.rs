use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{anyhow, Context, Result};
use checkout_core::{
    config::load_settings, resolve_endpoint, MediaGallery, Notification, NotificationSink,
    OrderFormController, OrderSubmissionClient, TracingNotificationSink,
};
use clap::Parser;
use shared::{
    catalog::{ProductCatalog, StaticCatalog},
    domain::{OrderField, Product},
    error::SubmissionResult,
};
use tracing_subscriber::EnvFilter;

/// Place a single order for the storefront product.
#[derive(Parser, Debug)]
struct Args {
    /// Order-intake endpoint; overrides checkout.toml and ORDER_ENDPOINT_URL.
    #[arg(long)]
    endpoint: Option<String>,
    /// TOML file describing the product; defaults to the built-in catalog.
    #[arg(long)]
    product: Option<PathBuf>,
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    address: String,
    #[arg(long, default_value_t = 1)]
    quantity: u32,
    /// Print notifications as JSON lines.
    #[arg(long)]
    json: bool,
    /// Print the product page (details, features, images) before ordering.
    #[arg(long)]
    show_product: bool,
}

struct ConsoleSink {
    json: bool,
}

impl NotificationSink for ConsoleSink {
    fn notify(&self, notification: Notification) {
        if self.json {
            match serde_json::to_string(&notification) {
                Ok(line) => println!("{line}"),
                Err(err) => tracing::error!(error = %err, "failed to encode notification"),
            }
        } else {
            println!("{}: {}", notification.title, notification.description);
        }
        TracingNotificationSink.notify(notification);
    }
}

fn load_product(path: Option<&PathBuf>) -> Result<Product> {
    let Some(path) = path else {
        return Ok(StaticCatalog::default().product().clone());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read product file '{}'", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("invalid product file '{}'", path.display()))
}

fn print_product(product: &Product) {
    let gallery = MediaGallery::for_product(product);
    println!("{} - ${}", product.name(), product.unit_price());
    if !product.description().is_empty() {
        println!("{}", product.description());
    }
    for feature in product.features() {
        println!("  * {feature}");
    }
    for (index, url, selected) in gallery.thumbnails() {
        let marker = if selected { ">" } else { " " };
        println!("{marker} [{}] {url}", index + 1);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let product = load_product(args.product.as_ref())?;
    let endpoint = match args.endpoint.as_deref() {
        Some(raw) => resolve_endpoint(Some(raw)),
        None => load_settings().endpoint(),
    };

    let controller = OrderFormController::new(
        product,
        endpoint,
        Arc::new(OrderSubmissionClient::new()),
        Arc::new(ConsoleSink { json: args.json }),
    );
    if args.show_product {
        print_product(controller.product());
    }

    controller.open_dialog().await;
    for (field, value) in [
        (OrderField::FullName, args.name),
        (OrderField::Email, args.email),
        (OrderField::Phone, args.phone),
        (OrderField::ShippingAddress, args.address),
    ] {
        controller.update_field(field, value).await?;
    }
    controller
        .set_quantity(i64::from(args.quantity) - 1)
        .await?;
    if let Some(total) = controller.total_price().await {
        tracing::info!(quantity = args.quantity, total = %total, "order total");
    }

    match controller.submit().await {
        Some(SubmissionResult::Success) => Ok(()),
        Some(SubmissionResult::Failed(failure)) => Err(anyhow!("order was not placed: {failure}")),
        None => Err(anyhow!("an order submission is already in progress")),
    }
}

#[cfg(test)]
mod tests {
    use std::{
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    #[test]
    fn parses_order_arguments() {
        let args = Args::try_parse_from([
            "checkout",
            "--name",
            "Jane Doe",
            "--email",
            "jane@x.com",
            "--quantity",
            "3",
            "--json",
        ])
        .expect("args");
        assert_eq!(args.name, "Jane Doe");
        assert_eq!(args.quantity, 3);
        assert!(args.json);
        assert!(args.phone.is_empty());
        assert!(args.endpoint.is_none());
    }

    #[test]
    fn loads_default_product_without_file() {
        let product = load_product(None).expect("product");
        assert_eq!(product.name(), "Limited Edition Mechanical Watch");
    }

    #[test]
    fn loads_product_from_toml_file() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("checkout_product_test_{suffix}.toml"));
        fs::write(
            &path,
            "name = \"Desk Lamp\"\nunit_price = \"49.50\"\nfeatures = [\"Dimmable\"]\n",
        )
        .expect("write product");

        let product = load_product(Some(&path)).expect("product");
        assert_eq!(product.name(), "Desk Lamp");
        assert_eq!(product.unit_price().to_string(), "49.50");
        assert_eq!(product.features(), ["Dimmable".to_string()]);

        fs::remove_file(path).expect("cleanup");
    }
}
