use std::num::NonZeroU32;

use clap::{Parser, Subcommand};
use shop_sdk::ShopClient;

use shop_server::protocol::Request;
use shop_server::store::{CartId, ProductId};

#[derive(Parser)]
#[command(name = "shop-cli")]
#[command(about = "One-shot client for the shop server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "127.0.0.1:8888")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every product
    Products,
    /// Show one product
    Product { product_id: String },
    /// Create an empty cart
    CreateCart,
    /// Add units of a product to a cart
    Add {
        cart_id: String,
        product_id: String,
        quantity: NonZeroU32,
    },
    /// Show a cart
    Cart { cart_id: String },
    /// Turn a cart into an order
    Checkout { cart_id: String },
    /// List every order
    Orders,
}

impl From<Commands> for Request {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Products => Request::GetProducts,
            Commands::Product { product_id } => Request::GetProduct {
                product_id: ProductId::from(product_id),
            },
            Commands::CreateCart => Request::CreateCart,
            Commands::Add {
                cart_id,
                product_id,
                quantity,
            } => Request::AddToCart {
                cart_id: CartId::from(cart_id),
                product_id: ProductId::from(product_id),
                quantity,
            },
            Commands::Cart { cart_id } => Request::GetCart {
                cart_id: CartId::from(cart_id),
            },
            Commands::Checkout { cart_id } => Request::Checkout {
                cart_id: CartId::from(cart_id),
            },
            Commands::Orders => Request::GetOrders,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let request = Request::from(cli.command);

    let mut client = ShopClient::connect(cli.server.as_str()).await?;
    let reply = client.send(&serde_json::to_value(&request)?).await?;
    println!("{}", serde_json::to_string_pretty(&reply)?);

    if !reply.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
