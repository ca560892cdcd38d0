use clap::{Args, Parser};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

/// Place an order against a running server
#[derive(Parser, Debug)]
#[command(name = "order-mailer")]
#[command(about = "client cli used by guests or front desk staff to place orders", version, long_about = None
)]
struct Cli {
    #[arg(long, default_value = "http://localhost:5000", help = "Base url of the server")]
    host: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser, Debug)]
enum Commands {
    /// send an order to the restaurant
    #[command(arg_required_else_help = true)]
    Order(OrderArgs),
}

#[derive(Debug, Args)]
struct OrderArgs {
    #[arg(long = "item", help = "Item to order, repeat for more items.", value_name = "ITEM", required = true)]
    items: Vec<String>,
    #[arg(long, help = "Room number to deliver to.")]
    room: Option<String>,
    #[arg(long, help = "Email the restaurant can reply to.")]
    email: String,
    #[arg(long, help = "Send the order url-encoded instead of json.")]
    form: bool,
}

#[derive(Debug, Deserialize)]
struct OrderResponse {
    message: Option<String>,
    error: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Cli::parse();

    match args.command {
        Commands::Order(order) => {
            println!("placing order with {} item(s)", order.items.len());
            let request = Client::new().post(format!("{}/place_order", args.host.trim_end_matches('/')));
            let request = if order.form {
                let mut pairs: Vec<(&str, &str)> = order.items.iter().map(|i| ("items[]", i.as_str())).collect();
                if let Some(room) = order.room.as_deref() {
                    pairs.push(("room_number", room));
                }
                pairs.push(("userEmail", order.email.as_str()));
                request.form(&pairs)
            } else {
                request.json(&serde_json::json!({
                    "items": order.items,
                    "room_number": order.room,
                    "userEmail": order.email,
                }))
            };
            let res = request.send().await?;
            let status = res.status();
            let body = res.json::<OrderResponse>().await.ok();
            match status {
                StatusCode::OK => {
                    println!("{}", body.and_then(|b| b.message).unwrap_or("order placed".to_string()));
                },
                StatusCode::BAD_REQUEST => {
                    println!("order rejected: {}", body.and_then(|b| b.error).unwrap_or_default());
                },
                StatusCode::INTERNAL_SERVER_ERROR => {
                    println!("restaurant could not be reached, please try again later");
                },
                unexpected => {
                    println!("got unexpected status code, {}", unexpected);
                },
            }
        }
    };
    Ok(())
}
