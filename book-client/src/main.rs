use book_client::view::{render_detail, render_list};
use book_client::{BookClient, ClientError, DEFAULT_BASE_URL};
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("book_client=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let base_url = std::env::var("BOOK_SERVICE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let client = BookClient::new(base_url);
    info!("Using book service at {}", client.base_url());

    let args: Vec<String> = std::env::args().collect();

    let book_id = match args.get(1) {
        None => None,
        Some(arg) => match arg.parse::<u32>() {
            Ok(id) => Some(id),
            Err(e) => {
                error!("Invalid book id '{}': {}", arg, e);
                info!("Usage: book-client [book_id]");
                std::process::exit(1);
            }
        },
    };

    client.wait_until_ready(5, Duration::from_secs(2)).await?;

    match book_id {
        None => {
            let books = client.list_books().await?;
            print!("{}", render_list(&books));
        }
        Some(id) => match client.get_book(id).await {
            Ok(book) => print!("{}", render_detail(&book)),
            Err(e @ (ClientError::NotFound(_) | ClientError::BadRequest(_))) => {
                error!("{}", e);
                std::process::exit(1);
            }
            Err(e) => return Err(e.into()),
        },
    }

    Ok(())
}
