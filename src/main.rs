//! PageTurner catalog client demo.
//!
//! Renders a checkout page, a title search or the catalog listing as text
//! against a running backend.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pageturner_client::{
    client::CatalogClient,
    config::AppConfig,
    models::Identity,
    services::checkout::{book_id_from_path, CheckoutPage, CheckoutView, LoanCountState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("pageturner_client={}", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("PageTurner client v{}", env!("CARGO_PKG_VERSION"));

    let client = Arc::new(CatalogClient::new(&config.api)?);
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.split_first() {
        Some((cmd, rest)) if cmd.as_str() == "search" => {
            let title = rest.join(" ");
            let (books, page) = client.search_books_by_title(&title, 0, 10).await?;
            println!(
                "{} matching book(s), page {}/{}",
                page.total_elements,
                page.number + 1,
                page.total_pages.max(1)
            );
            for book in books {
                println!(
                    "  #{} {} by {} ({}/{} available)",
                    book.id, book.title, book.author, book.copies_available, book.copies
                );
            }
        }
        Some((arg, _)) => {
            let book_id = arg
                .parse()
                .ok()
                .or_else(|| book_id_from_path(arg))
                .ok_or_else(|| {
                    anyhow::anyhow!("expected a book id or /checkout/{{id}} path, got {arg:?}")
                })?;

            let identity = match std::env::var("PAGETURNER_ACCESS_TOKEN") {
                Ok(token) if !token.is_empty() => Identity::authenticated(token),
                _ => Identity::Anonymous,
            };

            let page = CheckoutPage::mount(client, book_id, &identity);
            render(page.fully_settled().await);
        }
        None => {
            let (books, page) = client.list_books(0, 9).await?;
            println!("Catalog: {} book(s)", page.total_elements);
            for book in books {
                println!("  #{} {} by {}", book.id, book.title, book.author);
            }
        }
    }

    Ok(())
}

fn render(view: CheckoutView) {
    match view {
        CheckoutView::Loading => println!("loading..."),
        CheckoutView::Failed { message } => println!("{message}"),
        CheckoutView::Ready {
            book,
            reviews,
            average_rating,
            loan_count,
        } => {
            println!("{} by {}", book.title, book.author);
            println!("{}", book.description);
            match average_rating {
                Some(stars) => println!("rating: {stars:.1}/5 from {} review(s)", reviews.len()),
                None => println!("no ratings yet"),
            }
            if book.is_available() {
                println!("copies available: {}/{}", book.copies_available, book.copies);
            } else {
                println!("currently unavailable ({} copies total)", book.copies);
            }
            match loan_count {
                LoanCountState::Ready(count) => println!("your active loans: {count}"),
                LoanCountState::Skipped => println!("sign in to see your loans"),
                LoanCountState::Failed(failure) => {
                    println!("loan count unavailable: {}", failure.message)
                }
                LoanCountState::Loading => {}
            }
            for review in reviews.iter().take(3) {
                let text = review.review_description.as_deref().unwrap_or("(no comment)");
                println!("  {} rated {:.0}: {}", review.user_email, review.rating, text);
            }
        }
    }
}
