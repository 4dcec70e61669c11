//! Cart subcommands.
//!
//! Each invocation opens the persisted cart, performs one operation, and
//! renders the resulting cart. Notices are surfaced through the tracing
//! sink; a failed operation also exits non-zero.

use rocket_shoes_cart::{CartConfig, CartStore, CatalogClient, JsonFileStorage, TracingSink};
use rocket_shoes_core::ProductId;

type Store = CartStore<CatalogClient, JsonFileStorage, TracingSink>;

fn open_store() -> Result<Store, Box<dyn std::error::Error>> {
    let config = CartConfig::from_env()?;
    let catalog = CatalogClient::new(&config.catalog)?;
    let storage = JsonFileStorage::new(&config.storage_path);
    tracing::debug!(path = %storage.path().display(), "opening cart");

    Ok(CartStore::open(catalog, storage, TracingSink)?)
}

/// Add one unit of a product to the cart.
pub async fn add(id: i32) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;
    store.add_product(ProductId::new(id)).await?;
    render(&store);
    Ok(())
}

/// Remove a product from the cart.
pub async fn remove(id: i32) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;
    store.remove_product(ProductId::new(id))?;
    render(&store);
    Ok(())
}

/// Set the quantity of a product already in the cart.
pub async fn set(id: i32, amount: u32) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store()?;
    store.update_product_amount(ProductId::new(id), amount).await?;
    render(&store);
    Ok(())
}

/// Show the cart contents.
pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    render(&store);
    Ok(())
}

/// Render the cart as a table.
#[allow(clippy::print_stdout)]
fn render(store: &Store) {
    if store.items().is_empty() {
        println!("Cart is empty");
        return;
    }

    println!("{:>6}  {:<40}  {:>10}  {:>6}  {:>10}", "ID", "PRODUCT", "PRICE", "QTY", "TOTAL");
    for item in store.items() {
        println!(
            "{:>6}  {:<40}  {:>10}  {:>6}  {:>10}",
            item.id().to_string(),
            item.product.title,
            item.product.price.to_string(),
            item.amount,
            format!("${:.2}", item.product.price.line_total(item.amount)),
        );
    }
    println!(
        "{} items, subtotal ${:.2}",
        store.total_quantity(),
        store.subtotal()
    );
}
