use shopgraph_core::error::ShopgraphError;
use shopgraph_core::model::{Interaction, Product};
use shopgraph_sdk::{Outcome, SessionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn product_line(product: &Product) -> String {
    format!(
        "Product ID: {}, Name: {}, Category: {}, Inventory: {}",
        product.product_id, product.name, product.category, product.inventory
    )
}

pub fn render_outcome(outcome: &Outcome, format: OutputFormat) -> anyhow::Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string(outcome)?);
    }

    let text = match outcome {
        Outcome::Registered { user_index } => {
            format!("User registered successfully. User index: {}", user_index)
        }
        Outcome::LoggedIn { success: true } => "Login successful.".to_string(),
        Outcome::LoggedIn { success: false } => "Invalid username or password.".to_string(),
        Outcome::ProductAdded { .. } => "Product added successfully.".to_string(),
        Outcome::InteractionRecorded {
            kind: Interaction::Browse,
            ..
        } => "Browsing history recorded.".to_string(),
        Outcome::InteractionRecorded {
            kind: Interaction::Purchase,
            ..
        } => "Purchase recorded.".to_string(),
        Outcome::Recommendations {
            user_index,
            products,
        } => with_products(
            format!("Recommended products for user {}:", user_index),
            products,
        ),
        Outcome::Suggestions { query, products } => {
            with_products(format!("Suggestions for '{}':", query), products)
        }
        Outcome::Exit => String::new(),
    };
    Ok(text)
}

pub fn render_error(err: &SessionError, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::json!({
            "error_code": err.error_code(),
            "message": err.to_string(),
        })
        .to_string(),
        OutputFormat::Text => format!("Error [{}]: {}", err.error_code(), err),
    }
}

fn with_products(header: String, products: &[Product]) -> String {
    let mut lines = vec![header];
    lines.extend(products.iter().map(product_line));
    lines.join("\n")
}
