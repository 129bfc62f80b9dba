use super::common::{print_error, print_info, print_success, runtime, CliContext};
use crate::api::{CatalogProduct, MarketplaceApi, ProductInput};
use anyhow::{bail, Result};
use tracing::{info, warn};

pub fn cmd_products(api_url: Option<&str>, id: Option<String>) -> Result<()> {
    let ctx = CliContext::load()?;
    let api = ctx.api(api_url);
    let rt = runtime()?;

    match id {
        Some(id) => {
            let product = rt.block_on(api.product(&id));
            match product {
                Ok(Some(product)) => print!("{}", describe_product(&product)),
                Ok(None) => bail!("Product {} not found", id),
                Err(e) => {
                    warn!("CLI products: {}", e);
                    bail!(e.user_message("Could not load the product"));
                }
            }
        }
        None => match rt.block_on(api.products()) {
            Ok(products) if products.is_empty() => print_info("No products"),
            Ok(products) => {
                for product in &products {
                    println!("{}", product_line(product));
                }
            }
            Err(e) => {
                warn!("CLI products: {}", e);
                bail!(e.user_message("Could not load products"));
            }
        },
    }
    Ok(())
}

pub fn cmd_update_product(api_url: Option<&str>, id: &str, input: ProductInput) -> Result<()> {
    if input.is_empty() {
        print_error("Nothing to update. Pass at least one of --name, --price, --description, --category");
        std::process::exit(1);
    }

    let ctx = CliContext::load()?;
    let api = ctx.api(api_url);
    match runtime()?.block_on(api.update_product(id, &input)) {
        Ok(Some(product)) => {
            info!("CLI: updated product {}", product.id);
            print_success(&format!("Updated {}", product.id));
            print!("{}", describe_product(&product));
            Ok(())
        }
        Ok(None) => bail!("Product {} was not updated", id),
        Err(e) => {
            warn!("CLI update-product: {}", e);
            bail!(e.user_message("Could not update the product"));
        }
    }
}

pub fn cmd_delete_product(api_url: Option<&str>, id: &str) -> Result<()> {
    let ctx = CliContext::load()?;
    let api = ctx.api(api_url);
    match runtime()?.block_on(api.delete_product(id)) {
        Ok(Some(result)) if result.success => {
            info!("CLI: deleted product {}", id);
            print_success(result.message.as_deref().unwrap_or("Product deleted"));
            Ok(())
        }
        Ok(result) => {
            let message = result
                .and_then(|r| r.message)
                .unwrap_or_else(|| format!("Product {} was not deleted", id));
            bail!(message)
        }
        Err(e) => {
            warn!("CLI delete-product: {}", e);
            bail!(e.user_message("Could not delete the product"));
        }
    }
}

fn product_line(product: &CatalogProduct) -> String {
    let name = product.name.as_deref().unwrap_or("(unnamed)");
    let price = product
        .price
        .map(|p| format!("{:.2}", p))
        .unwrap_or_else(|| "-".to_string());
    match product.category.as_deref() {
        Some(category) => format!("{}  {}  {}  [{}]", product.id, name, price, category),
        None => format!("{}  {}  {}", product.id, name, price),
    }
}

fn describe_product(product: &CatalogProduct) -> String {
    let mut out = format!("id:          {}\n", product.id);
    let fields = [
        ("name", product.name.clone()),
        ("price", product.price.map(|p| format!("{:.2}", p))),
        ("category", product.category.clone()),
        ("description", product.description.clone()),
        ("created", product.created_at.clone()),
        ("updated", product.updated_at.clone()),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            out.push_str(&format!("{:<13}{}\n", format!("{}:", label), value));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> CatalogProduct {
        CatalogProduct {
            id: "p1".to_string(),
            name: Some("Bicycle".to_string()),
            price: Some(4500.0),
            description: None,
            category: Some("sports".to_string()),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_product_line() {
        assert_eq!(product_line(&product()), "p1  Bicycle  4500.00  [sports]");

        let bare = CatalogProduct {
            name: None,
            price: None,
            category: None,
            ..product()
        };
        assert_eq!(product_line(&bare), "p1  (unnamed)  -");
    }

    #[test]
    fn test_describe_skips_missing_fields() {
        let text = describe_product(&product());
        assert!(text.starts_with("id:          p1\n"));
        assert!(text.contains("price:       4500.00"));
        assert!(!text.contains("description"));
    }
}
