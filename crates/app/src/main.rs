//! `shop-demo`: runs the milk scenario against an in-memory shop and logs it.

use anyhow::Context;

use shop_app::{Shop, ShopConfig};
use shop_catalog::ItemDraft;
use shop_core::AggregateRoot;

fn main() -> anyhow::Result<()> {
    let config = ShopConfig::from_env().context("invalid SHOP_* configuration")?;
    shop_observability::init_with(config.log_format);

    let shop = Shop::new(config);

    let milk = shop.items().add(ItemDraft::new("milk", 2.5))?;
    let cart = shop.carts().create();
    shop.carts().add_item(cart.id, milk.id())?;
    let cart = shop.carts().add_item(cart.id, milk.id())?;
    let json = serde_json::to_string(&cart)?;
    tracing::info!(cart = %json, "cart after two adds");

    shop.items().delete(milk.id())?;
    let cart = shop.carts().get(cart.id)?;
    let json = serde_json::to_string(&cart)?;
    tracing::info!(cart = %json, "cart after item deletion");

    let listed = shop.list_carts(&shop.cart_query())?;
    tracing::info!(carts = listed.len(), items = shop.items().len(), "demo finished");
    Ok(())
}
