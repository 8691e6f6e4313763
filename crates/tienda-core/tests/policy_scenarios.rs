//! Storefront scenarios: role-gated management controls, stock-gated cards,
//! and the product search allowlist.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use chrono::Utc;
use rust_decimal::Decimal;

use tienda_core::model::{NewProduct, Product, ProductId, Role, RoleId, RoleKind};
use tienda_core::policy::{allowed_search_fields, can_manage_catalog, Affordances, DisplayState};

fn product(name: &str, stock: i64) -> Product {
    NewProduct {
        name: name.into(),
        description: String::new(),
        price: Decimal::from(500),
        stock,
    }
    .into_product(ProductId(1), Utc::now())
    .unwrap()
}

#[test]
fn administrador_sees_management_controls() {
    let role = Role { id: RoleId(1), name: "Administrador".into() };
    let a = Affordances::for_role(Some(&role.kind()));
    assert!(a.add_product);
    assert!(a.add_category);
}

#[test]
fn customer_does_not_see_management_controls() {
    let role = Role { id: RoleId(2), name: "Customer".into() };
    let a = Affordances::for_role(Some(&role.kind()));
    assert!(!a.add_product);
    assert!(!a.add_category);
}

#[test]
fn new_roles_are_denied_until_mapped() {
    for name in ["Vendedor", "Moderator", "admin", "root", "Administradores"] {
        assert!(!can_manage_catalog(&RoleKind::from_name(name)), "role={name}");
    }
}

#[test]
fn out_of_stock_card_has_no_enabled_cart_control() {
    let tablet = product("Tablet", 0);
    assert_eq!(tablet.display_state(), DisplayState::OutOfStock);
    assert_eq!(tablet.display_state().label(), "Producto Agotado");
    assert!(!tablet.display_state().can_add_to_cart());

    let laptop = product("Laptop", 10);
    assert_eq!(laptop.display_state(), DisplayState::Available);
    assert!(laptop.display_state().can_add_to_cart());
}

#[test]
fn product_search_allowlist() {
    let allowed = allowed_search_fields::<Product>();
    assert!(allowed.contains("name"));
    assert!(allowed.contains("description"));
    assert!(allowed.contains("price"));
    assert!(!allowed.contains("created_at"), "created_at must not be searchable");
    assert_eq!(allowed.len(), 3);
}
