use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const CATEGORIES: &[&str] = &["entree", "plat", "dessert", "boisson"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "menu_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Entree,
    Plat,
    Dessert,
    Boisson,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MenuItem {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: Category,
    pub image: Option<String>,
    pub available: bool,
}
