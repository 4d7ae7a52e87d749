use axum::{Json, extract::State};

use crate::{
    AppState,
    error::Result,
    models::{Category, HomeResponse, MenuResponse},
    queries::product_queries,
};

const HOME_SECTION_SIZE: i64 = 3;
const MENU_SECTION_SIZE: i64 = 5;

/// Home page data: a random sample of featured products plus the first
/// few of each category.
pub async fn home(State(state): State<AppState>) -> Result<Json<HomeResponse>> {
    let featured = product_queries::get_featured(&state.db, HOME_SECTION_SIZE).await?;
    let sweets =
        product_queries::get_by_category(&state.db, Category::Sweet, Some(HOME_SECTION_SIZE))
            .await?;
    let savories =
        product_queries::get_by_category(&state.db, Category::Savory, Some(HOME_SECTION_SIZE))
            .await?;
    let beverages =
        product_queries::get_by_category(&state.db, Category::Beverage, Some(HOME_SECTION_SIZE))
            .await?;

    Ok(Json(HomeResponse {
        featured,
        sweets,
        savories,
        beverages,
    }))
}

/// Category menu shown on every page of the frontend.
pub async fn menu(State(state): State<AppState>) -> Result<Json<MenuResponse>> {
    let sweets =
        product_queries::get_by_category(&state.db, Category::Sweet, Some(MENU_SECTION_SIZE))
            .await?;
    let savories =
        product_queries::get_by_category(&state.db, Category::Savory, Some(MENU_SECTION_SIZE))
            .await?;
    let beverages =
        product_queries::get_by_category(&state.db, Category::Beverage, Some(MENU_SECTION_SIZE))
            .await?;

    Ok(Json(MenuResponse {
        sweets,
        savories,
        beverages,
    }))
}
