//! Distinct-countries endpoint

use axum::{extract::State, Json};

use semtrack_common::CountryEntry;

use crate::{db, ApiResult, AppState};

/// GET /api/seminars/countries
///
/// Deduplicated `(country, countryCode)` pairs present in the store,
/// ascending by country. Feeds the client's country filter dropdown.
pub async fn list_countries(State(state): State<AppState>) -> ApiResult<Json<Vec<CountryEntry>>> {
    let countries = db::seminars::list_countries(&state.db).await?;
    Ok(Json(countries))
}
