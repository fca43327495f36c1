//! Tab Commands

use serde::Serialize;

use super::{post_json, Api};
use crate::error::ApiError;
use crate::models::{CreatedTab, TabId};

#[derive(Serialize)]
struct CreateTabArgs<'a> {
    tab_name: &'a str,
}

pub async fn create_tab(api: &Api, tab_name: &str) -> Result<TabId, ApiError> {
    let created: CreatedTab = post_json(api, "/create_tab", &CreateTabArgs { tab_name }).await?;
    Ok(created.tab_id)
}
