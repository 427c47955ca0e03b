use serde::{Deserialize, Serialize};

use super::query_preview;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedQuery {
    pub id: String,
    pub name: String,
    pub folder: Option<String>,
    #[serde(rename = "query")]
    pub query_text: String,
    pub created_at: String,
    pub updated_at: String,
}

impl SavedQuery {
    pub fn preview(&self) -> String {
        query_preview(&self.query_text)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSavedQuery {
    pub name: String,
    pub folder: Option<String>,
    #[serde(rename = "query")]
    pub query_text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSavedQuery {
    pub id: String,
    pub name: Option<String>,
    pub folder: Option<String>,
    #[serde(rename = "query")]
    pub query_text: Option<String>,
}
