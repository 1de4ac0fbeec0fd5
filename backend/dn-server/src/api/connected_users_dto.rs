use serde::Serialize;

/// Distinct owners currently watching a document
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedUsersDto {
    pub document_id: String,
    pub users: Vec<String>,
}
