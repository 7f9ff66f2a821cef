use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct IdPayload {
    pub id: Option<String>,
}

/// Update body: the target id alongside the patch fields, as one JSON object.
#[derive(Debug, Deserialize)]
pub struct Keyed<T> {
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: T,
}

#[derive(Debug, Deserialize)]
pub struct InsightsQuery {
    pub query: String,
}
