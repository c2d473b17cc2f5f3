use serde::Deserialize;

/// A clan ally shown on the supporters screen and in shoutout interstitials.
///
/// Display only; supporters never affect gameplay.
#[derive(Clone, Debug, Deserialize)]
pub struct Supporter {
    pub name: String,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl Supporter {
    pub fn new(name: &str, handle: &str, role: &str) -> Self {
        Self {
            name: name.to_string(),
            handle: Some(handle.to_string()),
            role: Some(role.to_string()),
        }
    }
}
