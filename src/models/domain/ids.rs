//! Backend identifiers are opaque: some routes send them as JSON strings,
//! others as numbers. Both are normalised to `String` on the way in.

use serde::{de, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawId::deserialize(deserializer)
        .map_err(|_| <D::Error as de::Error>::custom("identifier must be a string or a number"))?;
    Ok(raw.into())
}

pub fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawId>::deserialize(deserializer).map_err(|_| {
        <D::Error as de::Error>::custom("identifier must be a string, a number or null")
    })?;
    Ok(raw.map(Into::into))
}
