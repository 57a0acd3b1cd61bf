//! Serde helpers for fields whose on-disk encoding drifted over time.

/// The `source` field of a park record: older snapshots store a bare string
/// ("nps"), enriched snapshots store a list (["nps", "osm"]). Accept both on
/// input; on output collapse a singleton back to the string form.
pub mod source_list {
    use crate::models::Source;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Encoded {
        One(Source),
        Many(Vec<Source>),
    }

    pub fn serialize<S>(sources: &[Source], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match sources {
            [single] => single.serialize(serializer),
            many => many.serialize(serializer),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Source>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Encoded::deserialize(deserializer)? {
            Encoded::One(source) => vec![source],
            Encoded::Many(sources) => sources,
        })
    }
}
