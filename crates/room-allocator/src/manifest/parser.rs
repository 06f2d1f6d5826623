use crate::allocation::{Gender, GroupKind, GroupRecord};
use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug)]
pub(crate) struct ManifestRecord {
    /// 1-based line in the source file, header included.
    pub(crate) line: u64,
    pub(crate) group: GroupRecord,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<ManifestRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut records = Vec::new();

    for result in csv_reader.records() {
        let raw = result?;
        let line = raw.position().map(|position| position.line()).unwrap_or_default();
        let row: ManifestRow = raw.deserialize(Some(&headers))?;

        records.push(ManifestRecord {
            line,
            group: row.into_record(),
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct ManifestRow {
    #[serde(rename = "type", deserialize_with = "group_kind")]
    kind: GroupKind,
    #[serde(default, deserialize_with = "empty_as_zero")]
    adults: u32,
    #[serde(default, deserialize_with = "empty_as_zero")]
    boys: u32,
    #[serde(default, deserialize_with = "empty_as_zero")]
    girls: u32,
    #[serde(default, deserialize_with = "empty_gender_as_none")]
    gender: Option<Gender>,
}

impl ManifestRow {
    fn into_record(self) -> GroupRecord {
        GroupRecord {
            kind: self.kind,
            adults: self.adults,
            boys: self.boys,
            girls: self.girls,
            gender: self.gender,
        }
    }
}

fn group_kind<'de, D>(deserializer: D) -> Result<GroupKind, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "couple" => Ok(GroupKind::Couple),
        "family" => Ok(GroupKind::Family),
        "men" | "man" => Ok(GroupKind::Men),
        "women" | "woman" => Ok(GroupKind::Women),
        other => Err(serde::de::Error::custom(format!(
            "unknown group type '{other}'"
        ))),
    }
}

fn empty_as_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(0),
        Some(value) => value.parse::<u32>().map_err(|_| {
            serde::de::Error::custom(format!("'{value}' is not a non-negative count"))
        }),
    }
}

fn empty_gender_as_none<'de, D>(deserializer: D) -> Result<Option<Gender>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(|value| value.trim().to_ascii_lowercase()) {
        None => Ok(None),
        Some(value) => match value.as_str() {
            "" => Ok(None),
            "male" | "m" => Ok(Some(Gender::Male)),
            "female" | "f" => Ok(Some(Gender::Female)),
            other => Err(serde::de::Error::custom(format!("unknown gender '{other}'"))),
        },
    }
}
