use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::process::ProcessRecord;

/// A persisted scenario: an ordered list of processes.
pub type ScenarioDto = Vec<ProcessDto>;

/// One process as it appears in a scenario file.
///
/// Both `arrivalTime`/`burstTime` and the shorter `arrival`/`burst` spellings are
/// accepted. Ids may be strings or numbers. Presentation fields such as `color`
/// are ignored on import and never written on export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessDto {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(alias = "arrival")]
    pub arrival_time: i64,
    #[serde(alias = "burst")]
    pub burst_time: i64,
    #[serde(default)]
    pub priority: i64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

impl From<ProcessDto> for ProcessRecord {
    fn from(dto: ProcessDto) -> Self {
        ProcessRecord::new(dto.id, dto.arrival_time, dto.burst_time, dto.priority)
    }
}

impl From<&ProcessRecord> for ProcessDto {
    fn from(process: &ProcessRecord) -> Self {
        ProcessDto {
            id: process.id.to_string(),
            arrival_time: process.arrival_time,
            burst_time: process.burst_time,
            priority: process.priority,
        }
    }
}
