use std::fs;
use std::path::Path;

use crate::api::scenario_dto::{ProcessDto, ScenarioDto};
use crate::domain::process::{ProcessRecord, validate_processes};
use crate::error::Result;
use crate::loader::parser::{parse_json_file, parse_json_str};

fn into_processes(dto: ScenarioDto) -> Result<Vec<ProcessRecord>> {
    let processes: Vec<ProcessRecord> = dto.into_iter().map(ProcessRecord::from).collect();
    validate_processes(&processes)?;
    Ok(processes)
}

fn to_dto(processes: &[ProcessRecord]) -> ScenarioDto {
    processes.iter().map(ProcessDto::from).collect()
}

/// Reads a scenario file and returns its processes in file order.
pub fn import_scenario(file_path: impl AsRef<Path>) -> Result<Vec<ProcessRecord>> {
    let dto: ScenarioDto = parse_json_file(file_path.as_ref())?;
    let processes = into_processes(dto)?;

    log::info!("Imported {} processes from '{}'.", processes.len(), file_path.as_ref().display());
    Ok(processes)
}

pub fn import_from_str(json: &str) -> Result<Vec<ProcessRecord>> {
    into_processes(parse_json_str(json)?)
}

/// Writes the processes as a pretty-printed scenario file, core fields only.
pub fn export_scenario(file_path: impl AsRef<Path>, processes: &[ProcessRecord]) -> Result<()> {
    fs::write(file_path.as_ref(), export_to_string(processes)?)?;

    log::info!("Exported {} processes to '{}'.", processes.len(), file_path.as_ref().display());
    Ok(())
}

pub fn export_to_string(processes: &[ProcessRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_dto(processes))?)
}
