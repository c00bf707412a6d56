//! Fault catalogue

use anyhow::Result;
use serde::Serialize;
use twinjet_faults::{FaultCondition, SeverityBand};

use crate::error::CliError;
use crate::output;

/// Catalogue entry for one fault condition.
#[derive(Debug, Clone, Serialize)]
pub struct FaultInfo {
    pub code: &'static str,
    pub band: SeverityBand,
    pub critical: bool,
    pub message: &'static str,
}

impl From<FaultCondition> for FaultInfo {
    fn from(condition: FaultCondition) -> Self {
        Self {
            code: condition.code(),
            band: condition.band(),
            critical: condition.is_critical(),
            message: condition.message(),
        }
    }
}

/// Execute the faults command
pub fn execute(code: Option<&str>, json: bool) -> Result<()> {
    let faults: Vec<FaultInfo> = match code {
        Some(code) => {
            let condition: FaultCondition = code
                .parse()
                .map_err(|e| CliError::UnknownFault(format!("{code} ({e})")))?;
            vec![condition.into()]
        }
        None => FaultCondition::ALL.into_iter().map(FaultInfo::from).collect(),
    };
    output::print_fault_list(&faults, json)
}
