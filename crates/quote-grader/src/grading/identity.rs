use serde::{Deserialize, Serialize};

use super::signals::{non_blank, ExtractionSignals};

/// Display projection of who issued the quote. Never feeds scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedIdentity {
    pub contractor_name: Option<String>,
    pub license_number: Option<String>,
    pub noa_numbers: Vec<String>,
}

impl ExtractedIdentity {
    pub fn from_signals(signals: &ExtractionSignals) -> Self {
        Self {
            contractor_name: non_blank(&signals.contractor_name_extracted).map(str::to_string),
            license_number: non_blank(&signals.license_number_value).map(str::to_string),
            noa_numbers: non_blank(&signals.noa_number_value)
                .map(|noa| vec![noa.to_string()])
                .unwrap_or_default(),
        }
    }
}
