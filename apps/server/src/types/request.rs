// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request types for the API.

use bim4energy_core::{ParameterInput, ProjectInfo};
use serde::Deserialize;

/// Body of a report request.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportRequest {
    /// Building parameters to estimate.
    pub parameters: ParameterInput,

    /// Project fields printed in the report header.
    #[serde(default)]
    pub project: ProjectInfo,
}
