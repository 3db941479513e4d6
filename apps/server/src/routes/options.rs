// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Option catalog endpoint.

use crate::types::{OptionGroupInfo, OptionsResponse};
use crate::AppState;
use axum::{extract::State, Json};

/// GET /api/v1/options - Categories, standards and option lists of the loaded table.
pub async fn list(State(state): State<AppState>) -> Json<OptionsResponse> {
    let table = &state.table;
    let groups = table
        .options()
        .iter()
        .map(|(group, list)| OptionGroupInfo {
            group,
            options: list.entries().to_vec(),
            default: list.default_option().map(str::to_string),
        })
        .collect();

    Json(OptionsResponse {
        categories: table.categories().to_vec(),
        standards: table
            .standard_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
        groups,
    })
}
