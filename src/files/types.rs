//! Payloads of the z/OSMF dataset REST API.

use serde::{Deserialize, Serialize};

/// Response body of a dataset list request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetListResponse {
    #[serde(default)]
    pub items: Vec<DatasetListItem>,
    #[serde(default)]
    pub returned_rows: usize,
    #[serde(default)]
    pub total_rows: usize,
    #[serde(rename = "JSONversion", default)]
    pub json_version: i32,
}

/// One dataset in a list response. Numeric attributes arrive as strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetListItem {
    pub dsname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dsorg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recfm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lrecl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blksz: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vol: Option<String>,
}

/// Response body of a member list request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberListResponse {
    #[serde(default)]
    pub items: Vec<MemberListItem>,
    #[serde(default)]
    pub returned_rows: usize,
    #[serde(default)]
    pub total_rows: usize,
}

/// A PDS/PDSE member, with ISPF statistics when the server has them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberListItem {
    pub member: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vers: Option<u32>,
    #[serde(rename = "mod", default, skip_serializing_if = "Option::is_none")]
    pub modification: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c4date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m4date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// Allocation attributes for a new dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetCreateParams {
    /// Organization: `PS` or `PO`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dsorg: Option<String>,
    /// Record format, e.g. `FB`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recfm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lrecl: Option<u32>,
    #[serde(rename = "blksize", skip_serializing_if = "Option::is_none")]
    pub blksize: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<u32>,
    /// Space unit: `TRK`, `CYL` or `BLK`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alcunit: Option<String>,
    /// Directory blocks, for partitioned datasets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dirblk: Option<u32>,
}
