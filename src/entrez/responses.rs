//! Internal serde envelopes for the JSON retmode of EInfo and ESearch
//!
//! Only the scalars the client actually consumes are modeled; the rest of
//! each payload is opaque and handed back to callers unparsed.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct EInfoResponse {
    pub einforesult: EInfoResult,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EInfoResult {
    pub dblist: Option<Vec<String>>,
    pub dbinfo: Option<Vec<DbInfoData>>,
    #[serde(rename = "ERROR")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DbInfoData {
    pub dbname: String,
    pub menuname: Option<String>,
    pub description: Option<String>,
    pub count: Option<String>,
    pub lastupdate: Option<String>,
    pub fieldlist: Option<Vec<FieldData>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FieldData {
    pub name: String,
    pub fullname: Option<String>,
    pub description: Option<String>,
    pub isdate: Option<String>,
    pub isnumerical: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ESearchResponse {
    pub esearchresult: ESearchData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ESearchData {
    pub count: Option<String>,
    #[serde(default)]
    pub idlist: Vec<String>,
    pub webenv: Option<String>,
    pub querykey: Option<String>,
    pub querytranslation: Option<String>,
    #[serde(rename = "ERROR")]
    pub error: Option<String>,
}
