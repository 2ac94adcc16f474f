//! YAML/JSON → `QueryDocument`.
//!
//! Both formats share the serde model in `dsl`; the document is checked for
//! shape only. Pointers are validated against a table at match time.

use crate::dsl::QueryDocument;
use crate::error::DslError;

pub fn parse_yaml_query(yaml_src: &str) -> Result<QueryDocument, DslError> {
    Ok(serde_yaml::from_str(yaml_src)?)
}

pub fn parse_json_query(json_src: &str) -> Result<QueryDocument, DslError> {
    Ok(serde_json::from_str(json_src)?)
}
