//! Datamodel loading.
//!
//! The input is either a bare datamodel (`{"models": [...], "types": [...]}`)
//! or a whole schema-compiler document with the datamodel under a
//! `"datamodel"` key.

use log::debug;
use serde_json::Value;

use erd::model::{Datamodel, Model};

use crate::error::CliError;

/// Parses `src` into the list of models to render, models before types.
///
/// # Errors
///
/// Returns [`CliError::Input`] carrying the source text when `src` is not
/// valid JSON or does not have the datamodel shape.
pub fn parse_datamodel(src: &str) -> Result<Vec<Model>, CliError> {
    let input_error = |err| CliError::Input {
        err,
        src: src.to_string(),
    };

    let mut value: Value = serde_json::from_str(src).map_err(input_error)?;
    if let Some(inner) = value.get_mut("datamodel") {
        debug!("Extracting nested datamodel");
        value = inner.take();
    }

    let datamodel: Datamodel = serde_json::from_value(value).map_err(input_error)?;
    debug!(
        models_len = datamodel.models().len(),
        types_len = datamodel.types().len();
        "Datamodel loaded",
    );

    Ok(datamodel.into_model_likes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_datamodel() {
        let src = r#"{
            "models": [{"name": "User", "fields": [{"name": "id", "kind": "scalar", "type": "Int"}]}],
            "types": [{"name": "Address", "fields": []}]
        }"#;

        let models = parse_datamodel(src).unwrap();
        let names: Vec<_> = models.iter().map(Model::name).collect();
        assert_eq!(names, ["User", "Address"]);
    }

    #[test]
    fn test_nested_datamodel() {
        let src = r#"{
            "enums": [],
            "datamodel": {"models": [{"name": "Post", "fields": []}]}
        }"#;

        let models = parse_datamodel(src).unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].name(), "Post");
    }

    #[test]
    fn test_syntax_error_keeps_source() {
        let src = "{\"models\": [\n  {\"name\": }\n]}";

        let err = parse_datamodel(src).unwrap_err();
        match err {
            CliError::Input { err, src: kept } => {
                assert_eq!(kept, src);
                assert_eq!(err.line(), 2);
            }
            other => panic!("Expected input error, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        let err = parse_datamodel(r#"{"models": [{"fields": []}]}"#).unwrap_err();
        assert!(matches!(err, CliError::Input { .. }));
    }
}
