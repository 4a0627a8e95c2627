//! Text interchange for [`LayoutConfig`].
//!
//! A layout is stored as one flat JSON object:
//!
//! ```json
//! {"angle":0.0,"columns":3,"margin":0.0,"marginColumn":1.5,"marginRow":2.0,
//!  "plane":[0,1,0],"radius":4.0,"reverse":false,"fill":false,"type":"Box"}
//! ```
//!
//! Every field is required and no other field is accepted. `plane` must hold
//! exactly three integers and `type` must name a [`ShapeType`].

use crate::shape::UnknownShapeError;
use crate::{LayoutConfig, PlaneMask, ShapeType};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to turn text into a [`LayoutConfig`], or a config with non-finite
/// numbers into text.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The text is not a well-formed layout record.
    #[error("malformed layout record: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The record names a shape that does not exist.
    #[error(transparent)]
    UnknownShape(#[from] UnknownShapeError),
    /// A float field is NaN or infinite and has no JSON representation.
    #[error("layout field `{field}` is not a finite number")]
    NonFinite {
        /// Interchange name of the offending field.
        field: &'static str,
    },
}

/// Wire shape of a layout record.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct LayoutRecord {
    angle: f32,
    columns: u16,
    margin: f32,
    margin_column: f32,
    margin_row: f32,
    plane: [i32; 3],
    radius: f32,
    reverse: bool,
    fill: bool,
    #[serde(rename = "type")]
    shape: String,
}

impl From<&LayoutConfig> for LayoutRecord {
    fn from(config: &LayoutConfig) -> Self {
        Self {
            angle: config.angle(),
            columns: config.columns(),
            margin: config.margin(),
            margin_column: config.margin_column(),
            margin_row: config.margin_row(),
            plane: config.plane().to_array(),
            radius: config.radius(),
            reverse: config.reverse(),
            fill: config.fill(),
            shape: config.shape().name().to_string(),
        }
    }
}

impl LayoutRecord {
    fn ensure_finite(&self) -> Result<(), CodecError> {
        let fields = [
            ("angle", self.angle),
            ("margin", self.margin),
            ("marginColumn", self.margin_column),
            ("marginRow", self.margin_row),
            ("radius", self.radius),
        ];
        match fields.iter().find(|(_, value)| !value.is_finite()) {
            Some((field, _)) => Err(CodecError::NonFinite { field: *field }),
            None => Ok(()),
        }
    }
}

impl TryFrom<LayoutRecord> for LayoutConfig {
    type Error = CodecError;

    fn try_from(record: LayoutRecord) -> Result<Self, Self::Error> {
        let shape: ShapeType = record.shape.parse()?;
        let mut config = LayoutConfig::new(shape);
        config.set_angle(record.angle);
        config.set_columns(record.columns);
        config.set_margin(record.margin);
        config.set_margin_column(record.margin_column);
        config.set_margin_row(record.margin_row);
        config.set_plane(PlaneMask::from(record.plane));
        config.set_radius(record.radius);
        config.set_reverse(record.reverse);
        config.set_fill(record.fill);
        Ok(config)
    }
}

/// Encode a configuration as a compact single-line record.
///
/// Fails with [`CodecError::NonFinite`] rather than writing `null` for a NaN
/// or infinite field.
pub fn encode(config: &LayoutConfig) -> Result<String, CodecError> {
    let record = LayoutRecord::from(config);
    record.ensure_finite()?;
    Ok(serde_json::to_string(&record)?)
}

/// Encode a configuration as an indented record.
pub fn encode_pretty(config: &LayoutConfig) -> Result<String, CodecError> {
    let record = LayoutRecord::from(config);
    record.ensure_finite()?;
    Ok(serde_json::to_string_pretty(&record)?)
}

/// Decode a record produced by [`encode`] (or written by hand).
pub fn decode(text: &str) -> Result<LayoutConfig, CodecError> {
    let record: LayoutRecord = serde_json::from_str(text)?;
    LayoutConfig::try_from(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOX_RECORD: &str = r#"{"angle":0.0,"columns":3,"margin":0.25,"marginColumn":1.5,"marginRow":2.0,"plane":[0,1,0],"radius":4.0,"reverse":true,"fill":true,"type":"Box"}"#;

    #[test]
    fn decodes_a_full_record() {
        let config = decode(BOX_RECORD).expect("record decodes");
        assert_eq!(config.shape(), ShapeType::Box);
        assert_eq!(config.columns(), 3);
        assert_eq!(config.margin(), 0.25);
        assert_eq!(config.margin_column(), 1.5);
        assert_eq!(config.margin_row(), 2.0);
        assert_eq!(config.plane(), PlaneMask::new(0, 1, 0));
        assert_eq!(config.radius(), 4.0);
        assert!(config.reverse());
        assert!(config.fill());
    }

    #[test]
    fn encodes_field_for_field() {
        let config = decode(BOX_RECORD).expect("record decodes");
        assert_eq!(encode(&config).expect("encodes"), BOX_RECORD);
    }

    #[test]
    fn unknown_shape_is_rejected() {
        let text = BOX_RECORD.replace("\"Box\"", "\"Hexagon\"");
        match decode(&text) {
            Err(CodecError::UnknownShape(err)) => assert_eq!(err.name(), "Hexagon"),
            other => panic!("expected unknown shape, got {other:?}"),
        }
    }

    #[test]
    fn missing_type_is_malformed() {
        let text = BOX_RECORD.replace(",\"type\":\"Box\"", "");
        assert!(matches!(decode(&text), Err(CodecError::Malformed(_))));
    }

    #[test]
    fn plane_needs_exactly_three_integers() {
        for plane in ["[0,1]", "[0,1,0,1]", "[0.5,1,0]", "\"xy\""] {
            let text = BOX_RECORD.replace("[0,1,0]", plane);
            assert!(
                matches!(decode(&text), Err(CodecError::Malformed(_))),
                "plane {plane} should be rejected"
            );
        }
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let text = BOX_RECORD.replace("{", "{\"spin\":1,");
        assert!(matches!(decode(&text), Err(CodecError::Malformed(_))));
    }

    #[test]
    fn decoded_angle_is_clamped() {
        let text = BOX_RECORD.replace("\"angle\":0.0", "\"angle\":500.0");
        assert_eq!(decode(&text).expect("decodes").angle(), 360.0);
    }

    #[test]
    fn pretty_output_decodes() {
        let config = LayoutConfig::new(ShapeType::Pyramid).with_radius(3.0);
        let text = encode_pretty(&config).expect("encodes");
        assert!(text.contains('\n'));
        assert_eq!(decode(&text).expect("decodes"), config);
    }

    #[test]
    fn non_finite_fields_refuse_to_encode() {
        let infinite = LayoutConfig::new(ShapeType::Circle).with_radius(f32::INFINITY);
        assert!(matches!(
            encode(&infinite),
            Err(CodecError::NonFinite { field: "radius" })
        ));

        let mut nan = LayoutConfig::default();
        nan.set_margin_row(f32::NAN);
        assert!(matches!(
            encode_pretty(&nan),
            Err(CodecError::NonFinite { field: "marginRow" })
        ));

        let mut angle = LayoutConfig::default();
        angle.set_angle(f32::NAN);
        assert!(matches!(
            encode(&angle),
            Err(CodecError::NonFinite { field: "angle" })
        ));
    }
}
