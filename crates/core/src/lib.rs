#![warn(missing_docs)]
//! Layout parameters, shape families and their text interchange format.

pub mod codec;
mod config;
mod error;
mod shape;

pub use codec::{decode, encode, encode_pretty, CodecError};
pub use config::{LayoutConfig, PlaneMask, MAX_ANGLE};
pub use error::LayoutError;
pub use shape::{ShapeType, UnknownShapeError};
