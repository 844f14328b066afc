//! Renders a typed name as a stylized signature image.
//!
//! The heart of the crate is [`generate_signature`]: it loads a script font
//! (falling back to a bundled font when that fails), centers the measured
//! text on a fixed-size canvas and composites the shadow, bold and underline
//! effects. [`SignatureForm`] wraps it with input validation and the
//! preview/save actions used by the `signgen` binary.

pub mod color;
pub mod config;
pub mod error;
pub mod fonts;
pub mod form;
pub mod preview;
pub mod render;
pub mod request;

pub use color::InkColor;
pub use config::AppConfig;
pub use error::SignatureError;
pub use fonts::{FontChoice, FontFallback, FontLibrary};
pub use form::{Saved, SignatureForm};
pub use render::{Placement, Signature, TextBounds, Underline, generate_signature, measure_text};
pub use request::{Background, CanvasSize, Effects, SignatureRequest};
