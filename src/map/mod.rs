//! Map gateway over an injected, opaque map widget.

pub mod gateway;

pub use gateway::{ClickHandler, MapGateway, MapWidget, DEFAULT_ZOOM};
