//! Gateway over the opaque map widget.

use crate::workouts::types::LatLng;

/// Default zoom level for the map view.
pub const DEFAULT_ZOOM: u8 = 14;

/// The operations the underlying map widget must provide.
///
/// The widget itself (tile rendering, DOM/GPU plumbing, gesture handling) is
/// outside this crate; implementations adapt whatever surface actually draws
/// the map.
pub trait MapWidget {
    /// Create the view centered at `center`.
    fn init_view(&mut self, center: LatLng, zoom: u8);

    /// Add a marker with a popup at `at`. Every call adds a new marker.
    fn add_marker(&mut self, at: LatLng, popup_text: &str, style_class: &str);

    /// Recenter the view on `center` with an animated transition.
    fn fly_to(&mut self, center: LatLng, zoom: u8);
}

/// Click handler invoked with the clicked coordinates.
pub type ClickHandler = Box<dyn FnMut(LatLng) + Send>;

/// Wraps a [`MapWidget`] with session-level rules: single initialization,
/// one replaceable click handler, and marker/recenter calls that quietly
/// no-op while no view exists yet.
pub struct MapGateway<W: MapWidget> {
    widget: W,
    initialized: bool,
    click_handler: Option<ClickHandler>,
}

impl<W: MapWidget> MapGateway<W> {
    /// Wrap a widget; the view is not created until [`initialize`].
    ///
    /// [`initialize`]: MapGateway::initialize
    pub fn new(widget: W) -> Self {
        Self {
            widget,
            initialized: false,
            click_handler: None,
        }
    }

    /// Create the map view centered at `center`. Callable once per session;
    /// re-initialization is unsupported and ignored.
    pub fn initialize(&mut self, center: LatLng, zoom: u8) {
        if self.initialized {
            tracing::warn!("Map already initialized, ignoring");
            return;
        }
        self.widget.init_view(center, zoom);
        self.initialized = true;
        tracing::info!("Map initialized at {center}");
    }

    /// Whether [`initialize`](MapGateway::initialize) has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Register the click handler, replacing any previous one. Handlers never
    /// stack; at most one observes clicks at a time.
    pub fn on_click(&mut self, handler: ClickHandler) {
        self.click_handler = Some(handler);
    }

    /// Deliver a widget click to the current handler, if any. Called by the
    /// widget integration for each click on the map surface.
    pub fn dispatch_click(&mut self, at: LatLng) {
        if let Some(handler) = self.click_handler.as_mut() {
            handler(at);
        }
    }

    /// Add a marker with a popup. No-op (logged) before the view exists,
    /// since markers need a live view to attach to.
    pub fn place_marker(&mut self, at: LatLng, popup_text: &str, style_class: &str) {
        if !self.initialized {
            tracing::warn!("No map view yet, dropping marker at {at}");
            return;
        }
        self.widget.add_marker(at, popup_text, style_class);
    }

    /// Animated recenter. Silent no-op before the view exists.
    pub fn center_on(&mut self, center: LatLng, zoom: u8) {
        if !self.initialized {
            return;
        }
        self.widget.fly_to(center, zoom);
    }
}
