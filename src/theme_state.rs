//! Shared theme state and the reactor that updates it
//!
//! Passes read the current [`Palette`] through [`ThemeState::snapshot`]
//! without locking. Only a [`ThemeReactor`] writes, and it always swaps in a
//! whole new palette, so a pass never sees colors from two backgrounds.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::blend::Palette;
use crate::category::CategoryColors;
use crate::theme::{Color, Theme};

/// Current background and render colors
#[derive(Debug)]
pub struct ThemeState {
    palette: ArcSwap<Palette>,
}

impl ThemeState {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette: ArcSwap::from_pointee(palette),
        }
    }

    /// State with the built-in category colors over `background`
    pub fn from_background(background: Color) -> Self {
        Self::new(Palette::with_background(background))
    }

    pub fn from_theme(theme: &Theme) -> Self {
        Self::new(Palette::new(theme.background, theme.blocks))
    }

    /// Palette in effect right now; stays valid after later replacements
    pub fn snapshot(&self) -> Arc<Palette> {
        self.palette.load_full()
    }

    pub fn background(&self) -> Color {
        self.palette.load().background()
    }

    pub fn replace(&self, palette: Palette) {
        self.palette.store(Arc::new(palette));
    }
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

/// Host side of a theme change: throw away old decorations and re-run a pass
pub trait RefreshHost {
    fn request_full_refresh(&mut self);
}

impl<F: FnMut()> RefreshHost for F {
    fn request_full_refresh(&mut self) {
        self()
    }
}

/// Reacts to theme notifications by rebuilding the palette
pub struct ThemeReactor<H> {
    state: Arc<ThemeState>,
    host: H,
}

impl<H: RefreshHost> ThemeReactor<H> {
    pub fn new(state: Arc<ThemeState>, host: H) -> Self {
        Self { state, host }
    }

    pub fn state(&self) -> &Arc<ThemeState> {
        &self.state
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Global color scheme changed to one with `background`.
    ///
    /// Category colors are kept. A refresh is requested even when the
    /// background is unchanged, since other parts of the scheme may differ.
    /// Returns whether the background changed.
    pub fn on_scheme_change(&mut self, background: Color) -> bool {
        let current = self.state.snapshot();
        let changed = current.background() != background;
        self.install(background, *current.colors());

        tracing::info!(
            "Scheme changed (background {}{})",
            background.to_hex(),
            if changed { "" } else { ", unchanged" }
        );
        changed
    }

    /// Switch to `theme`: its background and its category colors
    pub fn apply_theme(&mut self, theme: &Theme) {
        tracing::info!("Applying theme {}", theme.name);
        self.install(theme.background, theme.blocks);
    }

    fn install(&mut self, background: Color, colors: CategoryColors) {
        self.state.replace(Palette::new(background, colors));
        self.host.request_full_refresh();
    }
}
