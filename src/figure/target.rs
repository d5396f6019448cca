//! Axis provisioning: draw on the caller's axes or on a fresh figure.

use crate::config::ExplorerConfig;
use crate::figure::{Axes, Figure};
use std::ops::{Deref, DerefMut};

/// The axes a chart was drawn on.
#[derive(Debug)]
pub enum Target<'a> {
    /// The axes the caller supplied, returned unchanged in identity.
    Existing(&'a mut Axes),
    /// A new single-panel figure owned by the caller.
    ///
    /// Dereferencing reaches its first panel, so the figure must have one.
    Created(Figure),
}

impl Target<'_> {
    /// Whether a new figure was created.
    #[must_use]
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    /// The created figure, or `None` when drawing went to caller axes.
    #[must_use]
    pub fn into_figure(self) -> Option<Figure> {
        match self {
            Self::Created(figure) => Some(figure),
            Self::Existing(_) => None,
        }
    }
}

impl Deref for Target<'_> {
    type Target = Axes;

    fn deref(&self) -> &Axes {
        match self {
            Self::Existing(ax) => &**ax,
            Self::Created(figure) => figure.primary(),
        }
    }
}

impl DerefMut for Target<'_> {
    fn deref_mut(&mut self) -> &mut Axes {
        match self {
            Self::Existing(ax) => &mut **ax,
            Self::Created(figure) => figure.primary_mut(),
        }
    }
}

/// Reuse `ax`, or create exactly one single-panel figure sized and styled by
/// `config`.
#[must_use]
pub fn provision_axes<'a>(ax: Option<&'a mut Axes>, config: &ExplorerConfig) -> Target<'a> {
    match ax {
        Some(ax) => Target::Existing(ax),
        None => {
            tracing::trace!(
                width = config.figure.width,
                height = config.figure.height,
                "creating single-panel figure"
            );
            Target::Created(Figure::single(config.figure.width, config.figure.height, config.style.clone()))
        }
    }
}
