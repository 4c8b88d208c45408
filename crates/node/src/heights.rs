//! Resolving a node's height from one of its stores.

use std::{fmt, str::FromStr, sync::Arc};

use thiserror::Error;

/// Which store a height is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeightView {
    /// Header sync store.
    Header,
    /// Block data sync store.
    Data,
    /// Block manager store.
    Store,
}

impl HeightView {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeightView::Header => "header",
            HeightView::Data => "data",
            HeightView::Store => "store",
        }
    }
}

impl fmt::Display for HeightView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeightView {
    type Err = HeightViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "header" => Ok(HeightView::Header),
            "block" | "data" => Ok(HeightView::Data),
            "store" => Ok(HeightView::Store),
            other => Err(HeightViewError::InvalidSource(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Full,
    Light,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Full => f.write_str("full"),
            NodeKind::Light => f.write_str("light"),
        }
    }
}

#[derive(Debug, Error)]
pub enum HeightViewError {
    #[error("{kind} node has no {view} height")]
    Unsupported { view: HeightView, kind: NodeKind },

    #[error("invalid height source: {0}")]
    InvalidSource(String),

    #[error("reading {view} height: {source}")]
    Source {
        view: HeightView,
        #[source]
        source: anyhow::Error,
    },
}

/// A store that knows its own height.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
pub trait HeightSource: Send + Sync + 'static {
    fn height(&self) -> anyhow::Result<u64>;
}

const FULL_VIEWS: &[HeightView] = &[HeightView::Header, HeightView::Data, HeightView::Store];
const LIGHT_VIEWS: &[HeightView] = &[HeightView::Header];

/// Height views a node exposes. Full nodes expose all of them, light nodes only the
/// header view.
#[derive(Clone)]
pub struct NodeHeights {
    kind: NodeKind,
    header: Arc<dyn HeightSource>,
    data: Option<Arc<dyn HeightSource>>,
    store: Option<Arc<dyn HeightSource>>,
}

impl fmt::Debug for NodeHeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeHeights")
            .field("kind", &self.kind)
            .field("views", &self.supported_views())
            .finish()
    }
}

impl NodeHeights {
    pub fn full(
        header: Arc<dyn HeightSource>,
        data: Arc<dyn HeightSource>,
        store: Arc<dyn HeightSource>,
    ) -> Self {
        Self {
            kind: NodeKind::Full,
            header,
            data: Some(data),
            store: Some(store),
        }
    }

    pub fn light(header: Arc<dyn HeightSource>) -> Self {
        Self {
            kind: NodeKind::Light,
            header,
            data: None,
            store: None,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn supported_views(&self) -> &'static [HeightView] {
        match self.kind {
            NodeKind::Full => FULL_VIEWS,
            NodeKind::Light => LIGHT_VIEWS,
        }
    }

    pub fn supports(&self, view: HeightView) -> bool {
        self.source(view).is_some()
    }

    /// Current height of `view`. Views the node does not expose are an error, never 0.
    pub fn get_height(&self, view: HeightView) -> Result<u64, HeightViewError> {
        let source = self.source(view).ok_or(HeightViewError::Unsupported {
            view,
            kind: self.kind,
        })?;
        source
            .height()
            .map_err(|source| HeightViewError::Source { view, source })
    }

    /// Same as [`Self::get_height`] with the view given by its tag.
    pub fn get_height_by_tag(&self, tag: &str) -> Result<u64, HeightViewError> {
        self.get_height(tag.parse()?)
    }

    fn source(&self, view: HeightView) -> Option<&Arc<dyn HeightSource>> {
        match view {
            HeightView::Header => Some(&self.header),
            HeightView::Data => self.data.as_ref(),
            HeightView::Store => self.store.as_ref(),
        }
    }
}
