//! Symbol embedding seam for PDF export.

use async_trait::async_trait;
use grid_core::SymbolDefinition;

use crate::error::RenderResult;
use crate::outline::{symbol_outline, SymbolOutline};

/// Turns a registry symbol into vector geometry for the document.
///
/// Embedding may suspend; the exporter awaits each call before touching the
/// next cell, so implementations never see interleaved requests.
#[async_trait(?Send)]
pub trait SymbolEmbedder {
    /// Produce the outline to draw for `symbol`.
    ///
    /// # Errors
    ///
    /// Any error makes the exporter draw the symbol's fallback shape instead.
    async fn embed(&self, symbol: &SymbolDefinition) -> RenderResult<SymbolOutline>;
}

#[async_trait(?Send)]
impl<'r, T: SymbolEmbedder + ?Sized> SymbolEmbedder for &'r T {
    async fn embed(&self, symbol: &SymbolDefinition) -> RenderResult<SymbolOutline> {
        (**self).embed(symbol).await
    }
}

/// Default embedder: parses the registry path data with usvg.
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorEmbedder;

#[async_trait(?Send)]
impl SymbolEmbedder for VectorEmbedder {
    async fn embed(&self, symbol: &SymbolDefinition) -> RenderResult<SymbolOutline> {
        symbol_outline(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_core::symbols;

    #[tokio::test]
    async fn test_vector_embedder_matches_registry_paint() {
        let embedder = VectorEmbedder;
        for id in ["heart", "cross", "gear"] {
            let symbol = symbols::resolve(id).expect("registered");
            let outline = embedder.embed(symbol).await.expect("embed");
            assert_eq!(outline.id, id);
            assert_eq!(outline.paint, symbol.paint);
        }
    }
}
