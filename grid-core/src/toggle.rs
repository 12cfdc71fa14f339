//! What a click on a cell does with the current selection.

use serde::{Deserialize, Serialize};

use crate::{Cell, HexColor, DEFAULT_PALETTE};

/// The color and optional symbol the user is painting with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Active color.
    pub color: HexColor,
    /// Active symbol; `None` paints flat color.
    #[serde(default)]
    pub symbol: Option<String>,
}

impl Selection {
    /// Paint flat `color`.
    #[must_use]
    pub fn color(color: HexColor) -> Self {
        Self {
            color,
            symbol: None,
        }
    }

    /// Paint `symbol` tinted with `color`.
    #[must_use]
    pub fn symbol(color: HexColor, symbol: impl Into<String>) -> Self {
        Self {
            color,
            symbol: Some(symbol.into()),
        }
    }

    /// The cell this selection paints.
    #[must_use]
    pub fn to_cell(&self) -> Cell {
        Cell {
            color: self.color.clone(),
            symbol: self.symbol.clone(),
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        let color = HexColor::parse(DEFAULT_PALETTE[0]).unwrap_or_else(|_| HexColor::white());
        Self::color(color)
    }
}

/// New content of a clicked cell.
///
/// | current                     | result      |
/// |-----------------------------|-------------|
/// | empty                       | selection   |
/// | equal to selection          | empty       |
/// | same symbol, other color    | recolored   |
/// | anything else               | selection   |
#[must_use]
pub fn resolve_toggle(current: Option<&Cell>, selection: &Selection) -> Option<Cell> {
    let Some(current) = current else {
        return Some(selection.to_cell());
    };

    if current.color == selection.color && current.symbol == selection.symbol {
        return None;
    }

    if current.symbol == selection.symbol {
        return Some(Cell {
            color: selection.color.clone(),
            symbol: current.symbol.clone(),
        });
    }

    Some(selection.to_cell())
}
