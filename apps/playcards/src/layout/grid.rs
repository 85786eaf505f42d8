//! Page grid — how many cards fit on a sheet and where each one goes.
//!
//! The text side is laid out with mirrored columns so that, printed
//! double-sided, every card face lands behind its own code.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::layout::instructions::Region;

pub const POINTS_PER_CM: f32 = 72.0 / 2.54;

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub const A4: PageSize = PageSize {
        width: 595.2756,
        height: 841.8898,
    };
}

/// Column order used when placing cards on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnOrder {
    LeftToRight,
    /// Right to left, for the back of a double-sided sheet.
    Mirrored,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub page: PageSize,
    pub box_size: f32,
    pub columns: usize,
    pub rows: usize,
    /// Horizontal inset that centers the grid on the page.
    pub left_indent: f32,
    /// Gap between the top edge of the page and the first row.
    pub top_indent: f32,
}

impl GridLayout {
    /// Fits as many `box_size` squares as the page allows.
    ///
    /// Fails when not even one card fits, which would otherwise leave the
    /// deck with zero cards per page.
    pub fn new(page: PageSize, box_size: f32, top_indent: f32) -> Result<Self, AppError> {
        if box_size.is_nan() || box_size <= 0.0 {
            return Err(AppError::Config(format!(
                "card size must be positive, got {box_size}"
            )));
        }
        let columns = (page.width / box_size).floor() as usize;
        let rows = (page.height / box_size).floor() as usize;
        if columns == 0 || rows == 0 {
            return Err(AppError::Config(format!(
                "a {box_size}pt card does not fit on a {}x{}pt page",
                page.width, page.height
            )));
        }
        let left_indent = (page.width - box_size * columns as f32) / 2.0;
        Ok(Self {
            page,
            box_size,
            columns,
            rows,
            left_indent,
            top_indent,
        })
    }

    /// A4 with 6.5cm cards and a 0.8cm top indent.
    pub fn default_a4() -> Result<Self, AppError> {
        Self::new(PageSize::A4, 6.5 * POINTS_PER_CM, 0.8 * POINTS_PER_CM)
    }

    pub fn per_page(&self) -> usize {
        self.columns * self.rows
    }

    /// Bottom-left corner of the card at deck position `index`.
    pub fn origin(&self, index: usize, order: ColumnOrder) -> (f32, f32) {
        let slot = index % self.per_page();
        let column = match order {
            ColumnOrder::LeftToRight => slot % self.columns,
            ColumnOrder::Mirrored => self.columns - 1 - slot % self.columns,
        };
        let row = slot / self.columns;

        let x = self.left_indent + column as f32 * self.box_size;
        let y = self.page.height - self.top_indent - (row + 1) as f32 * self.box_size;
        (x, y)
    }

    /// The full square occupied by the card at `index`.
    pub fn cell(&self, index: usize, order: ColumnOrder) -> Region {
        let (x, y) = self.origin(index, order);
        Region::new(x, y, self.box_size, self.box_size)
    }
}
