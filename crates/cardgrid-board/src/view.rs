#![forbid(unsafe_code)]

//! Renderer adapter: pairs the windower's slots with item ids.
//!
//! [`GridView`] owns the scroll state and current grid geometry. The
//! surrounding UI reads [`GridView::visible_items`] to draw cards,
//! [`GridView::content_props`] to size the scrollable content, and
//! [`GridView::container_props`] to position the scroll container. It reports
//! scroll changes through [`GridView::set_scroll_offset`].

use cardgrid_core::geometry::Position;
use cardgrid_layout::{
    GridLayout, ScrollAlign, VirtualItem, Window, WindowParams, derive_layout, max_scroll_offset,
    row_offset,
};

use crate::id::ItemId;

/// One card to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleItem {
    pub id: ItemId,
    pub layout: VirtualItem,
}

/// Scroll container wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerProps {
    /// Scroll position to apply.
    pub scroll_offset: u64,
    /// Container height in pixels.
    pub height: u32,
}

/// Scrollable content sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentProps {
    /// Full content height, for the scrollbar.
    pub total_height: u64,
}

/// Windowed grid view.
#[derive(Debug, Clone)]
pub struct GridView {
    layout: GridLayout,
    overscan: u32,
    container_width: u32,
    viewport_height: u32,
    scroll_offset: u64,
    item_count: usize,
}

impl Default for GridView {
    fn default() -> Self {
        Self::new(derive_layout(0), 1)
    }
}

impl GridView {
    /// View with a layout and overscan, scrolled to the top, zero-sized.
    #[must_use]
    pub fn new(layout: GridLayout, overscan: u32) -> Self {
        Self {
            layout,
            overscan,
            container_width: 0,
            viewport_height: 0,
            scroll_offset: 0,
            item_count: 0,
        }
    }

    #[must_use]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    #[must_use]
    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    #[must_use]
    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    #[must_use]
    pub fn container_width(&self) -> u32 {
        self.container_width
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Replace the layout. Returns whether row/column placement changed.
    pub fn set_layout(&mut self, layout: GridLayout) -> bool {
        let invalidated = self.layout.invalidates(&layout);
        self.layout = layout;
        self.clamp_scroll();
        invalidated
    }

    pub fn set_overscan(&mut self, overscan: u32) {
        self.overscan = overscan;
    }

    /// Update container width and viewport (scroll container) height.
    pub fn set_viewport(&mut self, container_width: u32, viewport_height: u32) {
        self.container_width = container_width;
        self.viewport_height = viewport_height;
        self.clamp_scroll();
    }

    /// Update the number of items in the display order.
    pub fn set_item_count(&mut self, item_count: usize) {
        self.item_count = item_count;
        self.clamp_scroll();
    }

    /// Apply a scroll offset, clamped to `[0, max_scroll]`. Returns whether
    /// the offset changed.
    pub fn set_scroll_offset(&mut self, offset: i64) -> bool {
        let clamped = (offset.max(0) as u64).min(self.max_scroll());
        let changed = clamped != self.scroll_offset;
        self.scroll_offset = clamped;
        changed
    }

    /// Scroll so `row` is visible with the given alignment. Returns the new
    /// offset.
    pub fn scroll_to_row(&mut self, row: usize, align: ScrollAlign) -> u64 {
        let target = row_offset(row, self.layout.row_height(), self.viewport_height, align);
        self.scroll_offset = target.min(self.max_scroll());
        self.scroll_offset
    }

    /// Windowing inputs for the current state.
    #[must_use]
    pub fn params(&self) -> WindowParams {
        WindowParams {
            scroll_offset: i64::try_from(self.scroll_offset).unwrap_or(i64::MAX),
            viewport_height: self.viewport_height,
            item_height: self.layout.item_height,
            items_per_row: self.layout.columns(),
            overscan: self.overscan,
            item_count: self.item_count,
            row_gap: self.layout.row_gap,
        }
    }

    /// Recompute the window.
    #[must_use]
    pub fn window(&self) -> Window {
        self.params().compute()
    }

    /// Cards to draw, paired with their ids from `order`.
    ///
    /// `order` must be the display order this view's item count was set
    /// from; slots beyond its end are skipped.
    #[must_use]
    pub fn visible_items(&self, order: &[ItemId]) -> Vec<VisibleItem> {
        let window = WindowParams {
            item_count: order.len().min(self.item_count),
            ..self.params()
        }
        .compute();
        window
            .items
            .into_iter()
            .map(|layout| VisibleItem {
                id: order[layout.index].clone(),
                layout,
            })
            .collect()
    }

    /// Full content height.
    #[must_use]
    pub fn total_height(&self) -> u64 {
        (self.item_count.div_ceil(self.layout.columns() as usize) as u64)
            .saturating_mul(self.layout.row_height())
    }

    #[must_use]
    pub fn container_props(&self) -> ContainerProps {
        ContainerProps {
            scroll_offset: self.scroll_offset,
            height: self.viewport_height,
        }
    }

    #[must_use]
    pub fn content_props(&self) -> ContentProps {
        ContentProps {
            total_height: self.total_height(),
        }
    }

    /// Display index under a viewport-relative pointer position.
    #[must_use]
    pub fn index_at(&self, pos: Position) -> Option<usize> {
        let content_y = i64::from(pos.y).saturating_add(i64::try_from(self.scroll_offset).ok()?);
        let content = Position::new(pos.x, i32::try_from(content_y).ok()?);
        let (row, column) = self.layout.slot_at(content, self.container_width)?;
        let index = row
            .checked_mul(self.layout.columns() as usize)?
            .checked_add(column as usize)?;
        (index < self.item_count).then_some(index)
    }

    /// Id under a viewport-relative pointer position.
    #[must_use]
    pub fn hit_test<'a>(&self, pos: Position, order: &'a [ItemId]) -> Option<&'a ItemId> {
        self.index_at(pos).and_then(|i| order.get(i))
    }

    fn max_scroll(&self) -> u64 {
        max_scroll_offset(self.total_height(), self.viewport_height)
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<ItemId> {
        (0..n).map(|i| ItemId::new(format!("i{i}"))).collect()
    }

    fn view(width: u32, height: u32, count: usize) -> GridView {
        let mut v = GridView::new(derive_layout(width), 1);
        v.set_viewport(width, height);
        v.set_item_count(count);
        v
    }

    #[test]
    fn pairs_window_with_ids() {
        let order = ids(5);
        let v = view(1000, 600, 5);
        let visible = v.visible_items(&order);
        assert_eq!(visible.len(), 5);
        assert_eq!(visible[4].id, order[4]);
        assert_eq!(visible[4].layout.row, 1);
        assert_eq!(visible[4].layout.column, 1);
        assert_eq!(v.total_height(), 592);
        assert_eq!(v.content_props().total_height, 592);
    }

    #[test]
    fn scroll_offset_is_clamped() {
        let mut v = view(1000, 600, 30); // 10 rows * 296 = 2960
        assert!(!v.set_scroll_offset(-50));
        assert_eq!(v.scroll_offset(), 0);
        assert!(v.set_scroll_offset(100_000));
        assert_eq!(v.scroll_offset(), 2360);
        assert_eq!(v.container_props().scroll_offset, 2360);
    }

    #[test]
    fn shrinking_content_pulls_scroll_back() {
        let mut v = view(1000, 600, 30);
        v.set_scroll_offset(2000);
        v.set_item_count(9);
        assert_eq!(v.scroll_offset(), 888 - 600);
    }

    #[test]
    fn scroll_to_row_aligns_and_clamps() {
        let mut v = view(1000, 600, 300);
        assert_eq!(v.scroll_to_row(10, ScrollAlign::Start), 2960);
        assert_eq!(v.scroll_to_row(10, ScrollAlign::Center), 2960 + 148 - 300);
        assert_eq!(v.scroll_to_row(1_000, ScrollAlign::Start), 100 * 296 - 600);
    }

    #[test]
    fn layout_change_reports_invalidation() {
        let mut v = view(1000, 600, 10);
        assert!(!v.set_layout(derive_layout(1200)));
        assert!(v.set_layout(derive_layout(700)));
        assert_eq!(v.layout().items_per_row, 2);
    }

    #[test]
    fn hit_test_accounts_for_scroll() {
        let order = ids(30);
        let mut v = view(900, 600, 30);
        assert_eq!(v.hit_test(Position::new(10, 10), &order), Some(&order[0]));
        assert_eq!(v.hit_test(Position::new(450, 300), &order), Some(&order[4]));
        v.set_scroll_offset(296);
        assert_eq!(v.hit_test(Position::new(10, 10), &order), Some(&order[3]));
    }

    #[test]
    fn hit_test_misses_empty_slots_and_outside() {
        let order = ids(4);
        let v = view(900, 600, 4);
        assert_eq!(v.hit_test(Position::new(850, 300), &order), None);
        assert_eq!(v.hit_test(Position::new(-5, 10), &order), None);
        assert_eq!(v.hit_test(Position::new(950, 10), &order), None);
    }

    #[test]
    fn visible_items_tolerates_short_order() {
        let order = ids(2);
        let v = view(1000, 600, 5);
        assert_eq!(v.visible_items(&order).len(), 2);
    }

    #[test]
    fn empty_view() {
        let v = GridView::default();
        assert!(v.visible_items(&[]).is_empty());
        assert_eq!(v.total_height(), 0);
        assert_eq!(v.container_props().height, 0);
    }
}
