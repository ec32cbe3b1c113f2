//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout areas
pub struct MainLayout {
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Calculate main screen layout: navigation header, screen body, footer
pub fn calculate_main_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    MainLayout {
        header: chunks[0],
        body: chunks[1],
        footer: chunks[2],
    }
}

/// Split a row into `count` equal-width cards
pub fn card_row(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let constraints: Vec<Constraint> = (0..count)
        .map(|_| Constraint::Ratio(1, count as u32))
        .collect();
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area)
        .to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_is_clamped() {
        let area = Rect::new(0, 0, 30, 10);
        let popup = centered_popup(area, 40, 7);
        assert_eq!(popup.width, 30);
        assert_eq!(popup.y, 1);
    }

    #[test]
    fn test_main_layout_reserves_header_and_footer() {
        let layout = calculate_main_layout(Rect::new(0, 0, 100, 40));
        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.footer.height, 3);
        assert_eq!(layout.body.height, 34);
    }

    #[test]
    fn test_card_row_splits_evenly() {
        let cards = card_row(Rect::new(0, 0, 120, 5), 6);
        assert_eq!(cards.len(), 6);
        assert!(cards.iter().all(|c| c.width == 20));
    }
}
