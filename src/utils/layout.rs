use ratatui::prelude::*;

/// Split `area` into header, content and footer rows.
pub fn create_standard_layout(area: Rect, header_height: u16, footer_height: u16) -> (Rect, Rect, Rect) {
    let [header, content, footer] = Layout::vertical([
        Constraint::Length(header_height),
        Constraint::Min(0),
        Constraint::Length(footer_height),
    ])
    .areas(area);
    (header, content, footer)
}

/// A `width` x `height` rect centered in `area`, shrunk to fit.
pub fn center_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_layout_heights() {
        let (header, content, footer) = create_standard_layout(Rect::new(0, 0, 80, 24), 3, 2);
        assert_eq!(header.height, 3);
        assert_eq!(footer.height, 2);
        assert_eq!(content.height, 19);
        assert_eq!(footer.y, 22);
    }

    #[test]
    fn test_center_area() {
        let area = Rect::new(10, 5, 40, 20);
        assert_eq!(center_area(area, 20, 10), Rect::new(20, 10, 20, 10));
        // Larger than the area: clamp
        assert_eq!(center_area(area, 100, 100), area);
    }
}
