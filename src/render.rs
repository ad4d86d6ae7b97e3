use crate::components::google_calendar::time::format_event_start;
use crate::components::google_calendar::CalendarEvent;
use unicode_width::UnicodeWidthStr;

/// Box-drawn table with a header row and a rule between rows
#[derive(Debug, Clone, Default)]
pub struct Table {
    head: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(head: impl IntoIterator<Item = S>) -> Self {
        Self {
            head: head.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row. Missing cells render empty, extra cells are dropped.
    pub fn push_row<S: Into<String>>(&mut self, row: impl IntoIterator<Item = S>) {
        let mut row: Vec<String> = row.into_iter().map(Into::into).collect();
        row.resize(self.head.len(), String::new());
        self.rows.push(row);
    }

    fn column_widths(&self) -> Vec<usize> {
        self.head
            .iter()
            .enumerate()
            .map(|(i, head)| {
                self.rows
                    .iter()
                    .map(|row| row[i].width())
                    .chain(std::iter::once(head.width()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let mut lines = Vec::with_capacity(self.rows.len() * 2 + 3);

        lines.push(rule(&widths, '┌', '┬', '┐'));
        lines.push(line(&self.head, &widths));
        for row in &self.rows {
            lines.push(rule(&widths, '├', '┼', '┤'));
            lines.push(line(row, &widths));
        }
        lines.push(rule(&widths, '└', '┴', '┘'));

        lines.join("\n")
    }
}

fn rule(widths: &[usize], left: char, mid: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}", left, segments.join(&mid.to_string()), right)
}

fn line(cells: &[String], widths: &[usize]) -> String {
    let cells: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!(" {}{} ", cell, " ".repeat(width - cell.width())))
        .collect();
    format!("│{}│", cells.join("│"))
}

/// Single-cell box around a line of text
pub fn panel(text: &str) -> String {
    let bar = "─".repeat(text.width() + 2);
    format!("┌{bar}┐\n│ {text} │\n└{bar}┘")
}

/// Shown when a listing comes back empty
pub fn no_events_panel() -> String {
    panel(&t!("no_events"))
}

/// Table of listed events: sequence number, id, start and summary
pub fn event_table(events: &[CalendarEvent], timezone: &str) -> String {
    let mut table = Table::new([
        t!("table_number"),
        t!("table_event_id"),
        t!("table_date"),
        t!("table_schedule"),
    ]);

    for (index, event) in events.iter().enumerate() {
        table.push_row([
            (index + 1).to_string(),
            event.id.clone(),
            format_event_start(event, timezone),
            event.summary.clone().unwrap_or_default(),
        ]);
    }

    table.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::google_calendar::EventDateTime;

    #[test]
    fn test_panel_matches_fixed_layout() {
        assert_eq!(
            no_events_panel(),
            "┌───────────────────────────┐\n\
             │ No Event. Take a Rest! 💐 │\n\
             └───────────────────────────┘"
        );
    }

    #[test]
    fn test_table_layout() {
        let mut table = Table::new(["No.", "Name"]);
        table.push_row(["1", "Standup"]);
        table.push_row(["2", "会議"]);

        assert_eq!(
            table.render(),
            "┌─────┬─────────┐\n\
             │ No. │ Name    │\n\
             ├─────┼─────────┤\n\
             │ 1   │ Standup │\n\
             ├─────┼─────────┤\n\
             │ 2   │ 会議    │\n\
             └─────┴─────────┘"
        );
    }

    #[test]
    fn test_short_rows_are_padded() {
        let mut table = Table::new(["A", "B"]);
        table.push_row(["x"]);

        assert!(table.render().contains("│ x │   │"));
    }

    #[test]
    fn test_event_table_columns() {
        let events = vec![CalendarEvent {
            id: "abc123".to_string(),
            summary: Some("Team Sync".to_string()),
            start: Some(EventDateTime::timed("2024-01-01T09:00:00Z", "UTC")),
            ..Default::default()
        }];

        let rendered = event_table(&events, "UTC");

        assert!(rendered.contains("│ No. │ Event Id │ Date             │ Schedule  │"));
        assert!(rendered.contains("│ 1   │ abc123   │ 2024-01-01 09:00 │ Team Sync │"));
    }
}
