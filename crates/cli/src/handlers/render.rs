//! Plain-text rendering of results for the terminal.

use whenmeet_core::{
    aggregate::{AvailabilityGrid, RankedSlot},
    selection::ViewMode,
};

/// Heat-map with one column per candidate date. Each cell shows the vote
/// count; cells in the viewer's own vote carry a `*`.
pub fn grid(grid: &AvailabilityGrid, mode: ViewMode, viewer: Option<&str>) -> String {
    let mut out = format!("{}\n", grid.title);

    out.push_str(&match (mode, viewer) {
        (ViewMode::Selecting, Some(name)) => {
            format!("{} has not voted yet\n", name.trim())
        }
        (ViewMode::Selecting, None) => "Pass --name to see your own selection\n".to_string(),
        (_, Some(name)) => format!("Showing results, * marks {}'s slots\n", name.trim()),
        (_, None) => "Showing results\n".to_string(),
    });

    out.push_str("      ");
    for date in &grid.dates {
        out.push_str(&format!(" {:>6}", date.format("%m-%d")));
    }
    out.push('\n');

    for row in &grid.rows {
        out.push_str(&format!("{:02}:00 ", row.hour));
        for cell in &row.cells {
            let marker = if cell.mine { '*' } else { ' ' };
            let count = if cell.count == 0 {
                ".".to_string()
            } else {
                cell.count.to_string()
            };
            out.push_str(&format!(" {:>5}{}", count, marker));
        }
        out.push('\n');
    }

    if grid.participants.is_empty() {
        out.push_str("No responses yet");
    } else {
        out.push_str(&format!(
            "Responded ({}): {}",
            grid.total_votes,
            grid.participants.join(", ")
        ));
    }
    out
}

pub fn ranking(ranked: &[RankedSlot], total_votes: usize) -> String {
    if ranked.is_empty() {
        return "No slots have any votes yet".to_string();
    }

    ranked
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            format!(
                "{}. {}  {}/{} ({:.0}%)",
                i + 1,
                entry.slot,
                entry.count,
                total_votes,
                entry.intensity * 100.0
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
