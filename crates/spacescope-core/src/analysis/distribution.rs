/// Size distribution -- the ranked, coloured slices of the pie chart.
///
/// Weights come from each entry's formatted size string, so an entry whose
/// size text does not parse still appears in the table but weighs nothing
/// here. Output is fully determined by the input order and sizes: colours
/// follow rank, never identity.
use crate::model::size::parse_size;
use crate::model::{Entry, EntryKind};
use std::path::PathBuf;

/// Entries shown individually before the rest is grouped.
pub const TOP_SLICES: usize = 9;

/// Angle of the first slice's leading edge (12 o'clock), in degrees.
pub const START_ANGLE: f64 = -90.0;

/// Slice colours by position, as RGB.
pub const PALETTE: [[u8; 3]; 10] = [
    [0x89, 0xb4, 0xfa],
    [0xa6, 0xe3, 0xa1],
    [0xf9, 0xe2, 0xaf],
    [0xf3, 0x8b, 0xa8],
    [0xcb, 0xa6, 0xf7],
    [0xfa, 0xb3, 0x87],
    [0x94, 0xe2, 0xd5],
    [0xf5, 0xc2, 0xe7],
    [0x74, 0xc7, 0xec],
    [0xb4, 0xbe, 0xfe],
];

/// What a slice stands for.
#[derive(Debug, Clone, PartialEq)]
pub enum SliceSource {
    /// A real listing entry.
    Entry {
        id: String,
        path: PathBuf,
        kind: EntryKind,
    },
    /// The synthetic group of everything past the top entries.
    Others { count: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub name: String,
    pub value: u64,
    /// 0.0 to 100.0.
    pub percentage: f64,
    pub color: [u8; 3],
    /// Degrees, clockwise from 3 o'clock; the first slice starts at -90.
    pub start_angle: f64,
    pub end_angle: f64,
    pub source: SliceSource,
}

impl PieSlice {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn is_others(&self) -> bool {
        matches!(self.source, SliceSource::Others { .. })
    }
}

/// Build the pie for `entries`. Empty when the total weight is zero.
pub fn distribution(entries: &[Entry]) -> Vec<PieSlice> {
    let mut weighted: Vec<(&Entry, u64)> = entries
        .iter()
        .map(|e| (e, parse_size(&e.size)))
        .collect();
    // Weights saturate at u64::MAX, so sums are carried wider.
    let total: u128 = weighted.iter().map(|(_, w)| u128::from(*w)).sum();
    if total == 0 {
        return Vec::new();
    }

    // Stable: equal weights keep listing order.
    weighted.sort_by(|a, b| b.1.cmp(&a.1));

    let split = weighted.len().min(TOP_SLICES);
    let (top, rest) = weighted.split_at(split);

    let mut parts: Vec<(String, u64, SliceSource)> = top
        .iter()
        .map(|(e, w)| {
            (
                e.name.to_string(),
                *w,
                SliceSource::Entry {
                    id: e.id.clone(),
                    path: e.path.clone(),
                    kind: e.kind,
                },
            )
        })
        .collect();

    let rest_total: u128 = rest.iter().map(|(_, w)| u128::from(*w)).sum();
    if rest_total > 0 {
        parts.push((
            format!("Others ({} items)", rest.len()),
            u64::try_from(rest_total).unwrap_or(u64::MAX),
            SliceSource::Others { count: rest.len() },
        ));
    }

    let mut cumulative: u128 = 0;
    parts
        .into_iter()
        .enumerate()
        .map(|(i, (name, value, source))| {
            let start_angle = angle_at(cumulative, total);
            cumulative += u128::from(value);
            PieSlice {
                name,
                value,
                percentage: value as f64 / total as f64 * 100.0,
                color: PALETTE[i % PALETTE.len()],
                start_angle,
                end_angle: angle_at(cumulative, total),
                source,
            }
        })
        .collect()
}

/// Cursor position after `cumulative` of `total`. Computed from the running
/// sum so the last edge lands on exactly `START_ANGLE + 360`.
#[inline]
fn angle_at(cumulative: u128, total: u128) -> f64 {
    START_ANGLE + 360.0 * (cumulative as f64 / total as f64)
}

/// Index of the slice covering `angle` (degrees, any winding).
pub fn slice_at_angle(slices: &[PieSlice], angle: f64) -> Option<usize> {
    let normalized = (angle - START_ANGLE).rem_euclid(360.0) + START_ANGLE;
    slices
        .iter()
        .position(|s| s.start_angle <= normalized && normalized < s.end_angle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized(name: &str, bytes: u64) -> Entry {
        Entry::file(format!("/r/{name}"), bytes)
    }

    /// 12 distinct sizes summing to 1000.
    fn twelve() -> Vec<Entry> {
        let sizes = [200, 150, 120, 100, 90, 80, 70, 60, 50, 40, 25, 15];
        assert_eq!(sizes.iter().sum::<u64>(), 1000);
        sizes
            .iter()
            .enumerate()
            .map(|(i, &s)| sized(&format!("e{i}"), s))
            .collect()
    }

    #[test]
    fn test_groups_tail_into_others() {
        let slices = distribution(&twelve());
        assert_eq!(slices.len(), 10);

        let others = &slices[9];
        assert_eq!(others.name, "Others (3 items)");
        assert_eq!(others.value, 40 + 25 + 15);
        assert_eq!(others.source, SliceSource::Others { count: 3 });
        assert!(others.is_others());
    }

    #[test]
    fn test_angles_cover_full_circle() {
        let slices = distribution(&twelve());
        assert_eq!(slices[0].start_angle, -90.0);
        assert_eq!(slices.last().unwrap().end_angle, 270.0);

        let spans: f64 = slices.iter().map(PieSlice::span).sum();
        assert!((spans - 360.0).abs() < 1e-9);
        for pair in slices.windows(2) {
            assert_eq!(pair[0].end_angle, pair[1].start_angle);
        }
    }

    #[test]
    fn test_percentages_and_colours() {
        let slices = distribution(&twelve());
        assert!((slices[0].percentage - 20.0).abs() < 1e-9);
        for (i, s) in slices.iter().enumerate() {
            assert_eq!(s.color, PALETTE[i]);
        }
    }

    #[test]
    fn test_zero_total_is_empty() {
        let entries = vec![sized("a", 0), sized("b", 0)];
        assert!(distribution(&entries).is_empty());
        assert!(distribution(&[]).is_empty());
    }

    /// Sizes near the top of the range must not overflow the total.
    #[test]
    fn test_huge_sizes_stay_finite() {
        let mut a = sized("a", 0);
        a.size = "9000000 TB".into();
        let mut b = sized("b", 0);
        b.size = "9000000 TB".into();

        let slices = distribution(&[a, b]);
        assert_eq!(slices.len(), 2);
        assert!((slices[0].percentage - 50.0).abs() < 1e-9);
        assert!((slices[0].end_angle - 90.0).abs() < 1e-9);
        assert_eq!(slices[1].end_angle, START_ANGLE + 360.0);
    }

    #[test]
    fn test_resorts_input_and_is_stable() {
        let entries = vec![sized("small", 10), sized("x", 50), sized("y", 50)];
        let names: Vec<String> = distribution(&entries).into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["x", "y", "small"]);
    }

    #[test]
    fn test_weights_come_from_size_text() {
        let mut odd = sized("odd", 500);
        odd.size = "garbage".to_string();
        let entries = vec![odd, sized("ok", 100)];
        let slices = distribution(&entries);

        // Unparsable size still gets a slice, with zero span.
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].name, "ok");
        assert_eq!(slices[1].value, 0);
        assert_eq!(slices[1].span(), 0.0);
    }

    #[test]
    fn test_zero_sized_tail_adds_no_group() {
        let mut entries: Vec<Entry> = (0..9).map(|i| sized(&format!("e{i}"), 10)).collect();
        entries.push(sized("empty1", 0));
        entries.push(sized("empty2", 0));
        let slices = distribution(&entries);
        assert_eq!(slices.len(), 9);
        assert!(!slices.iter().any(PieSlice::is_others));
        assert_eq!(slices.last().unwrap().end_angle, 270.0);
    }

    #[test]
    fn test_slice_at_angle() {
        let entries = vec![sized("a", 75), sized("b", 25)];
        let slices = distribution(&entries);
        // a: -90..180, b: 180..270
        assert_eq!(slice_at_angle(&slices, -90.0), Some(0));
        assert_eq!(slice_at_angle(&slices, 90.0), Some(0));
        assert_eq!(slice_at_angle(&slices, 200.0), Some(1));
        // -135 degrees wraps around to 225.
        assert_eq!(slice_at_angle(&slices, -135.0), Some(1));
        assert_eq!(slice_at_angle(&[], 0.0), None);
    }
}
