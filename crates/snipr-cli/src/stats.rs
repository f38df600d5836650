use snipr_generate::LengthStats;

/// Statistics block printed by `--stats`. Min, max and average are left out
/// for an empty list.
pub fn render_stats(stats: &LengthStats) -> String {
    let mut out = String::from("=== Statistics ===\n");
    out.push_str(&format!("Total passwords generated: {}\n", stats.count));
    if let (Some(min), Some(max), Some(average)) = (stats.min, stats.max, stats.average) {
        out.push_str(&format!("Min length: {min}\n"));
        out.push_str(&format!("Max length: {max}\n"));
        out.push_str(&format!("Average length: {average:.2}\n"));
    }
    out
}
