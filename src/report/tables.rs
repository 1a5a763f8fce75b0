//! Console tables for dataset statistics and final results

use crate::data::SplitStats;
use crate::metrics::FinalEvaluation;

/// Render an ASCII table with a header row
fn render_table(title: Option<&str>, headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let separator = {
        let mut s = String::from("+");
        for w in &widths {
            s.push_str(&"-".repeat(w + 2));
            s.push('+');
        }
        s.push('\n');
        s
    };

    let render_row = |cells: &[String]| -> String {
        let mut s = String::from("|");
        for (cell, w) in cells.iter().zip(widths.iter()) {
            s.push_str(&format!(" {:<width$} |", cell, width = w));
        }
        s.push('\n');
        s
    };

    let mut out = String::new();
    if let Some(title) = title {
        out.push_str(title);
        out.push('\n');
    }
    out.push_str(&separator);
    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    out.push_str(&render_row(&header_cells));
    out.push_str(&separator);
    for row in rows {
        out.push_str(&render_row(row));
    }
    out.push_str(&separator);
    out
}

/// Dataset statistics for the complete dataset and both splits
pub fn dataset_stats_table(complete: &SplitStats, train: &SplitStats, test: &SplitStats) -> String {
    let row = |name: &str, stats: &SplitStats| -> Vec<String> {
        vec![
            name.to_string(),
            stats.rows.to_string(),
            stats.columns.to_string(),
            stats.frauds.to_string(),
            stats.non_frauds.to_string(),
            format!("{:.2}%", stats.fraud_pct()),
        ]
    };

    render_table(
        Some("Dataset Stats"),
        &[
            "Data",
            "Rows",
            "Columns",
            "Frauds",
            "Non-Frauds",
            "Fraud Percentage",
        ],
        &[
            row("Complete Dataset", complete),
            row("Train", train),
            row("Test", test),
        ],
    )
}

/// Final metric summary for the restored best model
pub fn results_table(evaluation: &FinalEvaluation) -> String {
    let rows = vec![
        vec!["Accuracy".to_string(), format!("{:.6}", evaluation.accuracy)],
        vec![
            "Precision".to_string(),
            format!("{:.6}", evaluation.precision),
        ],
        vec!["Recall".to_string(), format!("{:.6}", evaluation.recall)],
        vec!["F1 Score".to_string(), format!("{:.6}", evaluation.f1)],
        vec!["ROC AUC".to_string(), format!("{:.6}", evaluation.roc_auc)],
        vec![
            "AUCPR".to_string(),
            format!("{:.6}", evaluation.average_precision),
        ],
    ];

    render_table(Some("CNN Results"), &["Metric", "Value"], &rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(rows: usize, frauds: usize) -> SplitStats {
        SplitStats {
            rows,
            columns: 29,
            frauds,
            non_frauds: rows - frauds,
        }
    }

    #[test]
    fn test_dataset_stats_table_contents() {
        let table = dataset_stats_table(&stats(1000, 50), &stats(800, 40), &stats(200, 10));

        assert!(table.contains("Dataset Stats"));
        assert!(table.contains("Complete Dataset"));
        assert!(table.contains("1000"));
        assert!(table.contains("5.00%"));
        assert!(table.contains("Train"));
        assert!(table.contains("Test"));
    }

    #[test]
    fn test_results_table_contents() {
        let evaluation = FinalEvaluation::from_scores(vec![1.0, 0.0], vec![0.9, 0.1]);
        let table = results_table(&evaluation);

        assert!(table.contains("CNN Results"));
        assert!(table.contains("Accuracy"));
        assert!(table.contains("1.000000"));
        assert!(table.contains("ROC AUC"));
        assert!(table.contains("AUCPR"));
    }

    #[test]
    fn test_table_rows_are_aligned() {
        let table = dataset_stats_table(&stats(10, 1), &stats(8, 1), &stats(2, 0));
        let widths: Vec<usize> = table
            .lines()
            .skip(1) // title
            .map(|l| l.len())
            .collect();

        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }
}
