use eframe::egui::{self, RichText, Ui};

use crate::data::aggregate::SummaryMetrics;

// ---------------------------------------------------------------------------
// Metric cards
// ---------------------------------------------------------------------------

/// Render the four headline metrics side by side.
pub fn metric_cards(ui: &mut Ui, metrics: &SummaryMetrics) {
    let cards = [
        ("Salário médio", format_usd(metrics.average_salary)),
        ("Salário máximo", format_usd(metrics.max_salary)),
        ("Total de registros", format_thousands(metrics.total_records as u64)),
        ("Cargo mas frecuente", metrics.most_frequent_role.clone()),
    ];

    ui.columns(cards.len(), |columns| {
        for (ui, (label, value)) in columns.iter_mut().zip(cards) {
            egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(label).weak());
                ui.label(RichText::new(value).size(26.0).strong());
            });
        }
    });
}

/// `$123,457` – rounded to whole dollars.
pub fn format_usd(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", format_thousands(rounded.abs() as u64))
}

/// `1234567` → `1,234,567`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separators() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn usd_rounds_to_whole_dollars() {
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(123_456.6), "$123,457");
        assert_eq!(format_usd(-1500.0), "-$1,500");
    }
}
