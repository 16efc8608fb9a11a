use std::f32::consts::TAU;

use eframe::egui::{Align2, Color32, FontId, Mesh, Pos2, RichText, Sense, Shape, Ui, Vec2};
use egui_plot::{Bar, BarChart, GridMark, Plot};

use crate::color::{generate_palette, red_yellow_green};
use crate::config::HIGHLIGHT_ROLE;
use crate::data::aggregate::{CountrySalary, RemoteShare, RoleSalary, SalaryHistogram};
use crate::ui::metrics::format_usd;

const CHART_HEIGHT: f32 = 320.0;
const BAR_COLOR: Color32 = Color32::from_rgb(0x63, 0x6e, 0xfa);
const WARNING_COLOR: Color32 = Color32::from_rgb(0xe6, 0xa2, 0x3c);

fn chart_title(ui: &mut Ui, title: &str) {
    ui.label(RichText::new(title).size(16.0).strong());
}

fn no_data(ui: &mut Ui, what: &str) {
    ui.label(
        RichText::new(format!("⚠ Ningun dato para exibir en el gráfico de {what}."))
            .color(WARNING_COLOR),
    );
}

/// Y-axis labels for a horizontal category chart: integer ticks map to names.
fn category_axis(labels: Vec<String>) -> impl Fn(GridMark, &std::ops::RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let v = mark.value;
        if v.fract().abs() > f64::EPSILON || v < 0.0 {
            return String::new();
        }
        labels.get(v as usize).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Top-paid roles
// ---------------------------------------------------------------------------

/// Horizontal bars, lowest of the top roles at the bottom.
pub fn top_roles_chart(ui: &mut Ui, roles: Option<&[RoleSalary]>) {
    chart_title(ui, "Top 10 puestos por salario medio");
    let Some(roles) = roles else {
        no_data(ui, "cargos");
        return;
    };

    let bars: Vec<Bar> = roles
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Bar::new(i as f64, r.mean_salary)
                .width(0.7)
                .name(&r.job_title)
                .fill(BAR_COLOR)
        })
        .collect();
    let labels = roles.iter().map(|r| r.job_title.clone()).collect();

    Plot::new("top_roles_plot")
        .height(CHART_HEIGHT)
        .x_axis_label("Media salarial anual (USD)")
        .y_axis_formatter(category_axis(labels))
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .include_x(0.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().color(BAR_COLOR));
        });
}

// ---------------------------------------------------------------------------
// Salary distribution
// ---------------------------------------------------------------------------

pub fn distribution_chart(ui: &mut Ui, histogram: Option<&SalaryHistogram>) {
    chart_title(ui, "Distribución de salarios anuales");
    let Some(histogram) = histogram else {
        no_data(ui, "distribución");
        return;
    };

    let bars: Vec<Bar> = histogram
        .counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let (lo, hi) = histogram.bin_range(i);
            Bar::new(histogram.bin_center(i), count as f64)
                .width(histogram.bin_width)
                .name(format!("{} – {}", format_usd(lo), format_usd(hi)))
                .fill(BAR_COLOR)
        })
        .collect();

    Plot::new("distribution_plot")
        .height(CHART_HEIGHT)
        .x_axis_label("Rango salarial (USD)")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR));
        });
}

// ---------------------------------------------------------------------------
// Remote-work split (donut)
// ---------------------------------------------------------------------------

pub fn remote_chart(ui: &mut Ui, shares: Option<&[RemoteShare]>) {
    chart_title(ui, "Proporción de los tipos de empleo");
    let Some(shares) = shares else {
        no_data(ui, "tipos de empleo");
        return;
    };

    let colours = generate_palette(shares.len());
    let side = ui.available_width().min(CHART_HEIGHT);
    let (rect, _) = ui.allocate_exact_size(Vec2::splat(side), Sense::hover());
    let center = rect.center();
    let outer = side * 0.45;
    let inner = outer * 0.5;

    let total: usize = shares.iter().map(|s| s.count).sum();
    let painter = ui.painter_at(rect);
    let mut start = -TAU / 4.0;

    for (share, &colour) in shares.iter().zip(&colours) {
        let sweep = TAU * share.count as f32 / total.max(1) as f32;
        painter.add(Shape::mesh(ring_segment(center, inner, outer, start, sweep, colour)));

        if share.percent >= 4.0 {
            let mid = start + sweep / 2.0;
            let r = (inner + outer) / 2.0;
            painter.text(
                center + Vec2::angled(mid) * r,
                Align2::CENTER_CENTER,
                format!("{:.1}%\n{}", share.percent, share.remote_type),
                FontId::proportional(12.0),
                Color32::WHITE,
            );
        }
        start += sweep;
    }

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (share, &colour) in shares.iter().zip(&colours) {
            ui.label(RichText::new("■").color(colour));
            ui.label(format!("{} ({})", share.remote_type, share.count));
        }
    });
}

/// Filled annulus sector from `start` sweeping `sweep` radians.
fn ring_segment(center: Pos2, inner: f32, outer: f32, start: f32, sweep: f32, colour: Color32) -> Mesh {
    let steps = ((sweep / (TAU / 128.0)).ceil() as u32).max(1);
    let mut mesh = Mesh::default();

    for i in 0..=steps {
        let angle = start + sweep * i as f32 / steps as f32;
        let dir = Vec2::angled(angle);
        mesh.colored_vertex(center + dir * inner, colour);
        mesh.colored_vertex(center + dir * outer, colour);
    }
    for i in 0..steps {
        let base = i * 2;
        mesh.add_triangle(base, base + 1, base + 2);
        mesh.add_triangle(base + 1, base + 3, base + 2);
    }
    mesh
}

// ---------------------------------------------------------------------------
// Mean salary per country
// ---------------------------------------------------------------------------

/// Per-country means as bars coloured on a red-yellow-green scale.
pub fn country_chart(ui: &mut Ui, countries: Option<&[CountrySalary]>) {
    chart_title(ui, &format!("Salario medio de {HIGHLIGHT_ROLE} por país"));
    let Some(countries) = countries else {
        no_data(ui, "países");
        return;
    };
    if countries.is_empty() {
        ui.label(RichText::new(format!("Sin registros de {HIGHLIGHT_ROLE} en la selección.")).weak());
        return;
    }

    let (min, max) = countries
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
            (lo.min(c.mean_salary), hi.max(c.mean_salary))
        });

    let bars: Vec<Bar> = countries
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Bar::new(i as f64, c.mean_salary)
                .width(0.8)
                .name(&c.iso3)
                .fill(red_yellow_green(c.mean_salary, min, max))
        })
        .collect();
    let labels = countries.iter().map(|c| c.iso3.clone()).collect();

    Plot::new("country_plot")
        .height(CHART_HEIGHT)
        .x_axis_label("Salario medio (USD)")
        .y_axis_formatter(category_axis(labels))
        .allow_boxed_zoom(true)
        .include_x(0.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });

    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new(format_usd(min)).color(red_yellow_green(min, min, max)));
        ui.label("→");
        ui.label(RichText::new(format_usd(max)).color(red_yellow_green(max, min, max)));
    });
}

/// Two-up row of charts with equal width.
pub fn chart_row(ui: &mut Ui, left: impl FnOnce(&mut Ui), right: impl FnOnce(&mut Ui)) {
    ui.columns(2, |columns| {
        left(&mut columns[0]);
        right(&mut columns[1]);
    });
    ui.add_space(12.0);
    ui.separator();
}
