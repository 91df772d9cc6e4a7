use eframe::egui;
use parking_lot::Mutex;
use shared::summary::split_variants;
use std::sync::Arc;
use std::time::Duration;

mod prompt;
mod state;

use prompt::Tone;
use state::{AppState, Toast};

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([800.0, 600.0]),
        vsync: true,
        ..Default::default()
    };
    eframe::run_native(
        "LinkedIn Summary Generator",
        options,
        Box::new(|_cc| {
            Box::new(SummaryApp {
                state: Arc::new(Mutex::new(
                    AppState::new().expect("failed to start async runtime"),
                )),
            })
        }),
    )
}

struct SummaryApp {
    state: Arc<Mutex<AppState>>,
}

impl eframe::App for SummaryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut s = self.state.lock();

        // Pull in anything the streaming task produced since last frame.
        s.poll_stream();

        if s.toast.as_ref().is_some_and(Toast::expired) {
            s.toast = None;
        }
        if s.generating || s.toast.is_some() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        egui::SidePanel::right("form_panel")
            .min_width(320.0)
            .show(ctx, |ui| draw_form(ui, &mut s));
        egui::CentralPanel::default().show(ctx, |ui| draw_results(ui, &mut s));
        draw_toast(ctx, &s);
    }
}

fn draw_form(ui: &mut egui::Ui, s: &mut AppState) {
    ui.add_space(12.0);
    ui.heading("Generate Summary");
    ui.add_space(8.0);

    ui.add(
        egui::TextEdit::multiline(&mut s.input_text)
            .hint_text("e.g. Software Developer")
            .desired_rows(3)
            .desired_width(f32::INFINITY),
    );
    ui.add_space(8.0);

    egui::ComboBox::from_label("Tone")
        .selected_text(s.tone.label())
        .show_ui(ui, |ui| {
            for tone in Tone::ALL {
                ui.selectable_value(&mut s.tone, tone, tone.label());
            }
        });
    ui.add_space(12.0);

    let can_submit = !s.input_text.trim().is_empty() && !s.generating;
    ui.horizontal(|ui| {
        if ui
            .add_enabled(can_submit, egui::Button::new("Generate Summary →"))
            .clicked()
        {
            s.start_generation();
        }
        if s.generating {
            ui.add(egui::Spinner::new());
        }
    });
}

fn draw_results(ui: &mut egui::Ui, s: &mut AppState) {
    ui.add_space(12.0);
    ui.vertical_centered(|ui| {
        ui.heading("LinkedIn Summary Generator");
        ui.label("Generate professional LinkedIn summaries with ease.");
    });

    if s.generated.is_empty() {
        return;
    }

    ui.add_space(16.0);
    ui.separator();
    let heading = ui.heading("Your Generated Summaries");
    if s.scroll_to_results {
        heading.scroll_to_me(Some(egui::Align::Min));
        s.scroll_to_results = false;
    }
    ui.label("Click to copy any summary to your clipboard.");
    ui.add_space(8.0);

    egui::ScrollArea::vertical().show(ui, |ui| {
        for variant in split_variants(&s.generated) {
            if variant.is_empty() {
                continue;
            }
            let card = egui::Frame::group(ui.style())
                .inner_margin(12.0)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(&variant);
                });
            if card
                .response
                .interact(egui::Sense::click())
                .on_hover_cursor(egui::CursorIcon::PointingHand)
                .clicked()
            {
                if copy_to_clipboard(&variant) {
                    s.toast = Some(Toast::new("Summary copied to clipboard"));
                } else {
                    s.toast = Some(Toast::new("Could not access the clipboard"));
                }
            }
            ui.add_space(8.0);
        }
    });
}

fn draw_toast(ctx: &egui::Context, s: &AppState) {
    let Some(toast) = &s.toast else { return };
    egui::Area::new(egui::Id::new("toast"))
        .anchor(egui::Align2::CENTER_TOP, [0.0, 16.0])
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.label(&toast.message);
            });
        });
}

fn copy_to_clipboard(text: &str) -> bool {
    let Ok(mut clipboard) = arboard::Clipboard::new() else {
        return false;
    };
    clipboard.set_text(text.to_string()).is_ok()
}
